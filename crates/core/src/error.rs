//! Error types for vector construction, access and unit conversion
//!
//! Every failure is detected locally and synchronously. Construction errors
//! prevent the vector from coming into existence; nothing is retried.

/// Errors raised by storage, vector and unit operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VectorError {
    /// Positional access outside `[0, size)`.
    #[error("Index {index} out of range for vector of size {size}")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Logical length of the vector
        size: usize,
    },

    /// A constructor that needs at least one element received none.
    #[error("Cannot construct a vector from empty input")]
    EmptyInput,

    /// The backing collection, or one of its elements, was absent.
    #[error("Missing input: {what}")]
    NullInput {
        /// Which argument or element was absent (e.g. `"values"`, `"values[3]"`)
        what: String,
    },

    /// Element-wise operation on vectors of different sizes.
    #[error("Vector length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Size of the receiver
        left: usize,
        /// Size of the operand
        right: usize,
    },

    /// Unit symbol belongs to a different unit family than the one requested.
    #[error("Unit '{symbol}' is a {found} unit, expected a {expected} unit")]
    IncompatibleUnit {
        /// Symbol that was looked up
        symbol: String,
        /// Family the caller asked for
        expected: &'static str,
        /// Family the symbol actually belongs to
        found: &'static str,
    },

    /// No registered unit family knows the symbol.
    #[error("Unknown unit symbol '{0}'")]
    UnknownUnit(String),

    /// `normalize` on a vector whose values sum to zero.
    #[error("Vector sum is zero; cannot normalize")]
    ZeroSum,
}

impl VectorError {
    /// Shorthand for a missing argument.
    pub(crate) fn null(what: impl Into<String>) -> Self {
        Self::NullInput { what: what.into() }
    }

    /// Check `index` against `size`.
    #[inline]
    pub(crate) fn check_index(index: usize, size: usize) -> Result<()> {
        if index < size {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, size })
        }
    }

    /// Check that two operands have the same logical length.
    #[inline]
    pub(crate) fn check_sizes(left: usize, right: usize) -> Result<()> {
        if left == right {
            Ok(())
        } else {
            Err(Self::LengthMismatch { left, right })
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VectorError>;

//! In-place writes and element-wise transforms
//!
//! Every write goes through [`MutableQuantityVector::storage_mut`], which
//! clones the storage first when an immutable vector (or another mutable one)
//! still shares it. Validation happens before that point, so a failed write
//! neither copies nor changes anything.
//!
//! Transforms act on SI magnitudes whatever the quantity: `sin` of a length
//! vector is the sine of its values in meters.

use super::QuantityVector;
use crate::error::{Result, VectorError};
use crate::quantity::DimensionlessUnit;
use crate::scalar::{Scalar, ScalarValue};
use crate::storage::{StorageKind, VectorStorage};
use crate::unit::Unit;
use std::collections::BTreeMap;
use std::ops::Deref;
use tracing::trace;

/// Vector of one physical quantity that can be changed in place.
///
/// Read access comes from the wrapped [`QuantityVector`] through `Deref`.
/// Mutators return `&mut Self` so calls can be chained.
#[derive(Debug, Clone)]
pub struct MutableQuantityVector<U: Unit, S: ScalarValue<Unit = U> = Scalar<U>> {
    inner: QuantityVector<U, S>,
}

/// Generates one transform per entry, each a thin wrapper over `assign`
macro_rules! unary_functions {
    ($($(#[$doc:meta])* $name:ident => $f:expr;)+) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self) -> &mut Self {
                self.assign($f)
            }
        )+
    };
}

impl<U: Unit, S: ScalarValue<Unit = U>> MutableQuantityVector<U, S> {
    /// Create a vector from values expressed in `unit`.
    ///
    /// # Errors
    ///
    /// [`VectorError::EmptyInput`] when `values` is empty
    pub fn new(values: &[f64], unit: U, kind: StorageKind) -> Result<Self> {
        QuantityVector::new(values, unit, kind).map(Self::from)
    }

    /// Create a vector from typed scalars; see [`QuantityVector::from_scalars`]
    ///
    /// # Errors
    ///
    /// [`VectorError::EmptyInput`] when `values` is empty
    pub fn from_scalars(values: &[S], kind: StorageKind) -> Result<Self> {
        QuantityVector::from_scalars(values, kind).map(Self::from)
    }

    /// Create a vector from a position→value map; see
    /// [`QuantityVector::from_sparse_map`]
    ///
    /// # Errors
    ///
    /// [`VectorError::EmptyInput`] when `length` is zero,
    /// [`VectorError::IndexOutOfRange`] for a key `>= length`
    pub fn from_sparse_map(
        values: &BTreeMap<usize, f64>,
        length: usize,
        unit: U,
        kind: StorageKind,
    ) -> Result<Self> {
        QuantityVector::from_sparse_map(values, length, unit, kind).map(Self::from)
    }

    /// Immutable sibling sharing this vector's storage. Later writes here
    /// clone first and leave the sibling untouched.
    pub fn immutable(&self) -> QuantityVector<U, S> {
        self.inner.clone()
    }

    /// Give up write access without copying
    pub fn into_immutable(self) -> QuantityVector<U, S> {
        self.inner
    }

    /// Dense-backed equivalent; shares storage when already dense
    #[must_use]
    pub fn to_dense(&self) -> Self {
        Self::from(self.inner.to_dense())
    }

    /// Sparse-backed equivalent; shares storage when already sparse
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        Self::from(self.inner.to_sparse())
    }

    /// Write access to the storage, cloning it first when shared
    fn storage_mut(&mut self) -> &mut VectorStorage {
        self.inner.cell.make_exclusive()
    }

    // ------------------------------------------------------------------------
    // Element writes
    // ------------------------------------------------------------------------

    /// Store a reference-unit magnitude at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn set_si(&mut self, index: usize, value: f64) -> Result<()> {
        VectorError::check_index(index, self.size())?;
        self.storage_mut().set_si(index, value)
    }

    /// Store a typed scalar at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn set(&mut self, index: usize, value: S) -> Result<()> {
        self.set_si(index, value.si())
    }

    /// Store `value`, expressed in `unit`, at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn set_in_unit(&mut self, index: usize, value: f64, unit: U) -> Result<()> {
        self.set_si(index, unit.to_si(value))
    }

    /// Change the unit used for unit-aware reads. Stored magnitudes are
    /// unchanged and the storage is not cloned.
    pub fn set_display_unit(&mut self, unit: U) -> &mut Self {
        self.inner.display_unit = unit;
        self
    }

    // ------------------------------------------------------------------------
    // Whole-vector arithmetic
    // ------------------------------------------------------------------------

    /// Add a relative vector element-wise
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn increment_by<S2>(&mut self, increment: &QuantityVector<U::Relative, S2>) -> Result<&mut Self>
    where
        S2: ScalarValue<Unit = U::Relative>,
    {
        self.combine_in_place(increment.storage(), |a, b| a + b)
    }

    /// Subtract a relative vector element-wise
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn decrement_by<S2>(&mut self, decrement: &QuantityVector<U::Relative, S2>) -> Result<&mut Self>
    where
        S2: ScalarValue<Unit = U::Relative>,
    {
        self.combine_in_place(decrement.storage(), |a, b| a - b)
    }

    /// Add one relative scalar to every position
    pub fn increment_by_scalar<T>(&mut self, increment: T) -> &mut Self
    where
        T: ScalarValue<Unit = U::Relative>,
    {
        let delta = increment.si();
        self.assign(move |v| v + delta)
    }

    /// Subtract one relative scalar from every position
    pub fn decrement_by_scalar<T>(&mut self, decrement: T) -> &mut Self
    where
        T: ScalarValue<Unit = U::Relative>,
    {
        let delta = decrement.si();
        self.assign(move |v| v - delta)
    }

    /// Scale every position by a plain factor
    pub fn multiply_by(&mut self, factor: f64) -> &mut Self {
        self.assign(move |v| v * factor)
    }

    /// Divide every position by a plain divisor
    pub fn divide_by(&mut self, divisor: f64) -> &mut Self {
        self.assign(move |v| v / divisor)
    }

    /// Scale element-wise by dimensionless factors
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn multiply_by_vector<S2>(&mut self, factors: &QuantityVector<DimensionlessUnit, S2>) -> Result<&mut Self>
    where
        S2: ScalarValue<Unit = DimensionlessUnit>,
    {
        self.combine_in_place(factors.storage(), |a, b| a * b)
    }

    /// Divide element-wise by dimensionless divisors
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn divide_by_vector<S2>(&mut self, divisors: &QuantityVector<DimensionlessUnit, S2>) -> Result<&mut Self>
    where
        S2: ScalarValue<Unit = DimensionlessUnit>,
    {
        self.combine_in_place(divisors.storage(), |a, b| a / b)
    }

    /// Divide every position by the reference-unit sum so the values add up
    /// to one.
    ///
    /// # Errors
    ///
    /// [`VectorError::ZeroSum`] when the sum is exactly zero; nothing is changed
    pub fn normalize(&mut self) -> Result<&mut Self> {
        let sum = self.z_sum();
        if sum == 0.0 {
            return Err(VectorError::ZeroSum);
        }
        Ok(self.divide_by(sum))
    }

    fn combine_in_place<F>(&mut self, other: &VectorStorage, f: F) -> Result<&mut Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        VectorError::check_sizes(self.size(), other.size())?;
        self.storage_mut().assign_with(other, f)?;
        Ok(self)
    }

    // ------------------------------------------------------------------------
    // Element-wise transforms on reference-unit magnitudes
    // ------------------------------------------------------------------------

    /// Replace every position `v` by `f(v)`. Sparse storage stays sparse.
    pub fn assign<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        trace!(
            quantity = U::QUANTITY,
            kind = ?self.storage_kind(),
            size = self.size(),
            "Applying element-wise transform"
        );
        self.storage_mut().assign(f);
        self
    }

    unary_functions! {
        /// Absolute value
        abs => f64::abs;
        /// Smallest integer not below each value
        ceil => f64::ceil;
        /// Largest integer not above each value
        floor => f64::floor;
        /// Negation
        neg => |v: f64| -v;
        /// Nearest integer, ties to even
        rint => f64::round_ties_even;
        /// Nearest integer, ties towards positive infinity
        round => |v: f64| (v + 0.5).floor();
        /// Sign as -1, 0 or 1; zeros and NaN are kept
        signum => |v: f64| if v == 0.0 || v.is_nan() { v } else { v.signum() };
        /// Square root
        sqrt => f64::sqrt;
        /// Cube root
        cbrt => f64::cbrt;
        /// `e^v`
        exp => f64::exp;
        /// `e^v - 1`, accurate near zero
        expm1 => f64::exp_m1;
        /// Natural logarithm
        log => f64::ln;
        /// Base-10 logarithm
        log10 => f64::log10;
        /// `ln(1 + v)`, accurate near zero
        log1p => f64::ln_1p;
        sin => f64::sin;
        cos => f64::cos;
        tan => f64::tan;
        asin => f64::asin;
        acos => f64::acos;
        atan => f64::atan;
        sinh => f64::sinh;
        cosh => f64::cosh;
        tanh => f64::tanh;
        /// Reciprocal
        inv => |v: f64| 1.0 / v;
    }

    /// Raise every position to `exponent`
    pub fn pow(&mut self, exponent: f64) -> &mut Self {
        self.assign(move |v| v.powf(exponent))
    }
}

impl<U: Unit, S: ScalarValue<Unit = U>> Deref for MutableQuantityVector<U, S> {
    type Target = QuantityVector<U, S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<U: Unit, S: ScalarValue<Unit = U>> From<QuantityVector<U, S>> for MutableQuantityVector<U, S> {
    fn from(inner: QuantityVector<U, S>) -> Self {
        MutableQuantityVector { inner }
    }
}

impl<U: Unit, S: ScalarValue<Unit = U>> From<MutableQuantityVector<U, S>> for QuantityVector<U, S> {
    fn from(vector: MutableQuantityVector<U, S>) -> Self {
        vector.inner
    }
}

impl<U: Unit, S: ScalarValue<Unit = U>> PartialEq for MutableQuantityVector<U, S> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<U: Unit, S: ScalarValue<Unit = U>> PartialEq<QuantityVector<U, S>> for MutableQuantityVector<U, S> {
    fn eq(&self, other: &QuantityVector<U, S>) -> bool {
        self.inner == *other
    }
}

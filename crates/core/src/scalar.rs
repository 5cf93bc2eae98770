//! Typed single values at vector element boundaries
//!
//! A vector hands out one scalar per position through [`ScalarValue::from_si`]
//! and accepts scalars at construction and in `set`. The default policy,
//! [`Scalar`], keeps the SI magnitude plus the unit it should be shown in.

use crate::unit::Unit;
use std::cmp::Ordering;
use std::fmt;

/// Scalar-construction policy used by `QuantityVector::get`.
pub trait ScalarValue: Copy + fmt::Debug + PartialEq + 'static {
    /// Unit family of the scalar
    type Unit: Unit;

    /// Build a scalar from a reference-unit magnitude, tagged with a display unit
    fn from_si(si: f64, display_unit: Self::Unit) -> Self;

    /// Reference-unit magnitude
    fn si(&self) -> f64;

    /// Display unit
    fn unit(&self) -> Self::Unit;
}

/// Single value of a physical quantity.
///
/// Stored in the reference unit; `unit` only affects [`Scalar::value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar<U: Unit> {
    si: f64,
    unit: U,
}

impl<U: Unit> Scalar<U> {
    /// Create a scalar from a value expressed in `unit`
    #[inline]
    #[must_use]
    pub fn new(value: f64, unit: U) -> Self {
        Scalar {
            si: unit.to_si(value),
            unit,
        }
    }

    /// Create a scalar from a reference-unit magnitude, shown in `unit`
    #[inline]
    #[must_use]
    pub fn from_si(si: f64, unit: U) -> Self {
        Scalar { si, unit }
    }

    /// Reference-unit magnitude
    #[inline]
    pub fn si(self) -> f64 {
        self.si
    }

    /// Display unit
    #[inline]
    pub fn unit(self) -> U {
        self.unit
    }

    /// Magnitude in the display unit
    #[inline]
    pub fn value(self) -> f64 {
        self.unit.from_si(self.si)
    }

    /// Magnitude in an arbitrary unit of the same family
    #[inline]
    pub fn in_unit(self, unit: U) -> f64 {
        unit.from_si(self.si)
    }

    /// Same magnitude, different display unit
    #[inline]
    #[must_use]
    pub fn with_unit(self, unit: U) -> Self {
        Scalar { si: self.si, unit }
    }
}

impl<U: Unit> ScalarValue for Scalar<U> {
    type Unit = U;

    #[inline]
    fn from_si(si: f64, display_unit: U) -> Self {
        Scalar::from_si(si, display_unit)
    }

    #[inline]
    fn si(&self) -> f64 {
        self.si
    }

    #[inline]
    fn unit(&self) -> U {
        self.unit
    }
}

// Ordering is by magnitude; the display unit does not take part
impl<U: Unit> PartialOrd for Scalar<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.si.partial_cmp(&other.si)
    }
}

//! Unit registry: reference units, display units and the conversions between them
//!
//! Every quantity has one reference (SI) unit in which vector magnitudes are
//! stored. Other units of the same family are described by a [`Scale`]:
//!
//! ```text
//! si = value * factor + offset
//! ```
//!
//! The offset is zero for everything except absolute temperature scales.
//!
//! # Usage
//! ```
//! use unitvec_core::unit::Unit;
//! use unitvec_core::quantity::{LengthUnit, MassUnit};
//!
//! assert_eq!(LengthUnit::Kilometer.to_si(1.5), 1500.0);
//! assert_eq!(LengthUnit::parse("km").unwrap(), LengthUnit::Kilometer);
//! assert!(MassUnit::parse("km").is_err());
//! ```

use crate::error::{Result, VectorError};
use crate::quantity::UNIT_FAMILIES;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Linear mapping from a unit onto its family's reference unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    factor: f64,
    offset: f64,
}

impl Scale {
    /// The reference unit itself.
    pub const IDENTITY: Scale = Scale {
        factor: 1.0,
        offset: 0.0,
    };

    /// Create a scale. Asserts the factor is finite and non-zero; in a
    /// `const` item a bad factor fails the build.
    #[must_use]
    #[track_caller]
    pub const fn new(factor: f64, offset: f64) -> Self {
        assert!(
            factor.is_finite() && factor != 0.0,
            "Scale::new: factor must be finite and non-zero"
        );
        Scale { factor, offset }
    }

    /// Multiplicative factor to the reference unit
    #[inline]
    pub fn factor(self) -> f64 {
        self.factor
    }

    /// Additive offset to the reference unit
    #[inline]
    pub fn offset(self) -> f64 {
        self.offset
    }

    /// True when values in this unit are already reference-unit values
    #[inline]
    pub fn is_identity(self) -> bool {
        self.factor == 1.0 && self.offset == 0.0
    }

    /// Convert a value expressed in this unit to the reference unit
    #[inline]
    pub fn to_si(self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    /// Convert a reference-unit value into this unit
    #[inline]
    pub fn from_si(self, si: f64) -> f64 {
        (si - self.offset) / self.factor
    }
}

/// Name and symbols of one registered unit family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitFamily {
    /// Quantity name, e.g. `"Length"`
    pub quantity: &'static str,
    /// Symbols of every unit in the family, reference unit first
    pub symbols: &'static [&'static str],
}

impl UnitFamily {
    /// Whether this family has a unit with the given symbol
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(&symbol)
    }
}

/// Find the first registered family that knows `symbol`.
pub fn family_of_symbol(symbol: &str) -> Option<&'static UnitFamily> {
    UNIT_FAMILIES.iter().find(|family| family.contains(symbol))
}

/// A unit of one physical quantity family.
///
/// Implemented by the unit enums generated in [`crate::quantity`]. The
/// conversions are the only contact point between vectors and the registry:
/// construction calls [`Unit::to_si`], unit-aware reads call [`Unit::from_si`].
pub trait Unit: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Unit used when a difference of two values of this family is taken.
    /// Relative units map onto themselves.
    type Relative: RelativeUnit;

    /// Name of the quantity family
    const QUANTITY: &'static str;

    /// Reference unit in which vector magnitudes are stored
    const SI: Self;

    /// Every unit of the family, reference unit first
    const ALL: &'static [Self];

    /// Registry entry for this family
    const FAMILY: UnitFamily;

    /// Unit symbol, unique within the family
    fn symbol(self) -> &'static str;

    /// Scale onto the reference unit
    fn scale(self) -> Scale;

    /// Relative unit with the same factor (identity for relative units)
    fn relative(self) -> Self::Relative;

    /// Convert a value in this unit to the reference unit
    #[inline]
    fn to_si(self, value: f64) -> f64 {
        self.scale().to_si(value)
    }

    /// Convert a reference-unit value into this unit
    #[inline]
    fn from_si(self, si: f64) -> f64 {
        self.scale().from_si(si)
    }

    /// Convert `value` from unit `from` into unit `to`
    #[inline]
    fn convert(value: f64, from: Self, to: Self) -> f64 {
        to.from_si(from.to_si(value))
    }

    /// Look up a unit of this family by symbol
    fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|unit| unit.symbol() == symbol)
    }

    /// Look up a unit of this family by symbol.
    ///
    /// # Errors
    ///
    /// [`VectorError::IncompatibleUnit`] if the symbol belongs to another
    /// family, [`VectorError::UnknownUnit`] if no family knows it.
    fn parse(symbol: &str) -> Result<Self> {
        if let Some(unit) = Self::from_symbol(symbol) {
            return Ok(unit);
        }
        match family_of_symbol(symbol) {
            Some(family) => Err(VectorError::IncompatibleUnit {
                symbol: symbol.to_owned(),
                expected: Self::QUANTITY,
                found: family.quantity,
            }),
            None => Err(VectorError::UnknownUnit(symbol.to_owned())),
        }
    }
}

/// Marker for quantities that express differences (length, duration, ...).
/// Vectors of these can be added to each other.
pub trait RelativeUnit: Unit {}

/// Marker for quantities anchored to an origin (position, instant, absolute
/// temperature). Two absolute vectors can only be subtracted.
pub trait AbsoluteUnit: Unit {}

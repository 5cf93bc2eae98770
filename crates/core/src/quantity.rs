//! Per-quantity instantiation of the generic unit, scalar and vector types
//!
//! Each `quantity!` entry is one row of the descriptor table: the quantity
//! name, its unit enum with one `(symbol, factor[, offset])` row per unit,
//! and the aliases for its scalar and vector types. The first unit listed is
//! the reference unit.
//!
//! ```text
//! relative Length / LengthUnit / LengthVector / MutableLengthVector
//!     -> enum LengthUnit, type Length = Scalar<LengthUnit>,
//!        type LengthVector = QuantityVector<LengthUnit, Length>, ...
//! ```
//!
//! Absolute quantities also name the relative unit family that a difference of
//! two absolute values falls into, and map each of their units onto it.

use crate::scalar::Scalar;
use crate::unit::{AbsoluteUnit, RelativeUnit, Scale, Unit, UnitFamily};
use crate::vector::{MutableQuantityVector, QuantityVector};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

macro_rules! quantity {
    (@table $(#[$doc:meta])* $name:ident / $unit:ident / $vector:ident / $mutable:ident {
        $($variant:ident => ($sym:literal, $factor:expr $(, $offset:expr)?)),+
    }) => {
        #[doc = concat!("Units of ", stringify!($name), ". The first variant is the reference unit.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $unit {
            $(
                #[doc = concat!("`", $sym, "`")]
                $variant,
            )+
        }

        impl $unit {
            const VARIANTS: &'static [$unit] = &[$($unit::$variant),+];
            const SYMBOLS: &'static [&'static str] = &[$($sym),+];

            fn table_symbol(self) -> &'static str {
                match self {
                    $($unit::$variant => $sym,)+
                }
            }

            const fn table_scale(self) -> Scale {
                match self {
                    $($unit::$variant => {
                        const SCALE: Scale = Scale::new($factor, 0.0 $(+ $offset)?);
                        SCALE
                    })+
                }
            }
        }

        $(#[$doc])*
        pub type $name = Scalar<$unit>;

        #[doc = concat!("Vector of ", stringify!($name), " values")]
        pub type $vector = QuantityVector<$unit, $name>;

        #[doc = concat!("Mutable vector of ", stringify!($name), " values")]
        pub type $mutable = MutableQuantityVector<$unit, $name>;
    };

    (
        $(#[$doc:meta])*
        relative $name:ident / $unit:ident / $vector:ident / $mutable:ident {
            $($variant:ident => ($sym:literal, $factor:expr $(, $offset:expr)?)),+ $(,)?
        }
    ) => {
        quantity!(@table $(#[$doc])* $name / $unit / $vector / $mutable {
            $($variant => ($sym, $factor $(, $offset)?)),+
        });

        impl Unit for $unit {
            type Relative = $unit;
            const QUANTITY: &'static str = stringify!($name);
            const SI: Self = $unit::VARIANTS[0];
            const ALL: &'static [Self] = $unit::VARIANTS;
            const FAMILY: UnitFamily = UnitFamily {
                quantity: stringify!($name),
                symbols: $unit::SYMBOLS,
            };

            fn symbol(self) -> &'static str {
                self.table_symbol()
            }

            fn scale(self) -> Scale {
                self.table_scale()
            }

            fn relative(self) -> $unit {
                self
            }
        }

        impl RelativeUnit for $unit {}
    };

    (
        $(#[$doc:meta])*
        absolute $name:ident / $unit:ident / $vector:ident / $mutable:ident relative to $rel_unit:ident {
            $($variant:ident => ($sym:literal, $factor:expr $(, $offset:expr)?) as $rel:ident),+ $(,)?
        }
    ) => {
        quantity!(@table $(#[$doc])* $name / $unit / $vector / $mutable {
            $($variant => ($sym, $factor $(, $offset)?)),+
        });

        impl Unit for $unit {
            type Relative = $rel_unit;
            const QUANTITY: &'static str = stringify!($name);
            const SI: Self = $unit::VARIANTS[0];
            const ALL: &'static [Self] = $unit::VARIANTS;
            const FAMILY: UnitFamily = UnitFamily {
                quantity: stringify!($name),
                symbols: $unit::SYMBOLS,
            };

            fn symbol(self) -> &'static str {
                self.table_symbol()
            }

            fn scale(self) -> Scale {
                self.table_scale()
            }

            fn relative(self) -> $rel_unit {
                match self {
                    $($unit::$variant => $rel_unit::$rel,)+
                }
            }
        }

        impl AbsoluteUnit for $unit {}
    };
}

// ============================================================================
// DIMENSIONLESS
// ============================================================================

quantity! {
    /// Pure number (ratio, fraction, count)
    relative Dimensionless / DimensionlessUnit / DimensionlessVector / MutableDimensionlessVector {
        One => ("1", 1.0),
        Percent => ("%", 0.01),
        PerMille => ("‰", 0.001),
        PartsPerMillion => ("ppm", 1.0e-6),
    }
}

// ============================================================================
// SPACE
// ============================================================================

quantity! {
    /// Distance or extent (relative)
    relative Length / LengthUnit / LengthVector / MutableLengthVector {
        Meter => ("m", 1.0),
        Kilometer => ("km", 1000.0),
        Decimeter => ("dm", 0.1),
        Centimeter => ("cm", 0.01),
        Millimeter => ("mm", 0.001),
        Micrometer => ("µm", 1.0e-6),
        Nanometer => ("nm", 1.0e-9),
        Inch => ("in", 0.0254),
        Foot => ("ft", 0.3048),
        Yard => ("yd", 0.9144),
        Mile => ("mi", 1609.344),
        NauticalMile => ("NM", 1852.0),
        AstronomicalUnit => ("au", 149_597_870_700.0),
    }
}

quantity! {
    /// Location along an axis, measured from an origin (absolute)
    absolute Position / PositionUnit / PositionVector / MutablePositionVector relative to LengthUnit {
        Meter => ("m", 1.0) as Meter,
        Kilometer => ("km", 1000.0) as Kilometer,
        Decimeter => ("dm", 0.1) as Decimeter,
        Centimeter => ("cm", 0.01) as Centimeter,
        Millimeter => ("mm", 0.001) as Millimeter,
        Micrometer => ("µm", 1.0e-6) as Micrometer,
        Nanometer => ("nm", 1.0e-9) as Nanometer,
        Inch => ("in", 0.0254) as Inch,
        Foot => ("ft", 0.3048) as Foot,
        Yard => ("yd", 0.9144) as Yard,
        Mile => ("mi", 1609.344) as Mile,
        NauticalMile => ("NM", 1852.0) as NauticalMile,
        AstronomicalUnit => ("au", 149_597_870_700.0) as AstronomicalUnit,
    }
}

quantity! {
    /// Surface area
    relative Area / AreaUnit / AreaVector / MutableAreaVector {
        SquareMeter => ("m²", 1.0),
        SquareKilometer => ("km²", 1.0e6),
        SquareCentimeter => ("cm²", 1.0e-4),
        Are => ("a", 100.0),
        Hectare => ("ha", 1.0e4),
        SquareFoot => ("ft²", 0.09290304),
        Acre => ("ac", 4046.8564224),
        SquareMile => ("mi²", 2_589_988.110336),
    }
}

quantity! {
    /// Volume
    relative Volume / VolumeUnit / VolumeVector / MutableVolumeVector {
        CubicMeter => ("m³", 1.0),
        Liter => ("L", 1.0e-3),
        Milliliter => ("mL", 1.0e-6),
        CubicCentimeter => ("cm³", 1.0e-6),
        CubicFoot => ("ft³", 0.028316846592),
        GallonUs => ("gal", 3.785411784e-3),
        Barrel => ("bbl", 0.158987294928),
    }
}

// ============================================================================
// MASS AND TIME
// ============================================================================

quantity! {
    /// Mass
    relative Mass / MassUnit / MassVector / MutableMassVector {
        Kilogram => ("kg", 1.0),
        Gram => ("g", 1.0e-3),
        Milligram => ("mg", 1.0e-6),
        Tonne => ("t", 1000.0),
        Pound => ("lb", 0.45359237),
        Ounce => ("oz", 0.028349523125),
    }
}

quantity! {
    /// Time span (relative)
    relative Duration / DurationUnit / DurationVector / MutableDurationVector {
        Second => ("s", 1.0),
        Millisecond => ("ms", 1.0e-3),
        Microsecond => ("µs", 1.0e-6),
        Minute => ("min", 60.0),
        Hour => ("h", 3600.0),
        Day => ("day", 86_400.0),
        Week => ("wk", 604_800.0),
    }
}

quantity! {
    /// Instant on a time axis (absolute)
    absolute Time / TimeUnit / TimeVector / MutableTimeVector relative to DurationUnit {
        Second => ("s", 1.0) as Second,
        Millisecond => ("ms", 1.0e-3) as Millisecond,
        Microsecond => ("µs", 1.0e-6) as Microsecond,
        Minute => ("min", 60.0) as Minute,
        Hour => ("h", 3600.0) as Hour,
        Day => ("day", 86_400.0) as Day,
        Week => ("wk", 604_800.0) as Week,
    }
}

// ============================================================================
// MECHANICS
// ============================================================================

quantity! {
    /// Speed
    relative Speed / SpeedUnit / SpeedVector / MutableSpeedVector {
        MeterPerSecond => ("m/s", 1.0),
        KilometerPerHour => ("km/h", 1.0 / 3.6),
        MilePerHour => ("mi/h", 0.44704),
        Knot => ("kn", 1852.0 / 3600.0),
        FootPerSecond => ("ft/s", 0.3048),
    }
}

quantity! {
    /// Acceleration
    relative Acceleration / AccelerationUnit / AccelerationVector / MutableAccelerationVector {
        MeterPerSecondSquared => ("m/s²", 1.0),
        StandardGravity => ("g0", 9.80665),
        FootPerSecondSquared => ("ft/s²", 0.3048),
        Gal => ("Gal", 0.01),
    }
}

quantity! {
    /// Force
    relative Force / ForceUnit / ForceVector / MutableForceVector {
        Newton => ("N", 1.0),
        Kilonewton => ("kN", 1000.0),
        Dyne => ("dyn", 1.0e-5),
        KilogramForce => ("kgf", 9.80665),
        PoundForce => ("lbf", 4.4482216152605),
    }
}

quantity! {
    /// Pressure
    relative Pressure / PressureUnit / PressureVector / MutablePressureVector {
        Pascal => ("Pa", 1.0),
        Hectopascal => ("hPa", 100.0),
        Kilopascal => ("kPa", 1000.0),
        Megapascal => ("MPa", 1.0e6),
        Bar => ("bar", 1.0e5),
        Millibar => ("mbar", 100.0),
        Atmosphere => ("atm", 101_325.0),
        PoundPerSquareInch => ("psi", 6894.757293168),
        MillimeterMercury => ("mmHg", 133.322387415),
    }
}

quantity! {
    /// Energy
    relative Energy / EnergyUnit / EnergyVector / MutableEnergyVector {
        Joule => ("J", 1.0),
        Kilojoule => ("kJ", 1.0e3),
        Megajoule => ("MJ", 1.0e6),
        WattHour => ("Wh", 3600.0),
        KilowattHour => ("kWh", 3.6e6),
        Calorie => ("cal", 4.184),
        Kilocalorie => ("kcal", 4184.0),
        Electronvolt => ("eV", 1.602176634e-19),
        BritishThermalUnit => ("BTU", 1055.05585262),
    }
}

quantity! {
    /// Power
    relative Power / PowerUnit / PowerVector / MutablePowerVector {
        Watt => ("W", 1.0),
        Kilowatt => ("kW", 1.0e3),
        Megawatt => ("MW", 1.0e6),
        Gigawatt => ("GW", 1.0e9),
        Horsepower => ("hp", 745.699_871_582_270_2),
    }
}

quantity! {
    /// Mass density
    relative Density / DensityUnit / DensityVector / MutableDensityVector {
        KilogramPerCubicMeter => ("kg/m³", 1.0),
        GramPerCubicCentimeter => ("g/cm³", 1000.0),
        GramPerLiter => ("g/L", 1.0),
        PoundPerCubicFoot => ("lb/ft³", 16.018_463_373_960_14),
    }
}

quantity! {
    /// Frequency
    relative Frequency / FrequencyUnit / FrequencyVector / MutableFrequencyVector {
        Hertz => ("Hz", 1.0),
        Kilohertz => ("kHz", 1.0e3),
        Megahertz => ("MHz", 1.0e6),
        Gigahertz => ("GHz", 1.0e9),
        RevolutionPerMinute => ("rpm", 1.0 / 60.0),
    }
}

// ============================================================================
// THERMAL
// ============================================================================

quantity! {
    /// Temperature difference (relative, no offset)
    relative Temperature / TemperatureUnit / TemperatureVector / MutableTemperatureVector {
        Kelvin => ("K", 1.0),
        Celsius => ("°C", 1.0),
        Fahrenheit => ("°F", 5.0 / 9.0),
        Rankine => ("°R", 5.0 / 9.0),
    }
}

quantity! {
    /// Thermodynamic temperature on an absolute scale
    absolute AbsoluteTemperature / AbsoluteTemperatureUnit / AbsoluteTemperatureVector
        / MutableAbsoluteTemperatureVector relative to TemperatureUnit
    {
        Kelvin => ("K", 1.0) as Kelvin,
        Celsius => ("°C", 1.0, 273.15) as Celsius,
        Fahrenheit => ("°F", 5.0 / 9.0, 459.67 * 5.0 / 9.0) as Fahrenheit,
        Rankine => ("°R", 5.0 / 9.0) as Rankine,
    }
}

// ============================================================================
// ANGLE, ELECTRICAL, FLOW
// ============================================================================

quantity! {
    /// Plane angle
    relative Angle / AngleUnit / AngleVector / MutableAngleVector {
        Radian => ("rad", 1.0),
        Degree => ("deg", PI / 180.0),
        Gradian => ("grad", PI / 200.0),
        ArcMinute => ("arcmin", PI / 10_800.0),
        ArcSecond => ("arcsec", PI / 648_000.0),
        Revolution => ("rev", 2.0 * PI),
    }
}

quantity! {
    /// Electrical current
    relative ElectricalCurrent / ElectricalCurrentUnit / ElectricalCurrentVector
        / MutableElectricalCurrentVector
    {
        Ampere => ("A", 1.0),
        Milliampere => ("mA", 1.0e-3),
        Microampere => ("µA", 1.0e-6),
        Kiloampere => ("kA", 1.0e3),
    }
}

quantity! {
    /// Volumetric flow rate
    relative FlowVolume / FlowVolumeUnit / FlowVolumeVector / MutableFlowVolumeVector {
        CubicMeterPerSecond => ("m³/s", 1.0),
        CubicMeterPerHour => ("m³/h", 1.0 / 3600.0),
        LiterPerSecond => ("L/s", 1.0e-3),
        LiterPerMinute => ("L/min", 1.0e-3 / 60.0),
        GallonPerMinute => ("gal/min", 3.785411784e-3 / 60.0),
    }
}

quantity! {
    /// Mass flow rate
    relative FlowMass / FlowMassUnit / FlowMassVector / MutableFlowMassVector {
        KilogramPerSecond => ("kg/s", 1.0),
        GramPerSecond => ("g/s", 1.0e-3),
        KilogramPerHour => ("kg/h", 1.0 / 3600.0),
        TonnePerHour => ("t/h", 1000.0 / 3600.0),
    }
}

/// Registry of every unit family above, used to classify foreign symbols
pub const UNIT_FAMILIES: &[UnitFamily] = &[
    DimensionlessUnit::FAMILY,
    LengthUnit::FAMILY,
    PositionUnit::FAMILY,
    AreaUnit::FAMILY,
    VolumeUnit::FAMILY,
    MassUnit::FAMILY,
    DurationUnit::FAMILY,
    TimeUnit::FAMILY,
    SpeedUnit::FAMILY,
    AccelerationUnit::FAMILY,
    ForceUnit::FAMILY,
    PressureUnit::FAMILY,
    EnergyUnit::FAMILY,
    PowerUnit::FAMILY,
    DensityUnit::FAMILY,
    FrequencyUnit::FAMILY,
    TemperatureUnit::FAMILY,
    AbsoluteTemperatureUnit::FAMILY,
    AngleUnit::FAMILY,
    ElectricalCurrentUnit::FAMILY,
    FlowVolumeUnit::FAMILY,
    FlowMassUnit::FAMILY,
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_units_have_identity_scale() {
        assert!(LengthUnit::SI.scale().is_identity());
        assert!(AbsoluteTemperatureUnit::SI.scale().is_identity());
        assert!(SpeedUnit::SI.scale().is_identity());
        assert_eq!(DimensionlessUnit::SI, DimensionlessUnit::One);
    }

    #[test]
    fn test_registry_is_complete() {
        assert_eq!(UNIT_FAMILIES.len(), 22);
        assert_eq!(UNIT_FAMILIES[1].quantity, "Length");
        assert_eq!(UNIT_FAMILIES[1].symbols[0], "m");
        assert_eq!(LengthUnit::ALL.len(), LengthUnit::FAMILY.symbols.len());
    }

    #[test]
    fn test_symbols_round_trip() {
        for &unit in PressureUnit::ALL {
            assert_eq!(PressureUnit::from_symbol(unit.symbol()), Some(unit));
        }
    }

    #[test]
    fn test_selected_factors() {
        assert_relative_eq!(SpeedUnit::KilometerPerHour.to_si(36.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(PressureUnit::Atmosphere.from_si(101_325.0), 1.0);
        assert_relative_eq!(AngleUnit::Degree.to_si(180.0), PI, epsilon = 1e-12);
        assert_relative_eq!(DurationUnit::Hour.from_si(5400.0), 1.5);
        assert_relative_eq!(DimensionlessUnit::Percent.to_si(50.0), 0.5);
    }

    #[test]
    fn test_absolute_families_map_every_unit() {
        for &unit in TimeUnit::ALL {
            assert_eq!(unit.relative().symbol(), unit.symbol());
            assert_eq!(unit.relative().scale().factor(), unit.scale().factor());
        }
        for &unit in AbsoluteTemperatureUnit::ALL {
            assert_eq!(unit.relative().symbol(), unit.symbol());
        }
    }
}

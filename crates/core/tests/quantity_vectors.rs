//! Behavior shared by every quantity in the table
//!
//! Each check is written once against the generic vector types and then run
//! for all quantities through `for_each_quantity!`.

mod common;

use approx::assert_relative_eq;
use std::collections::BTreeMap;
use unitvec_core::quantity::*;
use unitvec_core::{
    MutableQuantityVector, QuantityVector, Scalar, StorageKind, Unit, VectorError,
};

const SAMPLE: [f64; 6] = [0.0, 1.5, -3.25, 0.0, 1000.0, 0.0];
const KINDS: [StorageKind; 2] = [StorageKind::Dense, StorageKind::Sparse];

/// Runs the listed generic checks once per unit family
macro_rules! for_each_quantity {
    ($($check:ident),+ $(,)?) => {
        $(
            mod $check {
                use super::*;

                #[test]
                fn dimensionless() { super::$check::<DimensionlessUnit>(); }
                #[test]
                fn length() { super::$check::<LengthUnit>(); }
                #[test]
                fn position() { super::$check::<PositionUnit>(); }
                #[test]
                fn area() { super::$check::<AreaUnit>(); }
                #[test]
                fn volume() { super::$check::<VolumeUnit>(); }
                #[test]
                fn mass() { super::$check::<MassUnit>(); }
                #[test]
                fn duration() { super::$check::<DurationUnit>(); }
                #[test]
                fn time() { super::$check::<TimeUnit>(); }
                #[test]
                fn speed() { super::$check::<SpeedUnit>(); }
                #[test]
                fn acceleration() { super::$check::<AccelerationUnit>(); }
                #[test]
                fn force() { super::$check::<ForceUnit>(); }
                #[test]
                fn pressure() { super::$check::<PressureUnit>(); }
                #[test]
                fn energy() { super::$check::<EnergyUnit>(); }
                #[test]
                fn power() { super::$check::<PowerUnit>(); }
                #[test]
                fn density() { super::$check::<DensityUnit>(); }
                #[test]
                fn frequency() { super::$check::<FrequencyUnit>(); }
                #[test]
                fn temperature() { super::$check::<TemperatureUnit>(); }
                #[test]
                fn absolute_temperature() { super::$check::<AbsoluteTemperatureUnit>(); }
                #[test]
                fn angle() { super::$check::<AngleUnit>(); }
                #[test]
                fn electrical_current() { super::$check::<ElectricalCurrentUnit>(); }
                #[test]
                fn flow_volume() { super::$check::<FlowVolumeUnit>(); }
                #[test]
                fn flow_mass() { super::$check::<FlowMassUnit>(); }
            }
        )+
    };
}

for_each_quantity!(
    values_survive_unit_round_trip,
    storage_kind_is_invisible_to_reads,
    index_errors_are_uniform,
    empty_input_is_rejected,
    mutable_copy_is_isolated,
    map_construction_leaves_si_zero_background,
    symbols_parse_within_family,
);

fn values_survive_unit_round_trip<U: Unit>() {
    for &unit in U::ALL {
        for kind in KINDS {
            let v = QuantityVector::<U>::new(&SAMPLE, unit, kind).unwrap();
            assert_eq!(v.size(), SAMPLE.len());
            assert_eq!(v.display_unit(), unit);
            for (expected, actual) in SAMPLE.iter().zip(v.values_in_unit()) {
                assert_relative_eq!(*expected, actual, epsilon = 1e-9, max_relative = 1e-9);
            }
            for i in 0..SAMPLE.len() {
                assert_relative_eq!(
                    v.get_in(i, U::SI).unwrap(),
                    unit.to_si(SAMPLE[i]),
                    max_relative = 1e-12
                );
            }
        }
    }
}

fn storage_kind_is_invisible_to_reads<U: Unit>() {
    let unit = *U::ALL.last().unwrap();
    let dense = QuantityVector::<U>::new(&SAMPLE, unit, StorageKind::Dense).unwrap();
    let sparse = QuantityVector::<U>::new(&SAMPLE, unit, StorageKind::Sparse).unwrap();

    assert!(dense.is_dense());
    assert!(sparse.is_sparse());
    assert_eq!(dense, sparse);
    assert_eq!(dense.cardinality(), sparse.cardinality());
    assert_eq!(dense.values_si(), sparse.values_si());
    assert_eq!(dense.z_sum(), sparse.z_sum());
    assert_eq!(dense.to_sparse(), sparse);
    assert_eq!(sparse.to_dense(), dense);
    assert_eq!(dense.scalars(), sparse.scalars());
}

fn index_errors_are_uniform<U: Unit>() {
    for kind in KINDS {
        let v = QuantityVector::<U>::new(&SAMPLE, U::SI, kind).unwrap();
        let size = SAMPLE.len();
        let expected = VectorError::IndexOutOfRange { index: size, size };
        assert_eq!(v.get_si(size), Err(expected.clone()));
        assert_eq!(v.get_in_unit(size), Err(expected.clone()));
        assert_eq!(v.get(size).err(), Some(expected.clone()));

        let mut m = v.mutable();
        assert_eq!(m.set_si(size, 1.0), Err(expected.clone()));
        assert_eq!(m.set_in_unit(size, 1.0, U::SI), Err(expected));
    }
}

fn empty_input_is_rejected<U: Unit>() {
    for kind in KINDS {
        assert_eq!(
            QuantityVector::<U>::new(&[], U::SI, kind),
            Err(VectorError::EmptyInput)
        );
        assert_eq!(
            QuantityVector::<U>::from_scalars(&[], kind),
            Err(VectorError::EmptyInput)
        );
        assert!(matches!(
            QuantityVector::<U>::from_optional(None, U::SI, kind),
            Err(VectorError::NullInput { .. })
        ));
    }
}

fn mutable_copy_is_isolated<U: Unit>() {
    for kind in KINDS {
        let original = QuantityVector::<U>::new(&SAMPLE, U::SI, kind).unwrap();
        let mut copy: MutableQuantityVector<U> = original.mutable();
        copy.set_si(0, 42.0).unwrap();
        copy.multiply_by(2.0);

        assert_eq!(original.values_si(), SAMPLE.to_vec());
        assert_eq!(copy.get_si(0), Ok(84.0));
        assert_eq!(copy.storage_kind(), kind);
    }
}

fn map_construction_leaves_si_zero_background<U: Unit>() {
    let unit = *U::ALL.last().unwrap();
    let map = BTreeMap::from([(1, 2.0), (4, -7.0)]);
    let scalars: BTreeMap<usize, Scalar<U>> = map
        .iter()
        .map(|(&i, &value)| (i, Scalar::new(value, unit)))
        .collect();

    for kind in KINDS {
        let v = QuantityVector::<U>::from_sparse_map(&map, 5, unit, kind).unwrap();
        for i in [0, 2, 3] {
            assert_eq!(v.get_si(i), Ok(0.0));
        }
        assert_relative_eq!(v.get_si(1).unwrap(), unit.to_si(2.0), max_relative = 1e-12);
        assert_relative_eq!(v.get_si(4).unwrap(), unit.to_si(-7.0), max_relative = 1e-12);

        let from_scalars = QuantityVector::<U>::from_scalar_map(&scalars, 5, unit, kind).unwrap();
        assert_eq!(from_scalars, v);
    }
}

fn symbols_parse_within_family<U: Unit>() {
    for &unit in U::ALL {
        assert_eq!(U::parse(unit.symbol()), Ok(unit));
    }
    assert_eq!(
        U::parse("no-such-unit"),
        Err(VectorError::UnknownUnit("no-such-unit".to_owned()))
    );
}

//! Dense and sparse storage must agree on every operation, including inputs
//! large enough to take the data-parallel paths.

mod common;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unitvec_core::quantity::{
    DimensionlessUnit, DimensionlessVector, LengthUnit, LengthVector, MutableLengthVector,
};
use unitvec_core::{StorageKind, VectorError, VectorStorage, PARALLEL_THRESHOLD};

/// Random values where roughly `fill` of the positions are non-zero
fn random_values(rng: &mut StdRng, len: usize, fill: f64) -> Vec<f64> {
    (0..len)
        .map(|_| {
            if rng.random::<f64>() < fill {
                rng.random_range(-100.0..100.0)
            } else {
                0.0
            }
        })
        .collect()
}

fn both_kinds(values: &[f64]) -> (LengthVector, LengthVector) {
    (
        LengthVector::new(values, LengthUnit::Foot, StorageKind::Dense).unwrap(),
        LengthVector::new(values, LengthUnit::Foot, StorageKind::Sparse).unwrap(),
    )
}

#[test]
fn test_reads_agree_above_parallel_threshold() {
    let mut rng = StdRng::seed_from_u64(7);
    let values = random_values(&mut rng, PARALLEL_THRESHOLD * 3 + 17, 0.1);
    let (dense, sparse) = both_kinds(&values);

    assert_eq!(dense.cardinality(), values.iter().filter(|v| **v != 0.0).count());
    assert_eq!(dense.cardinality(), sparse.cardinality());
    assert_eq!(dense.values_si(), sparse.values_si());
    assert_relative_eq!(dense.z_sum(), sparse.z_sum(), max_relative = 1e-9);

    for _ in 0..200 {
        let i = rng.random_range(0..values.len());
        assert_eq!(dense.get_si(i), sparse.get_si(i));
        assert_relative_eq!(sparse.get_in_unit(i).unwrap(), values[i], max_relative = 1e-12);
    }
}

#[test]
fn test_transforms_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    let values = random_values(&mut rng, PARALLEL_THRESHOLD + 1, 0.2);
    let (dense, sparse) = both_kinds(&values);

    let mut d = dense.mutable();
    let mut s = sparse.mutable();
    d.abs().sqrt().multiply_by(0.5).floor();
    s.abs().sqrt().multiply_by(0.5).floor();

    assert!(s.is_sparse());
    assert_eq!(d.values_si(), s.values_si());
    assert!(s.cardinality() <= sparse.cardinality());

    d.cos();
    s.cos();
    assert_eq!(d.values_si(), s.values_si());
    assert_eq!(s.cardinality(), values.len());
}

#[test]
fn test_binary_result_representation() {
    let a = vec![0.0, 1.0, 0.0, 2.0];
    let (dense, sparse) = both_kinds(&a);

    assert!(sparse.plus(&sparse).unwrap().is_sparse());
    assert!(sparse.plus(&dense).unwrap().is_dense());
    assert!(dense.minus(&sparse).unwrap().is_dense());

    let f_dense = DimensionlessVector::new(&[1.0, 2.0, 3.0, 4.0], DimensionlessUnit::One, StorageKind::Dense)
        .unwrap();
    let f_sparse = f_dense.to_sparse();
    assert!(dense.times(&f_dense).unwrap().is_dense());
    assert!(dense.times(&f_sparse).unwrap().is_sparse());
    assert!(sparse.times(&f_dense).unwrap().is_sparse());
    assert_eq!(
        dense.times(&f_sparse).unwrap().values_si(),
        dense.times(&f_dense).unwrap().values_si()
    );
}

#[test]
fn test_sparse_writes_keep_positions_ordered() {
    let mut rng = StdRng::seed_from_u64(3);
    let size = 500;
    let mut m = MutableLengthVector::new(&vec![0.0; size], LengthUnit::Meter, StorageKind::Sparse).unwrap();
    let mut shadow = vec![0.0; size];

    for _ in 0..1000 {
        let i = rng.random_range(0..size);
        let v = if rng.random::<bool>() { 0.0 } else { rng.random_range(-5.0..5.0) };
        m.set_si(i, v).unwrap();
        shadow[i] = v;
    }

    assert_eq!(m.values_si(), shadow);
    match m.storage() {
        VectorStorage::Sparse(s) => assert!(s.is_well_formed()),
        VectorStorage::Dense(_) => panic!("sparse vector changed representation on write"),
    }
}

#[test]
fn test_mismatched_lengths_in_every_binary_operation() {
    let (a, _) = both_kinds(&[1.0; 3]);
    let (b, _) = both_kinds(&[1.0; 4]);
    let expected = Err(VectorError::LengthMismatch { left: 3, right: 4 });
    assert_eq!(a.plus(&b), expected);
    assert_eq!(a.minus(&b), expected);

    let f = DimensionlessVector::new(&[1.0; 4], DimensionlessUnit::One, StorageKind::Sparse).unwrap();
    assert_eq!(a.times(&f), expected);
    assert_eq!(a.divide(&f), expected);

    let mut m = a.mutable();
    assert_eq!(m.multiply_by_vector(&f).err(), expected.clone().err());
    assert_eq!(m.decrement_by(&b).err(), expected.err());
}

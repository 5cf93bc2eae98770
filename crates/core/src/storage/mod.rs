//! Raw reference-unit storage behind every quantity vector
//!
//! Storage knows nothing about physical quantities: it holds SI magnitudes in
//! one of two interchangeable representations.
//!
//! ```text
//! VectorStorage
//! ├── Dense(DenseStorage)   - one value per position, zeros included
//! └── Sparse(SparseStorage) - ascending (position, value) pairs + logical size
//! ```
//!
//! Conversion between the two is lossless: a position that a sparse storage
//! does not list reads as `0.0`. Sharing between vectors goes through
//! [`CopyOnWriteCell`].
//!
//! # Feature Flags
//!
//! - `parallel` (default): arrays above [`PARALLEL_THRESHOLD`] elements are
//!   converted, counted and summed with rayon.

mod cow;
mod dense;
mod parallel;
mod sparse;

pub use cow::CopyOnWriteCell;
pub use dense::DenseStorage;
pub use parallel::PARALLEL_THRESHOLD;
pub use sparse::SparseStorage;

use crate::error::{Result, VectorError};
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Representation selector passed to every vector constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StorageKind {
    /// Full-length array
    #[default]
    Dense,
    /// Non-zero positions only
    Sparse,
}

/// Reference-unit magnitudes in dense or sparse form.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorStorage {
    /// Full-length array representation
    Dense(DenseStorage),
    /// Position/value pair representation
    Sparse(SparseStorage),
}

impl VectorStorage {
    /// Store reference-unit values in the requested representation
    #[must_use]
    pub fn from_si_values(values: Vec<f64>, kind: StorageKind) -> Self {
        trace!(size = values.len(), ?kind, "Creating vector storage");
        match kind {
            StorageKind::Dense => VectorStorage::Dense(DenseStorage::new(values)),
            StorageKind::Sparse => VectorStorage::Sparse(SparseStorage::from_dense_values(&values)),
        }
    }

    /// Convert values expressed in `unit` to the reference unit and store them
    #[must_use]
    pub fn from_unit_values<U: Unit>(values: &[f64], unit: U, kind: StorageKind) -> Self {
        let values_si = if unit.scale().is_identity() {
            values.to_vec()
        } else {
            parallel::map(values, |v| unit.to_si(v))
        };
        Self::from_si_values(values_si, kind)
    }

    /// Store ascending `(position, value-in-unit)` pairs over `size` positions.
    ///
    /// Unlisted positions hold SI zero, also for offset scales such as
    /// degrees Celsius, so a sparse result only lists the given pairs.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] for a position `>= size`
    pub fn from_unit_pairs<U, I>(pairs: I, size: usize, unit: U, kind: StorageKind) -> Result<Self>
    where
        U: Unit,
        I: IntoIterator<Item = (usize, f64)>,
    {
        let sparse = SparseStorage::from_sorted_pairs(
            pairs.into_iter().map(|(i, v)| (i, unit.to_si(v))),
            size,
        )?;
        trace!(size, stored = sparse.stored_len(), ?kind, "Creating vector storage from pairs");
        Ok(match kind {
            StorageKind::Sparse => VectorStorage::Sparse(sparse),
            StorageKind::Dense => VectorStorage::Dense(sparse.to_dense()),
        })
    }

    /// Current representation
    #[inline]
    pub fn kind(&self) -> StorageKind {
        match self {
            VectorStorage::Dense(_) => StorageKind::Dense,
            VectorStorage::Sparse(_) => StorageKind::Sparse,
        }
    }

    /// Logical length, fixed at construction
    #[inline]
    pub fn size(&self) -> usize {
        match self {
            VectorStorage::Dense(d) => d.size(),
            VectorStorage::Sparse(s) => s.size(),
        }
    }

    /// Number of positions holding a non-zero value
    pub fn cardinality(&self) -> usize {
        match self {
            VectorStorage::Dense(d) => d.cardinality(),
            VectorStorage::Sparse(s) => s.cardinality(),
        }
    }

    /// Reference-unit value at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    #[inline]
    pub fn get_si(&self, index: usize) -> Result<f64> {
        match self {
            VectorStorage::Dense(d) => d.get_si(index),
            VectorStorage::Sparse(s) => s.get_si(index),
        }
    }

    /// Write a reference-unit value at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    #[inline]
    pub fn set_si(&mut self, index: usize, value: f64) -> Result<()> {
        match self {
            VectorStorage::Dense(d) => d.set_si(index, value),
            VectorStorage::Sparse(s) => s.set_si(index, value),
        }
    }

    /// Full-length reference-unit array, regardless of representation
    pub fn dense_values(&self) -> Vec<f64> {
        self.dense_view().into_owned()
    }

    /// Full-length view. Dense storage borrows, sparse storage materializes.
    pub fn dense_view(&self) -> Cow<'_, [f64]> {
        match self {
            VectorStorage::Dense(d) => Cow::Borrowed(d.as_slice()),
            VectorStorage::Sparse(s) => Cow::Owned(s.dense_values()),
        }
    }

    /// Deep, independent clone
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Dense equivalent; a plain copy when already dense
    #[must_use]
    pub fn to_dense(&self) -> Self {
        match self {
            VectorStorage::Dense(_) => self.copy(),
            VectorStorage::Sparse(s) => {
                debug!(size = s.size(), "Converting sparse storage to dense");
                VectorStorage::Dense(s.to_dense())
            }
        }
    }

    /// Sparse equivalent; a plain copy when already sparse
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        match self {
            VectorStorage::Sparse(_) => self.copy(),
            VectorStorage::Dense(d) => {
                debug!(size = d.size(), "Converting dense storage to sparse");
                VectorStorage::Sparse(d.to_sparse())
            }
        }
    }

    /// Convert into `kind`
    #[must_use]
    pub fn to_kind(&self, kind: StorageKind) -> Self {
        match kind {
            StorageKind::Dense => self.to_dense(),
            StorageKind::Sparse => self.to_sparse(),
        }
    }

    /// Sum of every position's reference-unit value
    pub fn z_sum(&self) -> f64 {
        match self {
            VectorStorage::Dense(d) => d.z_sum(),
            VectorStorage::Sparse(s) => s.z_sum(),
        }
    }

    /// Apply `f` to every logical position in place
    pub fn assign<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        match self {
            VectorStorage::Dense(d) => d.assign(f),
            VectorStorage::Sparse(s) => s.assign(f),
        }
    }

    /// Combine in place with a same-sized operand: `self[i] = f(self[i], other[i])`.
    /// Sparse receivers stay sparse.
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn assign_with<F>(&mut self, other: &VectorStorage, f: F) -> Result<()>
    where
        F: Fn(f64, f64) -> f64,
    {
        VectorError::check_sizes(self.size(), other.size())?;
        let rhs = other.dense_view();
        match self {
            VectorStorage::Dense(d) => d.assign_with(&rhs, f),
            VectorStorage::Sparse(s) => {
                let mut dense = s.to_dense();
                dense.assign_with(&rhs, f);
                *s = dense.to_sparse();
            }
        }
        Ok(())
    }

    /// Element-wise sum; sparse only when both operands are sparse
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn plus(&self, other: &VectorStorage) -> Result<Self> {
        let sparse = self.kind() == StorageKind::Sparse && other.kind() == StorageKind::Sparse;
        self.combine(other, |a, b| a + b, sparse)
    }

    /// Element-wise difference; sparse only when both operands are sparse
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn minus(&self, other: &VectorStorage) -> Result<Self> {
        let sparse = self.kind() == StorageKind::Sparse && other.kind() == StorageKind::Sparse;
        self.combine(other, |a, b| a - b, sparse)
    }

    /// Element-wise product; dense only when both operands are dense
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn times(&self, other: &VectorStorage) -> Result<Self> {
        let dense = self.kind() == StorageKind::Dense && other.kind() == StorageKind::Dense;
        self.combine(other, |a, b| a * b, !dense)
    }

    /// Element-wise quotient; dense only when both operands are dense
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn divide(&self, other: &VectorStorage) -> Result<Self> {
        let dense = self.kind() == StorageKind::Dense && other.kind() == StorageKind::Dense;
        self.combine(other, |a, b| a / b, !dense)
    }

    fn combine<F>(&self, other: &VectorStorage, f: F, sparse_result: bool) -> Result<Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        VectorError::check_sizes(self.size(), other.size())?;
        let left = self.dense_view();
        let right = other.dense_view();
        let combined: Vec<f64> = left.iter().zip(right.iter()).map(|(&a, &b)| f(a, b)).collect();
        Ok(if sparse_result {
            VectorStorage::Sparse(SparseStorage::from_dense_values(&combined))
        } else {
            VectorStorage::Dense(DenseStorage::new(combined))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{AbsoluteTemperatureUnit, LengthUnit};
    use approx::assert_relative_eq;

    fn both(values: &[f64]) -> [VectorStorage; 2] {
        [
            VectorStorage::from_si_values(values.to_vec(), StorageKind::Dense),
            VectorStorage::from_si_values(values.to_vec(), StorageKind::Sparse),
        ]
    }

    #[test]
    fn test_contract_identical_across_kinds() {
        for storage in both(&[0.0, 2.0, 0.0, 5.0]) {
            assert_eq!(storage.size(), 4);
            assert_eq!(storage.cardinality(), 2);
            assert_eq!(storage.get_si(1), Ok(2.0));
            assert_eq!(storage.get_si(2), Ok(0.0));
            assert_eq!(storage.z_sum(), 7.0);
            assert_eq!(storage.dense_values(), vec![0.0, 2.0, 0.0, 5.0]);
            assert!(storage.get_si(4).is_err());
        }
    }

    #[test]
    fn test_conversion_idempotent() {
        for storage in both(&[1.0, 0.0, 3.0]) {
            assert_eq!(storage.to_dense().to_dense(), storage.to_dense());
            assert_eq!(storage.to_sparse().to_sparse(), storage.to_sparse());
            assert_eq!(storage.to_kind(storage.kind()), storage);
        }
    }

    #[test]
    fn test_copy_is_independent() {
        for storage in both(&[1.0, 0.0, 3.0]) {
            let mut copy = storage.copy();
            copy.set_si(1, 8.0).unwrap();
            assert_eq!(storage.get_si(1), Ok(0.0));
            assert_eq!(copy.get_si(1), Ok(8.0));
        }
    }

    #[test]
    fn test_from_unit_values_converts() {
        let s = VectorStorage::from_unit_values(&[1.0, 0.5], LengthUnit::Kilometer, StorageKind::Dense);
        assert_eq!(s.dense_values(), vec![1000.0, 500.0]);
    }

    #[test]
    fn test_from_unit_pairs_offset_unit_keeps_si_zero_background() {
        let s = VectorStorage::from_unit_pairs(
            [(1, 100.0)],
            3,
            AbsoluteTemperatureUnit::Celsius,
            StorageKind::Sparse,
        )
        .unwrap();
        assert_eq!(s.cardinality(), 1);
        assert_eq!(s.get_si(0), Ok(0.0));
        assert_relative_eq!(s.get_si(1).unwrap(), 373.15);
        assert_eq!(s.get_si(2), Ok(0.0));
    }

    #[test]
    fn test_from_unit_pairs_out_of_range() {
        assert_eq!(
            VectorStorage::from_unit_pairs([(3, 1.0)], 3, LengthUnit::Meter, StorageKind::Dense),
            Err(VectorError::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn test_binary_result_kinds() {
        let [dense, sparse] = both(&[0.0, 1.0, 2.0]);
        assert_eq!(sparse.plus(&sparse).unwrap().kind(), StorageKind::Sparse);
        assert_eq!(dense.plus(&sparse).unwrap().kind(), StorageKind::Dense);
        assert_eq!(dense.times(&dense).unwrap().kind(), StorageKind::Dense);
        assert_eq!(dense.times(&sparse).unwrap().kind(), StorageKind::Sparse);
        assert_eq!(
            dense.minus(&sparse).unwrap().dense_values(),
            vec![0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_binary_length_mismatch() {
        let a = VectorStorage::from_si_values(vec![1.0; 3], StorageKind::Dense);
        let b = VectorStorage::from_si_values(vec![1.0; 4], StorageKind::Dense);
        assert_eq!(
            a.plus(&b),
            Err(VectorError::LengthMismatch { left: 3, right: 4 })
        );
    }

    #[test]
    fn test_assign_with_keeps_sparse() {
        let [dense, mut sparse] = both(&[0.0, 1.0, 2.0]);
        sparse.assign_with(&dense, |a, b| a + b).unwrap();
        assert_eq!(sparse.kind(), StorageKind::Sparse);
        assert_eq!(sparse.dense_values(), vec![0.0, 2.0, 4.0]);
    }
}

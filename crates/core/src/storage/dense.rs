//! Full-length array storage

use super::parallel;
use super::sparse::SparseStorage;
use crate::error::{Result, VectorError};

/// One reference-unit value per position, explicit zeros included.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseStorage {
    values: Vec<f64>,
}

impl DenseStorage {
    /// Wrap reference-unit values
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        DenseStorage { values }
    }

    /// Logical length
    #[inline]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Number of non-zero cells
    pub fn cardinality(&self) -> usize {
        parallel::count_non_zero(&self.values)
    }

    /// Value at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    #[inline]
    pub fn get_si(&self, index: usize) -> Result<f64> {
        self.values
            .get(index)
            .copied()
            .ok_or(VectorError::IndexOutOfRange {
                index,
                size: self.values.len(),
            })
    }

    /// Overwrite the value at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    #[inline]
    pub fn set_si(&mut self, index: usize, value: f64) -> Result<()> {
        let size = self.values.len();
        let cell = self
            .values
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfRange { index, size })?;
        *cell = value;
        Ok(())
    }

    /// Borrow the values
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Sum of all values
    pub fn z_sum(&self) -> f64 {
        parallel::sum(&self.values)
    }

    /// Collect non-zero positions in one linear scan
    pub fn to_sparse(&self) -> SparseStorage {
        SparseStorage::from_dense_values(&self.values)
    }

    /// Apply `f` to every cell
    pub fn assign<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        parallel::map_in_place(&mut self.values, f);
    }

    /// Combine cell-wise with a same-sized array: `self[i] = f(self[i], other[i])`
    pub(crate) fn assign_with<F>(&mut self, other: &[f64], f: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        debug_assert_eq!(self.values.len(), other.len());
        for (cell, &rhs) in self.values.iter_mut().zip(other) {
            *cell = f(*cell, rhs);
        }
    }
}

//! Position/value pair storage for vectors that are mostly zero
//!
//! `indices` is strictly ascending and parallel to `values`. Positions that are
//! not listed read as exactly `0.0`. Values are non-zero when stored; an
//! in-place write of zero to a listed position keeps the pair until the next
//! compacting operation.

use super::dense::DenseStorage;
use super::parallel;
use crate::error::{Result, VectorError};

/// Sparse representation with a separately tracked logical length.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseStorage {
    indices: Vec<usize>,
    values: Vec<f64>,
    size: usize,
}

impl SparseStorage {
    /// Storage of `size` implicit zeros
    #[must_use]
    pub fn empty(size: usize) -> Self {
        SparseStorage {
            indices: Vec::new(),
            values: Vec::new(),
            size,
        }
    }

    /// Collect the non-zero positions of a dense array in one linear scan
    pub fn from_dense_values(dense: &[f64]) -> Self {
        let count = parallel::count_non_zero(dense);
        let mut indices = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);
        for (i, &v) in dense.iter().enumerate() {
            if v != 0.0 {
                indices.push(i);
                values.push(v);
            }
        }
        SparseStorage {
            indices,
            values,
            size: dense.len(),
        }
    }

    /// Build from `(position, value)` pairs in ascending position order.
    /// Zero values are skipped.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] for a position `>= size`
    pub fn from_sorted_pairs<I>(pairs: I, size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut storage = SparseStorage::empty(size);
        for (index, value) in pairs {
            VectorError::check_index(index, size)?;
            debug_assert!(
                storage.indices.last().is_none_or(|&last| last < index),
                "SparseStorage::from_sorted_pairs: positions must be strictly ascending"
            );
            if value != 0.0 {
                storage.indices.push(index);
                storage.values.push(value);
            }
        }
        Ok(storage)
    }

    /// Logical length
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored pairs holding a non-zero value
    pub fn cardinality(&self) -> usize {
        parallel::count_non_zero(&self.values)
    }

    /// Number of stored pairs, zeros written in place included
    #[inline]
    pub fn stored_len(&self) -> usize {
        self.indices.len()
    }

    /// Stored positions, strictly ascending
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, parallel to [`SparseStorage::indices`]
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `index`; absent positions read as zero
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn get_si(&self, index: usize) -> Result<f64> {
        VectorError::check_index(index, self.size)?;
        Ok(match self.indices.binary_search(&index) {
            Ok(slot) => self.values[slot],
            Err(_) => 0.0,
        })
    }

    /// Write the value at `index`.
    ///
    /// A listed position is overwritten in place, even with zero. An absent
    /// position gets a new pair inserted in order; writing zero there is a
    /// no-op since the position already reads as zero.
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn set_si(&mut self, index: usize, value: f64) -> Result<()> {
        VectorError::check_index(index, self.size)?;
        match self.indices.binary_search(&index) {
            Ok(slot) => self.values[slot] = value,
            Err(slot) => {
                if value != 0.0 {
                    self.indices.insert(slot, index);
                    self.values.insert(slot, value);
                }
            }
        }
        Ok(())
    }

    /// Materialize a full-length array
    pub fn dense_values(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.size];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            dense[i] = v;
        }
        dense
    }

    /// Convert to dense storage in one linear scan
    pub fn to_dense(&self) -> DenseStorage {
        DenseStorage::new(self.dense_values())
    }

    /// Sum of the stored values (absent positions are exact zeros)
    pub fn z_sum(&self) -> f64 {
        parallel::sum(&self.values)
    }

    /// Drop pairs whose value became zero
    pub fn compact(&mut self) {
        let mut kept = 0;
        for slot in 0..self.values.len() {
            if self.values[slot] != 0.0 {
                self.indices[kept] = self.indices[slot];
                self.values[kept] = self.values[slot];
                kept += 1;
            }
        }
        self.indices.truncate(kept);
        self.values.truncate(kept);
    }

    /// Apply `f` to every logical position.
    ///
    /// When `f(0.0)` is zero only the stored pairs need mapping; otherwise the
    /// implicit zeros change too and the storage is rebuilt from a dense pass.
    /// The result is compacted either way.
    pub fn assign<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        if f(0.0) == 0.0 {
            parallel::map_in_place(&mut self.values, f);
            self.compact();
        } else {
            let mut dense = self.to_dense();
            dense.assign(f);
            *self = dense.to_sparse();
        }
    }

    /// Check the ordering invariant (used by tests and debug assertions)
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() == self.values.len()
            && self.indices.windows(2).all(|w| w[0] < w[1])
            && self.indices.last().is_none_or(|&last| last < self.size)
    }
}

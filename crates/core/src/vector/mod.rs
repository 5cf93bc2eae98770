//! Unit-aware vectors of physical quantities
//!
//! [`QuantityVector`] binds a [`VectorStorage`] of reference-unit magnitudes to
//! a unit family `U` and a scalar policy `S`. The display unit only affects
//! unit-aware reads; stored magnitudes are always SI.
//!
//! [`MutableQuantityVector`] adds in-place writes and element-wise transforms.
//! The two variants convert into each other without copying; the storage is
//! cloned lazily on the first write through a holder that shares it.
//!
//! # Usage
//! ```
//! use unitvec_core::quantity::{LengthUnit, LengthVector};
//! use unitvec_core::StorageKind;
//!
//! let v = LengthVector::new(&[1.0, 4.0, 9.0], LengthUnit::Kilometer, StorageKind::Dense).unwrap();
//! assert_eq!(v.get_si(1).unwrap(), 4000.0);
//!
//! let mut m = v.mutable();
//! m.sqrt();
//! assert_eq!(m.get_si(1).unwrap(), 4000.0_f64.sqrt());
//! assert_eq!(v.get_si(1).unwrap(), 4000.0);
//! ```

mod mutable;

pub use mutable::MutableQuantityVector;

use crate::error::{Result, VectorError};
use crate::quantity::DimensionlessUnit;
use crate::scalar::{Scalar, ScalarValue};
use crate::storage::{CopyOnWriteCell, StorageKind, VectorStorage};
use crate::unit::{AbsoluteUnit, Unit};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Immutable vector of one physical quantity.
///
/// Cloning shares the storage; nothing can write through an immutable vector,
/// so sharing is never observable.
#[derive(Debug, Clone)]
pub struct QuantityVector<U: Unit, S: ScalarValue<Unit = U> = Scalar<U>> {
    cell: CopyOnWriteCell,
    display_unit: U,
    _scalar: PhantomData<S>,
}

impl<U: Unit, S: ScalarValue<Unit = U>> QuantityVector<U, S> {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Create a vector from values expressed in `unit`.
    ///
    /// # Errors
    ///
    /// [`VectorError::EmptyInput`] when `values` is empty
    pub fn new(values: &[f64], unit: U, kind: StorageKind) -> Result<Self> {
        if values.is_empty() {
            return Err(VectorError::EmptyInput);
        }
        Ok(Self::from_storage(
            VectorStorage::from_unit_values(values, unit, kind),
            unit,
        ))
    }

    /// Create a vector from a collection that may be absent.
    ///
    /// # Errors
    ///
    /// [`VectorError::NullInput`] when `values` is `None`,
    /// [`VectorError::EmptyInput`] when it is empty
    pub fn from_optional(values: Option<&[f64]>, unit: U, kind: StorageKind) -> Result<Self> {
        let values = values.ok_or_else(|| VectorError::null("values"))?;
        Self::new(values, unit, kind)
    }

    /// Create a vector from typed scalars. Each scalar carries its own unit;
    /// the first scalar's unit becomes the display unit.
    ///
    /// # Errors
    ///
    /// [`VectorError::EmptyInput`] when `values` is empty
    pub fn from_scalars(values: &[S], kind: StorageKind) -> Result<Self> {
        let first = values.first().ok_or(VectorError::EmptyInput)?;
        let values_si: Vec<f64> = values.iter().map(ScalarValue::si).collect();
        Ok(Self::from_storage(
            VectorStorage::from_si_values(values_si, kind),
            first.unit(),
        ))
    }

    /// Create a vector from scalars, any of which may be absent.
    ///
    /// # Errors
    ///
    /// [`VectorError::NullInput`] naming the first absent element,
    /// [`VectorError::EmptyInput`] when `values` is empty
    pub fn from_optional_scalars(values: &[Option<S>], kind: StorageKind) -> Result<Self> {
        let scalars = values
            .iter()
            .enumerate()
            .map(|(i, value)| value.ok_or_else(|| VectorError::null(format!("values[{i}]"))))
            .collect::<Result<Vec<S>>>()?;
        Self::from_scalars(&scalars, kind)
    }

    /// Create a vector of `length` positions from a position→value map in
    /// `unit`. Unlisted positions hold SI zero, as in
    /// [`QuantityVector::from_scalar_map`].
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
        if length == 0 {
            return Err(VectorError::EmptyInput);
        }
        let storage = VectorStorage::from_unit_pairs(
            values.iter().map(|(&i, &v)| (i, v)),
            length,
            unit,
            kind,
        )?;
        Ok(Self::from_storage(storage, unit))
    }

    /// Create a vector of `length` positions from a position→scalar map.
    /// Unlisted positions hold SI zero.
    ///
    /// # Errors
    ///
    /// [`VectorError::EmptyInput`] when `length` is zero,
    /// [`VectorError::IndexOutOfRange`] for a key `>= length`
    pub fn from_scalar_map(
        values: &BTreeMap<usize, S>,
        length: usize,
        display_unit: U,
        kind: StorageKind,
    ) -> Result<Self> {
        if length == 0 {
            return Err(VectorError::EmptyInput);
        }
        let storage = VectorStorage::from_unit_pairs(
            values.iter().map(|(&i, s)| (i, s.si())),
            length,
            U::SI,
            kind,
        )?;
        Ok(Self::from_storage(storage, display_unit))
    }

    /// Wrap existing reference-unit storage, taking exclusive ownership
    #[must_use]
    pub fn from_storage(storage: VectorStorage, display_unit: U) -> Self {
        Self::from_cell(CopyOnWriteCell::new(storage), display_unit)
    }

    fn from_cell(cell: CopyOnWriteCell, display_unit: U) -> Self {
        QuantityVector {
            cell,
            display_unit,
            _scalar: PhantomData,
        }
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    /// Logical length
    #[inline]
    pub fn size(&self) -> usize {
        self.storage().size()
    }

    /// Number of non-zero positions
    pub fn cardinality(&self) -> usize {
        self.storage().cardinality()
    }

    /// Current storage representation
    #[inline]
    pub fn storage_kind(&self) -> StorageKind {
        self.storage().kind()
    }

    /// True when backed by dense storage
    #[inline]
    pub fn is_dense(&self) -> bool {
        self.storage_kind() == StorageKind::Dense
    }

    /// True when backed by sparse storage
    #[inline]
    pub fn is_sparse(&self) -> bool {
        self.storage_kind() == StorageKind::Sparse
    }

    /// Unit used by [`QuantityVector::get_in_unit`] and [`QuantityVector::get`]
    #[inline]
    pub fn display_unit(&self) -> U {
        self.display_unit
    }

    /// Underlying reference-unit storage
    #[inline]
    pub fn storage(&self) -> &VectorStorage {
        self.cell.get()
    }

    /// Reference-unit magnitude at `index`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    #[inline]
    pub fn get_si(&self, index: usize) -> Result<f64> {
        self.storage().get_si(index)
    }

    /// Magnitude at `index` in the display unit
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn get_in_unit(&self, index: usize) -> Result<f64> {
        self.get_in(index, self.display_unit)
    }

    /// Magnitude at `index` in `unit`
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn get_in(&self, index: usize, unit: U) -> Result<f64> {
        Ok(unit.from_si(self.get_si(index)?))
    }

    /// Magnitude at `index` in the unit named by `symbol`
    ///
    /// # Errors
    ///
    /// [`VectorError::IncompatibleUnit`] or [`VectorError::UnknownUnit`] from
    /// the registry, [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn get_in_symbol(&self, index: usize, symbol: &str) -> Result<f64> {
        let unit = U::parse(symbol)?;
        self.get_in(index, unit)
    }

    /// Typed scalar at `index`, tagged with the display unit
    ///
    /// # Errors
    ///
    /// [`VectorError::IndexOutOfRange`] when `index >= size()`
    pub fn get(&self, index: usize) -> Result<S> {
        Ok(S::from_si(self.get_si(index)?, self.display_unit))
    }

    /// Every reference-unit magnitude
    pub fn values_si(&self) -> Vec<f64> {
        self.storage().dense_values()
    }

    /// Every magnitude in the display unit
    pub fn values_in_unit(&self) -> Vec<f64> {
        self.values_in(self.display_unit)
    }

    /// Every magnitude in `unit`
    pub fn values_in(&self, unit: U) -> Vec<f64> {
        self.storage()
            .dense_view()
            .iter()
            .map(|&si| unit.from_si(si))
            .collect()
    }

    /// Every position as a typed scalar
    pub fn scalars(&self) -> Vec<S> {
        self.storage()
            .dense_view()
            .iter()
            .map(|&si| S::from_si(si, self.display_unit))
            .collect()
    }

    /// Sum of the reference-unit magnitudes
    pub fn z_sum(&self) -> f64 {
        self.storage().z_sum()
    }

    /// True when both vectors read the same storage instance
    pub fn shares_storage_with<S2: ScalarValue<Unit = U>>(&self, other: &QuantityVector<U, S2>) -> bool {
        self.cell.shares_storage_with(&other.cell)
    }

    // ------------------------------------------------------------------------
    // Derived vectors
    // ------------------------------------------------------------------------

    /// Dense-backed equivalent; shares storage when already dense
    #[must_use]
    pub fn to_dense(&self) -> Self {
        self.to_kind(StorageKind::Dense)
    }

    /// Sparse-backed equivalent; shares storage when already sparse
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        self.to_kind(StorageKind::Sparse)
    }

    fn to_kind(&self, kind: StorageKind) -> Self {
        if self.storage_kind() == kind {
            return self.clone();
        }
        Self::from_storage(self.storage().to_kind(kind), self.display_unit)
    }

    /// Same magnitudes shown in another unit; shares storage
    #[must_use]
    pub fn with_display_unit(&self, unit: U) -> Self {
        Self::from_cell(self.cell.share(), unit)
    }

    /// Mutable sibling sharing this vector's storage until the first write
    pub fn mutable(&self) -> MutableQuantityVector<U, S> {
        MutableQuantityVector::from(self.clone())
    }

    // ------------------------------------------------------------------------
    // Element-wise arithmetic
    // ------------------------------------------------------------------------

    /// Element-wise sum with a relative vector
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn plus<S2>(&self, other: &QuantityVector<U::Relative, S2>) -> Result<Self>
    where
        S2: ScalarValue<Unit = U::Relative>,
    {
        let storage = self.storage().plus(other.storage())?;
        Ok(Self::from_storage(storage, self.display_unit))
    }

    /// Element-wise difference with a relative vector
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn minus<S2>(&self, other: &QuantityVector<U::Relative, S2>) -> Result<Self>
    where
        S2: ScalarValue<Unit = U::Relative>,
    {
        let storage = self.storage().minus(other.storage())?;
        Ok(Self::from_storage(storage, self.display_unit))
    }

    /// Element-wise scaling by dimensionless factors
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn times<S2>(&self, factors: &QuantityVector<DimensionlessUnit, S2>) -> Result<Self>
    where
        S2: ScalarValue<Unit = DimensionlessUnit>,
    {
        let storage = self.storage().times(factors.storage())?;
        Ok(Self::from_storage(storage, self.display_unit))
    }

    /// Element-wise division by dimensionless divisors
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn divide<S2>(&self, divisors: &QuantityVector<DimensionlessUnit, S2>) -> Result<Self>
    where
        S2: ScalarValue<Unit = DimensionlessUnit>,
    {
        let storage = self.storage().divide(divisors.storage())?;
        Ok(Self::from_storage(storage, self.display_unit))
    }
}

impl<U: AbsoluteUnit, S: ScalarValue<Unit = U>> QuantityVector<U, S> {
    /// Element-wise difference of two absolute vectors, e.g. two instants
    /// giving a duration. The result is shown in the relative counterpart of
    /// this vector's display unit.
    ///
    /// # Errors
    ///
    /// [`VectorError::LengthMismatch`] when the sizes differ
    pub fn minus_absolute<S2>(&self, other: &QuantityVector<U, S2>) -> Result<QuantityVector<U::Relative>>
    where
        S2: ScalarValue<Unit = U>,
    {
        let storage = self.storage().minus(other.storage())?;
        Ok(QuantityVector::from_storage(
            storage,
            self.display_unit.relative(),
        ))
    }
}

/// Equal when the display units match and every position holds the same
/// reference-unit magnitude. The storage representation does not matter.
impl<U: Unit, S: ScalarValue<Unit = U>> PartialEq for QuantityVector<U, S> {
    fn eq(&self, other: &Self) -> bool {
        self.display_unit == other.display_unit
            && self.size() == other.size()
            && (self.cell.shares_storage_with(&other.cell)
                || self.storage().dense_view() == other.storage().dense_view())
    }
}

//! Copy-on-write ownership of vector storage
//!
//! An immutable vector and a mutable sibling derived from it share one
//! [`VectorStorage`] until either side writes. The writer clones first and
//! keeps the clone; the other holder still sees the storage as it was.
//!
//! The ownership token is the reference count: a holder is exclusive when no
//! other cell points at the same storage. `Rc` keeps the cells `!Send`, so the
//! check-then-clone sequence never races.

use super::VectorStorage;
use std::rc::Rc;
use tracing::debug;

/// Shared handle to a storage instance with a clone-before-write rule.
#[derive(Debug, Clone)]
pub struct CopyOnWriteCell {
    storage: Rc<VectorStorage>,
}

impl CopyOnWriteCell {
    /// Take exclusive ownership of freshly built storage
    #[must_use]
    pub fn new(storage: VectorStorage) -> Self {
        CopyOnWriteCell {
            storage: Rc::new(storage),
        }
    }

    /// Read access; never copies
    #[inline]
    pub fn get(&self) -> &VectorStorage {
        &self.storage
    }

    /// Second holder of the same storage; both become non-exclusive
    #[must_use]
    pub fn share(&self) -> Self {
        CopyOnWriteCell {
            storage: Rc::clone(&self.storage),
        }
    }

    /// True when no other cell references this storage
    #[inline]
    pub fn is_exclusive(&self) -> bool {
        Rc::strong_count(&self.storage) == 1
    }

    /// True when both cells reference the same storage instance
    #[inline]
    pub fn shares_storage_with(&self, other: &CopyOnWriteCell) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    /// Write access. Clones the storage first if any other cell shares it.
    pub fn make_exclusive(&mut self) -> &mut VectorStorage {
        if !self.is_exclusive() {
            debug!(
                kind = ?self.storage.kind(),
                size = self.storage.size(),
                "Cloning shared vector storage before write"
            );
            self.storage = Rc::new(self.storage.copy());
        }
        Rc::make_mut(&mut self.storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DenseStorage;

    fn cell(values: &[f64]) -> CopyOnWriteCell {
        CopyOnWriteCell::new(VectorStorage::Dense(DenseStorage::new(values.to_vec())))
    }

    #[test]
    fn test_new_cell_is_exclusive() {
        let c = cell(&[1.0, 2.0]);
        assert!(c.is_exclusive());
    }

    #[test]
    fn test_share_then_write_isolates() {
        let a = cell(&[1.0, 2.0, 3.0]);
        let mut b = a.share();
        assert!(!a.is_exclusive());
        assert!(a.shares_storage_with(&b));

        b.make_exclusive().set_si(0, 10.0).unwrap();

        assert!(!a.shares_storage_with(&b));
        assert!(a.is_exclusive());
        assert!(b.is_exclusive());
        assert_eq!(a.get().get_si(0), Ok(1.0));
        assert_eq!(b.get().get_si(0), Ok(10.0));
    }

    #[test]
    fn test_exclusive_write_does_not_copy() {
        let mut a = cell(&[1.0]);
        let before: *const VectorStorage = a.get();
        a.make_exclusive().set_si(0, 2.0).unwrap();
        let after: *const VectorStorage = a.get();
        assert_eq!(before, after);
    }
}

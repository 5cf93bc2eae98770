//! Unit-Aware Vector Library
//!
//! Fixed-length vectors of physical quantities (lengths, masses, temperatures,
//! ...) that keep every magnitude in the quantity's reference unit and convert
//! on read. Each vector is backed by dense or sparse storage and comes in an
//! immutable and a mutable variant that share storage until the first write.
//!
//! ## Layout
//!
//! - [`unit`]: unit families, scale/offset conversion and symbol lookup
//! - [`storage`]: dense and sparse reference-unit storage, copy-on-write cell
//! - [`vector`]: the generic immutable and mutable vectors
//! - [`quantity`]: one unit enum and set of type aliases per physical quantity

// Shared error type
pub mod error;

// Units and scalars
pub mod scalar;
pub mod unit;

// Storage and vectors
pub mod storage;
pub mod vector;

// Per-quantity instantiations
pub mod quantity;

pub use error::{Result, VectorError};
pub use scalar::{Scalar, ScalarValue};
pub use storage::{StorageKind, VectorStorage, PARALLEL_THRESHOLD};
pub use unit::{AbsoluteUnit, RelativeUnit, Scale, Unit};
pub use vector::{MutableQuantityVector, QuantityVector};

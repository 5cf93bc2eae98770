//! Array kernels with optional rayon data parallelism
//!
//! Arrays longer than [`PARALLEL_THRESHOLD`] are processed with rayon when the
//! `parallel` feature is enabled. Results are identical either way except for
//! floating-point summation order in [`sum`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Minimum array length before work is split across threads
pub const PARALLEL_THRESHOLD: usize = 1000;

/// Map every value through `f` into a new array
#[cfg(feature = "parallel")]
pub(crate) fn map<F>(values: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    if values.len() > PARALLEL_THRESHOLD {
        values.par_iter().map(|&v| f(v)).collect()
    } else {
        values.iter().map(|&v| f(v)).collect()
    }
}

/// Map every value through `f` into a new array
#[cfg(not(feature = "parallel"))]
pub(crate) fn map<F>(values: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    values.iter().map(|&v| f(v)).collect()
}

/// Apply `f` to every value in place
#[cfg(feature = "parallel")]
pub(crate) fn map_in_place<F>(values: &mut [f64], f: F)
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    if values.len() > PARALLEL_THRESHOLD {
        values.par_iter_mut().for_each(|v| *v = f(*v));
    } else {
        for v in values {
            *v = f(*v);
        }
    }
}

/// Apply `f` to every value in place
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_in_place<F>(values: &mut [f64], f: F)
where
    F: Fn(f64) -> f64 + Sync + Send,
{
    for v in values {
        *v = f(*v);
    }
}

/// Number of non-zero values
#[cfg(feature = "parallel")]
pub(crate) fn count_non_zero(values: &[f64]) -> usize {
    if values.len() > PARALLEL_THRESHOLD {
        values.par_iter().filter(|&&v| v != 0.0).count()
    } else {
        values.iter().filter(|&&v| v != 0.0).count()
    }
}

/// Number of non-zero values
#[cfg(not(feature = "parallel"))]
pub(crate) fn count_non_zero(values: &[f64]) -> usize {
    values.iter().filter(|&&v| v != 0.0).count()
}

/// Sum of all values
#[cfg(feature = "parallel")]
pub(crate) fn sum(values: &[f64]) -> f64 {
    if values.len() > PARALLEL_THRESHOLD {
        values.par_iter().sum()
    } else {
        values.iter().sum()
    }
}

/// Sum of all values
#[cfg(not(feature = "parallel"))]
pub(crate) fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

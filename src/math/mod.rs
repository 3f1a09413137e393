//! Numeric kernels shared by the pipeline stages.
//!
//! Missing values are `NaN` throughout; every kernel skips them unless stated otherwise.

use thiserror::Error;

pub mod corr;
pub mod describe;
pub mod ttest;
pub mod ward;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("cannot summarise an empty series")]
    EmptySeries,
    #[error("harmonic mean requires strictly positive values (got {value} at index {index})")]
    NonPositive { index: usize, value: f64 },
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

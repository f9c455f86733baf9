//! Metrics calculation module
//!
//! This module handles scoring a finished quiz:
//! - Mean absolute error over parallel age sequences
//! - The user-versus-models comparison shown on the result page

pub mod mae;
pub mod comparison;

use thiserror::Error;

pub use comparison::{Comparison, ResultRow, USER_LABEL};
pub use mae::mean_absolute_error;

/// Metrics calculation errors
#[derive(Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("Sequence lengths differ: {predicted} predictions vs {actual} actual values")]
    LengthMismatch { predicted: usize, actual: usize },

    #[error("Mean absolute error is undefined for empty input")]
    EmptyInput,
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

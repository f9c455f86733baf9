//! Mean absolute error

use super::{MetricsError, MetricsResult};

/// Average of `|predicted[i] - actual[i]|` over all indexes
pub fn mean_absolute_error(predicted: &[u32], actual: &[u32]) -> MetricsResult<f64> {
    if predicted.len() != actual.len() {
        return Err(MetricsError::LengthMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Err(MetricsError::EmptyInput);
    }

    let total: u64 = predicted
        .iter()
        .zip(actual)
        .map(|(&p, &a)| u64::from(p.abs_diff(a)))
        .sum();

    Ok(total as f64 / predicted.len() as f64)
}

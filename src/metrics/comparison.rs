//! User-versus-models comparison
//!
//! Rows are always ordered "You" first, then the models in declaration
//! order. They are deliberately not sorted by error.

use serde::Serialize;

use super::{mean_absolute_error, MetricsResult};
use crate::dataset::{Dataset, ModelId};

/// Label of the row holding the player's own score
pub const USER_LABEL: &str = "You";

/// One bar of the result chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub mean_absolute_error: f64,
    pub is_user: bool,
}

/// Scores of a finished quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub user_mae: f64,
    pub rows: Vec<ResultRow>,
}

impl Comparison {
    /// Score the user's guesses and every model against the true ages
    pub fn compute(dataset: &Dataset, guesses: &[u32]) -> MetricsResult<Self> {
        let actual = dataset.true_ages();
        let user_mae = mean_absolute_error(guesses, &actual)?;

        let mut rows = Vec::with_capacity(1 + ModelId::ALL.len());
        rows.push(ResultRow {
            label: USER_LABEL.to_string(),
            mean_absolute_error: user_mae,
            is_user: true,
        });

        for model in ModelId::ALL {
            rows.push(ResultRow {
                label: dataset.model_label(model).to_string(),
                mean_absolute_error: mean_absolute_error(&dataset.predictions(model), &actual)?,
                is_user: false,
            });
        }

        Ok(Self { user_mae, rows })
    }

    /// Number of models whose error is strictly higher than the user's
    pub fn models_beaten(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| !row.is_user && row.mean_absolute_error > self.user_mae)
            .count()
    }

    /// Largest error across all rows (chart scale)
    pub fn max_error(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.mean_absolute_error)
            .fold(0.0, f64::max)
    }
}

//! Photo dataset
//!
//! The quiz runs over a fixed table of photographs: for each one the true
//! age and the ages predicted by three models. The table is loaded once at
//! startup and never changes afterwards.

pub mod loader;

use serde::Serialize;
use thiserror::Error;

pub use loader::load;

/// Dataset loading errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Dataset contains no photos")]
    Empty,
}

/// The three models whose predictions ship with the dataset, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModelId {
    Model1,
    Model2,
    Model3,
}

impl ModelId {
    /// All models in declaration order
    pub const ALL: [ModelId; 3] = [ModelId::Model1, ModelId::Model2, ModelId::Model3];

    /// Canonical column name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Model1 => "model1_pred",
            Self::Model2 => "model2_pred",
            Self::Model3 => "model3_pred",
        }
    }

    fn position(&self) -> usize {
        match self {
            Self::Model1 => 0,
            Self::Model2 => 1,
            Self::Model3 => 2,
        }
    }
}

/// One photograph and what everybody thinks its age is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRecord {
    pub index: usize,
    pub image: String,
    pub true_age: u32,
    pub model1_pred: u32,
    pub model2_pred: u32,
    pub model3_pred: u32,
}

impl PhotoRecord {
    /// Prediction of the given model for this photo
    pub fn prediction(&self, model: ModelId) -> u32 {
        match model {
            ModelId::Model1 => self.model1_pred,
            ModelId::Model2 => self.model2_pred,
            ModelId::Model3 => self.model3_pred,
        }
    }
}

/// Read-only, index-addressed photo table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<PhotoRecord>,
    model_labels: [String; 3],
}

impl Dataset {
    /// Build a dataset from records; indexes are reassigned to match positions
    pub fn from_records(mut records: Vec<PhotoRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        for (index, record) in records.iter_mut().enumerate() {
            record.index = index;
        }
        Ok(Self {
            records,
            model_labels: ModelId::ALL.map(|model| model.label().to_string()),
        })
    }

    /// Display the models under the given names (e.g. the file's headers)
    pub fn with_model_labels(mut self, labels: [String; 3]) -> Self {
        self.model_labels = labels;
        self
    }

    /// Display name of a model
    pub fn model_label(&self, model: ModelId) -> &str {
        &self.model_labels[model.position()]
    }

    /// Number of photos
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset holds no photos
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    /// True ages in index order
    pub fn true_ages(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.true_age).collect()
    }

    /// Predictions of one model in index order
    pub fn predictions(&self, model: ModelId) -> Vec<u32> {
        self.records.iter().map(|r| r.prediction(model)).collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Small dataset used across module tests: (true, m1, m2, m3)
    pub fn sample_dataset(rows: &[(u32, u32, u32, u32)]) -> Dataset {
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, &(true_age, m1, m2, m3))| PhotoRecord {
                index: i,
                image: format!("{}.png", i + 1),
                true_age,
                model1_pred: m1,
                model2_pred: m2,
                model3_pred: m3,
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }
}

//! CSV dataset loader
//!
//! Expected header (column order does not matter, extra columns are ignored):
//!
//! ```text
//! image,true_age,model1_pred,model2_pred,model3_pred
//! ```
//!
//! The Portuguese headers of the first data files (`imagem`, `idade_real`,
//! `modelo1_pred`, ...) are accepted too. `image` is optional; when it is
//! absent or empty the reference becomes `"{index+1}.{ext}"`.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::{Dataset, DatasetError, PhotoRecord};

const IMAGE: &[&str] = &["image", "imagem"];
const TRUE_AGE: &[&str] = &["true_age", "idade_real"];
const MODEL1: &[&str] = &["model1_pred", "modelo1_pred"];
const MODEL2: &[&str] = &["model2_pred", "modelo2_pred"];
const MODEL3: &[&str] = &["model3_pred", "modelo3_pred"];

/// Column positions resolved from the header row
struct Columns {
    image: Option<usize>,
    true_age: usize,
    model1: usize,
    model2: usize,
    model3: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        Ok(Self {
            image: find_column(headers, IMAGE),
            true_age: require_column(headers, TRUE_AGE)?,
            model1: require_column(headers, MODEL1)?,
            model2: require_column(headers, MODEL2)?,
            model3: require_column(headers, MODEL3)?,
        })
    }
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn require_column(headers: &StringRecord, names: &[&'static str]) -> Result<usize, DatasetError> {
    find_column(headers, names).ok_or(DatasetError::MissingColumn(names[0]))
}

fn parse_age(
    record: &StringRecord,
    position: usize,
    row: usize,
    column: &'static str,
) -> Result<u32, DatasetError> {
    let raw = record.get(position).unwrap_or("").trim();
    raw.parse().map_err(|_| DatasetError::InvalidValue {
        row,
        column,
        value: raw.to_string(),
    })
}

/// Load the photo dataset from a CSV file
pub fn load(path: &Path, image_extension: &str) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers)?;
    let model_labels = [columns.model1, columns.model2, columns.model3]
        .map(|pos| headers.get(pos).unwrap_or_default().trim().to_string());

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = index + 1;

        let image = columns
            .image
            .and_then(|pos| record.get(pos))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.{}", index + 1, image_extension));

        records.push(PhotoRecord {
            index,
            image,
            true_age: parse_age(&record, columns.true_age, row, TRUE_AGE[0])?,
            model1_pred: parse_age(&record, columns.model1, row, MODEL1[0])?,
            model2_pred: parse_age(&record, columns.model2, row, MODEL2[0])?,
            model3_pred: parse_age(&record, columns.model3, row, MODEL3[0])?,
        });
    }

    tracing::debug!("Loaded {} photo records from {:?}", records.len(), path);

    Ok(Dataset::from_records(records)?.with_model_labels(model_labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ModelId;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_synthesizes_image_names_in_index_order() {
        let file = write_csv(
            "true_age,model1_pred,model2_pred,model3_pred\n\
             20,22,25,19\n\
             30,28,35,31\n\
             45,40,50,44\n",
        );

        let dataset = load(file.path(), "png").unwrap();
        let images: Vec<&str> = dataset.records().iter().map(|r| r.image.as_str()).collect();

        assert_eq!(images, vec!["1.png", "2.png", "3.png"]);
        assert_eq!(dataset.true_ages(), vec![20, 30, 45]);
    }

    #[test]
    fn test_uses_image_column_when_present() {
        let file = write_csv(
            "image,true_age,model1_pred,model2_pred,model3_pred\n\
             alice.jpg,20,22,25,19\n\
             ,30,28,35,31\n",
        );

        let dataset = load(file.path(), "jpg").unwrap();

        assert_eq!(dataset.get(0).unwrap().image, "alice.jpg");
        assert_eq!(dataset.get(1).unwrap().image, "2.jpg");
    }

    #[test]
    fn test_accepts_portuguese_headers() {
        let file = write_csv(
            "imagem,idade_real,modelo1_pred,modelo2_pred,modelo3_pred\n\
             1.png,61,58,66,60\n",
        );

        let dataset = load(file.path(), "png").unwrap();
        let record = dataset.get(0).cloned().unwrap();

        assert_eq!(dataset.model_label(ModelId::Model1), "modelo1_pred");
        assert_eq!(dataset.model_label(ModelId::Model2), "modelo2_pred");
        assert_eq!(record.true_age, 61);
        assert_eq!(record.model1_pred, 58);
        assert_eq!(record.model2_pred, 66);
        assert_eq!(record.model3_pred, 60);
    }

    #[test]
    fn test_column_order_and_extra_columns_ignored() {
        let file = write_csv(
            "model3_pred,notes,true_age,model2_pred,model1_pred\n\
             19,smiling,20,25,22\n",
        );

        let record = load(file.path(), "png").unwrap().get(0).cloned().unwrap();

        assert_eq!(record.true_age, 20);
        assert_eq!(record.model1_pred, 22);
        assert_eq!(record.model3_pred, 19);
    }

    #[test]
    fn test_missing_file() {
        let result = load(Path::new("/nonexistent/data.csv"), "png");
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }

    #[test]
    fn test_missing_model_column() {
        let file = write_csv("true_age,model1_pred,model2_pred\n20,22,25\n");
        let result = load(file.path(), "png");
        assert!(matches!(result, Err(DatasetError::MissingColumn("model3_pred"))));
    }

    #[test]
    fn test_non_numeric_age() {
        let file = write_csv(
            "true_age,model1_pred,model2_pred,model3_pred\n\
             twenty,22,25,19\n",
        );

        match load(file.path(), "png") {
            Err(DatasetError::InvalidValue { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "true_age");
                assert_eq!(value, "twenty");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let file = write_csv(
            "true_age,model1_pred,model2_pred,model3_pred\n\
             20,22\n",
        );
        assert!(matches!(load(file.path(), "png"), Err(DatasetError::Csv(_))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let file = write_csv("true_age,model1_pred,model2_pred,model3_pred\n");
        assert!(matches!(load(file.path(), "png"), Err(DatasetError::Empty)));
    }
}

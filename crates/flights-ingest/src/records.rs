//! Flight records CSV loading.
//!
//! Every column is read as text; the sanitizer casts columns according to
//! the metadata afterwards. Cells holding a missing-value token become null.

use std::path::Path;

use polars::prelude::{Column, CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Cell values treated as missing.
pub const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

/// Returns true if the trimmed cell is a missing-value token.
pub fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS.contains(&value.trim())
}

/// Read the flight records file into a DataFrame of nullable text columns.
///
/// # Errors
///
/// Fails when the file does not exist, is empty, or cannot be parsed.
pub fn read_flight_records(path: &Path) -> Result<DataFrame> {
    let metadata = std::fs::metadata(path).map_err(|_| IngestError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if raw.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = normalize_missing(&raw)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "flight records loaded"
    );
    Ok(df)
}

/// Trim text cells and turn missing-value tokens into nulls.
pub fn normalize_missing(df: &DataFrame) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let text = column.str()?;
        let values: Vec<Option<String>> = text
            .into_iter()
            .map(|value| {
                value.and_then(|raw| {
                    let trimmed = raw.trim();
                    if is_missing_token(trimmed) {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
            })
            .collect();
        columns.push(Column::new(column.name().clone(), values));
    }
    Ok(DataFrame::new(columns)?)
}

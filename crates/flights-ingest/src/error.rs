//! Error types for flight records ingestion.

use std::path::PathBuf;
use thiserror::Error;

use flights_model::ModelError;

/// Errors raised while reading the flight records file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Records file not found.
    #[error("records file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Errors raised while loading the schema description.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Metadata file not found.
    #[error("metadata file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the metadata CSV.
    #[error("failed to read metadata {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Metadata file has no column rows.
    #[error("metadata file has no column rows: {path}")]
    Empty { path: PathBuf },

    /// Required column not found in the metadata header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Type tag outside the supported set.
    #[error("{path}:{line}: column '{column}': {source}")]
    UnknownType {
        column: String,
        line: u64,
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    /// Invalid value in a metadata field.
    #[error("{path}:{line}: invalid {field} value '{value}'")]
    InvalidValue {
        field: String,
        value: String,
        line: u64,
        path: PathBuf,
    },

    /// The same column name appears twice.
    #[error("{path}:{line}: duplicate {field} '{value}'")]
    DuplicateColumn {
        field: String,
        value: String,
        line: u64,
        path: PathBuf,
    },
}

/// Result type for records ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

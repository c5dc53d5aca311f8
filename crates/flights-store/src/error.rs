//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("failed to open database {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The database directory could not be created.
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table names are restricted to `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("invalid table name '{0}'")]
    InvalidTableName(String),

    /// A statement failed.
    #[error("failed to {operation} table '{table}'")]
    Sql {
        operation: &'static str,
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed DataFrame access.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for StoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

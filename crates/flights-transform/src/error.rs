//! Error types for the transformation stages.

use thiserror::Error;

use crate::time::TimeRepairError;

/// Errors raised by sanitization and feature engineering.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column required by a stage is absent.
    #[error("{stage}: column '{column}' not found")]
    MissingColumn { column: String, stage: &'static str },

    /// Values that could not be converted to the declared type.
    #[error(
        "cannot cast column '{column}' to {target}: {count} value(s) failed, first '{sample}' at row {row}"
    )]
    Cast {
        column: String,
        target: String,
        count: usize,
        sample: String,
        row: usize,
    },

    /// The column's current type has no conversion to the declared type.
    #[error("cannot cast column '{column}' from {from} to {target}")]
    UnsupportedCast {
        column: String,
        from: String,
        target: String,
    },

    /// Date components that do not form a calendar date.
    #[error("row {row}: invalid flight date '{value}'")]
    InvalidDate { row: usize, value: String },

    /// A clock-time string outside the repair policy.
    #[error("column '{column}' row {row}: {source}")]
    TimeRepair {
        column: String,
        row: usize,
        #[source]
        source: TimeRepairError,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation stages.
pub type Result<T> = std::result::Result<T, TransformError>;

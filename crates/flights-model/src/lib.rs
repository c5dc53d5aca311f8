//! Shared data model for the flights ETL pipeline.

pub mod column_type;
pub mod columns;
pub mod error;
pub mod metadata;
pub mod report;

pub use column_type::ColumnType;
pub use error::ModelError;
pub use metadata::{ColumnSpec, DEFAULT_TABLE_NAME, MetadataConfig};
pub use report::{CheckKind, IssueSeverity, ValidationIssue, ValidationReport};

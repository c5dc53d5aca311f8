//! SQLite persistence for the flights analytical table.
//!
//! Each run replaces the output table wholesale: drop, create from the frame
//! schema, insert every row, all inside one transaction. A read-back sample
//! confirms the table is queryable.

mod error;
mod sqlite;
mod value;

pub use error::{Result, StoreError};
pub use sqlite::{SqliteStore, TableSample, validate_table_name};
pub use value::{DATE_FORMAT, DATETIME_FORMAT, sql_type};

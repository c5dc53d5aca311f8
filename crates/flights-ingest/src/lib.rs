//! Flight records ingestion.
//!
//! This crate loads the two inputs of a pipeline run:
//!
//! - **Metadata**: the schema description CSV, parsed and validated into a
//!   [`flights_model::MetadataConfig`]
//! - **Records**: the raw flight records CSV, read into a Polars DataFrame
//!   with every column as nullable text
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use flights_ingest::{load_metadata, read_flight_records};
//!
//! let config = load_metadata(Path::new("data/metadados.csv"))?;
//! let df = read_flight_records(Path::new("data/flights.csv"))?;
//! ```

mod error;
mod metadata;
mod records;

// === Error Types ===
pub use error::{IngestError, MetadataError, Result};

// === Metadata ===
pub use metadata::load_metadata;

// === Records ===
pub use records::{MISSING_TOKENS, is_missing_token, normalize_missing, read_flight_records};

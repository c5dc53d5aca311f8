//! CLI library components for the flights ETL pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;

use std::path::PathBuf;

use flights_model::ValidationReport;
use flights_store::TableSample;

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    pub table: String,
    /// Database written to; `None` on a dry run.
    pub db_path: Option<PathBuf>,
    pub rows_read: usize,
    pub rows_sanitized: usize,
    pub rows_written: Option<usize>,
    pub columns: usize,
    pub validation: ValidationReport,
    pub sample: Option<TableSample>,
}

impl RunSummary {
    pub fn is_dry_run(&self) -> bool {
        self.db_path.is_none()
    }
}

//! Data-quality validation for sanitized flight records.
//!
//! Checks never fail the run. Each finding is logged and recorded in a
//! [`ValidationReport`]; the caller decides what to do with it.

mod checks;
mod util;

use flights_model::{MetadataConfig, ValidationReport};
use polars::prelude::DataFrame;
use tracing::info;

pub use checks::keys::{check_key_duplicates, count_duplicate_keys};
pub use checks::nulls::{check_nulls, null_fraction};

/// Run every check against the table using the metadata's tolerances and keys.
pub fn validate(df: &DataFrame, config: &MetadataConfig) -> ValidationReport {
    let mut report = ValidationReport::new(df.height());

    for issue in check_nulls(df, &config.null_tolerances()) {
        report.add(issue);
    }
    for issue in check_key_duplicates(df, &config.key_columns_renamed()) {
        report.add(issue);
    }

    info!(
        rows = report.row_count,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation complete"
    );
    report
}

//! Key uniqueness check.
//!
//! Counts rows whose key tuple repeats an earlier row.

use std::collections::HashSet;

use flights_model::{CheckKind, IssueSeverity, ValidationIssue};
use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, warn};

use crate::util::cell_text;

/// Report duplicated key tuples as a single `Warning` issue.
///
/// Key columns absent from the table are `Error` issues and skip the
/// duplicate count.
pub fn check_key_duplicates(df: &DataFrame, keys: &[&str]) -> Vec<ValidationIssue> {
    if keys.is_empty() {
        return Vec::new();
    }

    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| df.column(key).is_err())
        .collect();
    if !missing.is_empty() {
        return missing
            .into_iter()
            .map(|key| {
                warn!(column = key, "key column not found, skipping duplicate check");
                ValidationIssue {
                    check: CheckKind::KeyDuplicates,
                    severity: IssueSeverity::Error,
                    column: Some(key.to_string()),
                    count: None,
                    message: "key column not found".to_string(),
                }
            })
            .collect();
    }

    let duplicates = count_duplicate_keys(df, keys);
    if duplicates == 0 {
        info!(keys = ?keys, "key tuples are unique");
        return Vec::new();
    }

    let distinct = df.height() as u64 - duplicates;
    warn!(
        keys = ?keys,
        rows = df.height(),
        distinct,
        duplicates,
        "duplicated key rows"
    );
    vec![ValidationIssue {
        check: CheckKind::KeyDuplicates,
        severity: IssueSeverity::Warning,
        column: None,
        count: Some(duplicates),
        message: format!(
            "{duplicates} row(s) repeat a key of ({})",
            keys.join(", ")
        ),
    }]
}

/// Rows minus distinct key tuples. Nulls compare equal to each other.
pub fn count_duplicate_keys(df: &DataFrame, keys: &[&str]) -> u64 {
    let columns: Vec<_> = keys.iter().filter_map(|key| df.column(key).ok()).collect();
    if columns.is_empty() {
        return 0;
    }

    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(df.height());
    let mut duplicate_count = 0u64;
    for idx in 0..df.height() {
        let tuple: Vec<Option<String>> = columns
            .iter()
            .map(|column| cell_text(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        if !seen.insert(tuple) {
            duplicate_count += 1;
        }
    }
    duplicate_count
}

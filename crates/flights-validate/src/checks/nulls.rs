//! Null-fraction tolerance check.

use std::collections::BTreeMap;

use flights_model::{CheckKind, IssueSeverity, ValidationIssue};
use polars::prelude::DataFrame;
use tracing::{error, info};

/// Share of null rows in a column; an empty table has fraction 0.
pub fn null_fraction(null_count: usize, row_count: usize) -> f64 {
    if row_count == 0 {
        0.0
    } else {
        null_count as f64 / row_count as f64
    }
}

/// Compare each column's null fraction with its declared tolerance.
///
/// Columns above tolerance, or absent from the table, are `Error` issues;
/// columns within tolerance are recorded as `Info`.
pub fn check_nulls(df: &DataFrame, tolerances: &BTreeMap<&str, f64>) -> Vec<ValidationIssue> {
    let rows = df.height();
    let mut issues = Vec::with_capacity(tolerances.len());

    for (&name, &tolerance) in tolerances {
        let Ok(column) = df.column(name) else {
            error!(column = name, "column with null tolerance not found");
            issues.push(ValidationIssue {
                check: CheckKind::NullTolerance,
                severity: IssueSeverity::Error,
                column: Some(name.to_string()),
                count: None,
                message: "column not found".to_string(),
            });
            continue;
        };

        let nulls = column.null_count();
        let fraction = null_fraction(nulls, rows);
        if fraction > tolerance {
            error!(
                column = name,
                nulls,
                fraction,
                tolerance,
                "null fraction above tolerance"
            );
            issues.push(ValidationIssue {
                check: CheckKind::NullTolerance,
                severity: IssueSeverity::Error,
                column: Some(name.to_string()),
                count: Some(nulls as u64),
                message: format!("null fraction {fraction:.2} exceeds tolerance {tolerance:.2}"),
            });
        } else {
            info!(column = name, nulls, fraction, tolerance, "nulls within tolerance");
            issues.push(ValidationIssue {
                check: CheckKind::NullTolerance,
                severity: IssueSeverity::Info,
                column: Some(name.to_string()),
                count: Some(nulls as u64),
                message: format!("null fraction {fraction:.2} within tolerance {tolerance:.2}"),
            });
        }
    }

    issues
}

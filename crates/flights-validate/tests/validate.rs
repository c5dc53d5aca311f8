//! Validation over a sanitized-looking frame built from metadata.

use flights_model::{CheckKind, ColumnSpec, IssueSeverity, MetadataConfig};
use flights_validate::validate;
use polars::prelude::{Column, DataFrame};

fn config() -> MetadataConfig {
    MetadataConfig::new(
        vec![
            ColumnSpec::new("carrier", "companhia")
                .with_key(true)
                .with_null_tolerance(Some(0.0)),
            ColumnSpec::new("flight", "voo").with_key(true),
            ColumnSpec::new("dep_delay", "atraso_saida").with_null_tolerance(Some(0.25)),
            ColumnSpec::new("origin", "origem").with_null_tolerance(Some(0.5)),
        ],
        None,
    )
}

#[test]
fn test_clean_frame_has_only_info() {
    let df = DataFrame::new(vec![
        Column::new("companhia".into(), vec!["UA", "AA", "B6", "UA"]),
        Column::new("voo".into(), vec![1545i64, 1141, 725, 1696]),
        Column::new("atraso_saida".into(), vec![Some(2.0), None, Some(-1.0), Some(0.0)]),
        Column::new("origem".into(), vec!["EWR", "JFK", "JFK", "EWR"]),
    ])
    .unwrap();

    let report = validate(&df, &config());
    assert_eq!(report.row_count, 4);
    assert!(!report.has_errors());
    assert_eq!(report.warning_count(), 0);
    assert!(
        report
            .issues
            .iter()
            .all(|issue| issue.severity == IssueSeverity::Info)
    );
    assert_eq!(report.issues_for(CheckKind::NullTolerance).count(), 3);
}

#[test]
fn test_findings_do_not_stop_validation() {
    let df = DataFrame::new(vec![
        Column::new("companhia".into(), vec!["UA", "UA", "UA"]),
        Column::new("voo".into(), vec![1545i64, 1545, 1545]),
        Column::new("atraso_saida".into(), vec![None, None, Some(4.0)]),
    ])
    .unwrap();

    let report = validate(&df, &config());
    // atraso_saida above tolerance, origem missing
    assert_eq!(report.error_count(), 2);
    let duplicates: Vec<_> = report.issues_for(CheckKind::KeyDuplicates).collect();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].count, Some(2));
    assert_eq!(duplicates[0].severity, IssueSeverity::Warning);
}

#[test]
fn test_empty_frame_passes() {
    let df = DataFrame::new(vec![
        Column::new("companhia".into(), Vec::<&str>::new()),
        Column::new("voo".into(), Vec::<i64>::new()),
        Column::new("atraso_saida".into(), Vec::<f64>::new()),
        Column::new("origem".into(), Vec::<&str>::new()),
    ])
    .unwrap();

    let report = validate(&df, &config());
    assert_eq!(report.row_count, 0);
    assert!(!report.has_errors());
}

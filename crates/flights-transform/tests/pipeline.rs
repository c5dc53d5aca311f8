//! Sanitize and feature passes over a small flight frame.

use chrono::{NaiveDate, Timelike};
use flights_model::{ColumnSpec, ColumnType, MetadataConfig, columns};
use flights_transform::frame::{date_values, datetime_values, f64_values, text_values};
use flights_transform::{TransformError, engineer_features, sanitize};
use polars::prelude::{Column, DataFrame, DataType, TimeUnit};

fn config() -> MetadataConfig {
    MetadataConfig::new(
        vec![
            ColumnSpec::new("carrier", "companhia")
                .with_types(Some(ColumnType::String), Some(ColumnType::String))
                .with_key(true)
                .with_null_tolerance(Some(0.0))
                .with_string_normalization(true),
            ColumnSpec::new("origin", "origem")
                .with_types(Some(ColumnType::String), Some(ColumnType::String))
                .with_string_normalization(true),
            ColumnSpec::new("dep_time", columns::DEPARTURE)
                .with_types(Some(ColumnType::Float), Some(ColumnType::Datetime))
                .with_time_correction(true),
            ColumnSpec::new("arr_time", columns::ARRIVAL)
                .with_types(Some(ColumnType::Float), Some(ColumnType::Datetime))
                .with_time_correction(true),
            ColumnSpec::new("air_time", columns::FLIGHT_MINUTES)
                .with_types(Some(ColumnType::Float), Some(ColumnType::Float))
                .with_null_tolerance(Some(0.1)),
            ColumnSpec::new(columns::FLIGHT_DATE, columns::FLIGHT_DATE).with_key(true),
        ],
        Some("nyflights".to_string()),
    )
}

fn raw_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new("year".into(), vec![Some("2013"), Some("2013"), Some("2013")]),
        Column::new("month".into(), vec![Some("1"), Some("1"), Some("1")]),
        Column::new("day".into(), vec![Some("1"), Some("1"), Some("2")]),
        Column::new("carrier".into(), vec![Some("ua"), None, Some("A-A")]),
        Column::new("origin".into(), vec![Some("ewr"), Some("lga"), Some("jfk ")]),
        Column::new("dep_time".into(), vec![Some("517"), Some("533"), Some("1245")]),
        Column::new("arr_time".into(), vec![Some("830"), Some("850"), Some("1500")]),
        Column::new("air_time".into(), vec![Some("227"), Some("227"), Some("100")]),
        Column::new("flight".into(), vec![Some("1545"), Some("1714"), Some("1141")]),
    ])
    .unwrap()
}

#[test]
fn test_sanitize_drops_null_keys_and_renames() {
    let out = sanitize(&raw_frame(), &config()).unwrap();

    assert_eq!(out.height(), 2);
    let companies = text_values(out.column("companhia").unwrap()).unwrap();
    assert!(companies.iter().all(Option::is_some));
    assert!(out.column("flight").is_err());
    assert!(out.column("carrier").is_err());
    assert_eq!(out.column(columns::FLIGHT_MINUTES).unwrap().dtype(), &DataType::Float64);

    let formatted = text_values(out.column("companhia_formatted").unwrap()).unwrap();
    assert_eq!(formatted, vec![Some("UA".to_string()), Some("AA".to_string())]);
}

#[test]
fn test_features_populate_every_row() {
    let sanitized = sanitize(&raw_frame(), &config()).unwrap();
    let out = engineer_features(&sanitized, &config()).unwrap();

    assert_eq!(out.height(), 2);
    for name in columns::DERIVED_FEATURES {
        let column = out.column(name).unwrap();
        assert_eq!(column.null_count(), 0, "{name} has nulls");
    }
    assert!(out.column("companhia_formatted").is_err());

    let timestamp = DataType::Datetime(TimeUnit::Microseconds, None);
    let expected_types = [
        (columns::EXPECTED_HOURS, DataType::Float64),
        (columns::FLIGHT_HOURS, DataType::Float64),
        (columns::DELAY_HOURS, DataType::Float64),
        (columns::WEEKDAY, DataType::Int32),
        (columns::DAY_PERIOD, DataType::String),
        (columns::STATUS, DataType::String),
        (columns::DEPARTURE, timestamp.clone()),
        (columns::ARRIVAL, timestamp),
        (columns::FLIGHT_DATE, DataType::Date),
    ];
    for (name, dtype) in &expected_types {
        assert_eq!(out.column(name).unwrap().dtype(), dtype, "{name}");
    }

    assert_eq!(
        text_values(out.column("origem").unwrap()).unwrap(),
        vec![Some("EWR".to_string()), Some("JFK".to_string())]
    );

    let departures = datetime_values(out.column(columns::DEPARTURE).unwrap()).unwrap();
    assert_eq!(departures[0].map(|d| (d.hour(), d.minute())), Some((5, 17)));
    let dates = date_values(out.column(columns::FLIGHT_DATE).unwrap()).unwrap();
    assert_eq!(dates[1], NaiveDate::from_ymd_opt(2013, 1, 2));

    let expected = f64_values(out.column(columns::EXPECTED_HOURS).unwrap()).unwrap();
    assert!((expected[0].unwrap() - (3.0 + 13.0 / 60.0)).abs() < 1e-9);
    let statuses = text_values(out.column(columns::STATUS).unwrap()).unwrap();
    assert_eq!(
        statuses,
        vec![Some("ATRASO".to_string()), Some("ONTIME".to_string())]
    );
}

#[test]
fn test_malformed_time_aborts() {
    let mut df = raw_frame();
    df.with_column(Column::new(
        "arr_time".into(),
        vec![Some("830"), Some("850"), Some("15000")],
    ))
    .unwrap();
    let err = sanitize(&df, &config()).unwrap_err();
    assert!(matches!(
        err,
        TransformError::TimeRepair { ref column, row: 1, .. } if column == columns::ARRIVAL
    ));
}

#[test]
fn test_missing_feature_input_names_column() {
    let sanitized = sanitize(&raw_frame(), &config()).unwrap();
    let without_minutes = sanitized.drop(columns::FLIGHT_MINUTES).unwrap();
    let full = config();
    let reduced = MetadataConfig::new(
        full.columns()
            .iter()
            .filter(|spec| spec.renamed != columns::FLIGHT_MINUTES)
            .cloned()
            .collect(),
        None,
    );
    let err = engineer_features(&without_minutes, &reduced).unwrap_err();
    assert!(matches!(
        err,
        TransformError::MissingColumn { ref column, .. } if column == columns::FLIGHT_MINUTES
    ));
}

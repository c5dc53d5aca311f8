//! End-to-end runs of the pipeline against temporary files.

use std::fs;
use std::path::Path;

use flights_cli::pipeline::{PipelineOptions, run_pipeline};
use flights_model::columns;
use flights_store::SqliteStore;
use rusqlite::Connection;
use tempfile::TempDir;

const METADATA: &str = "\
tabela,cols_originais,cols_renamed,tipo_original,tipo_formatted,key,raw_null_tolerance,std_str,corrige_hr
nyflights,carrier,companhia,string,string,1,0,1,0
nyflights,flight,voo,int,int,1,0,0,0
nyflights,origin,origem,string,string,0,0.1,1,0
nyflights,dep_time,datetime_partida,float,datetime,0,0.1,0,1
nyflights,arr_time,datetime_chegada,float,datetime,0,0.1,0,1
nyflights,air_time,tempo_voo,float,float,0,0.5,0,0
nyflights,data_voo,data_voo,,,1,0,0,0
";

const FLIGHTS: &str = "\
year,month,day,dep_time,arr_time,carrier,flight,origin,air_time,tailnum
2013,1,1,517,830,UA,1545,ewr,227,N14228
2013,1,1,533,850,NA,1714,LGA,227,N24211
2013,1,2,1245,1500,A-A,1141,JFK,100,N619AA
";

fn options(dir: &Path, flights: &str, dry_run: bool) -> PipelineOptions {
    let data_path = dir.join("flights.csv");
    let meta_path = dir.join("metadados.csv");
    fs::write(&data_path, flights).unwrap();
    fs::write(&meta_path, METADATA).unwrap();
    PipelineOptions {
        data_path,
        meta_path,
        db_path: dir.join("data").join("NyflightsDB.db"),
        table: None,
        sample_size: 5,
        dry_run,
    }
}

#[test]
fn test_end_to_end_writes_typed_table() {
    let dir = TempDir::new().unwrap();
    let options = options(dir.path(), FLIGHTS, false);

    let summary = run_pipeline(&options).unwrap();
    assert_eq!(summary.table, "nyflights");
    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.rows_sanitized, 2);
    assert_eq!(summary.rows_written, Some(2));
    assert!(!summary.validation.has_errors());

    let store = SqliteStore::open(&options.db_path).unwrap();
    assert_eq!(store.row_count("nyflights").unwrap(), 2);

    let sample = store.sample("nyflights", 5).unwrap();
    assert_eq!(sample.rows.len(), 2);
    let index = |name: &str| sample.columns.iter().position(|c| c == name).unwrap();
    for feature in columns::DERIVED_FEATURES {
        let i = index(feature);
        assert!(sample.rows.iter().all(|row| row[i] != "NULL"), "{feature} has nulls");
    }
    assert!(!sample.columns.iter().any(|c| c.ends_with(columns::FORMATTED_SUFFIX)));
    assert!(!sample.columns.iter().any(|c| c == "tailnum"));

    let first = &sample.rows[0];
    assert_eq!(first[index("companhia")], "UA");
    assert_eq!(first[index("origem")], "EWR");
    assert_eq!(first[index("voo")], "1545");
    assert_eq!(first[index(columns::DEPARTURE)], "2013-01-01 05:17:00");
    assert_eq!(first[index(columns::ARRIVAL)], "2013-01-01 08:30:00");
    assert_eq!(first[index(columns::FLIGHT_DATE)], "2013-01-01");
    assert_eq!(first[index(columns::WEEKDAY)], "1");
    assert_eq!(first[index(columns::DAY_PERIOD)], "MADRUGADA");
    assert_eq!(first[index(columns::STATUS)], "ATRASO");

    let second = &sample.rows[1];
    assert_eq!(second[index("companhia")], "AA");
    assert_eq!(second[index(columns::DAY_PERIOD)], "TARDE");
    assert_eq!(second[index(columns::STATUS)], "ONTIME");
}

#[test]
fn test_stored_columns_keep_their_types() {
    let dir = TempDir::new().unwrap();
    let options = options(dir.path(), FLIGHTS, false);
    run_pipeline(&options).unwrap();

    let expected = [
        (columns::EXPECTED_HOURS, "real"),
        (columns::FLIGHT_HOURS, "real"),
        (columns::DELAY_HOURS, "real"),
        (columns::FLIGHT_MINUTES, "real"),
        (columns::WEEKDAY, "integer"),
        ("voo", "integer"),
        (columns::DAY_PERIOD, "text"),
        (columns::STATUS, "text"),
        (columns::DEPARTURE, "text"),
        (columns::ARRIVAL, "text"),
        (columns::FLIGHT_DATE, "text"),
    ];
    let conn = Connection::open(&options.db_path).unwrap();
    for (column, storage) in expected {
        let sql = format!("SELECT DISTINCT typeof(\"{column}\") FROM \"nyflights\"");
        let mut stmt = conn.prepare(&sql).unwrap();
        let types: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(types, vec![storage.to_string()], "{column}");
    }
}

#[test]
fn test_validation_findings_do_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let flights = "\
year,month,day,dep_time,arr_time,carrier,flight,origin,air_time,tailnum
2013,1,1,517,830,UA,1545,EWR,227,N14228
2013,1,1,517,830,UA,1545,EWR,NA,N14228
2013,1,2,1245,1500,AA,1141,JFK,100,N619AA
";
    let options = options(dir.path(), flights, false);
    let strict = METADATA.replace(
        "nyflights,air_time,tempo_voo,float,float,0,0.5,0,0",
        "nyflights,air_time,tempo_voo,float,float,0,0,0,0",
    );
    fs::write(&options.meta_path, strict).unwrap();

    let summary = run_pipeline(&options).unwrap();
    assert!(summary.validation.has_errors());
    assert_eq!(summary.validation.error_count(), 1);
    assert_eq!(summary.validation.warning_count(), 1);
    assert_eq!(summary.rows_sanitized, 3);
    assert_eq!(summary.rows_written, Some(summary.rows_sanitized));

    let store = SqliteStore::open(&options.db_path).unwrap();
    assert_eq!(store.row_count("nyflights").unwrap(), 3);
}

#[test]
fn test_rerun_replaces_table() {
    let dir = TempDir::new().unwrap();
    let options = options(dir.path(), FLIGHTS, false);
    run_pipeline(&options).unwrap();
    let summary = run_pipeline(&options).unwrap();
    assert_eq!(summary.rows_written, Some(2));

    let store = SqliteStore::open(&options.db_path).unwrap();
    assert_eq!(store.row_count("nyflights").unwrap(), 2);
}

#[test]
fn test_dry_run_skips_database() {
    let dir = TempDir::new().unwrap();
    let options = options(dir.path(), FLIGHTS, true);

    let summary = run_pipeline(&options).unwrap();
    assert!(summary.is_dry_run());
    assert_eq!(summary.rows_written, None);
    assert!(summary.sample.is_none());
    assert!(!options.db_path.exists());
}

#[test]
fn test_table_override() {
    let dir = TempDir::new().unwrap();
    let mut options = options(dir.path(), FLIGHTS, false);
    options.table = Some("voos_2013".to_string());

    let summary = run_pipeline(&options).unwrap();
    assert_eq!(summary.table, "voos_2013");
    let store = SqliteStore::open(&options.db_path).unwrap();
    assert_eq!(store.row_count("voos_2013").unwrap(), 2);
}

#[test]
fn test_malformed_time_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let flights = FLIGHTS.replace("1245,1500", "1245,15000");
    let options = options(dir.path(), &flights, false);

    let err = run_pipeline(&options).unwrap_err();
    assert!(format!("{err:#}").contains(columns::ARRIVAL));
    assert!(!options.db_path.exists());
}

#[test]
fn test_missing_metadata_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut options = options(dir.path(), FLIGHTS, false);
    options.meta_path = dir.path().join("absent.csv");

    let err = run_pipeline(&options).unwrap_err();
    assert!(err.to_string().starts_with("load metadata"));
}

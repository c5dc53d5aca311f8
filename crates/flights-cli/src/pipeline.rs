//! Pipeline orchestration.
//!
//! Stages run strictly in order, each inside its own span with a
//! `duration_ms` field on completion:
//!
//! metadata → ingest → sanitize → validate → features → persist

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use flights_ingest::{load_metadata, read_flight_records};
use flights_model::{MetadataConfig, ValidationReport};
use flights_store::{SqliteStore, TableSample, validate_table_name};
use flights_transform::{engineer_features, sanitize};
use flights_validate::validate;
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::types::RunSummary;

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub data_path: PathBuf,
    pub meta_path: PathBuf,
    pub db_path: PathBuf,
    /// Overrides the metadata table name.
    pub table: Option<String>,
    pub sample_size: usize,
    /// Skip persistence.
    pub dry_run: bool,
}

/// Frames and findings produced before persistence.
#[derive(Debug)]
pub struct ProcessedFrame {
    pub data: DataFrame,
    pub rows_sanitized: usize,
    pub validation: ValidationReport,
}

/// Run the whole pipeline.
///
/// # Errors
///
/// Any stage failure except validation findings, which are reported in
/// the summary instead.
pub fn run_pipeline(options: &PipelineOptions) -> Result<RunSummary> {
    let run_span = info_span!("pipeline", data_path = %options.data_path.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let config = info_span!("metadata").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let config = load_metadata(&options.meta_path)
            .with_context(|| format!("load metadata {}", options.meta_path.display()))?;
        info!(
            columns = config.columns().len(),
            keys = config.key_columns().len(),
            duration_ms = start.elapsed().as_millis(),
            "metadata loaded"
        );
        Ok(config)
    })?;

    let table = options
        .table
        .clone()
        .unwrap_or_else(|| config.table_name_or_default().to_string());
    validate_table_name(&table).context("resolve output table")?;

    let raw = info_span!("ingest").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let raw = read_flight_records(&options.data_path)
            .with_context(|| format!("read flight records {}", options.data_path.display()))?;
        info!(
            rows = raw.height(),
            columns = raw.width(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(raw)
    })?;

    let processed = process_frame(&raw, &config)?;

    let (db_path, rows_written, sample) = if options.dry_run {
        info!("dry run, skipping persistence");
        (None, None, None)
    } else {
        let (rows, sample) = persist(options, &table, &processed.data)?;
        (Some(options.db_path.clone()), Some(rows), Some(sample))
    };

    info!(
        table = %table,
        rows_read = raw.height(),
        rows_written = rows_written.unwrap_or_default(),
        validation_errors = processed.validation.error_count(),
        duration_ms = run_start.elapsed().as_millis(),
        "pipeline complete"
    );

    Ok(RunSummary {
        table,
        db_path,
        rows_read: raw.height(),
        rows_sanitized: processed.rows_sanitized,
        rows_written,
        columns: processed.data.width(),
        validation: processed.validation,
        sample,
    })
}

/// Sanitize, validate and engineer features on an ingested frame.
///
/// # Errors
///
/// Sanitization or feature engineering failures.
pub fn process_frame(raw: &DataFrame, config: &MetadataConfig) -> Result<ProcessedFrame> {
    let sanitized = info_span!("sanitize").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let sanitized = sanitize(raw, config).context("sanitize flight records")?;
        info!(
            input_rows = raw.height(),
            output_rows = sanitized.height(),
            duration_ms = start.elapsed().as_millis(),
            "sanitize stage complete"
        );
        Ok(sanitized)
    })?;

    let validation = info_span!("validate").in_scope(|| {
        let start = Instant::now();
        let report = validate(&sanitized, config);
        info!(
            issues = report.issues.len(),
            duration_ms = start.elapsed().as_millis(),
            "validate stage complete"
        );
        report
    });

    let data = info_span!("features").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let data = engineer_features(&sanitized, config).context("engineer features")?;
        info!(
            rows = data.height(),
            columns = data.width(),
            duration_ms = start.elapsed().as_millis(),
            "features stage complete"
        );
        Ok(data)
    })?;

    Ok(ProcessedFrame {
        data,
        rows_sanitized: sanitized.height(),
        validation,
    })
}

fn persist(options: &PipelineOptions, table: &str, df: &DataFrame) -> Result<(usize, TableSample)> {
    info_span!("persist", table, db_path = %options.db_path.display()).in_scope(|| {
        let start = Instant::now();
        let mut store = SqliteStore::open(&options.db_path)
            .with_context(|| format!("open database {}", options.db_path.display()))?;
        let rows = store
            .write_table(table, df)
            .with_context(|| format!("write table {table}"))?;
        let sample = store
            .sample(table, options.sample_size)
            .with_context(|| format!("read back table {table}"))?;
        info!(
            rows,
            sampled = sample.rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "persist stage complete"
        );
        Ok((rows, sample))
    })
}

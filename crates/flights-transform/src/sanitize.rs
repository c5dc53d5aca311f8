//! Record sanitization.
//!
//! The sanitizer turns the raw text frame into a typed, renamed frame with
//! parallel `_formatted` fields for normalized strings and repaired times.
//! Stages run in this order:
//!
//! 1. [`derive_flight_date`] builds `data_voo` from `year`/`month`/`day`
//! 2. [`drop_null_keys`] removes rows with a null key
//! 3. [`cast_original_types`] applies the declared original types
//! 4. [`select_rename`] keeps the listed columns under their new names
//! 5. [`standardize_strings`] adds uppercase alphanumeric forms
//! 6. [`correct_times`] repairs clock times into full timestamps

use chrono::NaiveDate;
use flights_model::{MetadataConfig, columns};
use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray};
use tracing::{debug, info};

use crate::cast::cast_columns;
use crate::error::{Result, TransformError};
use crate::frame::{
    date_column, date_values, datetime_column, parse_integer, require_column, text_values,
};
use crate::time::{parse_clock_time, strip_decimal_artifact};

/// Run every sanitization stage in order.
///
/// # Errors
///
/// Propagates the first stage failure.
pub fn sanitize(df: &DataFrame, config: &MetadataConfig) -> Result<DataFrame> {
    let rows_in = df.height();
    let dated = derive_flight_date(df)?;
    let keyed = drop_null_keys(&dated, &config.key_columns())?;
    let typed = cast_original_types(&keyed, config)?;
    let renamed = select_rename(&typed, config)?;
    let normalized = standardize_strings(&renamed, &config.string_normalized_columns())?;
    let out = correct_times(&normalized, &config.time_corrected_columns())?;
    info!(
        rows_in,
        rows_out = out.height(),
        columns = out.width(),
        "sanitization complete"
    );
    Ok(out)
}

/// Add `data_voo` as a calendar date built from the raw date components.
///
/// A null component gives a null date.
///
/// # Errors
///
/// Missing component columns, or non-null components that do not form a
/// valid date.
pub fn derive_flight_date(df: &DataFrame) -> Result<DataFrame> {
    const STAGE: &str = "derive_flight_date";
    let years = text_values(require_column(df, columns::YEAR, STAGE)?)?;
    let months = text_values(require_column(df, columns::MONTH, STAGE)?)?;
    let days = text_values(require_column(df, columns::DAY, STAGE)?)?;

    let mut dates = Vec::with_capacity(df.height());
    for (row, ((year, month), day)) in years.iter().zip(&months).zip(&days).enumerate() {
        let (Some(year), Some(month), Some(day)) = (year, month, day) else {
            dates.push(None);
            continue;
        };
        let invalid = || TransformError::InvalidDate {
            row,
            value: format!("{year}-{month}-{day}"),
        };
        let year = parse_integer(year).ok_or_else(invalid)?;
        let month = parse_integer(month).ok_or_else(invalid)?;
        let day = parse_integer(day).ok_or_else(invalid)?;
        let date = i32::try_from(year)
            .ok()
            .zip(u32::try_from(month).ok())
            .zip(u32::try_from(day).ok())
            .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
            .ok_or_else(invalid)?;
        dates.push(Some(date));
    }

    let mut out = df.clone();
    out.with_column(date_column(columns::FLIGHT_DATE, &dates)?)?;
    Ok(out)
}

/// Keep only rows that are non-null in every key column.
///
/// # Errors
///
/// A key column missing from the frame.
pub fn drop_null_keys(df: &DataFrame, keys: &[&str]) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    for key in keys {
        let column = require_column(df, key, "drop_null_keys")?;
        let nulls = column.as_materialized_series().is_null();
        for (row, is_null) in nulls.into_iter().enumerate() {
            if is_null == Some(true) {
                keep[row] = false;
            }
        }
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let out = df.filter(&mask)?;
    let dropped = df.height() - out.height();
    if dropped > 0 {
        info!(dropped, keys = ?keys, "dropped rows with null keys");
    }
    Ok(out)
}

/// Cast columns to their declared original types.
///
/// # Errors
///
/// See [`cast_columns`].
pub fn cast_original_types(df: &DataFrame, config: &MetadataConfig) -> Result<DataFrame> {
    cast_columns(df, &config.original_types(), "cast_original_types")
}

/// Select the listed original columns in metadata order, renamed.
///
/// # Errors
///
/// A listed column missing from the frame.
pub fn select_rename(df: &DataFrame, config: &MetadataConfig) -> Result<DataFrame> {
    let mut selected = Vec::with_capacity(config.columns().len());
    for (original, renamed) in config.rename_pairs() {
        let column = require_column(df, original, "select_rename")?;
        selected.push(column.clone().with_name(renamed.into()));
    }
    let out = DataFrame::new(selected)?;
    debug!(
        dropped = df.width().saturating_sub(out.width()),
        "selected and renamed columns"
    );
    Ok(out)
}

/// Uppercase a value and drop every character outside `[A-Za-z0-9]`.
pub fn normalize_text(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Add `{col}_formatted` with [`normalize_text`] applied to each listed column.
///
/// # Errors
///
/// A listed column missing from the frame.
pub fn standardize_strings(df: &DataFrame, targets: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in targets {
        let column = require_column(df, name, "standardize_strings")?;
        let values: Vec<Option<String>> = text_values(column)?
            .into_iter()
            .map(|value| value.map(|v| normalize_text(&v)))
            .collect();
        out.with_column(Column::new(columns::formatted_name(name).into(), values))?;
    }
    Ok(out)
}

/// Repair clock times and combine them with the flight date.
///
/// Departure and arrival lose every `".0"` artifact first. Each listed
/// column then gets `{col}_formatted`, a timestamp on `data_voo`; a null
/// time or null date gives null.
///
/// # Errors
///
/// Missing columns, or a clock time outside the repair policy.
pub fn correct_times(df: &DataFrame, targets: &[&str]) -> Result<DataFrame> {
    const STAGE: &str = "correct_times";
    let mut out = df.clone();

    for name in [columns::DEPARTURE, columns::ARRIVAL]
        .into_iter()
        .chain(targets.iter().copied())
    {
        let Ok(column) = out.column(name) else {
            continue;
        };
        let stripped: Vec<Option<String>> = text_values(column)?
            .into_iter()
            .map(|value| value.map(|v| strip_decimal_artifact(&v)))
            .collect();
        out.with_column(Column::new(name.into(), stripped))?;
    }

    let dates = date_values(require_column(&out, columns::FLIGHT_DATE, STAGE)?)?;
    for name in targets {
        let times = text_values(require_column(&out, name, STAGE)?)?;
        let mut stamps = Vec::with_capacity(times.len());
        for (row, (time, date)) in times.iter().zip(&dates).enumerate() {
            let (Some(time), Some(date)) = (time, date) else {
                stamps.push(None);
                continue;
            };
            let clock = parse_clock_time(time).map_err(|source| TransformError::TimeRepair {
                column: (*name).to_string(),
                row,
                source,
            })?;
            stamps.push(Some(date.and_time(clock)));
        }
        out.with_column(datetime_column(&columns::formatted_name(name), &stamps)?)?;
        debug!(column = *name, "repaired clock times");
    }
    Ok(out)
}

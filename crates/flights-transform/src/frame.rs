//! DataFrame value extraction and column construction.
//!
//! Stages read columns as plain Rust values (text, numbers, dates), compute
//! row by row, and build a new typed column. Temporal columns are stored
//! as Polars `Date` (days since epoch) and `Datetime` (microseconds since
//! epoch, no time zone).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, DataType, TimeUnit};

use crate::error::{Result, TransformError};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Text formats accepted for timestamp columns.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Polars type used for timestamp columns.
pub fn datetime_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, None)
}

/// Get a column, failing with the stage name when it is absent.
pub fn require_column<'a>(
    df: &'a DataFrame,
    name: &str,
    stage: &'static str,
) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
        stage,
    })
}

/// Column values rendered as text; nulls stay `None`.
pub fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    let text = column.cast(&DataType::String)?;
    Ok(text
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Column values as `f64`; values that do not convert become `None`.
pub fn f64_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let numeric = column.cast(&DataType::Float64)?;
    Ok(numeric.f64()?.into_iter().collect())
}

/// Column values as calendar dates.
///
/// `Date` and `Datetime` columns convert directly; text is parsed as
/// `YYYY-MM-DD` or any accepted timestamp format.
pub fn date_values(column: &Column) -> Result<Vec<Option<NaiveDate>>> {
    match column.dtype() {
        DataType::Date => {
            let days = column.cast(&DataType::Int32)?;
            Ok(days
                .i32()?
                .into_iter()
                .map(|value| value.and_then(date_from_epoch_days))
                .collect())
        }
        DataType::Datetime(_, _) => Ok(datetime_values(column)?
            .into_iter()
            .map(|value| value.map(|dt| dt.date()))
            .collect()),
        _ => Ok(text_values(column)?
            .into_iter()
            .map(|value| value.as_deref().and_then(parse_date_text))
            .collect()),
    }
}

/// Column values as timestamps.
///
/// `Datetime` columns convert with their own time unit, `Date` columns
/// become midnight, text is parsed with the accepted formats.
pub fn datetime_values(column: &Column) -> Result<Vec<Option<NaiveDateTime>>> {
    match column.dtype() {
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let raw = column.cast(&DataType::Int64)?;
            Ok(raw
                .i64()?
                .into_iter()
                .map(|value| value.and_then(|v| datetime_from_epoch(v, unit)))
                .collect())
        }
        DataType::Date => Ok(date_values(column)?
            .into_iter()
            .map(|value| value.and_then(|d| d.and_hms_opt(0, 0, 0)))
            .collect()),
        _ => Ok(text_values(column)?
            .into_iter()
            .map(|value| value.as_deref().and_then(parse_datetime_text))
            .collect()),
    }
}

/// Build a Polars `Date` column.
pub fn date_column(name: &str, values: &[Option<NaiveDate>]) -> Result<Column> {
    let days: Vec<Option<i32>> = values
        .iter()
        .map(|value| value.map(epoch_days))
        .collect();
    Ok(Column::new(name.into(), days).cast(&DataType::Date)?)
}

/// Build a Polars `Datetime` column (microseconds).
pub fn datetime_column(name: &str, values: &[Option<NaiveDateTime>]) -> Result<Column> {
    let micros: Vec<Option<i64>> = values
        .iter()
        .map(|value| value.map(|dt| dt.and_utc().timestamp_micros()))
        .collect();
    Ok(Column::new(name.into(), micros).cast(&datetime_dtype())?)
}

/// Days since 1970-01-01.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// Inverse of [`epoch_days`].
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

/// Convert a raw epoch value in the given unit to a timestamp.
pub fn datetime_from_epoch(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let utc = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
    };
    utc.map(|dt| dt.naive_utc())
}

/// Parse `YYYY-MM-DD`, or the date part of an accepted timestamp.
pub fn parse_date_text(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime_text(trimmed).map(|dt| dt.date()))
}

/// Parse a timestamp in one of the accepted formats; a bare date is midnight.
pub fn parse_datetime_text(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse an integer cell, accepting a zero fractional part (`"2013.0"`).
pub fn parse_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15 {
        Some(float as i64)
    } else {
        None
    }
}

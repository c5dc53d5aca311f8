//! Mapping between Polars cells and SQLite values.

use chrono::{DateTime, NaiveDate};
use polars::prelude::{AnyValue, DataType, TimeUnit};
use rusqlite::types::{Value, ValueRef};

const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Rendering of timestamps written as text.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Rendering of dates written as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite column affinity for a Polars type.
pub fn sql_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "INTEGER",
        DataType::Float32 | DataType::Float64 => "REAL",
        _ => "TEXT",
    }
}

/// Convert one cell to a bindable SQLite value.
pub fn cell_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Integer(i64::from(v)),
        AnyValue::Int8(v) => Value::Integer(i64::from(v)),
        AnyValue::Int16(v) => Value::Integer(i64::from(v)),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt8(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt16(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Real(v as f64), Value::Integer),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::String(v) => Value::Text(v.to_string()),
        AnyValue::StringOwned(v) => Value::Text(v.to_string()),
        AnyValue::Date(days) => date_text(days).map_or(Value::Null, Value::Text),
        AnyValue::Datetime(raw, unit, _) | AnyValue::DatetimeOwned(raw, unit, _) => {
            datetime_text(raw, unit).map_or(Value::Null, Value::Text)
        }
        other => Value::Text(other.to_string()),
    }
}

/// Render a value read back from SQLite.
pub fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => v.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

fn date_text(days: i32) -> Option<String> {
    let date = NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)?;
    Some(date.format(DATE_FORMAT).to_string())
}

fn datetime_text(raw: i64, unit: TimeUnit) -> Option<String> {
    let utc = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(raw),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(raw),
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(raw)),
    }?;
    Some(utc.naive_utc().format(DATETIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affinities() {
        assert_eq!(sql_type(&DataType::Int32), "INTEGER");
        assert_eq!(sql_type(&DataType::Boolean), "INTEGER");
        assert_eq!(sql_type(&DataType::Float64), "REAL");
        assert_eq!(sql_type(&DataType::Date), "TEXT");
        assert_eq!(sql_type(&DataType::String), "TEXT");
        assert_eq!(
            sql_type(&DataType::Datetime(TimeUnit::Microseconds, None)),
            "TEXT"
        );
    }

    #[test]
    fn temporal_cells_render_as_text() {
        assert_eq!(
            cell_value(AnyValue::Date(15706)),
            Value::Text("2013-01-01".to_string())
        );
        // 2013-01-01 05:17:00 UTC
        let micros = 1_357_017_420_000_000;
        assert_eq!(
            cell_value(AnyValue::Datetime(micros, TimeUnit::Microseconds, None)),
            Value::Text("2013-01-01 05:17:00".to_string())
        );
    }

    #[test]
    fn scalar_cells() {
        assert_eq!(cell_value(AnyValue::Null), Value::Null);
        assert_eq!(cell_value(AnyValue::Boolean(true)), Value::Integer(1));
        assert_eq!(cell_value(AnyValue::Int32(6)), Value::Integer(6));
        assert_eq!(cell_value(AnyValue::Float64(0.5)), Value::Real(0.5));
        assert_eq!(
            cell_value(AnyValue::String("ATRASO")),
            Value::Text("ATRASO".to_string())
        );
    }
}

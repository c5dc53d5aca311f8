//! Metadata-driven column casting.
//!
//! Each declared [`ColumnType`] maps to one Polars type. Casting never drops
//! data silently: a non-null value that becomes null is reported as
//! [`TransformError::Cast`] with the first offending row.

use flights_model::ColumnType;
use polars::prelude::{Column, DataFrame, DataType};
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::frame::{
    datetime_dtype, parse_datetime_text, parse_integer, require_column, text_values,
};

/// Polars type a declared column type is stored as.
pub fn target_dtype(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Int => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::Datetime => datetime_dtype(),
        ColumnType::String => DataType::String,
    }
}

/// Cast every listed column to its declared type.
///
/// # Errors
///
/// A listed column missing from the frame, a source type with no
/// conversion, or values that fail to convert.
pub fn cast_columns(
    df: &DataFrame,
    types: &[(&str, ColumnType)],
    stage: &'static str,
) -> Result<DataFrame> {
    let mut out = df.clone();
    for &(name, column_type) in types {
        let column = require_column(df, name, stage)?;
        if column.dtype() == &target_dtype(column_type) {
            continue;
        }
        let converted = cast_column(column, column_type)?;
        ensure_no_loss(column, &converted, column_type)?;
        debug!(stage, column = name, to = %column_type, "cast column");
        out.with_column(converted)?;
    }
    Ok(out)
}

/// Convert one column, keeping its name.
pub fn cast_column(column: &Column, column_type: ColumnType) -> Result<Column> {
    let name = column.name().as_str();
    let dtype = column.dtype();
    match column_type {
        ColumnType::Int if dtype == &DataType::String => {
            let values: Vec<Option<i64>> = text_values(column)?
                .iter()
                .map(|value| value.as_deref().and_then(parse_integer))
                .collect();
            Ok(Column::new(name.into(), values))
        }
        ColumnType::Int | ColumnType::Float => {
            if !(dtype.is_primitive_numeric() || dtype == &DataType::String || dtype.is_bool()) {
                return Err(unsupported(column, column_type));
            }
            Ok(column.cast(&target_dtype(column_type))?)
        }
        ColumnType::Datetime => match dtype {
            DataType::String => {
                let micros: Vec<Option<i64>> = text_values(column)?
                    .iter()
                    .map(|value| {
                        value
                            .as_deref()
                            .and_then(parse_datetime_text)
                            .map(|dt| dt.and_utc().timestamp_micros())
                    })
                    .collect();
                Ok(Column::new(name.into(), micros).cast(&datetime_dtype())?)
            }
            DataType::Date | DataType::Datetime(_, _) => Ok(column.cast(&datetime_dtype())?),
            _ => Err(unsupported(column, column_type)),
        },
        ColumnType::String => Ok(column.cast(&DataType::String)?),
    }
}

fn unsupported(column: &Column, column_type: ColumnType) -> TransformError {
    TransformError::UnsupportedCast {
        column: column.name().to_string(),
        from: column.dtype().to_string(),
        target: column_type.to_string(),
    }
}

fn ensure_no_loss(original: &Column, converted: &Column, column_type: ColumnType) -> Result<()> {
    let before = original.null_count();
    let after = converted.null_count();
    if after <= before {
        return Ok(());
    }
    let originals = text_values(original)?;
    let lost = converted.as_materialized_series().is_null();
    let (row, sample) = originals
        .into_iter()
        .zip(lost.into_iter())
        .enumerate()
        .find_map(|(row, (value, is_null))| match (value, is_null) {
            (Some(value), Some(true)) => Some((row, value)),
            _ => None,
        })
        .unwrap_or_default();
    Err(TransformError::Cast {
        column: original.name().to_string(),
        target: column_type.to_string(),
        count: after - before,
        sample,
        row,
    })
}

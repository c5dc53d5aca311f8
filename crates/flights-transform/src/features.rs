//! Feature engineering on sanitized records.
//!
//! Formatted fields replace their originals, the formatted types are
//! applied, and six derived columns are appended:
//!
//! | Column               | Derivation                                   |
//! |----------------------|----------------------------------------------|
//! | `tempo_voo_esperado` | arrival minus departure, in hours            |
//! | `dia_semana`         | weekday of `data_voo`, Monday = 0            |
//! | `horario`            | departure hour bucket ([`DayPeriod`])        |
//! | `tempo_voo_hr`       | `tempo_voo` / 60                             |
//! | `atraso`             | `tempo_voo_hr - tempo_voo_esperado`          |
//! | `flg_status`         | [`FlightStatus`] from `atraso`               |

use std::fmt;

use chrono::{Datelike, Timelike};
use flights_model::{MetadataConfig, columns};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info};

use crate::cast::cast_columns;
use crate::error::Result;
use crate::frame::{date_values, datetime_values, f64_values, require_column};

/// Delay in hours above which a flight is flagged late.
pub const DELAY_THRESHOLD_HOURS: f64 = 0.5;

const SECONDS_PER_HOUR: f64 = 3600.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Time-of-day bucket of a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// Hours 0-5.
    Madrugada,
    /// Hours 6-11.
    Manha,
    /// Hours 12-17.
    Tarde,
    /// Hours 18-23.
    Noite,
}

impl DayPeriod {
    /// Bucket an hour of day.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..6 => Self::Madrugada,
            6..12 => Self::Manha,
            12..18 => Self::Tarde,
            _ => Self::Noite,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Madrugada => "MADRUGADA",
            Self::Manha => "MANHA",
            Self::Tarde => "TARDE",
            Self::Noite => "NOITE",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delay flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Late,
    OnTime,
}

impl FlightStatus {
    /// `Late` only when the delay is known and above the threshold.
    pub fn from_delay(delay_hours: Option<f64>) -> Self {
        match delay_hours {
            Some(delay) if delay > DELAY_THRESHOLD_HOURS => Self::Late,
            _ => Self::OnTime,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Late => "ATRASO",
            Self::OnTime => "ONTIME",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run every feature step in order.
///
/// # Errors
///
/// Propagates the first step failure.
pub fn engineer_features(df: &DataFrame, config: &MetadataConfig) -> Result<DataFrame> {
    let merged = merge_formatted(df, &config.formatted_columns())?;
    let typed = cast_columns(&merged, &config.formatted_types(), "cast_formatted_types")?;
    let out = add_expected_hours(&typed)?;
    let out = add_weekday(&out)?;
    let out = add_day_period(&out)?;
    let out = add_flight_hours(&out)?;
    let out = add_delay(&out)?;
    let out = add_status(&out)?;
    info!(
        rows = out.height(),
        columns = out.width(),
        "feature engineering complete"
    );
    Ok(out)
}

/// Replace each listed column with its `_formatted` field and drop the field.
///
/// # Errors
///
/// A listed column without a formatted field.
pub fn merge_formatted(df: &DataFrame, targets: &[&str]) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in targets {
        let formatted = columns::formatted_name(name);
        let replacement = require_column(&out, &formatted, "merge_formatted")?
            .clone()
            .with_name((*name).into());
        out.with_column(replacement)?;
        out = out.drop(&formatted)?;
        debug!(column = *name, "merged formatted field");
    }
    Ok(out)
}

/// `tempo_voo_esperado`: arrival minus departure, in hours.
///
/// # Errors
///
/// Departure or arrival missing.
pub fn add_expected_hours(df: &DataFrame) -> Result<DataFrame> {
    const STAGE: &str = "expected_hours";
    let departures = datetime_values(require_column(df, columns::DEPARTURE, STAGE)?)?;
    let arrivals = datetime_values(require_column(df, columns::ARRIVAL, STAGE)?)?;
    let hours: Vec<Option<f64>> = departures
        .iter()
        .zip(&arrivals)
        .map(|(dep, arr)| match (dep, arr) {
            (Some(dep), Some(arr)) => {
                Some((*arr - *dep).num_seconds() as f64 / SECONDS_PER_HOUR)
            }
            _ => None,
        })
        .collect();
    with_feature(df, Column::new(columns::EXPECTED_HOURS.into(), hours))
}

/// `dia_semana`: weekday of the flight date, Monday = 0 through Sunday = 6.
///
/// # Errors
///
/// `data_voo` missing.
pub fn add_weekday(df: &DataFrame) -> Result<DataFrame> {
    let dates = date_values(require_column(df, columns::FLIGHT_DATE, "weekday")?)?;
    let weekdays: Vec<Option<i32>> = dates
        .iter()
        .map(|date| date.map(|d| d.weekday().num_days_from_monday() as i32))
        .collect();
    with_feature(df, Column::new(columns::WEEKDAY.into(), weekdays))
}

/// `horario`: departure hour bucket. A null departure stays null.
///
/// # Errors
///
/// Departure missing.
pub fn add_day_period(df: &DataFrame) -> Result<DataFrame> {
    let departures = datetime_values(require_column(df, columns::DEPARTURE, "day_period")?)?;
    let periods: Vec<Option<&str>> = departures
        .iter()
        .map(|dep| dep.map(|d| DayPeriod::from_hour(d.hour()).as_str()))
        .collect();
    with_feature(df, Column::new(columns::DAY_PERIOD.into(), periods))
}

/// `tempo_voo_hr`: flight minutes in hours.
///
/// # Errors
///
/// `tempo_voo` missing.
pub fn add_flight_hours(df: &DataFrame) -> Result<DataFrame> {
    let minutes = f64_values(require_column(df, columns::FLIGHT_MINUTES, "flight_hours")?)?;
    let hours: Vec<Option<f64>> = minutes
        .iter()
        .map(|m| m.map(|m| m / MINUTES_PER_HOUR))
        .collect();
    with_feature(df, Column::new(columns::FLIGHT_HOURS.into(), hours))
}

/// `atraso`: recorded minus expected hours.
///
/// # Errors
///
/// Either input feature missing.
pub fn add_delay(df: &DataFrame) -> Result<DataFrame> {
    const STAGE: &str = "delay";
    let recorded = f64_values(require_column(df, columns::FLIGHT_HOURS, STAGE)?)?;
    let expected = f64_values(require_column(df, columns::EXPECTED_HOURS, STAGE)?)?;
    let delays: Vec<Option<f64>> = recorded
        .iter()
        .zip(&expected)
        .map(|(r, e)| Some((*r)? - (*e)?))
        .collect();
    with_feature(df, Column::new(columns::DELAY_HOURS.into(), delays))
}

/// `flg_status`: `ATRASO` when `atraso` exceeds half an hour, else `ONTIME`.
///
/// # Errors
///
/// `atraso` missing.
pub fn add_status(df: &DataFrame) -> Result<DataFrame> {
    let delays = f64_values(require_column(df, columns::DELAY_HOURS, "status")?)?;
    let statuses: Vec<&str> = delays
        .iter()
        .map(|delay| FlightStatus::from_delay(*delay).as_str())
        .collect();
    with_feature(df, Column::new(columns::STATUS.into(), statuses))
}

fn with_feature(df: &DataFrame, column: Column) -> Result<DataFrame> {
    let mut out = df.clone();
    out.with_column(column)?;
    Ok(out)
}

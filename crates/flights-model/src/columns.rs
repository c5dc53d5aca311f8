//! Well-known column names of the flight records dataset.
//!
//! Source columns keep their raw names (`year`, `month`, `day`) until the
//! select/rename stage; everything else here is a renamed or derived name.

/// Raw year component of the flight date.
pub const YEAR: &str = "year";
/// Raw month component of the flight date.
pub const MONTH: &str = "month";
/// Raw day component of the flight date.
pub const DAY: &str = "day";

/// Flight date derived from the raw components.
pub const FLIGHT_DATE: &str = "data_voo";
/// Departure clock time, later a full timestamp.
pub const DEPARTURE: &str = "datetime_partida";
/// Arrival clock time, later a full timestamp.
pub const ARRIVAL: &str = "datetime_chegada";
/// Recorded flight duration in minutes.
pub const FLIGHT_MINUTES: &str = "tempo_voo";

/// Scheduled duration in hours (arrival minus departure).
pub const EXPECTED_HOURS: &str = "tempo_voo_esperado";
/// Day of week of the flight date, Monday = 0.
pub const WEEKDAY: &str = "dia_semana";
/// Time-of-day bucket of the departure.
pub const DAY_PERIOD: &str = "horario";
/// Recorded flight duration in hours.
pub const FLIGHT_HOURS: &str = "tempo_voo_hr";
/// Recorded minus scheduled duration, in hours.
pub const DELAY_HOURS: &str = "atraso";
/// `ATRASO` / `ONTIME` delay flag.
pub const STATUS: &str = "flg_status";

/// Suffix of the parallel field holding a normalized value.
pub const FORMATTED_SUFFIX: &str = "_formatted";

/// Name of the parallel formatted field for `column`.
pub fn formatted_name(column: &str) -> String {
    format!("{column}{FORMATTED_SUFFIX}")
}

/// Columns added by feature engineering, in output order.
pub const DERIVED_FEATURES: &[&str] = &[
    EXPECTED_HOURS,
    WEEKDAY,
    DAY_PERIOD,
    FLIGHT_HOURS,
    DELAY_HOURS,
    STATUS,
];

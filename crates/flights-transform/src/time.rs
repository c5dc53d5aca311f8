//! Clock-time string repair.
//!
//! Departure and arrival times arrive as digit strings without a separator
//! (`"517"`, `"1245"`, `"5"`). [`repair_clock_time`] turns them into
//! `HH:MM`:
//!
//! - `"2400"` is midnight of the same flight date: `"00:00"`
//! - a 2-digit value up to 12 is single-digit-hour shorthand: `"12"` → `"01:20"`
//! - anything else is left-padded to 4 digits by length, then split
//!   into hour and minute: `"930"` → `"09:30"`
//!
//! Inputs outside 1-4 ASCII digits are rejected.

use chrono::NaiveTime;
use thiserror::Error;

/// Padding templates indexed by input length minus one; `?` is replaced by the digits.
const PAD_TEMPLATES: [&str; 4] = ["000?", "00?", "0?", "?"];

/// Literal artifact left by float-to-text conversion of clock times.
pub const DECIMAL_ARTIFACT: &str = ".0";

/// Errors for clock-time strings outside the repair policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRepairError {
    #[error("empty clock time")]
    Empty,
    #[error("clock time '{0}' is not a digit string")]
    NotNumeric(String),
    #[error("clock time '{0}' has more than 4 digits")]
    TooLong(String),
    #[error("clock time '{value}' repaired to '{repaired}' is not a valid time of day")]
    OutOfRange { value: String, repaired: String },
}

/// Repair a separator-less clock-time string into `HH:MM`.
///
/// # Errors
///
/// Returns an error for empty input, non-digit characters, or more than
/// four digits.
///
/// # Examples
///
/// ```
/// use flights_transform::time::repair_clock_time;
///
/// assert_eq!(repair_clock_time("5").unwrap(), "00:05");
/// assert_eq!(repair_clock_time("12").unwrap(), "01:20");
/// assert_eq!(repair_clock_time("930").unwrap(), "09:30");
/// assert_eq!(repair_clock_time("1245").unwrap(), "12:45");
/// assert_eq!(repair_clock_time("2400").unwrap(), "00:00");
/// ```
pub fn repair_clock_time(raw: &str) -> Result<String, TimeRepairError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(TimeRepairError::Empty);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeRepairError::NotNumeric(value.to_string()));
    }
    if value == "2400" {
        return Ok("00:00".to_string());
    }
    if value.len() == 2 && value.parse::<u32>().is_ok_and(|n| n <= 12) {
        return Ok(format!("0{}:{}0", &value[..1], &value[1..]));
    }
    let template = PAD_TEMPLATES
        .get(value.len() - 1)
        .ok_or_else(|| TimeRepairError::TooLong(value.to_string()))?;
    let padded = template.replace('?', value);
    Ok(format!("{}:{}", &padded[..2], &padded[2..]))
}

/// Repair a clock-time string and parse it as a time of day.
///
/// # Errors
///
/// Propagates [`repair_clock_time`] errors and rejects repaired values
/// with an hour above 23 or a minute above 59.
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, TimeRepairError> {
    let repaired = repair_clock_time(raw)?;
    let out_of_range = || TimeRepairError::OutOfRange {
        value: raw.trim().to_string(),
        repaired: repaired.clone(),
    };
    let (hour, minute) = repaired.split_once(':').ok_or_else(out_of_range)?;
    let hour: u32 = hour.parse().map_err(|_| out_of_range())?;
    let minute: u32 = minute.parse().map_err(|_| out_of_range())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(out_of_range)
}

/// Remove every `".0"` occurrence from a clock-time string.
pub fn strip_decimal_artifact(value: &str) -> String {
    value.replace(DECIMAL_ARTIFACT, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_rolls_over() {
        assert_eq!(repair_clock_time("2400").unwrap(), "00:00");
    }

    #[test]
    fn two_digit_shorthand() {
        assert_eq!(repair_clock_time("12").unwrap(), "01:20");
        assert_eq!(repair_clock_time("05").unwrap(), "00:50");
        // Above 12 falls through to padding.
        assert_eq!(repair_clock_time("45").unwrap(), "00:45");
    }

    #[test]
    fn pads_by_length() {
        assert_eq!(repair_clock_time("5").unwrap(), "00:05");
        assert_eq!(repair_clock_time("930").unwrap(), "09:30");
        assert_eq!(repair_clock_time("1245").unwrap(), "12:45");
        assert_eq!(repair_clock_time(" 517 ").unwrap(), "05:17");
    }

    #[test]
    fn rejects_inputs_outside_policy() {
        assert_eq!(repair_clock_time(""), Err(TimeRepairError::Empty));
        assert_eq!(
            repair_clock_time("12345"),
            Err(TimeRepairError::TooLong("12345".to_string()))
        );
        assert_eq!(
            repair_clock_time("5.5"),
            Err(TimeRepairError::NotNumeric("5.5".to_string()))
        );
    }

    #[test]
    fn parse_rejects_impossible_times() {
        assert_eq!(
            parse_clock_time("1245").unwrap(),
            NaiveTime::from_hms_opt(12, 45, 0).unwrap()
        );
        assert!(matches!(
            parse_clock_time("99"),
            Err(TimeRepairError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_clock_time("2460"),
            Err(TimeRepairError::OutOfRange { .. })
        ));
    }

    #[test]
    fn strips_every_artifact() {
        assert_eq!(strip_decimal_artifact("517.0"), "517");
        assert_eq!(strip_decimal_artifact("2400"), "2400");
        assert_eq!(strip_decimal_artifact("5.0.0"), "5");
    }
}

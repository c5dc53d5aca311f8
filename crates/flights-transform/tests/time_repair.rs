//! Property tests for clock-time repair and the derived buckets.

use flights_transform::{DayPeriod, FlightStatus, TimeRepairError, repair_clock_time};
use proptest::prelude::*;

// =========================================================================
// Clock-time repair
// =========================================================================

#[test]
fn test_documented_repairs() {
    assert_eq!(repair_clock_time("2400").unwrap(), "00:00");
    assert_eq!(repair_clock_time("5").unwrap(), "00:05");
    assert_eq!(repair_clock_time("12").unwrap(), "01:20");
    assert_eq!(repair_clock_time("930").unwrap(), "09:30");
    assert_eq!(repair_clock_time("1245").unwrap(), "12:45");
}

proptest! {
    #[test]
    fn prop_hour_minute_digits_round_trip(hour in 1u32..24, minute in 0u32..60) {
        let raw = format!("{hour}{minute:02}");
        prop_assert_eq!(repair_clock_time(&raw).unwrap(), format!("{hour:02}:{minute:02}"));
    }

    #[test]
    fn prop_short_digit_strings_have_clock_shape(raw in "[0-9]{1,4}") {
        let repaired = repair_clock_time(&raw).unwrap();
        prop_assert_eq!(repaired.len(), 5);
        prop_assert_eq!(&repaired[2..3], ":");
        prop_assert!(repaired.chars().filter(|c| *c != ':').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn prop_long_digit_strings_are_rejected(raw in "[0-9]{5,8}") {
        prop_assert_eq!(repair_clock_time(&raw), Err(TimeRepairError::TooLong(raw.clone())));
    }

    #[test]
    fn prop_non_digit_strings_are_rejected(raw in "[0-9]{0,2}[a-z:.][0-9]{0,2}") {
        prop_assert!(matches!(repair_clock_time(&raw), Err(TimeRepairError::NotNumeric(_))));
    }
}

// =========================================================================
// Buckets
// =========================================================================

proptest! {
    #[test]
    fn prop_day_period_follows_six_hour_blocks(hour in 0u32..24) {
        let expected = match hour / 6 {
            0 => DayPeriod::Madrugada,
            1 => DayPeriod::Manha,
            2 => DayPeriod::Tarde,
            _ => DayPeriod::Noite,
        };
        prop_assert_eq!(DayPeriod::from_hour(hour), expected);
    }

    #[test]
    fn prop_status_is_late_only_above_half_hour(delay in -24.0f64..24.0) {
        let status = FlightStatus::from_delay(Some(delay));
        prop_assert_eq!(status == FlightStatus::Late, delay > 0.5);
    }
}

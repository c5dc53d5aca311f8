//! Flight records transformation.
//!
//! This crate turns the raw text frame into the analytical table:
//!
//! - **sanitize**: flight date, null-key filtering, original types, rename,
//!   string normalization and clock-time repair
//! - **features**: formatted-field merge, formatted types and the derived
//!   delay features
//! - **cast**: metadata-driven casting shared by both passes
//! - **time**: clock-time string repair
//! - **frame**: DataFrame value extraction and temporal column builders
//!
//! Every stage takes `&DataFrame` and returns a new `DataFrame`.

pub mod cast;
pub mod error;
pub mod features;
pub mod frame;
pub mod sanitize;
pub mod time;

// === Error Types ===
pub use error::{Result, TransformError};

// === Stages ===
pub use cast::cast_columns;
pub use features::{DayPeriod, FlightStatus, engineer_features, merge_formatted};
pub use sanitize::{
    correct_times, derive_flight_date, drop_null_keys, sanitize, select_rename,
    standardize_strings,
};
pub use time::{TimeRepairError, parse_clock_time, repair_clock_time};

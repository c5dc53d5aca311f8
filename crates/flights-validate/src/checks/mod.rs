//! Validation check modules.
//!
//! Each check returns the issues it found and logs them as it goes.

pub mod keys;
pub mod nulls;

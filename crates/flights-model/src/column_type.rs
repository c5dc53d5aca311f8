//! Declared column types for schema-driven casting.
//!
//! Metadata rows carry a type tag per column. Tags are parsed into
//! [`ColumnType`] when the metadata is loaded, so an unsupported tag is
//! rejected up front instead of being skipped during casting.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Supported column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Timestamp without time zone (microsecond precision).
    Datetime,
    /// UTF-8 text.
    String,
}

impl ColumnType {
    /// Canonical tag used in metadata files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Datetime => "datetime",
            Self::String => "string",
        }
    }

    /// Parse an optional tag: an empty cell means "not declared".
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl FromStr for ColumnType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "int64" => Ok(Self::Int),
            "float" | "double" | "float64" => Ok(Self::Float),
            "datetime" | "timestamp" => Ok(Self::Datetime),
            "string" | "str" | "text" => Ok(Self::String),
            _ => Err(ModelError::UnknownColumnType(value.trim().to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use polars::prelude::AnyValue;

/// Render a cell as trimmed text; null is `None`.
pub(crate) fn cell_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.trim().to_string()),
        AnyValue::StringOwned(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

//! Metadata configuration built from the schema description.
//!
//! A [`MetadataConfig`] is assembled once per run and only read afterwards.
//! Each schema row becomes a [`ColumnSpec`]; the pipeline stages use the
//! derived views (key columns, type maps, normalization sets) rather than
//! the raw rows.

use std::collections::BTreeMap;

use crate::column_type::ColumnType;

/// Output table used when the metadata does not name one.
pub const DEFAULT_TABLE_NAME: &str = "nyflights";

/// Description of a single source column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Column name in the raw records file.
    pub original: String,
    /// Column name after the select/rename stage.
    pub renamed: String,
    /// Type applied before renaming.
    pub original_type: Option<ColumnType>,
    /// Type applied after formatted fields are merged back.
    pub formatted_type: Option<ColumnType>,
    /// Rows with a null in this column are dropped.
    pub key: bool,
    /// Maximum accepted null fraction, when declared.
    pub null_tolerance: Option<f64>,
    /// Produce an uppercased alphanumeric-only parallel field.
    pub normalize_string: bool,
    /// Repair the clock-time string and build a timestamp.
    pub correct_time: bool,
}

impl ColumnSpec {
    /// Column with only names set; flags off and no types declared.
    pub fn new(original: impl Into<String>, renamed: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            renamed: renamed.into(),
            original_type: None,
            formatted_type: None,
            key: false,
            null_tolerance: None,
            normalize_string: false,
            correct_time: false,
        }
    }

    pub fn with_types(
        mut self,
        original_type: Option<ColumnType>,
        formatted_type: Option<ColumnType>,
    ) -> Self {
        self.original_type = original_type;
        self.formatted_type = formatted_type;
        self
    }

    pub fn with_key(mut self, key: bool) -> Self {
        self.key = key;
        self
    }

    pub fn with_null_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.null_tolerance = tolerance;
        self
    }

    pub fn with_string_normalization(mut self, enable: bool) -> Self {
        self.normalize_string = enable;
        self
    }

    pub fn with_time_correction(mut self, enable: bool) -> Self {
        self.correct_time = enable;
        self
    }
}

/// Immutable per-run configuration derived from the schema description.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataConfig {
    columns: Vec<ColumnSpec>,
    table_name: Option<String>,
}

impl MetadataConfig {
    pub fn new(columns: Vec<ColumnSpec>, table_name: Option<String>) -> Self {
        Self {
            columns,
            table_name,
        }
    }

    /// All column specs in schema order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Table name declared by the metadata, if any.
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Declared table name, falling back to [`DEFAULT_TABLE_NAME`].
    pub fn table_name_or_default(&self) -> &str {
        self.table_name().unwrap_or(DEFAULT_TABLE_NAME)
    }

    pub fn original_columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.original.as_str()).collect()
    }

    pub fn renamed_columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.renamed.as_str()).collect()
    }

    /// Original → renamed pairs in schema order.
    pub fn rename_pairs(&self) -> Vec<(&str, &str)> {
        self.columns
            .iter()
            .map(|c| (c.original.as_str(), c.renamed.as_str()))
            .collect()
    }

    /// Declared types keyed by original name, in schema order.
    pub fn original_types(&self) -> Vec<(&str, ColumnType)> {
        self.columns
            .iter()
            .filter_map(|c| c.original_type.map(|t| (c.original.as_str(), t)))
            .collect()
    }

    /// Declared post-normalization types keyed by renamed name, in schema order.
    pub fn formatted_types(&self) -> Vec<(&str, ColumnType)> {
        self.columns
            .iter()
            .filter_map(|c| c.formatted_type.map(|t| (c.renamed.as_str(), t)))
            .collect()
    }

    /// Key columns by original name.
    pub fn key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.key)
            .map(|c| c.original.as_str())
            .collect()
    }

    /// Key columns by renamed name.
    pub fn key_columns_renamed(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.key)
            .map(|c| c.renamed.as_str())
            .collect()
    }

    /// Null tolerances keyed by renamed name.
    pub fn null_tolerances(&self) -> BTreeMap<&str, f64> {
        self.columns
            .iter()
            .filter_map(|c| c.null_tolerance.map(|t| (c.renamed.as_str(), t)))
            .collect()
    }

    /// Renamed columns that get a normalized string field.
    pub fn string_normalized_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.normalize_string)
            .map(|c| c.renamed.as_str())
            .collect()
    }

    /// Renamed columns that get a repaired timestamp field.
    pub fn time_corrected_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.correct_time)
            .map(|c| c.renamed.as_str())
            .collect()
    }

    /// Columns with a parallel formatted field: string-normalized first,
    /// then time-corrected, without repeats.
    pub fn formatted_columns(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for name in self
            .string_normalized_columns()
            .into_iter()
            .chain(self.time_corrected_columns())
        {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

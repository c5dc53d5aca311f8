//! Metadata configuration loading.
//!
//! The schema description is a CSV with one row per source column. Header
//! names are matched case-insensitively; every required header must be
//! present and every cell must parse, otherwise loading fails with the file
//! position of the offending value.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use flights_model::{ColumnSpec, ColumnType, MetadataConfig};

use crate::error::MetadataError;

const COLUMN_TABLE: &str = "tabela";
const COLUMN_ORIGINAL: &str = "cols_originais";
const COLUMN_RENAMED: &str = "cols_renamed";
const COLUMN_ORIGINAL_TYPE: &str = "tipo_original";
const COLUMN_FORMATTED_TYPE: &str = "tipo_formatted";
const COLUMN_KEY: &str = "key";
const COLUMN_NULL_TOLERANCE: &str = "raw_null_tolerance";
const COLUMN_STD_STR: &str = "std_str";
const COLUMN_FIX_TIME: &str = "corrige_hr";

const REQUIRED_COLUMNS: &[&str] = &[
    COLUMN_ORIGINAL,
    COLUMN_RENAMED,
    COLUMN_ORIGINAL_TYPE,
    COLUMN_FORMATTED_TYPE,
    COLUMN_KEY,
    COLUMN_NULL_TOLERANCE,
    COLUMN_STD_STR,
    COLUMN_FIX_TIME,
];

/// Header positions of the schema description.
struct SchemaIndex {
    table: Option<usize>,
    original: usize,
    renamed: usize,
    original_type: usize,
    formatted_type: usize,
    key: usize,
    null_tolerance: usize,
    std_str: usize,
    fix_time: usize,
}

impl SchemaIndex {
    fn detect(headers: &StringRecord, path: &Path) -> Result<Self, MetadataError> {
        let map = build_header_map(headers);
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| !map.contains_key(**name))
        {
            return Err(MetadataError::MissingColumn {
                column: (*missing).to_string(),
                path: path.to_path_buf(),
            });
        }
        let require = |name: &str| {
            map.get(name)
                .copied()
                .ok_or_else(|| MetadataError::MissingColumn {
                    column: name.to_string(),
                    path: path.to_path_buf(),
                })
        };
        Ok(Self {
            table: map.get(COLUMN_TABLE).copied(),
            original: require(COLUMN_ORIGINAL)?,
            renamed: require(COLUMN_RENAMED)?,
            original_type: require(COLUMN_ORIGINAL_TYPE)?,
            formatted_type: require(COLUMN_FORMATTED_TYPE)?,
            key: require(COLUMN_KEY)?,
            null_tolerance: require(COLUMN_NULL_TOLERANCE)?,
            std_str: require(COLUMN_STD_STR)?,
            fix_time: require(COLUMN_FIX_TIME)?,
        })
    }
}

/// Per-row parsing context for error reporting.
struct RowCursor<'a> {
    record: &'a StringRecord,
    line: u64,
    path: &'a Path,
}

impl RowCursor<'_> {
    fn cell(&self, idx: usize) -> &str {
        self.record.get(idx).unwrap_or("").trim()
    }

    fn invalid(&self, field: &str, value: &str) -> MetadataError {
        MetadataError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            line: self.line,
            path: self.path.to_path_buf(),
        }
    }

    fn name(&self, idx: usize, field: &str) -> Result<String, MetadataError> {
        let value = self.cell(idx);
        if value.is_empty() {
            return Err(self.invalid(field, value));
        }
        Ok(value.to_string())
    }

    fn column_type(&self, idx: usize, column: &str) -> Result<Option<ColumnType>, MetadataError> {
        ColumnType::parse_optional(self.cell(idx)).map_err(|source| MetadataError::UnknownType {
            column: column.to_string(),
            line: self.line,
            path: self.path.to_path_buf(),
            source,
        })
    }

    fn flag(&self, idx: usize, field: &str) -> Result<bool, MetadataError> {
        let value = self.cell(idx);
        parse_flag(value).ok_or_else(|| self.invalid(field, value))
    }

    fn tolerance(&self, idx: usize) -> Result<Option<f64>, MetadataError> {
        let value = self.cell(idx);
        if value.is_empty() {
            return Ok(None);
        }
        match value.parse::<f64>() {
            Ok(parsed) if (0.0..=1.0).contains(&parsed) => Ok(Some(parsed)),
            _ => Err(self.invalid(COLUMN_NULL_TOLERANCE, value)),
        }
    }
}

/// Load the metadata configuration from a schema description CSV.
///
/// # Errors
///
/// Fails when the file cannot be read, a required header is missing, a cell
/// does not parse, or a column name is empty or repeated.
pub fn load_metadata(path: &Path) -> Result<MetadataConfig, MetadataError> {
    if !path.is_file() {
        return Err(MetadataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let csv_error = |source| MetadataError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();
    let index = SchemaIndex::detect(&headers, path)?;

    let mut columns = Vec::new();
    let mut seen_original = BTreeSet::new();
    let mut seen_renamed = BTreeSet::new();
    let mut table_names = BTreeSet::new();

    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let cursor = RowCursor {
            record: &record,
            line: record.position().map_or(0, csv::Position::line),
            path,
        };
        let original = cursor.name(index.original, COLUMN_ORIGINAL)?;
        let renamed = cursor.name(index.renamed, COLUMN_RENAMED)?;
        if !seen_original.insert(original.clone()) {
            return Err(duplicate(COLUMN_ORIGINAL, &original, &cursor));
        }
        if !seen_renamed.insert(renamed.clone()) {
            return Err(duplicate(COLUMN_RENAMED, &renamed, &cursor));
        }
        if let Some(idx) = index.table {
            let table = cursor.cell(idx);
            if !table.is_empty() {
                table_names.insert(table.to_string());
            }
        }

        let spec = ColumnSpec::new(original.clone(), renamed)
            .with_types(
                cursor.column_type(index.original_type, &original)?,
                cursor.column_type(index.formatted_type, &original)?,
            )
            .with_key(cursor.flag(index.key, COLUMN_KEY)?)
            .with_null_tolerance(cursor.tolerance(index.null_tolerance)?)
            .with_string_normalization(cursor.flag(index.std_str, COLUMN_STD_STR)?)
            .with_time_correction(cursor.flag(index.fix_time, COLUMN_FIX_TIME)?);
        columns.push(spec);
    }

    if columns.is_empty() {
        return Err(MetadataError::Empty {
            path: path.to_path_buf(),
        });
    }
    if table_names.len() > 1 {
        return Err(MetadataError::InvalidValue {
            field: COLUMN_TABLE.to_string(),
            value: table_names.into_iter().collect::<Vec<_>>().join(", "),
            line: 0,
            path: path.to_path_buf(),
        });
    }

    let config = MetadataConfig::new(columns, table_names.into_iter().next());
    debug!(
        path = %path.display(),
        column_count = config.columns().len(),
        key_count = config.key_columns().len(),
        table = config.table_name_or_default(),
        "metadata loaded"
    );
    Ok(config)
}

fn duplicate(field: &str, value: &str, cursor: &RowCursor<'_>) -> MetadataError {
    MetadataError::DuplicateColumn {
        field: field.to_string(),
        value: value.to_string(),
        line: cursor.line,
        path: cursor.path.to_path_buf(),
    }
}

fn build_header_map(headers: &StringRecord) -> BTreeMap<String, usize> {
    let mut map = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let key = header.trim().trim_matches('\u{feff}').to_lowercase();
        map.entry(key).or_insert(idx);
    }
    map
}

/// Parse a 0/1 style flag cell. Empty cells are `false`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" | "y" => Some(true),
        "" | "0" | "0.0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

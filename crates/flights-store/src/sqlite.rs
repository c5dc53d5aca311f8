//! SQLite-backed table store.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, error, info};

use crate::error::{Result, StoreError};
use crate::value::{cell_value, display_value, sql_type};

/// Rows read back from a stored table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSample {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One database file holding the output tables.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// The directory cannot be created or the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| {
                error!(
                    path = %parent.display(),
                    error = %source,
                    "cannot create database directory"
                );
                StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }
        let conn = Connection::open(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "database connection failed");
            StoreError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "database opened");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace `table` with the frame's contents.
    ///
    /// The drop, create and inserts run in one transaction. Returns the
    /// number of rows written.
    ///
    /// # Errors
    ///
    /// Invalid table name or any failing statement.
    pub fn write_table(&mut self, table: &str, df: &DataFrame) -> Result<usize> {
        validate_table_name(table)?;
        let sql_err = |operation: &'static str| {
            move |source: rusqlite::Error| StoreError::Sql {
                operation,
                table: table.to_string(),
                source,
            }
        };

        let definitions: Vec<String> = df
            .get_columns()
            .iter()
            .map(|column| {
                format!(
                    "{} {}",
                    quote_identifier(column.name()),
                    sql_type(column.dtype())
                )
            })
            .collect();
        let placeholders: Vec<String> = (1..=df.width()).map(|i| format!("?{i}")).collect();
        let quoted = quote_identifier(table);

        let tx = self.conn.transaction().map_err(sql_err("begin write on"))?;
        tx.execute(&format!("DROP TABLE IF EXISTS {quoted}"), [])
            .map_err(sql_err("drop"))?;
        tx.execute(
            &format!("CREATE TABLE {quoted} ({})", definitions.join(", ")),
            [],
        )
        .map_err(sql_err("create"))?;
        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {quoted} VALUES ({})",
                    placeholders.join(", ")
                ))
                .map_err(sql_err("prepare insert into"))?;
            let columns = df.get_columns();
            for idx in 0..df.height() {
                let mut row = Vec::with_capacity(columns.len());
                for column in columns {
                    row.push(cell_value(column.get(idx)?));
                }
                stmt.execute(params_from_iter(row.iter()))
                    .map_err(sql_err("insert into"))?;
            }
        }
        tx.commit().map_err(sql_err("commit write on"))?;

        info!(
            table,
            rows = df.height(),
            columns = df.width(),
            path = %self.path.display(),
            "table written"
        );
        Ok(df.height())
    }

    /// Read up to `limit` rows of `table`.
    ///
    /// # Errors
    ///
    /// Invalid table name, missing table, or a failing query.
    pub fn sample(&self, table: &str, limit: usize) -> Result<TableSample> {
        validate_table_name(table)?;
        let sql_err = |source| StoreError::Sql {
            operation: "sample",
            table: table.to_string(),
            source,
        };

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} LIMIT ?1", quote_identifier(table)))
            .map_err(sql_err)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = columns.len();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(display_value))
                    .collect::<rusqlite::Result<Vec<String>>>()
            })
            .map_err(sql_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_err)?;

        Ok(TableSample { columns, rows })
    }

    /// Number of rows currently stored in `table`.
    ///
    /// # Errors
    ///
    /// Invalid table name, missing table, or a failing query.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        validate_table_name(table)?;
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", quote_identifier(table)),
                [],
                |row| row.get(0),
            )
            .map_err(|source| StoreError::Sql {
                operation: "count rows of",
                table: table.to_string(),
                source,
            })?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Accept `[A-Za-z_][A-Za-z0-9_]*`.
///
/// # Errors
///
/// [`StoreError::InvalidTableName`] for anything else.
pub fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

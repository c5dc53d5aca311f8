//! CLI argument definitions for the flights pipeline.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

/// Default SQLite database location.
pub const DEFAULT_DB_PATH: &str = "data/NyflightsDB.db";
/// Default pipeline log file.
pub const DEFAULT_LOG_PATH: &str = "data/flights_pipe_log.log";

#[derive(Parser)]
#[command(
    name = "flights-pipeline",
    version,
    about = "Flights ETL - clean, validate and load flight records into SQLite",
    long_about = "Load a raw flight records CSV, sanitize and validate it against a\n\
                  metadata schema, derive delay features, and replace the output\n\
                  table in a SQLite database.\n\n\
                  Paths may also come from a .env file in the working directory."
)]
pub struct Cli {
    /// Raw flight records CSV.
    #[arg(long = "data-path", env = "DATA_PATH", value_name = "PATH")]
    pub data_path: PathBuf,

    /// Metadata CSV describing columns, types, keys and tolerances.
    #[arg(long = "meta-path", env = "META_PATH", value_name = "PATH")]
    pub meta_path: PathBuf,

    /// SQLite database file (created when missing).
    #[arg(long = "db-path", env = "DB_PATH", value_name = "PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Output table name (overrides the metadata `tabela` value).
    #[arg(long = "table", env = "TABLE_NAME", value_name = "NAME")]
    pub table: Option<String>,

    /// Rows to read back from the written table.
    #[arg(long = "sample-size", value_name = "N", default_value_t = 5)]
    pub sample_size: usize,

    /// Run every stage except persistence.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact")]
    pub log_format: LogFormatArg,

    /// Log file, appended to on every run.
    #[arg(long = "log-path", env = "LOG_PATH", value_name = "PATH", default_value = DEFAULT_LOG_PATH)]
    pub log_path: PathBuf,

    /// Log to stderr instead of the log file.
    #[arg(long = "log-stderr")]
    pub log_stderr: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths_and_defaults() {
        let cli = Cli::try_parse_from([
            "flights-pipeline",
            "--data-path",
            "flights.csv",
            "--meta-path",
            "metadados.csv",
        ])
        .unwrap();
        assert_eq!(cli.data_path, PathBuf::from("flights.csv"));
        assert_eq!(cli.sample_size, 5);
        assert!(!cli.dry_run);
        assert!(!cli.log_stderr);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "flights-pipeline",
            "--data-path",
            "flights.csv",
            "--meta-path",
            "metadados.csv",
            "--db-path",
            "out/flights.db",
            "--table",
            "voos",
            "--sample-size",
            "10",
            "--dry-run",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.db_path, PathBuf::from("out/flights.db"));
        assert_eq!(cli.table.as_deref(), Some("voos"));
        assert_eq!(cli.sample_size, 10);
        assert!(cli.dry_run);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }
}

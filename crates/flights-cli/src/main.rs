//! Flights ETL pipeline CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use flights_cli::logging::{LogConfig, LogFormat, init_logging};
use flights_cli::pipeline::{PipelineOptions, run_pipeline};
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let options = PipelineOptions {
        data_path: cli.data_path.clone(),
        meta_path: cli.meta_path.clone(),
        db_path: cli.db_path.clone(),
        table: cli.table.clone(),
        sample_size: cli.sample_size,
        dry_run: cli.dry_run,
    };
    let exit_code = match run_pipeline(&options) {
        Ok(summary) => {
            print_summary(&summary);
            0
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "pipeline failed");
            eprintln!("error: {err:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    if !cli.log_stderr {
        config.log_file = Some(cli.log_path.clone());
    }
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_stderr && io::stderr().is_terminal(),
    };
    config
}

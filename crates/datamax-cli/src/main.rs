//! DataMAx pipeline CLI.

use clap::{ColorChoice, Parser};
use datamax_cli::config::{PipelineConfig, SourceKind};
use datamax_cli::logging::{LogConfig, LogFormat, init_logging};
use datamax_cli::pipeline::run_pipeline;
use datamax_ingest::SyntheticOptions;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    // Values from .env never override variables already set.
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run_pipeline(&config_from_cli(&cli)) {
        Ok(result) => {
            print_summary(&result);
            if result.has_failures() { 1 } else { 0 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn config_from_cli(cli: &Cli) -> PipelineConfig {
    let source = if cli.use_files {
        SourceKind::Files
    } else {
        SourceKind::Synthetic(SyntheticOptions {
            drugs: cli.synthetic_drugs,
            trials: cli.synthetic_trials,
        })
    };
    PipelineConfig::default()
        .with_mode(cli.mode.into())
        .with_source(source)
        .with_source_dir(&cli.source_dir)
        .with_output_dir(&cli.output_dir)
        .with_database_url(cli.database_url.clone())
        .with_batch_size(cli.batch_size)
        .with_reload(cli.reload)
        .with_enrichment(cli.enrich.clone())
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
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

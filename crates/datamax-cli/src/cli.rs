//! CLI argument definitions for the DataMAx pipeline.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use datamax_cli::config::{DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR, PipelineMode};
use datamax_load::DEFAULT_BATCH_SIZE;
use datamax_transform::Enrichment;

#[derive(Parser)]
#[command(
    name = "datamax",
    version,
    about = "DataMAx ETL pipeline for drug and clinical trial data",
    long_about = "Extract, clean, validate and load drug and clinical trial tables.\n\n\
                  Each phase writes CSV artifacts to the output directory so that a\n\
                  later run can resume from any phase with --mode."
)]
pub struct Cli {
    /// Phase(s) to run.
    #[arg(long = "mode", value_enum, default_value = "full")]
    pub mode: ModeArg,

    /// Read drugs.csv and clinical_trials.csv from the source directory
    /// instead of generating synthetic data.
    #[arg(long = "use-files")]
    pub use_files: bool,

    /// Number of synthetic drug rows.
    #[arg(long = "synthetic-drugs", value_name = "N", default_value_t = 5)]
    pub synthetic_drugs: usize,

    /// Number of synthetic trial rows.
    #[arg(long = "synthetic-trials", value_name = "N", default_value_t = 5)]
    pub synthetic_trials: usize,

    /// Directory holding source files.
    #[arg(
        long = "source-dir",
        value_name = "DIR",
        env = "DATA_SOURCE_PATH",
        default_value = DEFAULT_SOURCE_DIR
    )]
    pub source_dir: PathBuf,

    /// Directory for phase artifacts.
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        env = "DATA_OUTPUT_PATH",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,

    /// Target database (`sqlite://path`, a file path, or `sqlite::memory:`).
    /// Loading is skipped when unset.
    #[arg(long = "database-url", value_name = "URL", env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Rows per load transaction.
    #[arg(
        long = "batch-size",
        value_name = "N",
        env = "LOAD_BATCH_SIZE",
        default_value_t = DEFAULT_BATCH_SIZE
    )]
    pub batch_size: usize,

    /// Truncate target tables before loading.
    #[arg(long = "reload")]
    pub reload: bool,

    /// Set a column on every cleaned table (repeatable).
    #[arg(long = "enrich", value_name = "COLUMN=VALUE")]
    pub enrich: Vec<Enrichment>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, env = "LOG_LEVEL", ignore_case = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Full,
    Extract,
    Transform,
    Validate,
    Load,
}

impl From<ModeArg> for PipelineMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => PipelineMode::Full,
            ModeArg::Extract => PipelineMode::Extract,
            ModeArg::Transform => PipelineMode::Transform,
            ModeArg::Validate => PipelineMode::Validate,
            ModeArg::Load => PipelineMode::Load,
        }
    }
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
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mode_and_flags() {
        let cli = Cli::try_parse_from([
            "datamax",
            "--mode",
            "validate",
            "--use-files",
            "--reload",
            "--batch-size",
            "50",
        ])
        .unwrap();
        assert!(matches!(cli.mode, ModeArg::Validate));
        assert!(cli.use_files);
        assert!(cli.reload);
        assert_eq!(cli.batch_size, 50);
    }

    #[test]
    fn test_log_level_reads_env_and_ignores_case() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "log_level")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new("LOG_LEVEL")));

        let cli = Cli::try_parse_from(["datamax", "--log-level", "DEBUG"]).unwrap();
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
    }

    #[test]
    fn test_enrich_is_repeatable() {
        let cli = Cli::try_parse_from([
            "datamax",
            "--enrich",
            "source=registry",
            "--enrich",
            "batch=7",
        ])
        .unwrap();
        assert_eq!(cli.enrich.len(), 2);
        assert_eq!(cli.enrich[0].column, "source");
        assert!(Cli::try_parse_from(["datamax", "--enrich", "novalue"]).is_err());
    }
}

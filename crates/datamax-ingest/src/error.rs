//! Error types for data extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing tabular files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Failed to write an artifact.
    #[error("failed to write CSV {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// Generated fixture rows did not fit the header.
    #[error("failed to build synthetic {table} table: {source}")]
    Synthetic {
        table: String,
        #[source]
        source: datamax_model::ModelError,
    },

    /// Row did not fit the header.
    #[error("malformed table in {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: datamax_model::ModelError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

//! Error types for loading into the store.

use thiserror::Error;

/// Errors raised by [`crate::Loader`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// Connection string is not a SQLite location.
    #[error(
        "unsupported database URL '{url}': expected sqlite://<path>, sqlite::memory: or a file path"
    )]
    UnsupportedUrl { url: String },

    /// Database could not be opened.
    #[error("failed to open database {location}: {source}")]
    Open {
        location: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Pragmas or schema bootstrap failed.
    #[error("failed to prepare database schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Table shares no column with its target.
    #[error("table '{table}' has none of the columns of the target table")]
    NoLoadableColumns { table: String },

    /// Insert failed; chunks committed before the failure stay loaded.
    #[error("error loading data into '{table}' after {loaded} rows: {source}")]
    Insert {
        table: String,
        loaded: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("error truncating table '{table}': {source}")]
    Truncate {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Rows read back did not fit the target columns.
    #[error(transparent)]
    Model(#[from] datamax_model::ModelError),

    #[error("error reading table '{table}': {source}")]
    Query {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

//! Error types for table manipulation.

use thiserror::Error;

/// Errors raised by structural table operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Row width does not match the table's column count.
    #[error("row has {found} cells but table '{table}' has {expected} columns")]
    RowWidth {
        table: String,
        expected: usize,
        found: usize,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

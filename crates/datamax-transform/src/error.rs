use thiserror::Error;

/// Structural problems that stop a table from being cleaned.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("invalid enrichment '{input}', expected column=value")]
    InvalidEnrichment { input: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;

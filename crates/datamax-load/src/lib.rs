//! Loading canonical tables into the relational store.
//!
//! The store is SQLite. [`Loader`] owns the connection for its whole
//! lifetime; tables are appended independently, so a failed table never
//! rolls back one loaded earlier.

mod error;
mod loader;
mod url;

pub use error::{LoadError, Result};
pub use loader::{DEFAULT_BATCH_SIZE, LoadSummary, Loader};
pub use url::DatabaseLocation;

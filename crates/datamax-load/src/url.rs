//! Connection string parsing.

use std::fmt;
use std::path::PathBuf;

use crate::error::{LoadError, Result};

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parse `sqlite::memory:`, `sqlite://<path>`, or a bare file path.
    ///
    /// Other URL schemes (`postgresql://...`) are rejected.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        if url == "sqlite::memory:" || url == ":memory:" {
            return Ok(Self::Memory);
        }
        if let Some(path) = url.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(LoadError::UnsupportedUrl {
                    url: url.to_string(),
                });
            }
            return Ok(Self::File(PathBuf::from(path)));
        }
        if url.is_empty() || url.contains("://") {
            return Err(LoadError::UnsupportedUrl {
                url: url.to_string(),
            });
        }
        Ok(Self::File(PathBuf::from(url)))
    }
}

impl fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str(":memory:"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

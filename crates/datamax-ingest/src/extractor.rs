//! File-based extraction with a fail-soft contract.

use std::path::PathBuf;

use datamax_model::{Entity, Table};
use tracing::{error, info};

use crate::csv_table::read_csv_table;
use crate::error::IngestError;

/// Reads entity tables from delimited files under a source directory.
#[derive(Debug, Clone)]
pub struct FileExtractor {
    source_dir: PathBuf,
}

impl FileExtractor {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Extract the source file for `entity` (`drugs.csv`, `clinical_trials.csv`).
    pub fn extract(&self, entity: Entity) -> Option<Table> {
        self.extract_file(&entity.source_file(), entity.table_name())
    }

    /// Extract a named file, returning `None` when it is missing or malformed.
    ///
    /// The cause is logged; callers only see absence.
    pub fn extract_file(&self, file_name: &str, table_name: &str) -> Option<Table> {
        let path = self.source_dir.join(file_name);
        info!(path = %path.display(), "extracting data");
        match read_csv_table(&path, table_name) {
            Ok(table) => {
                info!(
                    file = file_name,
                    records = table.height(),
                    "successfully extracted records"
                );
                Some(table)
            }
            Err(IngestError::FileNotFound { path }) => {
                error!(path = %path.display(), "file not found");
                None
            }
            Err(err) => {
                error!(file = file_name, error = %err, "error extracting data");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_extract_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("drugs.csv"),
            "name,manufacturer\nAspirin,Bayer\n",
        )
        .unwrap();
        let extractor = FileExtractor::new(dir.path());

        let table = extractor.extract(Entity::Drugs).unwrap();
        assert_eq!(table.name(), "drugs");
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_extract_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = FileExtractor::new(dir.path());

        assert!(extractor.extract(Entity::ClinicalTrials).is_none());
    }

    #[test]
    fn test_extract_malformed_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("drugs.csv"), "").unwrap();
        let extractor = FileExtractor::new(dir.path());

        assert!(extractor.extract(Entity::Drugs).is_none());
    }
}

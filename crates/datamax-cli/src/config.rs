//! Pipeline configuration passed explicitly to every phase.

use std::fmt;
use std::path::PathBuf;

use datamax_ingest::SyntheticOptions;
use datamax_load::DEFAULT_BATCH_SIZE;
use datamax_transform::Enrichment;

use crate::types::Phase;

pub const DEFAULT_SOURCE_DIR: &str = "./data/source";
pub const DEFAULT_OUTPUT_DIR: &str = "./data/processed";

/// Which phases a run executes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineMode {
    #[default]
    Full,
    Extract,
    Transform,
    Validate,
    Load,
}

impl PipelineMode {
    pub fn includes(self, phase: Phase) -> bool {
        match self {
            PipelineMode::Full => true,
            PipelineMode::Extract => phase == Phase::Extract,
            PipelineMode::Transform => phase == Phase::Transform,
            PipelineMode::Validate => phase == Phase::Validate,
            PipelineMode::Load => phase == Phase::Load,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineMode::Full => "full",
            PipelineMode::Extract => "extract",
            PipelineMode::Transform => "transform",
            PipelineMode::Validate => "validate",
            PipelineMode::Load => "load",
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where raw tables come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Deterministic fixture tables.
    Synthetic(SyntheticOptions),
    /// `drugs.csv` and `clinical_trials.csv` under the source directory.
    Files,
}

impl Default for SourceKind {
    fn default() -> Self {
        SourceKind::Synthetic(SyntheticOptions::default())
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub mode: PipelineMode,
    pub source: SourceKind,
    pub source_dir: PathBuf,
    /// Artifacts of every phase are written here.
    pub output_dir: PathBuf,
    /// Load is skipped when unset.
    pub database_url: Option<String>,
    pub batch_size: usize,
    /// Truncate target tables before loading.
    pub reload: bool,
    /// Columns stamped onto every cleaned table.
    pub enrichment: Vec<Enrichment>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            source: SourceKind::default(),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            database_url: None,
            batch_size: DEFAULT_BATCH_SIZE,
            reload: false,
            enrichment: Vec::new(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: PipelineMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    #[must_use]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url.filter(|url| !url.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    #[must_use]
    pub fn with_enrichment(mut self, enrichment: Vec<Enrichment>) -> Self {
        self.enrichment = enrichment;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

//! Extraction of raw pharmaceutical tables.
//!
//! Two sources feed the pipeline:
//!
//! - **Files**: delimited files under a source directory, read by
//!   [`FileExtractor`]. A missing or malformed file is a soft failure: it is
//!   logged and reported as `None` so sibling sources can still be read.
//! - **Synthetic**: deterministic fixture tables from [`generate_drugs`] and
//!   [`generate_trials`], with every trial referencing a generated drug.
//!
//! The [`read_csv_table`] / [`write_csv_table`] pair also serves as the
//! artifact format between partial pipeline runs.
//!
//! # Example
//!
//! ```ignore
//! use datamax_ingest::FileExtractor;
//! use datamax_model::Entity;
//!
//! let extractor = FileExtractor::new("data/source");
//! if let Some(drugs) = extractor.extract(Entity::Drugs) {
//!     println!("{} drugs", drugs.height());
//! }
//! ```

mod csv_table;
mod error;
mod extractor;
mod synthetic;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv_table::{read_csv_table, write_csv_table};

// === Extraction ===
pub use extractor::FileExtractor;

// === Synthetic Fixtures ===
pub use synthetic::{SyntheticOptions, generate, generate_drugs, generate_trials};

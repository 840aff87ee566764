//! Transformation of raw tables into canonical tables.
//!
//! This crate provides the cleaning rules for each entity:
//!
//! - **drugs**: name title-casing, default filling, approval date coercion
//! - **trials**: trial ID casing, phase/status canonicalization, date
//!   coercion, patient count clamping
//! - **dedupe**: stable first-occurrence-wins deduplication
//! - **metrics**: per-drug trial aggregation
//! - **enrich**: constant-valued columns added after cleaning
//!
//! Cleaning never fails on bad cell values: unparseable dates and counts
//! become nulls and unknown enum spellings pass through unchanged. The only
//! error is a missing dedup key column, which is reported once.

pub mod coerce;
pub mod dedupe;
pub mod drugs;
pub mod enrich;
mod error;
pub mod metrics;
pub mod text;
pub mod trials;

pub use dedupe::dedupe_by_key;
pub use drugs::clean_drug_data;
pub use enrich::{Enrichment, enrich_table};
pub use error::{Result, TransformError};
pub use metrics::{TRIAL_METRICS, aggregate_trial_metrics};
pub use trials::clean_clinical_trial_data;

use datamax_model::{Entity, Table};

/// Clean a raw table with the rules for `entity`.
pub fn clean_table(entity: Entity, table: &Table) -> Result<Table> {
    match entity {
        Entity::Drugs => clean_drug_data(table),
        Entity::ClinicalTrials => clean_clinical_trial_data(table),
    }
}

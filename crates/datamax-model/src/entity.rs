//! Entity descriptors: which columns matter for each canonical table.

use std::fmt;

use serde::Serialize;

/// Column names used across the pipeline.
pub mod columns {
    /// Surrogate key assigned by the store; stripped before insert.
    pub const ID: &str = "id";

    pub const NAME: &str = "name";
    pub const GENERIC_NAME: &str = "generic_name";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const APPROVAL_DATE: &str = "approval_date";
    pub const THERAPEUTIC_AREA: &str = "therapeutic_area";
    pub const MOLECULE_TYPE: &str = "molecule_type";

    pub const TRIAL_ID: &str = "trial_id";
    pub const TITLE: &str = "title";
    pub const DRUG_ID: &str = "drug_id";
    pub const PHASE: &str = "phase";
    pub const STATUS: &str = "status";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const PATIENT_COUNT: &str = "patient_count";
    pub const LOCATION: &str = "location";
    pub const SPONSOR: &str = "sponsor";
}

use columns::{
    APPROVAL_DATE, DRUG_ID, END_DATE, GENERIC_NAME, LOCATION, MANUFACTURER, MOLECULE_TYPE, NAME,
    PATIENT_COUNT, PHASE, SPONSOR, START_DATE, STATUS, THERAPEUTIC_AREA, TITLE, TRIAL_ID,
};

/// Canonical tables that flow through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Drugs,
    ClinicalTrials,
}

impl Entity {
    /// Load order: parents before dependents.
    pub const ALL: [Entity; 2] = [Entity::Drugs, Entity::ClinicalTrials];

    /// Table name in the store, also the stem of file sources and artifacts.
    pub fn table_name(&self) -> &'static str {
        match self {
            Entity::Drugs => "drugs",
            Entity::ClinicalTrials => "clinical_trials",
        }
    }

    /// Column that decides row uniqueness within a batch.
    pub fn dedup_key(&self) -> &'static str {
        match self {
            Entity::Drugs => NAME,
            Entity::ClinicalTrials => TRIAL_ID,
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Drugs => &[NAME],
            Entity::ClinicalTrials => &[TRIAL_ID, TITLE, DRUG_ID],
        }
    }

    pub fn date_columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Drugs => &[APPROVAL_DATE],
            Entity::ClinicalTrials => &[START_DATE, END_DATE],
        }
    }

    /// Non-surrogate columns of the target table, in store order.
    pub fn store_columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Drugs => &[
                NAME,
                GENERIC_NAME,
                MANUFACTURER,
                APPROVAL_DATE,
                THERAPEUTIC_AREA,
                MOLECULE_TYPE,
            ],
            Entity::ClinicalTrials => &[
                TRIAL_ID,
                TITLE,
                DRUG_ID,
                PHASE,
                STATUS,
                START_DATE,
                END_DATE,
                PATIENT_COUNT,
                LOCATION,
                SPONSOR,
            ],
        }
    }

    /// Plural noun used in duplicate-key messages.
    pub fn duplicate_label(&self) -> &'static str {
        match self {
            Entity::Drugs => "drug names",
            Entity::ClinicalTrials => "trial IDs",
        }
    }

    /// Source file name under the source directory.
    pub fn source_file(&self) -> String {
        format!("{}.csv", self.table_name())
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns_include_dedup_key() {
        for entity in Entity::ALL {
            assert!(entity.required_columns().contains(&entity.dedup_key()));
        }
    }

    #[test]
    fn test_store_columns_exclude_surrogate() {
        for entity in Entity::ALL {
            assert!(!entity.store_columns().contains(&columns::ID));
            for date in entity.date_columns() {
                assert!(entity.store_columns().contains(date));
            }
        }
    }

    #[test]
    fn test_source_file() {
        assert_eq!(Entity::ClinicalTrials.source_file(), "clinical_trials.csv");
    }
}

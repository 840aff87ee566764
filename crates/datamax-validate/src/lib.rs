//! Data quality validation for canonical tables.
//!
//! Validation is advisory: every check runs, none short-circuits, and the
//! table is only read. The verdict is valid exactly when no issue was found.
//!
//! - **checks**: one module per defect class
//! - **issue**: typed issues with stable human-readable messages
//! - **quality**: descriptive completeness report

mod checks;
mod issue;
mod quality;
mod report;

pub use issue::Issue;
pub use quality::{ColumnMissing, QualityReport, generate_quality_report};
pub use report::ValidationReport;

use datamax_model::{Entity, Table};
use tracing::info;

/// Validate a table with the checks for `entity`.
pub fn validate_table(entity: Entity, table: &Table) -> ValidationReport {
    info!(entity = %entity, records = table.height(), "validating data");
    let report = checks::run_all(entity, table);
    info!(
        entity = %entity,
        passed = report.is_valid(),
        issues = report.issues.len(),
        "validation finished"
    );
    report
}

/// Validate a drug table.
pub fn validate_drug_data(table: &Table) -> ValidationReport {
    validate_table(Entity::Drugs, table)
}

/// Validate a clinical trial table.
pub fn validate_clinical_trial_data(table: &Table) -> ValidationReport {
    validate_table(Entity::ClinicalTrials, table)
}

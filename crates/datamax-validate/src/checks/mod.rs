//! Validation check modules.
//!
//! Each module inspects one defect class and returns its issues. Checks are
//! independent: a missing column skips the checks that need it and nothing
//! else.

mod dates;
mod domain;
mod duplicates;
mod range;
mod required;

use datamax_model::{Entity, Table, TrialPhase, TrialStatus, columns};

use crate::report::ValidationReport;

/// Run every check for `entity`, in reporting order.
pub fn run_all(entity: Entity, table: &Table) -> ValidationReport {
    let mut report = ValidationReport::new(entity);

    // 1. Required column presence
    report.extend(required::check_presence(entity, table));

    // 2. Nulls in required columns
    report.extend(required::check_nulls(entity, table));

    // 3. Repeated dedup keys
    report.extend(duplicates::check(entity, table));

    match entity {
        Entity::Drugs => {
            // 4. Approval date parseability
            report.extend(dates::check_parseable(table, columns::APPROVAL_DATE));
        }
        Entity::ClinicalTrials => {
            // 5. Non-negative patient counts
            report.extend(range::check_non_negative(table, columns::PATIENT_COUNT));

            // 6. Trial end after start
            report.extend(dates::check_order(
                table,
                columns::START_DATE,
                columns::END_DATE,
            ));

            // 7. Phase and status vocabularies
            report.extend(domain::check(table, columns::PHASE, TrialPhase::is_canonical));
            report.extend(domain::check(
                table,
                columns::STATUS,
                TrialStatus::is_canonical,
            ));
        }
    }

    report
}

/// Convert a cell count for reporting.
fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

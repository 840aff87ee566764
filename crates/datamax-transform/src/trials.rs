//! Clinical trial table cleaning.

use datamax_model::{Entity, Table, TrialPhase, TrialStatus, Value, columns};
use tracing::{debug, info};

use crate::coerce::{coerce_clamped_number, coerce_date};
use crate::dedupe::dedupe_by_key;
use crate::error::{Result, TransformError};
use crate::text::map_text;

/// Clean and standardize a raw clinical trial table.
///
/// `trial_id` is trimmed and upper-cased, `phase` and `status` are mapped to
/// their canonical literals when a synonym matches (other values are kept as
/// they are), both dates are coerced, and `patient_count` becomes a number
/// clamped at zero. Rows repeating an earlier `trial_id` are then dropped.
pub fn clean_clinical_trial_data(table: &Table) -> Result<Table> {
    info!(records = table.height(), "cleaning clinical trial data");
    let key = Entity::ClinicalTrials.dedup_key();
    if !table.has_column(key) {
        return Err(TransformError::MissingColumn {
            table: table.name().to_string(),
            column: key.to_string(),
        });
    }

    let mut clean = table.clone();
    clean.map_column(columns::TRIAL_ID, |value| {
        map_text(value, str::to_uppercase)
    });
    clean.map_column(columns::PHASE, |value| {
        canonicalize(value, |text| TrialPhase::lookup(text).map(|p| p.as_str()))
    });
    clean.map_column(columns::STATUS, |value| {
        canonicalize(value, |text| TrialStatus::lookup(text).map(|s| s.as_str()))
    });
    for column in Entity::ClinicalTrials.date_columns() {
        clean.map_column(column, coerce_date);
    }
    clean.map_column(columns::PATIENT_COUNT, |value| {
        coerce_clamped_number(value, 0.0)
    });

    let dropped = dedupe_by_key(&mut clean, key)?;
    debug!(dropped, "removed duplicate trial IDs");
    info!(records = clean.height(), "cleaned clinical trial data");
    Ok(clean)
}

/// Replace a text cell with its canonical literal, or keep it unchanged.
fn canonicalize<F>(value: &Value, lookup: F) -> Value
where
    F: FnOnce(&str) -> Option<&'static str>,
{
    match value.as_text().and_then(lookup) {
        Some(canonical) => Value::text(canonical),
        None => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trials(rows: Vec<Vec<Value>>) -> Table {
        Table::from_rows(
            "clinical_trials",
            vec![
                "trial_id".to_string(),
                "phase".to_string(),
                "status".to_string(),
                "start_date".to_string(),
                "end_date".to_string(),
                "patient_count".to_string(),
            ],
            rows,
        )
        .unwrap()
    }

    #[test]
    fn test_clean_clinical_trial_data() {
        let raw = trials(vec![
            vec![
                Value::text("  nct001 "),
                Value::text("Phase 3"),
                Value::text("Completed"),
                Value::text("2020-01-15"),
                Value::text("2022-12-31"),
                Value::text("500"),
            ],
            vec![
                Value::text("NCT002"),
                Value::text("phase ii"),
                Value::text("active"),
                Value::text("2021-06-01"),
                Value::Null,
                Value::text("-50"),
            ],
            vec![
                Value::text("NCT001"),
                Value::text("Phase 3"),
                Value::text("Completed"),
                Value::text("2020-01-15"),
                Value::text("2022-12-31"),
                Value::text("500"),
            ],
        ]);

        let clean = clean_clinical_trial_data(&raw).unwrap();

        assert_eq!(clean.height(), 2);
        assert_eq!(clean.get(0, "trial_id"), Some(&Value::text("NCT001")));
        assert_eq!(clean.get(1, "phase"), Some(&Value::text("Phase 2")));
        assert_eq!(clean.get(1, "status"), Some(&Value::text("Ongoing")));
        assert_eq!(clean.get(1, "patient_count"), Some(&Value::Integer(0)));
        assert_eq!(clean.get(0, "patient_count"), Some(&Value::Integer(500)));
        assert_eq!(
            clean.get(0, "start_date"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()))
        );
        assert_eq!(clean.get(1, "end_date"), Some(&Value::Null));
    }

    #[test]
    fn test_unmapped_enum_values_pass_through() {
        let raw = trials(vec![vec![
            Value::text("NCT009"),
            Value::text("Phase 0"),
            Value::text("withdrawn"),
            Value::Null,
            Value::Null,
            Value::Null,
        ]]);

        let clean = clean_clinical_trial_data(&raw).unwrap();

        assert_eq!(clean.get(0, "phase"), Some(&Value::text("Phase 0")));
        assert_eq!(clean.get(0, "status"), Some(&Value::text("withdrawn")));
    }

    #[test]
    fn test_missing_trial_id_column() {
        let raw = Table::from_rows(
            "clinical_trials",
            vec!["title".to_string()],
            vec![vec![Value::text("Study")]],
        )
        .unwrap();

        let err = clean_clinical_trial_data(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "table 'clinical_trials' is missing required column 'trial_id'"
        );
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let raw = Table::from_rows(
            "clinical_trials",
            vec!["trial_id".to_string()],
            vec![vec![Value::text("nct010")]],
        )
        .unwrap();

        let clean = clean_clinical_trial_data(&raw).unwrap();

        assert_eq!(clean.columns(), &["trial_id"]);
        assert_eq!(clean.get(0, "trial_id"), Some(&Value::text("NCT010")));
    }
}

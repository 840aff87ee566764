//! Per-drug aggregation of clinical trial records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use datamax_model::{Table, Value, columns};
use tracing::{info, warn};

/// Name of the aggregated table and stem of its artifact file.
pub const TRIAL_METRICS: &str = "trial_metrics";

/// Grouping key. Whole-number ids sort numerically before any text id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DrugKey {
    Numeric(i64),
    Text(String),
}

impl DrugKey {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        match value.as_f64() {
            Some(number) if number.fract() == 0.0 => Some(Self::Numeric(number as i64)),
            _ => Some(Self::Text(value.to_string().trim().to_string())),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Numeric(id) => Value::Integer(id),
            Self::Text(id) => Value::Text(id),
        }
    }
}

#[derive(Debug, Default)]
struct DrugMetrics {
    trials: i64,
    patients: f64,
    first_start: Option<NaiveDate>,
    last_end: Option<NaiveDate>,
}

/// Aggregate trial counts, enrolled patients, and the trial date span per drug.
///
/// Output columns: `drug_id, total_trials, total_patients, first_trial_date,
/// last_trial_date`, one row per distinct non-null `drug_id` in ascending
/// order. The first date is the earliest `start_date`, the last date the
/// latest `end_date`. Returns `None` when the table has no `drug_id` column.
pub fn aggregate_trial_metrics(trials: &Table) -> Option<Table> {
    info!(records = trials.height(), "aggregating trial metrics");
    let Some(drug_idx) = trials.column_index(columns::DRUG_ID) else {
        warn!(table = trials.name(), "no drug_id column found for aggregation");
        return None;
    };
    let patient_idx = trials.column_index(columns::PATIENT_COUNT);
    let start_idx = trials.column_index(columns::START_DATE);
    let end_idx = trials.column_index(columns::END_DATE);

    let mut groups: BTreeMap<DrugKey, DrugMetrics> = BTreeMap::new();
    for row in trials.rows() {
        let Some(key) = DrugKey::from_value(&row[drug_idx]) else {
            continue;
        };
        let metrics = groups.entry(key).or_default();
        metrics.trials += 1;
        if let Some(patients) = patient_idx.and_then(|idx| row[idx].as_f64()) {
            metrics.patients += patients;
        }
        if let Some(start) = start_idx.and_then(|idx| row[idx].as_date()) {
            metrics.first_start = Some(metrics.first_start.map_or(start, |d| d.min(start)));
        }
        if let Some(end) = end_idx.and_then(|idx| row[idx].as_date()) {
            metrics.last_end = Some(metrics.last_end.map_or(end, |d| d.max(end)));
        }
    }

    let mut table = Table::new(
        TRIAL_METRICS,
        vec![
            columns::DRUG_ID.to_string(),
            "total_trials".to_string(),
            "total_patients".to_string(),
            "first_trial_date".to_string(),
            "last_trial_date".to_string(),
        ],
    );
    for (key, metrics) in groups {
        let row = vec![
            key.into_value(),
            Value::Integer(metrics.trials),
            Value::number(metrics.patients),
            Value::from(metrics.first_start),
            Value::from(metrics.last_end),
        ];
        if let Err(err) = table.push_row(row) {
            warn!(error = %err, "skipping malformed metrics row");
        }
    }
    info!(drugs = table.height(), "aggregated trial metrics");
    Some(table)
}

//! Deterministic fixture tables for demos and tests.
//!
//! Rows cycle through a small reference set. Beyond the first cycle, names
//! and titles get a numeric suffix so dedup keys stay unique, and each trial's
//! `drug_id` points at a generated drug row (1-based, in generation order).

use datamax_model::{ModelError, Table, Value, columns};
use tracing::{info, warn};

use crate::error::{IngestError, Result};

const DRUGS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Aspirin",
        "Acetylsalicylic acid",
        "Bayer",
        "1899-03-06",
        "Cardiology",
        "Small Molecule",
    ),
    (
        "Ibuprofen",
        "Ibuprofen",
        "Pfizer",
        "1969-01-01",
        "Pain Management",
        "Small Molecule",
    ),
    (
        "Paracetamol",
        "Acetaminophen",
        "GSK",
        "1950-01-01",
        "Pain Management",
        "Small Molecule",
    ),
    (
        "Amoxicillin",
        "Amoxicillin",
        "Novartis",
        "1972-06-01",
        "Infectious Disease",
        "Small Molecule",
    ),
    (
        "Metformin",
        "Metformin",
        "Merck",
        "1994-12-29",
        "Endocrinology",
        "Small Molecule",
    ),
];

struct TrialSeed {
    title: &'static str,
    phase: &'static str,
    status: &'static str,
    start_date: &'static str,
    end_date: Option<&'static str>,
    patient_count: i64,
    location: &'static str,
    sponsor: &'static str,
}

const TRIALS: &[TrialSeed] = &[
    TrialSeed {
        title: "Phase 3 Study of Aspirin in CAD",
        phase: "Phase 3",
        status: "Completed",
        start_date: "2020-01-15",
        end_date: Some("2022-12-31"),
        patient_count: 500,
        location: "USA",
        sponsor: "Bayer",
    },
    TrialSeed {
        title: "Safety Study of Ibuprofen",
        phase: "Phase 2",
        status: "Ongoing",
        start_date: "2021-06-01",
        end_date: None,
        patient_count: 250,
        location: "EU",
        sponsor: "Pfizer",
    },
    TrialSeed {
        title: "Efficacy Trial of Paracetamol",
        phase: "Phase 3",
        status: "Completed",
        start_date: "2019-03-20",
        end_date: Some("2021-09-15"),
        patient_count: 300,
        location: "USA",
        sponsor: "GSK",
    },
    TrialSeed {
        title: "Amoxicillin Resistance Study",
        phase: "Phase 4",
        status: "Ongoing",
        start_date: "2022-01-10",
        end_date: None,
        patient_count: 150,
        location: "Asia",
        sponsor: "Novartis",
    },
    TrialSeed {
        title: "Metformin in Type 2 Diabetes",
        phase: "Phase 3",
        status: "Completed",
        start_date: "2018-11-05",
        end_date: Some("2021-08-20"),
        patient_count: 800,
        location: "Global",
        sponsor: "Merck",
    },
];

/// Sizes of the generated fixture tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticOptions {
    pub drugs: usize,
    pub trials: usize,
}

impl Default for SyntheticOptions {
    fn default() -> Self {
        Self {
            drugs: DRUGS.len(),
            trials: TRIALS.len(),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn fixture_error(table: &'static str) -> impl FnOnce(ModelError) -> IngestError {
    move |source| IngestError::Synthetic {
        table: table.to_string(),
        source,
    }
}

fn with_cycle(base: &str, cycle: usize) -> String {
    if cycle == 0 {
        base.to_string()
    } else {
        format!("{base} {}", cycle + 1)
    }
}

/// Generate `count` drug rows.
pub fn generate_drugs(count: usize) -> Result<Table> {
    let mut rows = Vec::with_capacity(count);
    for idx in 0..count {
        let (name, generic, manufacturer, approval, area, molecule) = DRUGS[idx % DRUGS.len()];
        let cycle = idx / DRUGS.len();
        rows.push(vec![
            Value::text(with_cycle(name, cycle)),
            Value::text(generic),
            Value::text(manufacturer),
            Value::text(approval),
            Value::text(area),
            Value::text(molecule),
        ]);
    }
    Table::from_rows(
        "drugs",
        names(&[
            columns::NAME,
            columns::GENERIC_NAME,
            columns::MANUFACTURER,
            columns::APPROVAL_DATE,
            columns::THERAPEUTIC_AREA,
            columns::MOLECULE_TYPE,
        ]),
        rows,
    )
    .map_err(fixture_error("drugs"))
}

/// Generate `count` trial rows referencing drugs `1..=drug_count`.
///
/// With no drugs to reference, the trial table is empty.
pub fn generate_trials(count: usize, drug_count: usize) -> Result<Table> {
    let header = names(&[
        columns::TRIAL_ID,
        columns::TITLE,
        columns::DRUG_ID,
        columns::PHASE,
        columns::STATUS,
        columns::START_DATE,
        columns::END_DATE,
        columns::PATIENT_COUNT,
        columns::LOCATION,
        columns::SPONSOR,
    ]);
    if drug_count == 0 {
        if count > 0 {
            warn!(trials = count, "no drugs generated; skipping trial generation");
        }
        return Ok(Table::new("clinical_trials", header));
    }
    let mut rows = Vec::with_capacity(count);
    for idx in 0..count {
        let seed = &TRIALS[idx % TRIALS.len()];
        let cycle = idx / TRIALS.len();
        let title = if cycle == 0 {
            seed.title.to_string()
        } else {
            format!("{} (cohort {})", seed.title, cycle + 1)
        };
        let drug_id = (idx % drug_count) as i64 + 1;
        rows.push(vec![
            Value::text(format!("NCT{:03}", idx + 1)),
            Value::text(title),
            Value::Integer(drug_id),
            Value::text(seed.phase),
            Value::text(seed.status),
            Value::text(seed.start_date),
            seed.end_date.map_or(Value::Null, Value::text),
            Value::Integer(seed.patient_count),
            Value::text(seed.location),
            Value::text(seed.sponsor),
        ]);
    }
    Table::from_rows("clinical_trials", header, rows).map_err(fixture_error("clinical_trials"))
}

/// Generate both fixture tables.
pub fn generate(options: SyntheticOptions) -> Result<(Table, Table)> {
    info!(
        drugs = options.drugs,
        trials = options.trials,
        "generating synthetic data"
    );
    let drugs = generate_drugs(options.drugs)?;
    let trials = generate_trials(options.trials, drugs.height())?;
    Ok((drugs, trials))
}

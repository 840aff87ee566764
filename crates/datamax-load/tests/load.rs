//! Loader round trips against in-memory and file-backed SQLite stores.

use datamax_ingest::{SyntheticOptions, generate};
use datamax_load::{LoadError, Loader};
use datamax_model::{Entity, Table, Value};
use datamax_transform::{clean_clinical_trial_data, clean_drug_data};

fn canonical() -> (Table, Table) {
    let (drugs, trials) = generate(SyntheticOptions::default()).unwrap();
    (
        clean_drug_data(&drugs).unwrap(),
        clean_clinical_trial_data(&trials).unwrap(),
    )
}

#[test]
fn loaded_tables_read_back_unchanged() {
    let (drugs, trials) = canonical();
    let mut loader = Loader::open_in_memory().unwrap();

    assert_eq!(loader.load(&drugs, Entity::Drugs).unwrap().rows, 5);
    assert_eq!(loader.load(&trials, Entity::ClinicalTrials).unwrap().rows, 5);

    assert_eq!(loader.read_back(Entity::Drugs).unwrap(), drugs);
    assert_eq!(loader.read_back(Entity::ClinicalTrials).unwrap(), trials);
}

#[test]
fn rows_are_loaded_across_several_batches() {
    let (drugs, _) = generate(SyntheticOptions {
        drugs: 7,
        trials: 0,
    })
    .unwrap();
    let mut loader = Loader::open_in_memory().unwrap().with_batch_size(3);

    let summary = loader.load(&drugs, Entity::Drugs).unwrap();

    assert_eq!(summary.table, "drugs");
    assert_eq!(summary.rows, 7);
    assert_eq!(loader.read_back(Entity::Drugs).unwrap().height(), 7);
}

#[test]
fn surrogate_and_unknown_columns_are_skipped() {
    let table = Table::from_rows(
        "drugs",
        vec!["id".to_string(), "name".to_string(), "notes".to_string()],
        vec![vec![
            Value::Integer(42),
            Value::text("Aspirin"),
            Value::text("not stored"),
        ]],
    )
    .unwrap();
    let mut loader = Loader::open_in_memory().unwrap();

    loader.load(&table, Entity::Drugs).unwrap();

    let stored = loader.read_back(Entity::Drugs).unwrap();
    assert_eq!(stored.get(0, "name"), Some(&Value::text("Aspirin")));
    assert_eq!(stored.get(0, "manufacturer"), Some(&Value::Null));
    assert!(!stored.has_column("notes"));
}

#[test]
fn truncating_drugs_cascades_to_trials() {
    let (drugs, trials) = canonical();
    let mut loader = Loader::open_in_memory().unwrap();
    loader.load(&drugs, Entity::Drugs).unwrap();
    loader.load(&trials, Entity::ClinicalTrials).unwrap();

    assert_eq!(loader.truncate(Entity::Drugs).unwrap(), 5);

    assert!(loader.read_back(Entity::Drugs).unwrap().is_empty());
    assert!(loader.read_back(Entity::ClinicalTrials).unwrap().is_empty());
}

#[test]
fn truncate_restarts_ids_for_reload() {
    let (drugs, trials) = canonical();
    let mut loader = Loader::open_in_memory().unwrap();
    loader.load(&drugs, Entity::Drugs).unwrap();
    loader.truncate(Entity::ClinicalTrials).unwrap();
    loader.truncate(Entity::Drugs).unwrap();

    // Trial drug_id values point at 1-based drug ids.
    loader.load(&drugs, Entity::Drugs).unwrap();
    let summary = loader.load(&trials, Entity::ClinicalTrials).unwrap();
    assert_eq!(summary.rows, trials.height());
}

#[test]
fn failed_table_does_not_roll_back_earlier_table() {
    let (drugs, _) = canonical();
    let orphan = Table::from_rows(
        "clinical_trials",
        vec![
            "trial_id".to_string(),
            "title".to_string(),
            "drug_id".to_string(),
        ],
        vec![vec![
            Value::text("NCT999"),
            Value::text("Orphan trial"),
            Value::Integer(999),
        ]],
    )
    .unwrap();
    let mut loader = Loader::open_in_memory().unwrap();
    loader.load(&drugs, Entity::Drugs).unwrap();

    let err = loader.load(&orphan, Entity::ClinicalTrials).unwrap_err();

    assert!(matches!(err, LoadError::Insert { loaded: 0, .. }));
    assert_eq!(loader.read_back(Entity::Drugs).unwrap().height(), 5);
}

#[test]
fn table_without_target_columns_is_rejected() {
    let table = Table::from_rows(
        "drugs",
        vec!["notes".to_string()],
        vec![vec![Value::text("x")]],
    )
    .unwrap();
    let mut loader = Loader::open_in_memory().unwrap();

    let err = loader.load(&table, Entity::Drugs).unwrap_err();
    assert!(matches!(err, LoadError::NoLoadableColumns { .. }));
}

#[test]
fn file_database_persists_between_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("pharma.db").display());
    let (drugs, _) = canonical();

    {
        let mut loader = Loader::open(&url).unwrap();
        loader.load(&drugs, Entity::Drugs).unwrap();
    }

    let loader = Loader::open(&url).unwrap();
    assert_eq!(loader.read_back(Entity::Drugs).unwrap(), drugs);
}

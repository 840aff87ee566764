//! End-to-end pipeline runs against temporary directories.

use std::fs;
use std::path::Path;

use datamax_cli::config::{PipelineConfig, PipelineMode, SourceKind};
use datamax_cli::pipeline::{ArtifactStage, artifact_path, metrics_path, run_pipeline};
use datamax_cli::types::{Phase, PhaseStatus};
use datamax_ingest::{SyntheticOptions, read_csv_table};
use datamax_model::{Entity, Value};
use datamax_transform::Enrichment;

fn config(output: &Path) -> PipelineConfig {
    PipelineConfig::default()
        .with_output_dir(output)
        .with_source(SourceKind::Synthetic(SyntheticOptions::default()))
}

fn write_sources(source: &Path, with_trials: bool) {
    fs::create_dir_all(source).unwrap();
    fs::write(
        source.join("drugs.csv"),
        "name,generic_name,manufacturer,approval_date\n\
         aspirin,Aspirin,Bayer,2001-02-03\n",
    )
    .unwrap();
    let trials = source.join("clinical_trials.csv");
    if with_trials {
        fs::write(
            &trials,
            "trial_id,title,drug_id,phase,status,patient_count\n\
             nct001,Pain study,1,Phase 2,Recruiting,40\n",
        )
        .unwrap();
    } else {
        fs::remove_file(&trials).unwrap();
    }
}

fn row_count(db: &Path, table: &str) -> i64 {
    let conn = rusqlite::Connection::open(db).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

fn status(result: &datamax_cli::types::PipelineResult, phase: Phase) -> PhaseStatus {
    result.phase(phase).expect("phase ran").status
}

#[test]
fn test_full_synthetic_run_loads_every_table() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("processed");
    let db = dir.path().join("datamax.db");
    let url = format!("sqlite://{}", db.display());

    let result = run_pipeline(&config(&output).with_database_url(Some(url))).unwrap();

    assert!(!result.has_failures());
    assert_eq!(result.phases.len(), 4);
    for entity in Entity::ALL {
        assert!(artifact_path(&output, entity, ArtifactStage::Extracted).is_file());
        assert!(artifact_path(&output, entity, ArtifactStage::Transformed).is_file());
    }
    assert!(metrics_path(&output).is_file());

    let load = result.phase(Phase::Load).unwrap();
    assert_eq!(load.status, PhaseStatus::Succeeded);
    assert_eq!(
        load.records,
        vec![(Entity::Drugs, 5), (Entity::ClinicalTrials, 5)]
    );
    assert!(db.is_file());
}

#[test]
fn test_load_skipped_without_database_url() {
    let dir = tempfile::tempdir().unwrap();

    let result = run_pipeline(&config(dir.path())).unwrap();

    assert_eq!(status(&result, Phase::Load), PhaseStatus::Skipped);
    assert!(!result.has_failures());
    // Synthetic data is clean.
    assert_eq!(status(&result, Phase::Validate), PhaseStatus::Succeeded);
    assert_eq!(result.quality.len(), 2);
}

#[test]
fn test_partial_modes_chain_through_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path();

    let extract = run_pipeline(&config(output).with_mode(PipelineMode::Extract)).unwrap();
    assert_eq!(extract.phases.len(), 1);
    assert!(!artifact_path(output, Entity::Drugs, ArtifactStage::Transformed).exists());

    let transform = run_pipeline(&config(output).with_mode(PipelineMode::Transform)).unwrap();
    assert_eq!(transform.phases.len(), 1);
    assert_eq!(status(&transform, Phase::Transform), PhaseStatus::Succeeded);
    let drugs = read_csv_table(
        &artifact_path(output, Entity::Drugs, ArtifactStage::Transformed),
        "drugs",
    )
    .unwrap();
    assert_eq!(drugs.height(), 5);

    let validate = run_pipeline(&config(output).with_mode(PipelineMode::Validate)).unwrap();
    assert_eq!(validate.validation.len(), 2);
    assert!(validate.validation.iter().all(|report| report.is_valid()));
}

#[test]
fn test_validate_without_artifacts_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = run_pipeline(&config(dir.path()).with_mode(PipelineMode::Validate));

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("no transformed data"), "{message}");
}

#[test]
fn test_file_source_cleans_and_reports_issues() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let output = dir.path().join("processed");
    fs::create_dir_all(&source).unwrap();
    fs::write(
        source.join("drugs.csv"),
        "name,generic_name,manufacturer,approval_date\n\
         aspirin,,Bayer,2001-02-03\n\
         ASPIRIN,,,\n\
         ibuprofen,Ibuprofen,,not a date\n\
         ,Mystery,Acme,\n",
    )
    .unwrap();

    let result = run_pipeline(
        &PipelineConfig::default()
            .with_source(SourceKind::Files)
            .with_source_dir(&source)
            .with_output_dir(&output),
    )
    .unwrap();

    // No trials file: extraction warns but continues.
    assert_eq!(status(&result, Phase::Extract), PhaseStatus::Warned);
    assert!(!artifact_path(&output, Entity::ClinicalTrials, ArtifactStage::Extracted).exists());

    let drugs = read_csv_table(
        &artifact_path(&output, Entity::Drugs, ArtifactStage::Transformed),
        "drugs",
    )
    .unwrap();
    assert_eq!(drugs.height(), 3);
    assert_eq!(drugs.get(0, "name"), Some(&Value::text("Aspirin")));
    assert_eq!(drugs.get(1, "manufacturer"), Some(&Value::text("Unknown")));
    // The unparseable date was coerced to null during cleaning.
    assert_eq!(drugs.get(1, "approval_date"), Some(&Value::Null));

    // The nameless row survives cleaning and is flagged by validation.
    assert_eq!(status(&result, Phase::Validate), PhaseStatus::Warned);
    assert_eq!(
        result.validation[0].messages(),
        vec!["Found 1 null values in 'name'".to_string()]
    );
    let transform = result.phase(Phase::Transform).unwrap();
    assert!(
        transform
            .notes
            .iter()
            .any(|note| note == "1 duplicate drug names dropped")
    );
}

#[test]
fn test_file_source_without_any_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let result = run_pipeline(
        &PipelineConfig::default()
            .with_source(SourceKind::Files)
            .with_source_dir(dir.path().join("missing"))
            .with_output_dir(dir.path().join("out")),
    );

    assert!(result.is_err());
}

#[test]
fn test_unreachable_database_marks_load_failed() {
    let dir = tempfile::tempdir().unwrap();

    let result = run_pipeline(
        &config(dir.path()).with_database_url(Some("postgresql://localhost/pharma".to_string())),
    )
    .unwrap();

    assert_eq!(status(&result, Phase::Load), PhaseStatus::Failed);
    assert!(result.has_failures());
}

#[test]
fn test_reload_replaces_previous_rows() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("datamax.db").display());
    let base = config(&dir.path().join("out")).with_database_url(Some(url));

    let first = run_pipeline(&base).unwrap();
    assert!(!first.has_failures());

    // Trial IDs are unique in the store, so a second plain load fails.
    let second = run_pipeline(&base).unwrap();
    assert_eq!(status(&second, Phase::Load), PhaseStatus::Failed);

    let reloaded = run_pipeline(&base.clone().with_reload(true)).unwrap();
    assert_eq!(status(&reloaded, Phase::Load), PhaseStatus::Succeeded);
}

#[test]
fn test_reextract_drops_artifacts_of_vanished_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let output = dir.path().join("processed");
    let files = PipelineConfig::default()
        .with_source(SourceKind::Files)
        .with_source_dir(&source)
        .with_output_dir(&output);

    write_sources(&source, true);
    run_pipeline(&files.clone().with_mode(PipelineMode::Extract)).unwrap();
    run_pipeline(&files.clone().with_mode(PipelineMode::Transform)).unwrap();
    assert!(artifact_path(&output, Entity::ClinicalTrials, ArtifactStage::Transformed).is_file());
    assert!(metrics_path(&output).is_file());

    write_sources(&source, false);
    let extract = run_pipeline(&files.clone().with_mode(PipelineMode::Extract)).unwrap();
    assert_eq!(status(&extract, Phase::Extract), PhaseStatus::Warned);
    assert!(!artifact_path(&output, Entity::ClinicalTrials, ArtifactStage::Extracted).exists());
    assert!(!artifact_path(&output, Entity::ClinicalTrials, ArtifactStage::Transformed).exists());
    assert!(!metrics_path(&output).exists());

    let transform = run_pipeline(&files.with_mode(PipelineMode::Transform)).unwrap();
    let report = transform.phase(Phase::Transform).unwrap();
    assert_eq!(report.records, vec![(Entity::Drugs, 1)]);
    assert!(artifact_path(&output, Entity::Drugs, ArtifactStage::Transformed).is_file());
    assert!(!artifact_path(&output, Entity::ClinicalTrials, ArtifactStage::Transformed).exists());
    assert!(!metrics_path(&output).exists());
}

#[test]
fn test_failed_truncate_keeps_previous_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("datamax.db");
    let url = format!("sqlite://{}", db.display());
    let base = config(&dir.path().join("out")).with_database_url(Some(url));

    assert!(!run_pipeline(&base).unwrap().has_failures());

    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER keep_drugs BEFORE DELETE ON drugs
         BEGIN SELECT RAISE(ABORT, 'locked'); END;
         CREATE TRIGGER keep_trials BEFORE DELETE ON clinical_trials
         BEGIN SELECT RAISE(ABORT, 'locked'); END;",
    )
    .unwrap();
    drop(conn);

    let reloaded = run_pipeline(&base.with_reload(true)).unwrap();

    let load = reloaded.phase(Phase::Load).unwrap();
    assert_eq!(load.status, PhaseStatus::Failed);
    assert!(load.records.is_empty());
    assert_eq!(row_count(&db, "drugs"), 5);
    assert_eq!(row_count(&db, "clinical_trials"), 5);
}

#[test]
fn test_enrichment_column_reaches_transformed_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let enrichment = vec!["source_system=registry".parse::<Enrichment>().unwrap()];

    run_pipeline(&config(dir.path()).with_enrichment(enrichment)).unwrap();

    for entity in Entity::ALL {
        let table = read_csv_table(
            &artifact_path(dir.path(), entity, ArtifactStage::Transformed),
            entity.table_name(),
        )
        .unwrap();
        assert!(table.has_column("source_system"));
        assert_eq!(table.get(0, "source_system"), Some(&Value::text("registry")));
    }
    // Raw extraction output is untouched.
    let raw = read_csv_table(
        &artifact_path(dir.path(), Entity::Drugs, ArtifactStage::Extracted),
        "drugs",
    )
    .unwrap();
    assert!(!raw.has_column("source_system"));
}

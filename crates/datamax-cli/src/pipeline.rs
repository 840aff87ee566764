//! Phase state machine: extract, transform, validate, load.
//!
//! Phases run strictly in order. A mode that skips a phase reads that phase's
//! output from the CSV artifacts a previous run left in the output directory.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use datamax_ingest::{FileExtractor, generate, read_csv_table, write_csv_table};
use datamax_load::Loader;
use datamax_model::{Entity, Table};
use datamax_transform::{TRIAL_METRICS, aggregate_trial_metrics, clean_table, enrich_table};
use datamax_validate::{QualityReport, ValidationReport, generate_quality_report, validate_table};
use tracing::{error, info, info_span, warn};

use crate::config::{PipelineConfig, SourceKind};
use crate::types::{Phase, PhaseReport, PhaseStatus, PipelineResult};

/// Tables flowing between phases, in load order.
pub type Datasets = BTreeMap<Entity, Table>;

/// Phase outputs persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStage {
    Extracted,
    Transformed,
}

impl ArtifactStage {
    fn as_str(self) -> &'static str {
        match self {
            ArtifactStage::Extracted => "extracted",
            ArtifactStage::Transformed => "transformed",
        }
    }
}

impl fmt::Display for ArtifactStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{output_dir}/{table}_{stage}.csv`
pub fn artifact_path(output_dir: &Path, entity: Entity, stage: ArtifactStage) -> PathBuf {
    output_dir.join(format!("{}_{}.csv", entity.table_name(), stage))
}

/// `{output_dir}/trial_metrics.csv`
pub fn metrics_path(output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{TRIAL_METRICS}.csv"))
}

/// Run the phases selected by `config.mode`.
///
/// Returns an error only for fatal conditions: no data to work on, a table
/// missing its dedup key column, or an artifact that cannot be written.
/// Validation issues and load failures are recorded in the result instead.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineResult> {
    let run_span = info_span!("pipeline", mode = %config.mode);
    let _run_guard = run_span.enter();
    let started = Instant::now();
    info!(mode = %config.mode, "starting DataMAx ETL pipeline");

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut result = PipelineResult {
        mode: config.mode,
        output_dir: config.output_dir.clone(),
        phases: Vec::new(),
        validation: Vec::new(),
        quality: Vec::new(),
    };
    let mut data: Option<Datasets> = None;

    // =========================================================================
    // Stage 1: Extract
    // =========================================================================
    if config.mode.includes(Phase::Extract) {
        let (extracted, report) = info_span!("extract").in_scope(|| extract(config))?;
        result.phases.push(report);
        data = Some(extracted);
    }

    // =========================================================================
    // Stage 2: Transform
    // =========================================================================
    if config.mode.includes(Phase::Transform) {
        let input = match data.take() {
            Some(input) => input,
            None => read_artifacts(&config.output_dir, ArtifactStage::Extracted)?,
        };
        let (transformed, report) =
            info_span!("transform").in_scope(|| transform(config, &input))?;
        result.phases.push(report);
        data = Some(transformed);
    }

    // =========================================================================
    // Stage 3: Validate (advisory)
    // =========================================================================
    if config.mode.includes(Phase::Validate) {
        let input = match data.take() {
            Some(input) => input,
            None => read_artifacts(&config.output_dir, ArtifactStage::Transformed)?,
        };
        let (report, validation, quality) = info_span!("validate").in_scope(|| validate(&input));
        result.phases.push(report);
        result.validation = validation;
        result.quality = quality;
        data = Some(input);
    }

    // =========================================================================
    // Stage 4: Load
    // =========================================================================
    if config.mode.includes(Phase::Load) {
        let input = match data.take() {
            Some(input) => input,
            None => read_artifacts(&config.output_dir, ArtifactStage::Transformed)?,
        };
        let report = info_span!("load").in_scope(|| load(config, &input));
        result.phases.push(report);
    }

    if result.has_failures() {
        error!(
            duration_ms = started.elapsed().as_millis(),
            "pipeline finished with failures"
        );
    } else {
        info!(
            duration_ms = started.elapsed().as_millis(),
            "pipeline completed successfully"
        );
    }
    Ok(result)
}

fn extract(config: &PipelineConfig) -> Result<(Datasets, PhaseReport)> {
    let mut report = PhaseReport::new(Phase::Extract);
    let mut data = Datasets::new();

    match config.source {
        SourceKind::Synthetic(options) => {
            info!("using synthetic data generator");
            let (drugs, trials) = generate(options).context("generate synthetic data")?;
            data.insert(Entity::Drugs, drugs);
            data.insert(Entity::ClinicalTrials, trials);
            report.notes.push("synthetic source".to_string());
        }
        SourceKind::Files => {
            info!(source = %config.source_dir.display(), "extracting data from files");
            let extractor = FileExtractor::new(&config.source_dir);
            for entity in Entity::ALL {
                match extractor.extract(entity) {
                    Some(table) => {
                        data.insert(entity, table);
                    }
                    None => {
                        report.escalate(PhaseStatus::Warned);
                        report.notes.push(format!("no {entity} source"));
                    }
                }
            }
        }
    }

    if data.is_empty() {
        error!("extraction failed");
        bail!(
            "extraction produced no data from {}",
            config.source_dir.display()
        );
    }

    write_artifacts(&config.output_dir, ArtifactStage::Extracted, &data)?;
    // Downstream artifacts describe the previous extraction.
    for entity in Entity::ALL {
        remove_stale(&artifact_path(
            &config.output_dir,
            entity,
            ArtifactStage::Transformed,
        ))?;
    }
    remove_stale(&metrics_path(&config.output_dir))?;
    report.records.extend(data.iter().map(|(&entity, table)| (entity, table.height())));
    info!(
        drugs = count_of(&data, Entity::Drugs),
        clinical_trials = count_of(&data, Entity::ClinicalTrials),
        "extraction complete"
    );
    Ok((data, report))
}

fn transform(config: &PipelineConfig, input: &Datasets) -> Result<(Datasets, PhaseReport)> {
    let mut report = PhaseReport::new(Phase::Transform);
    let mut output = Datasets::new();

    for (&entity, table) in input {
        let mut clean =
            clean_table(entity, table).with_context(|| format!("transform {entity}"))?;
        let dropped = table.height().saturating_sub(clean.height());
        if dropped > 0 {
            report
                .notes
                .push(format!("{dropped} duplicate {} dropped", entity.duplicate_label()));
        }
        if !config.enrichment.is_empty() {
            clean = enrich_table(&clean, &config.enrichment);
        }
        report.records.push((entity, clean.height()));
        output.insert(entity, clean);
    }
    write_artifacts(&config.output_dir, ArtifactStage::Transformed, &output)?;

    let path = metrics_path(&config.output_dir);
    match output
        .get(&Entity::ClinicalTrials)
        .and_then(aggregate_trial_metrics)
    {
        Some(metrics) => {
            write_csv_table(&metrics, &path)
                .with_context(|| format!("write artifact {}", path.display()))?;
            report
                .notes
                .push(format!("trial metrics for {} drugs", metrics.height()));
        }
        None => remove_stale(&path)?,
    }

    info!(output = %config.output_dir.display(), "transformed data saved");
    Ok((output, report))
}

fn validate(input: &Datasets) -> (PhaseReport, Vec<ValidationReport>, Vec<QualityReport>) {
    let mut report = PhaseReport::new(Phase::Validate);
    let mut validations = Vec::new();
    let mut qualities = Vec::new();

    for (&entity, table) in input {
        let validation = validate_table(entity, table);
        if !validation.is_valid() {
            let messages = validation.messages();
            warn!(entity = %entity, issues = ?messages, "data validation issues");
            report.escalate(PhaseStatus::Warned);
            report
                .notes
                .extend(messages.into_iter().map(|message| format!("{entity}: {message}")));
        }

        let quality = generate_quality_report(table, entity.table_name());
        match serde_json::to_string(&quality) {
            Ok(json) => info!(entity = %entity, report = %json, "quality report"),
            Err(err) => warn!(entity = %entity, error = %err, "failed to serialize quality report"),
        }

        report.records.push((entity, table.height()));
        validations.push(validation);
        qualities.push(quality);
    }

    if report.status == PhaseStatus::Warned {
        warn!("data validation found issues, but continuing");
    }
    (report, validations, qualities)
}

fn load(config: &PipelineConfig, input: &Datasets) -> PhaseReport {
    let mut report = PhaseReport::new(Phase::Load);
    let Some(url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set; skipping database load");
        report.escalate(PhaseStatus::Skipped);
        report.notes.push("DATABASE_URL not set".to_string());
        return report;
    };

    let mut loader = match Loader::open(url) {
        Ok(loader) => loader.with_batch_size(config.batch_size),
        Err(err) => {
            error!(error = %err, "error connecting to database");
            report.escalate(PhaseStatus::Failed);
            report.notes.push(err.to_string());
            return report;
        }
    };

    // Appending onto a table that could not be emptied would mix two runs.
    let mut not_truncated = BTreeSet::new();
    if config.reload {
        // Dependents first.
        for entity in Entity::ALL.into_iter().rev() {
            if let Err(err) = loader.truncate(entity) {
                error!(table = entity.table_name(), error = %err, "truncate failed");
                report.escalate(PhaseStatus::Failed);
                report.notes.push(err.to_string());
                not_truncated.insert(entity);
            }
        }
    }

    for (&entity, table) in input {
        if not_truncated.contains(&entity) {
            warn!(table = entity.table_name(), "skipping load of table that was not truncated");
            report.notes.push(format!("{entity}: not loaded"));
            continue;
        }
        match loader.load(table, entity) {
            Ok(summary) => report.records.push((entity, summary.rows)),
            Err(err) => {
                error!(table = entity.table_name(), error = %err, "some data failed to load");
                report.escalate(PhaseStatus::Failed);
                report.notes.push(format!("{entity}: {err}"));
            }
        }
    }
    report
}

/// Write one artifact per table and drop this stage's file for absent tables.
fn write_artifacts(output_dir: &Path, stage: ArtifactStage, data: &Datasets) -> Result<()> {
    for entity in Entity::ALL {
        let path = artifact_path(output_dir, entity, stage);
        match data.get(&entity) {
            Some(table) => write_csv_table(table, &path)
                .with_context(|| format!("write artifact {}", path.display()))?,
            None => remove_stale(&path)?,
        }
    }
    Ok(())
}

fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed stale artifact");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove stale artifact {}", path.display())),
    }
}

fn read_artifacts(output_dir: &Path, stage: ArtifactStage) -> Result<Datasets> {
    let mut data = Datasets::new();
    for entity in Entity::ALL {
        let path = artifact_path(output_dir, entity, stage);
        if !path.is_file() {
            warn!(path = %path.display(), "artifact not found");
            continue;
        }
        let table = read_csv_table(&path, entity.table_name())
            .with_context(|| format!("read artifact {}", path.display()))?;
        info!(path = %path.display(), records = table.height(), "read artifact");
        data.insert(entity, table);
    }
    if data.is_empty() {
        bail!(
            "no {stage} data found in {}; run the preceding phase first",
            output_dir.display()
        );
    }
    Ok(data)
}

fn count_of(data: &Datasets, entity: Entity) -> usize {
    data.get(&entity).map_or(0, Table::height)
}

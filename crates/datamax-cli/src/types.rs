use std::fmt;
use std::path::PathBuf;

use datamax_model::Entity;
use datamax_validate::{QualityReport, ValidationReport};

use crate::config::PipelineMode;

/// Pipeline phases in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Extract,
    Transform,
    Validate,
    Load,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Extract,
        Phase::Transform,
        Phase::Validate,
        Phase::Load,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Extract => "extract",
            Phase::Transform => "transform",
            Phase::Validate => "validate",
            Phase::Load => "load",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Succeeded,
    /// Completed with soft failures (validation issues, a missing source).
    Warned,
    /// Not run because its prerequisite is not configured.
    Skipped,
    Failed,
}

impl PhaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Succeeded => "ok",
            PhaseStatus::Warned => "warning",
            PhaseStatus::Skipped => "skipped",
            PhaseStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: Phase,
    pub status: PhaseStatus,
    /// Records per entity handled by the phase.
    pub records: Vec<(Entity, usize)>,
    pub notes: Vec<String>,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            status: PhaseStatus::Succeeded,
            records: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Raise the status to `status` unless it is already worse.
    pub fn escalate(&mut self, status: PhaseStatus) {
        let rank = |status: PhaseStatus| match status {
            PhaseStatus::Succeeded => 0,
            PhaseStatus::Skipped => 1,
            PhaseStatus::Warned => 2,
            PhaseStatus::Failed => 3,
        };
        if rank(status) > rank(self.status) {
            self.status = status;
        }
    }
}

#[derive(Debug)]
pub struct PipelineResult {
    pub mode: PipelineMode,
    pub output_dir: PathBuf,
    pub phases: Vec<PhaseReport>,
    pub validation: Vec<ValidationReport>,
    pub quality: Vec<QualityReport>,
}

impl PipelineResult {
    /// True when any phase failed; the process exits nonzero.
    pub fn has_failures(&self) -> bool {
        self.phases
            .iter()
            .any(|report| report.status == PhaseStatus::Failed)
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|report| report.phase == phase)
    }
}

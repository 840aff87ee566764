//! Controlled vocabularies for clinical trial records.
//!
//! Each vocabulary has canonical literals (what the store accepts) and a
//! static synonym table keyed by normalized lowercase input. Lookups that
//! miss return `None`; callers decide whether to pass the raw value through
//! or flag it.

use std::fmt;

use serde::Serialize;

/// Lowercase, trim and collapse inner whitespace.
fn normalize_key(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Clinical trial phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrialPhase {
    #[serde(rename = "Phase 1")]
    Phase1,
    #[serde(rename = "Phase 2")]
    Phase2,
    #[serde(rename = "Phase 3")]
    Phase3,
    #[serde(rename = "Phase 4")]
    Phase4,
}

const PHASE_SYNONYMS: &[(&str, TrialPhase)] = &[
    ("phase 1", TrialPhase::Phase1),
    ("phase 2", TrialPhase::Phase2),
    ("phase 3", TrialPhase::Phase3),
    ("phase 4", TrialPhase::Phase4),
    ("phase i", TrialPhase::Phase1),
    ("phase ii", TrialPhase::Phase2),
    ("phase iii", TrialPhase::Phase3),
    ("phase iv", TrialPhase::Phase4),
];

impl TrialPhase {
    pub const ALL: [TrialPhase; 4] = [
        TrialPhase::Phase1,
        TrialPhase::Phase2,
        TrialPhase::Phase3,
        TrialPhase::Phase4,
    ];

    /// Canonical literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialPhase::Phase1 => "Phase 1",
            TrialPhase::Phase2 => "Phase 2",
            TrialPhase::Phase3 => "Phase 3",
            TrialPhase::Phase4 => "Phase 4",
        }
    }

    /// Case-insensitive synonym lookup ("phase ii" -> Phase 2).
    pub fn lookup(value: &str) -> Option<Self> {
        let key = normalize_key(value);
        PHASE_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == key)
            .map(|(_, phase)| *phase)
    }

    /// Exact match against the canonical literals.
    pub fn is_canonical(value: &str) -> bool {
        Self::ALL.iter().any(|phase| phase.as_str() == value)
    }
}

impl fmt::Display for TrialPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinical trial lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrialStatus {
    Planned,
    Ongoing,
    Completed,
    Terminated,
}

const STATUS_SYNONYMS: &[(&str, TrialStatus)] = &[
    ("planned", TrialStatus::Planned),
    ("ongoing", TrialStatus::Ongoing),
    ("active", TrialStatus::Ongoing),
    ("completed", TrialStatus::Completed),
    ("terminated", TrialStatus::Terminated),
    ("stopped", TrialStatus::Terminated),
];

impl TrialStatus {
    pub const ALL: [TrialStatus; 4] = [
        TrialStatus::Planned,
        TrialStatus::Ongoing,
        TrialStatus::Completed,
        TrialStatus::Terminated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrialStatus::Planned => "Planned",
            TrialStatus::Ongoing => "Ongoing",
            TrialStatus::Completed => "Completed",
            TrialStatus::Terminated => "Terminated",
        }
    }

    /// Case-insensitive synonym lookup ("active" -> Ongoing, "stopped" -> Terminated).
    pub fn lookup(value: &str) -> Option<Self> {
        let key = normalize_key(value);
        STATUS_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == key)
            .map(|(_, status)| *status)
    }

    pub fn is_canonical(value: &str) -> bool {
        Self::ALL.iter().any(|status| status.as_str() == value)
    }
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Validation report containing all issues for a table.

use datamax_model::Entity;
use serde::Serialize;

use crate::issue::Issue;

/// Verdict and ordered issues for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub entity: Entity,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Create an empty report for an entity.
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            issues: Vec::new(),
        }
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Valid if and only if no issue was found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue messages in check order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

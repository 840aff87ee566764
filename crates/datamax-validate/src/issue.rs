//! Validation issue types.
//!
//! Each variant carries only the data its message needs.

use std::fmt;

use datamax_model::Entity;
use serde::Serialize;

/// A defect class found in a table, summarized as a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// Required columns absent from the table.
    MissingColumns { columns: Vec<String> },
    /// Required column with null cells.
    NullValues { column: String, count: u64 },
    /// Repeated non-null dedup keys, counted after the first occurrence.
    DuplicateKeys { entity: Entity, count: u64 },
    /// Date column with values the shared date parser rejects.
    InvalidDates { column: String, count: u64 },
    /// Count column with negative values.
    NegativeCounts { column: String, count: u64 },
    /// Rows whose end date precedes their start date.
    EndBeforeStart { count: u64 },
    /// Enum column with values outside the canonical literals.
    OutOfDomain { column: String, count: u64 },
}

impl Issue {
    /// Column the issue refers to, when there is exactly one.
    pub fn column(&self) -> Option<&str> {
        match self {
            Issue::MissingColumns { .. } | Issue::DuplicateKeys { .. } => None,
            Issue::EndBeforeStart { .. } => Some("end_date"),
            Issue::NullValues { column, .. }
            | Issue::InvalidDates { column, .. }
            | Issue::NegativeCounts { column, .. }
            | Issue::OutOfDomain { column, .. } => Some(column),
        }
    }

    /// Number of offending cells or rows, if the issue is counted.
    pub fn count(&self) -> Option<u64> {
        match self {
            Issue::MissingColumns { .. } => None,
            Issue::NullValues { count, .. }
            | Issue::DuplicateKeys { count, .. }
            | Issue::InvalidDates { count, .. }
            | Issue::NegativeCounts { count, .. }
            | Issue::EndBeforeStart { count }
            | Issue::OutOfDomain { count, .. } => Some(*count),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingColumns { columns } => {
                write!(f, "Missing required columns: [{}]", columns.join(", "))
            }
            Issue::NullValues { column, count } => {
                write!(f, "Found {count} null values in '{column}'")
            }
            Issue::DuplicateKeys { entity, count } => {
                write!(f, "Found {count} duplicate {}", entity.duplicate_label())
            }
            Issue::InvalidDates { column, .. } => write!(f, "Invalid date format in '{column}'"),
            Issue::NegativeCounts { count, .. } => {
                write!(f, "Found {count} negative patient counts")
            }
            Issue::EndBeforeStart { count } => {
                write!(f, "Found {count} trials where end_date < start_date")
            }
            Issue::OutOfDomain { column, count } => {
                write!(f, "Found {count} invalid {column} values")
            }
        }
    }
}

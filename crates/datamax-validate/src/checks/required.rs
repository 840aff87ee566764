//! Required column checks: presence, then population.

use datamax_model::{Entity, Table};

use super::count;
use crate::issue::Issue;

/// One issue naming every required column the table lacks.
pub fn check_presence(entity: Entity, table: &Table) -> Option<Issue> {
    let missing: Vec<String> = entity
        .required_columns()
        .iter()
        .copied()
        .filter(|column| !table.has_column(column))
        .map(String::from)
        .collect();
    if missing.is_empty() {
        None
    } else {
        Some(Issue::MissingColumns { columns: missing })
    }
}

/// One issue per present required column that has null cells.
pub fn check_nulls(entity: Entity, table: &Table) -> Vec<Issue> {
    let mut issues = Vec::new();
    for &column in entity.required_columns() {
        let Some(values) = table.column_values(column) else {
            continue;
        };
        let nulls = values.iter().filter(|value| value.is_null()).count();
        if nulls > 0 {
            issues.push(Issue::NullValues {
                column: column.to_string(),
                count: count(nulls),
            });
        }
    }
    issues
}

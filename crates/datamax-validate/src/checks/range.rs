use datamax_model::{Table, Value};

use super::count;
use crate::issue::Issue;

/// Count numeric cells below zero. Non-numeric cells are not this check's concern.
pub fn check_non_negative(table: &Table, column: &str) -> Option<Issue> {
    let values = table.column_values(column)?;
    let negative = values
        .into_iter()
        .filter_map(Value::as_f64)
        .filter(|number| *number < 0.0)
        .count();
    (negative > 0).then(|| Issue::NegativeCounts {
        column: column.to_string(),
        count: count(negative),
    })
}

//! Controlled vocabulary membership.

use datamax_model::Table;

use super::count;
use crate::issue::Issue;

/// Count non-null cells whose rendering is not a canonical literal.
pub fn check<F>(table: &Table, column: &str, is_canonical: F) -> Option<Issue>
where
    F: Fn(&str) -> bool,
{
    let values = table.column_values(column)?;
    let invalid = values
        .into_iter()
        .filter(|value| !value.is_null() && !is_canonical(&value.to_string()))
        .count();
    (invalid > 0).then(|| Issue::OutOfDomain {
        column: column.to_string(),
        count: count(invalid),
    })
}

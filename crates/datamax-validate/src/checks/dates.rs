//! Date checks. "Unparseable" means rejected by the shared date parser, the
//! same one the transformer coerces with.

use datamax_model::{DatePairOrder, Table, Value, validate_date_pair};

use super::count;
use crate::issue::Issue;

/// Flag a date column holding non-null values that do not parse.
pub fn check_parseable(table: &Table, column: &str) -> Option<Issue> {
    let values = table.column_values(column)?;
    let invalid = values
        .into_iter()
        .filter(|value| !value.is_null() && value.as_date().is_none())
        .count();
    (invalid > 0).then(|| Issue::InvalidDates {
        column: column.to_string(),
        count: count(invalid),
    })
}

/// Count rows where both dates parse and the end precedes the start.
pub fn check_order(table: &Table, start: &str, end: &str) -> Option<Issue> {
    let starts = table.column_values(start)?;
    let ends = table.column_values(end)?;
    let reversed = starts
        .into_iter()
        .zip(ends)
        .filter(|(start, end)| {
            validate_date_pair(Value::as_date(start), Value::as_date(end))
                == DatePairOrder::EndBeforeStart
        })
        .count();
    (reversed > 0).then(|| Issue::EndBeforeStart {
        count: count(reversed),
    })
}

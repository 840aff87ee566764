use std::collections::HashSet;

use datamax_model::{Entity, Table};

use super::count;
use crate::issue::Issue;

/// Count non-null dedup keys that repeat an earlier row's key.
pub fn check(entity: Entity, table: &Table) -> Option<Issue> {
    let values = table.column_values(entity.dedup_key())?;
    let mut seen = HashSet::new();
    let repeats = values
        .into_iter()
        .filter(|value| !value.is_null())
        .filter(|value| !seen.insert(value.to_string()))
        .count();
    (repeats > 0).then(|| Issue::DuplicateKeys {
        entity,
        count: count(repeats),
    })
}

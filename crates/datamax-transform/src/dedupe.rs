use std::collections::HashSet;

use datamax_model::Table;
use tracing::debug;

use crate::error::{Result, TransformError};

/// Drop rows whose `key` repeats an earlier row's key, keeping the first.
///
/// Null keys never match each other, so such rows are kept. Returns the
/// number of rows dropped.
pub fn dedupe_by_key(table: &mut Table, key: &str) -> Result<usize> {
    let Some(idx) = table.column_index(key) else {
        return Err(TransformError::MissingColumn {
            table: table.name().to_string(),
            column: key.to_string(),
        });
    };
    let mut seen = HashSet::new();
    let keep: Vec<bool> = table
        .rows()
        .iter()
        .map(|row| {
            let value = &row[idx];
            if value.is_null() {
                return true;
            }
            seen.insert(value.to_string())
        })
        .collect();
    let dropped = keep.iter().filter(|kept| !**kept).count();
    table.retain_rows(&keep);
    if dropped > 0 {
        debug!(table = table.name(), key, dropped, "dropped duplicate rows");
    }
    Ok(dropped)
}

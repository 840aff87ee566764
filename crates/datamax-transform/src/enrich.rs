//! Constant-valued columns stamped onto cleaned tables.

use std::str::FromStr;

use datamax_model::{Table, Value};
use tracing::info;

use crate::error::TransformError;

/// One `column=value` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub column: String,
    pub value: Value,
}

impl FromStr for Enrichment {
    type Err = TransformError;

    /// Parse `column=value`. A blank value sets the column to null.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || TransformError::InvalidEnrichment {
            input: input.to_string(),
        };
        let (column, value) = input.split_once('=').ok_or_else(invalid)?;
        let column = column.trim();
        if column.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            column: column.to_string(),
            value: Value::from_raw(value.trim()),
        })
    }
}

/// Copy of `table` with each enrichment column holding its value in every
/// row. Absent columns are appended, existing ones overwritten.
pub fn enrich_table(table: &Table, fields: &[Enrichment]) -> Table {
    let mut enriched = table.clone();
    if fields.is_empty() {
        return enriched;
    }
    info!(table = table.name(), fields = fields.len(), "enriching data");
    for field in fields {
        enriched.ensure_column(&field.column);
        enriched.map_column(&field.column, |_| field.value.clone());
    }
    enriched
}

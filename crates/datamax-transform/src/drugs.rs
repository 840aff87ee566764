//! Drug table cleaning.

use datamax_model::{Entity, Table, Value, columns};
use tracing::info;

use crate::coerce::coerce_date;
use crate::dedupe::dedupe_by_key;
use crate::error::{Result, TransformError};
use crate::text::{map_text, title_case, trim};

/// Manufacturer used when the source has none.
pub const UNKNOWN_MANUFACTURER: &str = "Unknown";

/// Clean and standardize a raw drug table.
///
/// Steps, in order:
/// 1. `name`: trim and title-case
/// 2. `generic_name`: fill missing values from the normalized name
/// 3. `manufacturer`: trim, fill missing with "Unknown"
/// 4. `approval_date`: coerce to a date, null when unparseable
/// 5. drop rows repeating an earlier `name`
///
/// The input table is left untouched.
pub fn clean_drug_data(table: &Table) -> Result<Table> {
    info!(records = table.height(), "cleaning drug data");
    let key = Entity::Drugs.dedup_key();
    if !table.has_column(key) {
        return Err(TransformError::MissingColumn {
            table: table.name().to_string(),
            column: key.to_string(),
        });
    }

    let mut clean = table.clone();
    clean.map_column(columns::NAME, |value| map_text(value, title_case));
    fill_generic_names(&mut clean);

    clean.ensure_column(columns::MANUFACTURER);
    clean.map_column(columns::MANUFACTURER, |value| match trim(value) {
        Value::Null => Value::text(UNKNOWN_MANUFACTURER),
        trimmed => trimmed,
    });

    clean.map_column(columns::APPROVAL_DATE, coerce_date);

    dedupe_by_key(&mut clean, key)?;
    info!(records = clean.height(), "cleaned drug data");
    Ok(clean)
}

fn fill_generic_names(table: &mut Table) {
    let generic_idx = table.ensure_column(columns::GENERIC_NAME);
    let Some(name_idx) = table.column_index(columns::NAME) else {
        return;
    };
    table.for_each_row_mut(|row| {
        if row[generic_idx].is_null() {
            row[generic_idx] = row[name_idx].clone();
        }
    });
}

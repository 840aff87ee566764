//! Type coercion for date and count columns.
//!
//! Coercion is total: values that cannot be converted become nulls and are
//! left for the validator to report.

use datamax_model::{Value, parse_date};

/// Coerce a cell to [`Value::Date`], or null when unparseable.
pub fn coerce_date(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Date(date) => Value::Date(*date),
        Value::Text(text) => parse_date(text).map_or(Value::Null, Value::Date),
        other => parse_date(&other.to_string()).map_or(Value::Null, Value::Date),
    }
}

/// Coerce a cell to a number clamped at `lower`, or null when non-numeric.
pub fn coerce_clamped_number(value: &Value, lower: f64) -> Value {
    match value.as_f64() {
        Some(number) => Value::number(number.max(lower)),
        None => Value::Null,
    }
}

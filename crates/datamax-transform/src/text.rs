//! Text normalization helpers applied cell by cell.

use datamax_model::Value;

/// Title-case: the first letter of every alphabetic run is upper-cased and
/// the rest of the run lower-cased ("o'neil-smith" -> "O'Neil-Smith").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Apply `f` to the trimmed text of a cell.
///
/// Nulls stay null, non-text values are rendered first, and text that trims
/// to nothing becomes null.
pub fn map_text<F>(value: &Value, f: F) -> Value
where
    F: FnOnce(&str) -> String,
{
    let rendered;
    let text = match value {
        Value::Null => return Value::Null,
        Value::Text(text) => text.as_str(),
        other => {
            rendered = other.to_string();
            rendered.as_str()
        }
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    Value::Text(f(trimmed))
}

/// Trim surrounding whitespace.
pub fn trim(value: &Value) -> Value {
    map_text(value, str::to_string)
}

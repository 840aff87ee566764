//! In-memory table with named columns and typed cells.
//!
//! A [`Table`] is an ordered sequence of uniformly shaped rows. Column-wide
//! operations (fill, clip, coerce) are expressed as total functions mapped
//! over every cell of a column, see [`Table::map_column`].

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::{format_date, parse_date};
use crate::error::{ModelError, Result};

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    Null,
    /// Free text, as read from a source or produced by normalization.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Fractional number. Never NaN or infinite.
    Float(f64),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    /// Build a cell from raw source text. Blank input is a missing value.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Null
        } else {
            Self::Text(raw.to_string())
        }
    }

    /// Convenience constructor for text cells.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a numeric cell, preferring `Integer` for whole values.
    pub fn number(value: f64) -> Self {
        if !value.is_finite() {
            return Self::Null;
        }
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            Self::Integer(value as i64)
        } else {
            Self::Float(value)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text payload, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric view of the cell. Text is parsed after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Null | Self::Date(_) => None,
        };
        parsed.filter(|value| value.is_finite())
    }

    /// Date view of the cell. Text is parsed with [`parse_date`].
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => parse_date(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Date(date) => f.write_str(&format_date(*date)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered rows of [`Value`] cells under named columns.
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from pre-built rows, checking row widths.
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut table = Self::new(name, columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ModelError::RowWidth {
                table: self.name.clone(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Cell at `row` in `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[idx])
    }

    /// Visit every row mutably. Cells can change, row width cannot.
    pub fn for_each_row_mut<F>(&mut self, f: F)
    where
        F: FnMut(&mut [Value]),
    {
        self.rows.iter_mut().map(Vec::as_mut_slice).for_each(f);
    }

    /// All cells of a column in row order.
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Replace every cell of `column` with `f(cell)`.
    ///
    /// Returns `false` when the column does not exist.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> bool
    where
        F: FnMut(&Value) -> Value,
    {
        let Some(idx) = self.column_index(column) else {
            return false;
        };
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        true
    }

    /// Index of `column`, appending it as an all-null column when absent.
    pub fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(idx) = self.column_index(column) {
            return idx;
        }
        self.columns.push(column.to_string());
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        self.columns.len() - 1
    }

    /// Keep the rows whose mask entry is `true`, preserving order.
    ///
    /// Rows beyond the end of the mask are kept.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let mut idx = 0usize;
        self.rows.retain(|_| {
            let retained = keep.get(idx).copied().unwrap_or(true);
            idx += 1;
            retained
        });
    }
}

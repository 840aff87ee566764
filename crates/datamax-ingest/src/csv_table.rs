//! CSV reading and writing for [`Table`].

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use datamax_model::{Table, Value};

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Read a CSV file with a single header row into a table named `name`.
///
/// Blank cells become [`Value::Null`]; other cells are kept verbatim as text.
/// Short rows are padded with nulls, extra trailing cells are ignored, and
/// rows where every cell is blank are skipped.
pub fn read_csv_table(path: &Path, name: &str) -> Result<Table> {
    let file = open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut table = Table::new(name, headers);
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: Vec<Value> = (0..table.width())
            .map(|idx| record.get(idx).map_or(Value::Null, Value::from_raw))
            .collect();
        table.push_row(row).map_err(|source| IngestError::Table {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(table)
}

/// Write a table as CSV with a header row. Nulls are written as empty cells
/// and dates as `YYYY-MM-DD`.
pub fn write_csv_table(table: &Table, path: &Path) -> Result<()> {
    let to_write_error = |source: csv::Error| IngestError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(to_write_error)?;
    writer
        .write_record(table.columns())
        .map_err(to_write_error)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(to_write_error)?;
    }
    writer
        .flush()
        .map_err(|e| to_write_error(csv::Error::from(e)))?;
    Ok(())
}

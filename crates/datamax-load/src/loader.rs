//! Batched append, truncate, and read-back against the SQLite store.

use datamax_model::{Entity, Table, Value, format_date, parse_date};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, info, warn};

use crate::error::{LoadError, Result};
use crate::url::DatabaseLocation;

/// Rows per insert transaction unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

const SCHEMA: &str = include_str!("schema.sql");

/// Outcome of a successful table load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: String,
    pub rows: usize,
}

/// A source column mapped onto a target column.
struct PlannedColumn {
    name: &'static str,
    index: usize,
    is_date: bool,
}

/// Owns the store connection; dropping the loader closes it.
#[derive(Debug)]
pub struct Loader {
    conn: Connection,
    location: DatabaseLocation,
    batch_size: usize,
}

impl Loader {
    /// Open the database named by a connection string and bootstrap the schema.
    pub fn open(url: &str) -> Result<Self> {
        Self::open_location(DatabaseLocation::parse(url)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open_location(DatabaseLocation::Memory)
    }

    fn open_location(location: DatabaseLocation) -> Result<Self> {
        let conn = match &location {
            DatabaseLocation::Memory => Connection::open_in_memory(),
            DatabaseLocation::File(path) => Connection::open(path),
        }
        .map_err(|source| LoadError::Open {
            location: location.to_string(),
            source,
        })?;
        configure(&conn)?;
        info!(database = %location, "connected to database");
        Ok(Self {
            conn,
            location,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Set the rows per insert transaction (at least one).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Append every row of `table` to the target table of `entity`.
    ///
    /// The surrogate `id` column and columns the target does not have are
    /// skipped. Date columns are written as `YYYY-MM-DD`, or NULL when they do
    /// not parse. Rows are inserted in chunks of the batch size, one
    /// transaction per chunk.
    pub fn load(&mut self, table: &Table, entity: Entity) -> Result<LoadSummary> {
        let target = entity.table_name();
        info!(table = target, records = table.height(), "loading records");

        let plan = plan_columns(table, entity);
        if plan.is_empty() {
            return Err(LoadError::NoLoadableColumns {
                table: table.name().to_string(),
            });
        }
        let sql = insert_sql(target, &plan);

        let mut loaded = 0usize;
        for chunk in table.rows().chunks(self.batch_size) {
            insert_chunk(&mut self.conn, &sql, chunk, &plan).map_err(|source| {
                LoadError::Insert {
                    table: target.to_string(),
                    loaded,
                    source,
                }
            })?;
            loaded += chunk.len();
            debug!(table = target, loaded, "committed batch");
        }

        info!(
            table = target,
            database = %self.location,
            rows = loaded,
            "successfully loaded data"
        );
        Ok(LoadSummary {
            table: target.to_string(),
            rows: loaded,
        })
    }

    /// Delete every row of the target table and restart its ids at 1.
    /// Dependent rows go with it through the cascading foreign key.
    pub fn truncate(&self, entity: Entity) -> Result<usize> {
        let target = entity.table_name();
        let truncate_error = |source: rusqlite::Error| LoadError::Truncate {
            table: target.to_string(),
            source,
        };
        let deleted = self
            .conn
            .execute(&format!("DELETE FROM {target}"), [])
            .map_err(truncate_error)?;
        self.conn
            .execute("DELETE FROM sqlite_sequence WHERE name = ?1", [target])
            .map_err(truncate_error)?;
        warn!(table = target, deleted, "truncated table");
        Ok(deleted)
    }

    /// Read the non-surrogate columns of the target table in insertion order.
    pub fn read_back(&self, entity: Entity) -> Result<Table> {
        let target = entity.table_name();
        let columns = entity.store_columns();
        let query_error = |source: rusqlite::Error| LoadError::Query {
            table: target.to_string(),
            source,
        };

        let sql = format!("SELECT {} FROM {target} ORDER BY id", columns.join(", "));
        let mut stmt = self.conn.prepare(&sql).map_err(query_error)?;
        let dates: Vec<bool> = columns
            .iter()
            .map(|column| entity.date_columns().contains(column))
            .collect();
        let rows = stmt
            .query_map([], |row| {
                (0..columns.len())
                    .map(|idx| row.get_ref(idx).map(|cell| from_sql(cell, dates[idx])))
                    .collect::<rusqlite::Result<Vec<Value>>>()
            })
            .map_err(query_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_error)?;

        let names = columns.iter().copied().map(String::from).collect();
        Ok(Table::from_rows(target, names, rows)?)
    }
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")
        .map_err(LoadError::Schema)?;
    conn.execute_batch(SCHEMA).map_err(LoadError::Schema)?;
    Ok(())
}

fn plan_columns(table: &Table, entity: Entity) -> Vec<PlannedColumn> {
    let store = entity.store_columns();
    for column in table.columns() {
        if column != datamax_model::columns::ID && !store.contains(&column.as_str()) {
            warn!(
                table = entity.table_name(),
                column = column.as_str(),
                "skipping column not present in target table"
            );
        }
    }
    store
        .iter()
        .filter_map(|&name| {
            table.column_index(name).map(|index| PlannedColumn {
                name,
                index,
                is_date: entity.date_columns().contains(&name),
            })
        })
        .collect()
}

fn insert_sql(target: &str, plan: &[PlannedColumn]) -> String {
    let names: Vec<&str> = plan.iter().map(|column| column.name).collect();
    let placeholders: Vec<String> = (1..=plan.len()).map(|n| format!("?{n}")).collect();
    format!(
        "INSERT INTO {target} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

fn insert_chunk(
    conn: &mut Connection,
    sql: &str,
    chunk: &[Vec<Value>],
    plan: &[PlannedColumn],
) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(sql)?;
        for row in chunk {
            let params = plan
                .iter()
                .map(|column| to_sql(&row[column.index], column.is_date));
            stmt.execute(params_from_iter(params))?;
        }
    }
    tx.commit()
}

fn to_sql(value: &Value, is_date: bool) -> SqlValue {
    if is_date {
        return value
            .as_date()
            .map_or(SqlValue::Null, |date| SqlValue::Text(format_date(date)));
    }
    match value {
        Value::Null => SqlValue::Null,
        Value::Text(text) => SqlValue::Text(text.clone()),
        Value::Integer(number) => SqlValue::Integer(*number),
        Value::Float(number) => SqlValue::Real(*number),
        Value::Date(date) => SqlValue::Text(format_date(*date)),
    }
}

fn from_sql(cell: ValueRef<'_>, is_date: bool) -> Value {
    match cell {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(number) => Value::Integer(number),
        ValueRef::Real(number) => Value::number(number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            let date = if is_date { parse_date(&text) } else { None };
            match date {
                Some(date) => Value::Date(date),
                None => Value::Text(text.into_owned()),
            }
        }
    }
}

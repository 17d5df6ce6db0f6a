//! DuckDB-backed view store
//!
//! Opens a local DuckDB database file and serves its views. Useful for
//! warehouses exported to DuckDB and for running the relational tool
//! without a SQL Server instance.

use super::store::{split_view_name, ViewInfo, ViewStore};
use crate::error::{Error, Result};
use crate::table::Table;
use async_trait::async_trait;
use duckdb::types::{TimeUnit, Value as DuckValue};
use duckdb::Connection;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const LIST_VIEWS_SQL: &str = "SELECT table_schema, table_name
     FROM information_schema.tables
     WHERE table_type = 'VIEW'
       AND table_catalog = current_database()
       AND table_schema NOT IN ('information_schema', 'pg_catalog')
     ORDER BY table_schema, table_name";

const SEARCH_VIEWS_SQL: &str = "SELECT table_schema, table_name
     FROM information_schema.tables
     WHERE table_type = 'VIEW'
       AND table_catalog = current_database()
       AND table_schema NOT IN ('information_schema', 'pg_catalog')
       AND (table_name ILIKE ? OR table_schema ILIKE ?)
     ORDER BY table_schema, table_name";

/// View store over a DuckDB connection
pub struct DuckDbStore {
    conn: Connection,
    /// Database path (for logging)
    location: String,
}

impl DuckDbStore {
    /// Open a database file, or an in-memory database for `:memory:`
    pub fn open(path: &str) -> Result<Self> {
        let target = format!("duckdb:{path}");
        let conn = if path == ":memory:" {
            Connection::open_in_memory()
        } else {
            if !Path::new(path).exists() {
                return Err(Error::connection(target, "database file not found"));
            }
            Connection::open(path)
        }
        .map_err(|e| Error::connection(&target, e.to_string()))?;

        Ok(Self {
            conn,
            location: path.to_string(),
        })
    }

    /// Wrap an existing connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            location: ":memory:".to_string(),
        }
    }

    fn query_views(&self, sql: &str, pattern: Option<&str>) -> Result<Vec<ViewInfo>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| Error::database(format!("Failed to prepare query: {e}")))?;

        let map_row = |row: &duckdb::Row<'_>| -> duckdb::Result<ViewInfo> {
            Ok(ViewInfo::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        };
        let rows = match pattern {
            Some(p) => stmt.query_map(duckdb::params![p, p], map_row),
            None => stmt.query_map([], map_row),
        }
        .map_err(|e| Error::database(format!("Failed to list views: {e}")))?;

        rows.collect::<duckdb::Result<Vec<_>>>()
            .map_err(|e| Error::database(format!("Failed to read view list: {e}")))
    }
}

#[async_trait]
impl ViewStore for DuckDbStore {
    fn describe(&self) -> String {
        format!("duckdb:{}", self.location)
    }

    async fn list_views(&mut self) -> Result<Vec<ViewInfo>> {
        self.query_views(LIST_VIEWS_SQL, None)
    }

    async fn search_views(&mut self, keyword: &str) -> Result<Vec<ViewInfo>> {
        let pattern = format!("%{keyword}%");
        self.query_views(SEARCH_VIEWS_SQL, Some(&pattern))
    }

    async fn read_view(&mut self, view_name: &str) -> Result<Table> {
        let sql = format!("SELECT * FROM {}", quote_view_name(view_name));
        debug!("Executing query: {}", sql);

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| Error::database(format!("Failed to query view '{view_name}': {e}")))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| Error::database(format!("Failed to query view '{view_name}': {e}")))?;

        let columns = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();
        let mut table = Table::new(columns);
        let width = table.columns.len();

        while let Some(row) = rows
            .next()
            .map_err(|e| Error::database(format!("Failed to read view '{view_name}': {e}")))?
        {
            let cells = (0..width)
                .map(|i| row.get::<_, DuckValue>(i).map(duckdb_value_to_json))
                .collect::<duckdb::Result<Vec<_>>>()
                .map_err(|e| Error::database(format!("Failed to read view '{view_name}': {e}")))?;
            table.push_row(cells);
        }

        Ok(table)
    }
}

/// `"schema"."view"` with embedded double quotes doubled
pub fn quote_view_name(view_name: &str) -> String {
    let quote = |part: &str| format!("\"{}\"", part.replace('"', "\"\""));
    match split_view_name(view_name) {
        (Some(schema), view) => format!("{}.{}", quote(schema), quote(view)),
        (None, view) => quote(view),
    }
}

/// Convert a DuckDB value to JSON
pub(crate) fn duckdb_value_to_json(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Bool(b),
        DuckValue::TinyInt(i) => Value::Number(i.into()),
        DuckValue::SmallInt(i) => Value::Number(i.into()),
        DuckValue::Int(i) => Value::Number(i.into()),
        DuckValue::BigInt(i) => Value::Number(i.into()),
        DuckValue::HugeInt(i) => Value::String(i.to_string()),
        DuckValue::UTinyInt(i) => Value::Number(i.into()),
        DuckValue::USmallInt(i) => Value::Number(i.into()),
        DuckValue::UInt(i) => Value::Number(i.into()),
        DuckValue::UBigInt(i) => Value::Number(i.into()),
        DuckValue::Float(f) => {
            serde_json::Number::from_f64(f64::from(f)).map_or(Value::Null, Value::Number)
        }
        DuckValue::Double(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        DuckValue::Decimal(d) => Value::String(d.to_string()),
        DuckValue::Text(s) => Value::String(s),
        DuckValue::Blob(b) => Value::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
        DuckValue::Timestamp(unit, t) => {
            chrono::DateTime::from_timestamp_micros(to_micros(unit, t))
                .map(|dt| Value::String(dt.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string()))
                .unwrap_or(Value::Number(t.into()))
        }
        DuckValue::Date32(d) => {
            // Days since epoch; 719163 days separate 0001-01-01 and 1970-01-01
            chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Number(d.into()))
        }
        DuckValue::Time64(unit, t) => {
            let micros = to_micros(unit, t);
            let secs = micros / 1_000_000;
            let micros = micros % 1_000_000;
            Value::String(format!(
                "{:02}:{:02}:{:02}.{:06}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                micros
            ))
        }
        other => Value::String(format!("{other:?}")),
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

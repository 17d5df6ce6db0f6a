//! SQL Server view store over TDS

use super::store::{split_view_name, ViewInfo, ViewStore};
use crate::config::SqlServerConfig;
use crate::error::{Error, Result};
use crate::table::Table;
use async_trait::async_trait;
use serde_json::Value;
use tiberius::{AuthMethod, Client, ColumnData, Config, FromSql, Row};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

const LIST_VIEWS_SQL: &str = "SELECT s.name AS schema_name, v.name AS view_name, v.create_date, v.modify_date
     FROM sys.views v
     INNER JOIN sys.schemas s ON v.schema_id = s.schema_id
     ORDER BY s.name, v.name";

const SEARCH_VIEWS_SQL: &str = "SELECT s.name AS schema_name, v.name AS view_name, v.create_date, v.modify_date
     FROM sys.views v
     INNER JOIN sys.schemas s ON v.schema_id = s.schema_id
     WHERE v.name LIKE @P1 OR s.name LIKE @P2
     ORDER BY s.name, v.name";

/// View store holding one SQL Server connection
pub struct MssqlStore {
    client: Client<Compat<TcpStream>>,
    target: String,
}

impl MssqlStore {
    /// Connect with SQL authentication
    pub async fn connect(config: &SqlServerConfig) -> Result<Self> {
        let target = config.describe();

        let mut tds = Config::new();
        tds.host(&config.server);
        tds.port(config.port);
        tds.database(&config.database);
        tds.authentication(AuthMethod::sql_server(&config.user, &config.password));
        if config.trust_server_certificate {
            tds.trust_cert();
        }

        let tcp = TcpStream::connect(tds.get_addr())
            .await
            .map_err(|e| Error::connection(&target, e.to_string()))?;
        tcp.set_nodelay(true)?;

        let client = Client::connect(tds, tcp.compat_write())
            .await
            .map_err(|e| Error::connection(&target, e.to_string()))?;

        debug!("Connected to {}", target);
        Ok(Self { client, target })
    }

    async fn query_views(&mut self, sql: &str, pattern: Option<&str>) -> Result<Vec<ViewInfo>> {
        let stream = match pattern {
            Some(p) => self.client.query(sql, &[&p, &p]).await,
            None => self.client.query(sql, &[]).await,
        }
        .map_err(|e| Error::database(format!("Failed to list views: {e}")))?;

        let rows = stream
            .into_first_result()
            .await
            .map_err(|e| Error::database(format!("Failed to list views: {e}")))?;

        rows.iter().map(view_info_from_row).collect()
    }
}

#[async_trait]
impl ViewStore for MssqlStore {
    fn describe(&self) -> String {
        self.target.clone()
    }

    async fn list_views(&mut self) -> Result<Vec<ViewInfo>> {
        self.query_views(LIST_VIEWS_SQL, None).await
    }

    async fn search_views(&mut self, keyword: &str) -> Result<Vec<ViewInfo>> {
        let pattern = format!("%{keyword}%");
        self.query_views(SEARCH_VIEWS_SQL, Some(&pattern)).await
    }

    async fn read_view(&mut self, view_name: &str) -> Result<Table> {
        let sql = format!("SELECT * FROM {}", quote_view_name(view_name));
        debug!("Executing query: {}", sql);
        let query_err = |e: tiberius::error::Error| {
            Error::database(format!("Failed to query view '{view_name}': {e}"))
        };

        let mut stream = self.client.query(sql, &[]).await.map_err(query_err)?;
        let columns = stream
            .columns()
            .await
            .map_err(query_err)?
            .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = stream.into_first_result().await.map_err(query_err)?;

        let mut table = Table::new(columns);
        for row in rows {
            table.push_row(row.into_iter().map(|data| column_data_to_json(&data)).collect());
        }
        Ok(table)
    }
}

/// `[schema].[view]` with closing brackets doubled
pub fn quote_view_name(view_name: &str) -> String {
    let quote = |part: &str| format!("[{}]", part.replace(']', "]]"));
    match split_view_name(view_name) {
        (Some(schema), view) => format!("{}.{}", quote(schema), quote(view)),
        (None, view) => quote(view),
    }
}

fn view_info_from_row(row: &Row) -> Result<ViewInfo> {
    let text = |idx: usize| -> Result<String> {
        row.try_get::<&str, _>(idx)
            .map(|v| v.unwrap_or_default().to_string())
            .map_err(|e| Error::database(format!("Unexpected view list column: {e}")))
    };
    let timestamp = |idx: usize| {
        row.try_get::<chrono::NaiveDateTime, _>(idx)
            .ok()
            .flatten()
            .map(|ts| ts.to_string())
    };

    Ok(ViewInfo {
        schema: text(0)?,
        name: text(1)?,
        created: timestamp(2),
        modified: timestamp(3),
    })
}

/// Convert a TDS cell to JSON
fn column_data_to_json(data: &ColumnData<'static>) -> Value {
    match data {
        ColumnData::U8(v) => opt(*v),
        ColumnData::I16(v) => opt(*v),
        ColumnData::I32(v) => opt(*v),
        ColumnData::I64(v) => opt(*v),
        ColumnData::F32(v) => opt(*v),
        ColumnData::F64(v) => opt(*v),
        ColumnData::Bit(v) => opt(*v),
        ColumnData::String(v) => v
            .as_deref()
            .map_or(Value::Null, |s| Value::String(s.to_string())),
        ColumnData::Guid(v) => v.as_ref().map_or(Value::Null, |g| Value::String(g.to_string())),
        ColumnData::Numeric(v) => v.as_ref().map_or(Value::Null, |n| Value::String(n.to_string())),
        ColumnData::Binary(v) => v.as_deref().map_or(Value::Null, |b| {
            Value::String(base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                b,
            ))
        }),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            temporal::<chrono::NaiveDateTime>(data)
        }
        ColumnData::Date(_) => temporal::<chrono::NaiveDate>(data),
        ColumnData::Time(_) => temporal::<chrono::NaiveTime>(data),
        ColumnData::DateTimeOffset(_) => {
            temporal::<chrono::DateTime<chrono::FixedOffset>>(data)
        }
        other => Value::String(format!("{other:?}")),
    }
}

fn opt<T: Into<Value>>(value: Option<T>) -> Value {
    value.map_or(Value::Null, Into::into)
}

fn temporal<'a, T>(data: &'a ColumnData<'static>) -> Value
where
    T: FromSql<'a> + ToString,
{
    match T::from_sql(data) {
        Ok(Some(v)) => Value::String(v.to_string()),
        Ok(None) => Value::Null,
        Err(_) => Value::String(format!("{data:?}")),
    }
}

//! View store trait and backend selection

use super::duckdb_store::DuckDbStore;
use crate::config::{SqlBackend, SqlServerConfig};
use crate::error::Result;
use crate::table::Table;
use async_trait::async_trait;

/// A view in a relational database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewInfo {
    pub schema: String,
    pub name: String,
    /// Creation timestamp, when the backend reports one
    pub created: Option<String>,
    /// Last modification timestamp, when the backend reports one
    pub modified: Option<String>,
}

impl ViewInfo {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            created: None,
            modified: None,
        }
    }

    /// `schema.name`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// Read access to the views of one database
///
/// Each store owns a single connection and runs one query at a time.
#[async_trait]
pub trait ViewStore: Send {
    /// Human readable target (no credentials)
    fn describe(&self) -> String;

    /// All views, ordered by schema then name
    async fn list_views(&mut self) -> Result<Vec<ViewInfo>>;

    /// Views whose name or schema contains `keyword`
    async fn search_views(&mut self, keyword: &str) -> Result<Vec<ViewInfo>>;

    /// Every row of a view (`schema.view` or `view`)
    async fn read_view(&mut self, view_name: &str) -> Result<Table>;
}

/// Connect to the backend selected by `config`
pub async fn open_store(config: &SqlServerConfig) -> Result<Box<dyn ViewStore>> {
    match config.backend {
        SqlBackend::Duckdb => Ok(Box::new(DuckDbStore::open(&config.database)?)),
        #[cfg(feature = "mssql")]
        SqlBackend::Mssql => Ok(Box::new(super::mssql::MssqlStore::connect(config).await?)),
        #[cfg(not(feature = "mssql"))]
        SqlBackend::Mssql => Err(crate::error::Error::config(
            "SQL Server support is not compiled in (enable the 'mssql' feature) \
             or set SQL_BACKEND=duckdb",
        )),
    }
}

/// Split `schema.view` on the first dot, dropping surrounding quote characters
pub(crate) fn split_view_name(view_name: &str) -> (Option<&str>, &str) {
    match view_name.split_once('.') {
        Some((schema, view)) => (Some(strip_quoting(schema)), strip_quoting(view)),
        None => (None, strip_quoting(view_name)),
    }
}

fn strip_quoting(part: &str) -> &str {
    part.trim()
        .trim_start_matches(['[', '"'])
        .trim_end_matches([']', '"'])
}

//! Relational view stores
//!
//! List, search and read the views of a relational database, and export
//! them to CSV one at a time or in a batch.
//!
//! Backends:
//! - SQL Server via tiberius (feature `mssql`, on by default)
//! - DuckDB database files (`SQL_BACKEND=duckdb`)

mod batch;
mod duckdb_store;
#[cfg(feature = "mssql")]
mod mssql;
mod store;

pub use batch::{batch_export, export_view, BatchReport};
pub use duckdb_store::{quote_view_name as quote_duckdb_view_name, DuckDbStore};
#[cfg(feature = "mssql")]
pub use mssql::{quote_view_name as quote_mssql_view_name, MssqlStore};
pub use store::{open_store, ViewInfo, ViewStore};

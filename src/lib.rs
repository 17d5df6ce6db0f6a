// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # warehouse-export
//!
//! Command-line tools that list, search and export warehouse views to CSV.
//!
//! ## Features
//!
//! - **Dremio Export**: submit SQL over the REST API, poll the job, page
//!   through the results and write them to CSV
//! - **Catalog Navigation**: list spaces and folders (flat or recursive) and
//!   search tables and views by keyword
//! - **SQL Server Export**: list, search and export views over TDS, one at a
//!   time or in a batch
//! - **DuckDB Backend**: the same view commands against a local DuckDB file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warehouse_export::config::DremioConfig;
//! use warehouse_export::dremio::{DremioClient, PollConfig, QueryRunner};
//! use warehouse_export::output::{write_csv, CsvOptions};
//!
//! #[tokio::main]
//! async fn main() -> warehouse_export::Result<()> {
//!     let config = DremioConfig::new("http://localhost:9047", "personal-access-token");
//!     let client = DremioClient::new(&config)?;
//!
//!     let result = QueryRunner::new(&client)
//!         .run("SELECT * FROM sales.daily", &PollConfig::default())
//!         .await?;
//!
//!     write_csv("daily.csv", &result.table, &CsvOptions::default())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!                 .env ──► config
//!                            │
//!        ┌───────────────────┼─────────────────────┐
//!        ▼                   ▼                     ▼
//!   dremio::catalog     dremio::job          relational
//!   list / search       submit → poll        SQL Server / DuckDB
//!        │              → paginate           list / search / read
//!        │                   │                     │
//!        │                   ▼                     ▼
//!        │                 table ◄─────────────────┘
//!        ▼                   ▼
//!   output::listing     output::csv
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// `.env` parsing and validated settings
pub mod config;

/// Single-attempt JSON HTTP client
pub mod http;

/// Dremio REST API: query jobs and catalog
pub mod dremio;

/// Rectangular result tables
pub mod table;

/// CSV files and ASCII listings
pub mod output;

/// Relational view stores and batch export
pub mod relational;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result, ResultExt};
pub use table::Table;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! CLI module
//!
//! Argument parsing and runners for the two binaries.
//!
//! # Commands
//!
//! `dremio-export`:
//! - `export` - Run `SELECT *` on a view and save the result as CSV
//! - `list` - List catalog items (optionally recursive)
//! - `search` - Find tables and views by keyword
//!
//! `sqlserver-export`:
//! - `list`, `search`, `export` - Same as above, against SQL Server or DuckDB
//! - `batch-export` - Export several views, failing if any of them fails

mod commands;
mod dremio;
mod sqlserver;

pub use commands::{
    normalize_legacy_args, DremioCli, DremioCommand, SqlServerCli, SqlServerCommand,
};
pub use dremio::DremioRunner;
pub use sqlserver::SqlServerRunner;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber (`RUST_LOG` plus info, or debug with `-v`)
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print an error and its hint to stderr
pub fn report_error(error: &crate::Error) {
    eprintln!("Error: {error}");
    if let Some(hint) = error.hint() {
        eprintln!("{hint}");
    }
}

//! CLI commands and argument parsing

use crate::config::DEFAULT_ENV_FILE;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

// ============================================================================
// dremio-export
// ============================================================================

/// Dremio Export: query views, list the catalog, and search
#[derive(Parser, Debug)]
#[command(name = "dremio-export")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    dremio-export export my_space.my_view output.csv\n  \
    dremio-export list my_space\n  \
    dremio-export search sales\n  \
    dremio-export my_space.my_view  (legacy, same as export)")]
pub struct DremioCli {
    /// Path to .env file
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: DremioCommand,
}

/// dremio-export subcommands
#[derive(Subcommand, Debug)]
pub enum DremioCommand {
    /// Export a Dremio view to CSV
    Export {
        /// Dremio view path (e.g. my_space.my_view)
        view: String,

        /// Output CSV file path (default: <view name>.csv)
        output: Option<PathBuf>,

        /// Query timeout in seconds
        #[arg(long, default_value = "300")]
        timeout: u64,

        /// Seconds between job status checks
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval: u64,
    },

    /// List views in a container (space/folder)
    List {
        /// Container path (e.g. my_space or my_space.my_folder); root when omitted
        path: Option<String>,

        /// Recursively list all items
        #[arg(short, long)]
        recursive: bool,
    },

    /// Search for views by keyword
    Search {
        /// Search keyword
        keyword: String,
    },
}

/// Subcommand names recognised by `dremio-export`
const DREMIO_COMMANDS: [&str; 4] = ["export", "list", "search", "help"];

/// Rewrite `dremio-export <view> [output]` to `dremio-export export <view> [output]`
pub fn normalize_legacy_args(mut args: Vec<OsString>) -> Vec<OsString> {
    let is_legacy = args.get(1).is_some_and(|first| {
        let first = first.to_string_lossy();
        !first.starts_with('-') && !DREMIO_COMMANDS.contains(&first.as_ref())
    });
    if is_legacy {
        args.insert(1, OsString::from("export"));
    }
    args
}

// ============================================================================
// sqlserver-export
// ============================================================================

/// SQL Server View Export: list views, search, and export to CSV
#[derive(Parser, Debug)]
#[command(name = "sqlserver-export")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    sqlserver-export list\n  \
    sqlserver-export search sales\n  \
    sqlserver-export export dbo.CustomerView\n  \
    sqlserver-export batch-export dbo.View1 dbo.View2")]
pub struct SqlServerCli {
    /// Path to .env file
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: SqlServerCommand,
}

/// sqlserver-export subcommands
#[derive(Subcommand, Debug)]
pub enum SqlServerCommand {
    /// List all views in the database
    List,

    /// Search for views by keyword
    Search {
        /// Search keyword (matches schema or view name)
        keyword: String,
    },

    /// Export a single view to CSV
    Export {
        /// View name (e.g. dbo.CustomerView)
        view: String,

        /// Output CSV file path (default: OUTPUT_DIR/<view name>.csv)
        output: Option<PathBuf>,
    },

    /// Export multiple views to CSV
    BatchExport {
        /// View names to export (e.g. dbo.View1 dbo.View2)
        #[arg(required = true, num_args = 1..)]
        views: Vec<String>,
    },
}

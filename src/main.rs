//! Dremio Export CLI
//!
//! Export Dremio views to CSV, list the catalog, and search

use clap::Parser;
use warehouse_export::cli::{init_logging, normalize_legacy_args, report_error, DremioCli, DremioRunner};

#[tokio::main]
async fn main() {
    let cli = DremioCli::parse_from(normalize_legacy_args(std::env::args_os().collect()));
    init_logging(cli.verbose);

    let runner = DremioRunner::new(cli);

    if let Err(e) = runner.run().await {
        report_error(&e);
        std::process::exit(1);
    }
}

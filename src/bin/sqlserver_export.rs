//! SQL Server View Export CLI
//!
//! List, search and export database views to CSV

use clap::Parser;
use warehouse_export::cli::{init_logging, report_error, SqlServerCli, SqlServerRunner};

#[tokio::main]
async fn main() {
    let cli = SqlServerCli::parse();
    init_logging(cli.verbose);

    let runner = SqlServerRunner::new(cli);

    if let Err(e) = runner.run().await {
        report_error(&e);
        std::process::exit(1);
    }
}

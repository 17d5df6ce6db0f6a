//! sqlserver-export runner

use crate::cli::commands::{SqlServerCli, SqlServerCommand};
use crate::config::{absolute_path, EnvFile, SqlServerConfig};
use crate::error::Result;
use crate::output::{file_name_for_view, render_listing, sqlserver_export_hint};
use crate::relational::{batch_export, export_view, open_store, ViewStore};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Executes one `sqlserver-export` invocation
pub struct SqlServerRunner {
    cli: SqlServerCli,
}

impl SqlServerRunner {
    /// Create a new runner
    pub fn new(cli: SqlServerCli) -> Self {
        Self { cli }
    }

    /// Run the command, printing results to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out).await
    }

    /// Run the command, printing results to `out`
    pub async fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let env = EnvFile::load(absolute_path(&self.cli.env)?)?;
        let config = SqlServerConfig::from_env(&env)?;

        info!("Connecting to {}", config.describe());
        let mut store = open_store(&config).await?;
        let store = &mut *store;

        match &self.cli.command {
            SqlServerCommand::List => {
                let views = store.list_views().await?;
                let title = format!("Views in database '{}':", config.database);
                let hint = sqlserver_export_hint(&views);
                writeln!(out, "{}", render_listing(&views, Some(&title), Some(&hint)))?;
            }
            SqlServerCommand::Search { keyword } => {
                info!("Searching for views matching \"{}\"...", keyword);
                let views = store.search_views(keyword).await?;
                let title = format!("Found {} views matching \"{}\":", views.len(), keyword);
                let hint = sqlserver_export_hint(&views);
                writeln!(out, "{}", render_listing(&views, Some(&title), Some(&hint)))?;
            }
            SqlServerCommand::Export { view, output } => {
                self.export(store, &config, view, output.as_deref(), out).await?;
            }
            SqlServerCommand::BatchExport { views } => {
                self.batch(store, &config, views, out).await?;
            }
        }
        Ok(())
    }

    async fn export<W: Write>(
        &self,
        store: &mut dyn ViewStore,
        config: &SqlServerConfig,
        view: &str,
        output: Option<&Path>,
        out: &mut W,
    ) -> Result<()> {
        let output_path = match output {
            Some(path) => absolute_path(path)?,
            None => absolute_path(&config.output_dir.join(file_name_for_view(view)))?,
        };

        let rows = export_view(store, view, &output_path).await?;
        writeln!(out, "Exported {} rows to: {}", rows, output_path.display())?;
        writeln!(out, "Export complete!")?;
        Ok(())
    }

    async fn batch<W: Write>(
        &self,
        store: &mut dyn ViewStore,
        config: &SqlServerConfig,
        views: &[String],
        out: &mut W,
    ) -> Result<()> {
        let output_dir = absolute_path(&config.output_dir)?;
        let report = batch_export(store, views, &output_dir).await;

        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Batch export complete!")?;
        writeln!(out, "Successful: {}", report.succeeded.len())?;
        if !report.failed.is_empty() {
            writeln!(out, "Failed: {}", report.failed.len())?;
            for (view, reason) in &report.failed {
                writeln!(out, "  {view}: {reason}")?;
            }
        }
        writeln!(out, "Output directory: {}", output_dir.display())?;

        report.into_result().map(|_| ())
    }
}

//! dremio-export runner

use crate::cli::commands::{DremioCli, DremioCommand};
use crate::config::{absolute_path, DremioConfig, EnvFile};
use crate::dremio::{CatalogNavigator, CatalogPath, DremioClient, PollConfig, QueryRunner};
use crate::error::{Result, ResultExt};
use crate::output::{dremio_export_hint, file_name_for_view, render_listing, write_csv, CsvOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Executes one `dremio-export` invocation
pub struct DremioRunner {
    cli: DremioCli,
}

impl DremioRunner {
    /// Create a new runner
    pub fn new(cli: DremioCli) -> Self {
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
        let config = DremioConfig::from_env(&env)?;

        info!("Connecting to Dremio at {}...", config.base_url);
        let client = DremioClient::new(&config)?;

        match &self.cli.command {
            DremioCommand::Export {
                view,
                output,
                timeout,
                poll_interval,
            } => {
                let poll = PollConfig::from_secs(*timeout, *poll_interval);
                self.export(&client, view, output.as_deref(), &poll, out).await
            }
            DremioCommand::List { path, recursive } => {
                self.list(&client, path.as_deref(), *recursive, out).await
            }
            DremioCommand::Search { keyword } => self.search(&client, keyword, out).await,
        }
    }

    async fn export<W: Write>(
        &self,
        client: &DremioClient,
        view: &str,
        output: Option<&Path>,
        poll: &PollConfig,
        out: &mut W,
    ) -> Result<()> {
        let output_path = match output {
            Some(path) => absolute_path(path)?,
            None => absolute_path(Path::new(&file_name_for_view(view)))?,
        };

        let sql = format!("SELECT * FROM {view}");
        let result = QueryRunner::new(client).run(&sql, poll).await?;

        write_csv(&output_path, &result.table, &CsvOptions::default())
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        writeln!(out, "CSV saved: {}", output_path.display())?;
        writeln!(
            out,
            "Total rows: {}, Columns: {}",
            result.table.len(),
            result.table.columns.len()
        )?;
        Ok(())
    }

    async fn list<W: Write>(
        &self,
        client: &DremioClient,
        path: Option<&str>,
        recursive: bool,
        out: &mut W,
    ) -> Result<()> {
        let parsed = path.map(CatalogPath::parse).transpose()?;
        let entries = CatalogNavigator::new(client)
            .list(parsed.as_ref(), recursive)
            .await?;

        let title = match path {
            Some(raw) => format!("Items in \"{raw}\":"),
            None => "Root catalog items:".to_string(),
        };
        let hint = dremio_export_hint(&entries);
        writeln!(out, "{}", render_listing(&entries, Some(&title), Some(&hint)))?;
        Ok(())
    }

    async fn search<W: Write>(&self, client: &DremioClient, keyword: &str, out: &mut W) -> Result<()> {
        let entries = CatalogNavigator::new(client)
            .search(keyword, &PollConfig::default())
            .await?;

        let title = format!("Found {} items matching \"{}\":", entries.len(), keyword);
        let hint = dremio_export_hint(&entries);
        writeln!(out, "{}", render_listing(&entries, Some(&title), Some(&hint)))?;
        Ok(())
    }
}

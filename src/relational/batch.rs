//! Single and batch view export

use super::store::ViewStore;
use crate::error::{Error, Result};
use crate::output::{file_name_for_view, write_csv, CsvOptions};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Outcome of a batch export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files written, in input order
    pub succeeded: Vec<PathBuf>,
    /// Views that could not be exported, with the reason
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    /// Number of views attempted
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Fail if any view failed
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(Error::BatchFailed {
                failed: self.failed.len(),
                total: self.attempted(),
            })
        }
    }
}

/// Export one view to `output` as CSV with a UTF-8 BOM.
/// Returns the number of rows written.
pub async fn export_view(store: &mut dyn ViewStore, view_name: &str, output: &Path) -> Result<usize> {
    info!("Querying view: {}", view_name);
    let table = store.read_view(view_name).await?;
    write_csv(output, &table, &CsvOptions::with_bom())
}

/// Export every view into `output_dir`, continuing past failures
pub async fn batch_export(
    store: &mut dyn ViewStore,
    view_names: &[String],
    output_dir: &Path,
) -> BatchReport {
    info!("Exporting {} views to: {}", view_names.len(), output_dir.display());
    let mut report = BatchReport::default();

    for view_name in view_names {
        let path = output_dir.join(file_name_for_view(view_name));
        match export_view(store, view_name, &path).await {
            Ok(rows) => {
                info!("Exported {} rows to: {}", rows, path.display());
                report.succeeded.push(path);
            }
            Err(e) => {
                error!("Failed to export '{}': {}", view_name, e);
                report.failed.push((view_name.clone(), e.to_string()));
            }
        }
    }

    report
}

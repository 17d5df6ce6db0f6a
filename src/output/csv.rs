//! CSV file writer (RFC 4180 quoting, CRLF record terminators)

use crate::error::Result;
use crate::table::{render_cell, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options for CSV output
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvOptions {
    /// Prefix the file with a UTF-8 byte order mark (for spreadsheet tools)
    pub bom: bool,
}

impl CsvOptions {
    /// Options with a byte order mark
    pub fn with_bom() -> Self {
        Self { bom: true }
    }
}

/// Write `table` to `path`, creating parent directories.
/// Returns the number of data rows written.
pub fn write_csv(path: impl AsRef<Path>, table: &Table, options: &CsvOptions) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = BufWriter::new(File::create(path)?);
    if options.bom {
        file.write_all(UTF8_BOM)?;
    }
    let written = write_csv_to(&mut file, table)?;
    file.flush()?;

    debug!("Wrote {} rows to {}", written, path.display());
    Ok(written)
}

/// Write `table` as CSV to any writer
///
/// A table without columns produces no output.
pub fn write_csv_to<W: Write>(writer: W, table: &Table) -> Result<usize> {
    if table.columns.is_empty() {
        return Ok(0);
    }

    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(&table.columns)?;
    for row in &table.rows {
        csv.write_record(row.iter().map(render_cell))?;
    }
    csv.flush()?;

    Ok(table.rows.len())
}

/// Default CSV file name for a view: the last dotted segment with quotes and
/// brackets removed, anything outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn file_name_for_view(view_name: &str) -> String {
    let last = view_name.rsplit('.').next().unwrap_or(view_name);
    let name = last
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '[' | ']'));

    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.is_empty() {
        "export.csv".to_string()
    } else {
        format!("{safe}.csv")
    }
}

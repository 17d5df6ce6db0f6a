//! Rectangular result tables
//!
//! Query results arrive as loosely-shaped record mappings. A [`Table`]
//! projects them onto a fixed column list so every row has exactly one cell
//! per column, in column order.

use serde_json::{Map, Value};

/// Column names plus rows of cells, one cell per column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Project records onto `columns`. Fields not in `columns` are dropped,
    /// missing fields become null.
    pub fn from_records(columns: Vec<String>, records: Vec<Map<String, Value>>) -> Self {
        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Append a row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Cell rendered as text, empty when absent or null
    pub fn text(&self, row: usize, column: &str) -> String {
        self.value(row, column).map(render_cell).unwrap_or_default()
    }
}

/// Render a cell the way it is written to CSV
///
/// Null is empty, strings are verbatim, numbers and booleans use their
/// canonical text, arrays and objects become compact JSON.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

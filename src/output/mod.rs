//! Output module
//!
//! Handles CSV export files and the ASCII tables printed by the list and
//! search commands.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Writing a [`Table`](crate::table::Table) to a CSV file (optionally with a BOM)
//! - Deriving a safe file name from a view name
//! - Rendering catalog entries and views as bordered tables

mod csv;
mod listing;

pub use self::csv::{file_name_for_view, write_csv, write_csv_to, CsvOptions};
pub use listing::{dremio_export_hint, render_listing, sqlserver_export_hint, Listing};

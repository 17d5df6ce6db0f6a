//! ASCII tables for list and search results

use crate::dremio::CatalogEntry;
use crate::relational::ViewInfo;
use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};

/// Something that can be shown as a row of a listing
pub trait Listing {
    /// Column headers
    fn headers() -> [&'static str; 3];

    /// Cells for this item, in header order
    fn cells(&self) -> [String; 3];

    /// Noun used in the total line and the empty message ("items", "views")
    fn noun() -> &'static str;
}

impl Listing for CatalogEntry {
    fn headers() -> [&'static str; 3] {
        ["Name", "Path", "Type"]
    }

    fn cells(&self) -> [String; 3] {
        [self.name.clone(), self.path.clone(), self.kind.label().to_string()]
    }

    fn noun() -> &'static str {
        "items"
    }
}

impl Listing for ViewInfo {
    fn headers() -> [&'static str; 3] {
        ["Schema", "View Name", "Full Name"]
    }

    fn cells(&self) -> [String; 3] {
        [self.schema.clone(), self.name.clone(), self.full_name()]
    }

    fn noun() -> &'static str {
        "views"
    }
}

/// Render items as a bordered table with an optional title and hint
pub fn render_listing<T: Listing>(items: &[T], title: Option<&str>, hint: Option<&str>) -> String {
    if items.is_empty() {
        return format!("No {} found.", T::noun());
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(T::headers().into_iter().map(Cell::new));

    for item in items {
        table.add_row(item.cells().into_iter().map(Cell::new));
    }

    let mut out = String::new();
    if let Some(title) = title {
        out.push('\n');
        out.push_str(title);
        out.push('\n');
    }
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&format!("Total: {} {}", items.len(), T::noun()));
    if let Some(hint) = hint {
        out.push_str("\n\n");
        out.push_str(hint);
    }
    out
}

/// Export hint for the Dremio tool
pub fn dremio_export_hint(entries: &[CatalogEntry]) -> String {
    let path = entries
        .first()
        .map_or("space.view_name", |e| e.path.as_str());
    format!("Hint: Export with: dremio-export export '{path}'")
}

/// Export hint for the relational tool
pub fn sqlserver_export_hint(views: &[ViewInfo]) -> String {
    let name = views
        .first()
        .map_or_else(|| "dbo.ViewName".to_string(), ViewInfo::full_name);
    format!("Hint: Export with: sqlserver-export export {name}")
}

//! Catalog navigation: path parsing, listing and keyword search

use super::client::DremioClient;
use super::job::QueryRunner;
use super::types::{CatalogItem, PollConfig};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

// ============================================================================
// Paths
// ============================================================================

/// A path into the catalog hierarchy
///
/// Accepted notations:
/// - `space.folder.view`
/// - `space/folder/view`
/// - `"My Space"."folder.with.dots"` (quoted segments keep dots and spaces)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPath {
    segments: Vec<String>,
}

impl CatalogPath {
    /// Parse a user-supplied path
    pub fn parse(input: &str) -> Result<Self> {
        let segments = if input.contains('/') {
            input
                .split('/')
                .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
                .filter(|s| !s.is_empty())
                .collect()
        } else if input.contains('"') {
            split_quoted(input)
        } else {
            input
                .split('.')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };

        Self::from_segments(segments).map_err(|_| Error::InvalidPath {
            message: format!("'{input}' has no segments"),
        })
    }

    /// Build from already-split segments
    pub fn from_segments(segments: Vec<String>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::InvalidPath {
                message: "path is empty".to_string(),
            });
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for CatalogPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CatalogPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

fn split_quoted(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

// ============================================================================
// Entries
// ============================================================================

/// What a catalog entry is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Virtual dataset
    View,
    /// Physical dataset, with its subtype (`PROMOTED`, `DIRECT`, ...)
    Dataset(String),
    /// Space, source, folder or home, with its subtype
    Container(String),
}

impl EntryKind {
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Label shown in the Type column
    pub fn label(&self) -> &str {
        match self {
            Self::View => "VIEW",
            Self::Dataset(subtype) | Self::Container(subtype) => subtype,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A listed catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Last path segment
    pub name: String,
    /// Dotted path
    pub path: String,
    pub kind: EntryKind,
    /// Path segments as returned by the server
    pub segments: Vec<String>,
}

impl CatalogEntry {
    /// Classify a raw catalog child; unknown types yield `None`
    pub fn from_item(item: &CatalogItem) -> Option<Self> {
        let kind = match item.item_type.as_deref() {
            Some("DATASET") => match item.dataset_type.as_deref() {
                Some("VIRTUAL") => EntryKind::View,
                Some(other) => EntryKind::Dataset(other.to_string()),
                None => EntryKind::Dataset("DATASET".to_string()),
            },
            Some("CONTAINER") => EntryKind::Container(
                item.container_type
                    .clone()
                    .unwrap_or_else(|| "CONTAINER".to_string()),
            ),
            _ => return None,
        };

        let name = item
            .path
            .last()
            .cloned()
            .or_else(|| item.name.clone())
            .unwrap_or_else(|| "?".to_string());
        let path = if item.path.is_empty() {
            name.clone()
        } else {
            item.path.join(".")
        };
        let segments = if item.path.is_empty() {
            vec![name.clone()]
        } else {
            item.path.clone()
        };

        Some(Self {
            name,
            path,
            kind,
            segments,
        })
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Lists and searches the catalog of one deployment
#[derive(Debug)]
pub struct CatalogNavigator<'a> {
    client: &'a DremioClient,
}

impl<'a> CatalogNavigator<'a> {
    pub fn new(client: &'a DremioClient) -> Self {
        Self { client }
    }

    /// List the children of `path` (the root when `None`)
    ///
    /// In recursive mode containers are expanded in place, depth first, and
    /// only non-container entries are returned.
    pub async fn list(&self, path: Option<&CatalogPath>, recursive: bool) -> Result<Vec<CatalogEntry>> {
        let top = match path {
            Some(path) => {
                info!("Listing items in \"{}\"{}...", path, if recursive { " (recursive)" } else { "" });
                self.client.catalog_by_path(path.segments()).await?
            }
            None => {
                info!("Listing root catalog items...");
                self.client.catalog_root().await?
            }
        };

        if !recursive {
            return Ok(top.iter().filter_map(CatalogEntry::from_item).collect());
        }

        let mut entries = Vec::new();
        let mut stack = vec![top.into_iter()];

        while let Some(frame) = stack.last_mut() {
            let Some(item) = frame.next() else {
                stack.pop();
                continue;
            };
            let Some(entry) = CatalogEntry::from_item(&item) else {
                continue;
            };

            if entry.kind.is_container() {
                debug!("Expanding {} {}", entry.kind, entry.path);
                let children = self.client.catalog_by_path(&entry.segments).await?;
                stack.push(children.into_iter());
            } else {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    /// Find tables and views whose name or schema contains `keyword`
    pub async fn search(&self, keyword: &str, poll: &PollConfig) -> Result<Vec<CatalogEntry>> {
        info!("Searching for \"{}\"...", keyword);
        let result = QueryRunner::new(self.client)
            .run(&search_statement(keyword), poll)
            .await?;
        let table = &result.table;

        let entries = (0..table.len())
            .map(|row| {
                let schema = table.text(row, "TABLE_SCHEMA");
                let name = table.text(row, "TABLE_NAME");
                let table_type = table.text(row, "TABLE_TYPE");

                let kind = if table_type == "VIEW" {
                    EntryKind::View
                } else {
                    EntryKind::Dataset(table_type)
                };
                let (path, segments) = if schema.is_empty() {
                    (name.clone(), vec![name.clone()])
                } else {
                    let mut segments: Vec<String> = schema.split('.').map(String::from).collect();
                    segments.push(name.clone());
                    (format!("{schema}.{name}"), segments)
                };

                CatalogEntry {
                    name,
                    path,
                    kind,
                    segments,
                }
            })
            .collect();

        Ok(entries)
    }
}

/// INFORMATION_SCHEMA query matching `keyword` against table and schema names
pub fn search_statement(keyword: &str) -> String {
    let keyword = keyword.to_lowercase().replace('\'', "''");
    format!(
        "SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_TYPE \
         FROM INFORMATION_SCHEMA.\"TABLES\" \
         WHERE LOWER(TABLE_NAME) LIKE '%{keyword}%' \
         OR LOWER(TABLE_SCHEMA) LIKE '%{keyword}%' \
         ORDER BY TABLE_SCHEMA, TABLE_NAME"
    )
}

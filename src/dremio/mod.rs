//! Dremio REST API
//!
//! - [`DremioClient`]: typed calls for SQL submission, job status, result
//!   pages and catalog lookups
//! - [`QueryRunner`]: the submit → poll → paginate workflow
//! - [`CatalogNavigator`]: catalog listing (flat or recursive) and search

mod catalog;
mod client;
mod job;
mod types;

pub use catalog::{search_statement, CatalogEntry, CatalogNavigator, CatalogPath, EntryKind};
pub use client::DremioClient;
pub use job::{QueryResult, QueryRunner};
pub use types::{
    CatalogItem, CatalogListing, JobSnapshot, JobState, JobStatusResponse, PollConfig, ResultPage,
    SchemaField, SubmitResponse,
};

#[cfg(test)]
mod tests;

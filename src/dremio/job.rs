//! Query execution: submit, poll until terminal, page through results
//!
//! ```text
//! submit ──► SUBMITTED ──► POLLING ──┬──► COMPLETED ──► fetch pages
//!                            ▲   │   ├──► FAILED      (error)
//!                            └───┘   └──► CANCELED    (error)
//!                       sleep(interval), until timeout
//! ```
//!
//! One request is in flight at a time. Nothing is retried: the first
//! transport or status failure ends the operation.

use super::client::DremioClient;
use super::types::{JobSnapshot, JobState, PollConfig, ResultPage};
use crate::error::{Error, Result};
use crate::table::Table;
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of running a statement to completion
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub job_id: String,
    /// Row count reported by the completed job
    pub row_count: u64,
    pub table: Table,
}

/// Drives one statement through the job lifecycle
#[derive(Debug)]
pub struct QueryRunner<'a> {
    client: &'a DremioClient,
    page_size: u64,
}

impl<'a> QueryRunner<'a> {
    /// Create a runner using the client's configured page size
    pub fn new(client: &'a DremioClient) -> Self {
        Self {
            client,
            page_size: client.page_size(),
        }
    }

    /// Override the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Submit a statement, returning the job id
    pub async fn submit(&self, sql: &str) -> Result<String> {
        info!("Executing: {}", sql);
        let job_id = self.client.submit_sql(sql).await?;
        info!("Job submitted: {}", job_id);
        Ok(job_id)
    }

    /// Poll until the job is terminal or `poll.timeout` has elapsed
    ///
    /// The terminal check runs before the timeout check on every iteration,
    /// so a job observed as completed at the deadline still succeeds.
    pub async fn await_completion(&self, job_id: &str, poll: &PollConfig) -> Result<JobSnapshot> {
        let started = Instant::now();

        loop {
            let job = self.client.job_status(job_id).await?;

            match job.state {
                JobState::Completed => {
                    info!("Query completed. Rows: {}", job.row_count);
                    return Ok(job);
                }
                JobState::Failed => {
                    return Err(Error::job_failed(
                        job.error_message
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    ));
                }
                JobState::Canceled => return Err(Error::JobCanceled),
                JobState::Submitted | JobState::Running | JobState::Unknown(_) => {}
            }

            if started.elapsed() >= poll.timeout {
                return Err(Error::JobTimeout {
                    timeout_secs: poll.timeout.as_secs(),
                    state: job.state_name,
                });
            }

            debug!("Job {} is {}, waiting {:?}", job_id, job.state_name, poll.interval);
            tokio::time::sleep(poll.interval).await;
        }
    }

    /// Fetch every result row of a completed job
    ///
    /// With `row_count > 0` pages are requested at offsets `0, P, 2P, ...`
    /// while the offset is within the row count, stopping early on a short
    /// page. With `row_count == 0` a single best-effort request recovers the
    /// column list; its failure is logged and ignored.
    pub async fn fetch_all_pages(
        &self,
        job_id: &str,
        row_count: u64,
        page_size: u64,
    ) -> Result<(Vec<String>, Vec<Map<String, Value>>)> {
        if page_size == 0 {
            return Err(Error::config("page size must be greater than zero"));
        }

        if row_count == 0 {
            return Ok((self.recover_schema(job_id).await, Vec::new()));
        }

        let mut columns: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        let last = row_count - 1;
        let mut offset = 0;

        while offset <= last {
            let page = self.client.result_page(job_id, offset, page_size).await?;
            merge_schema(&mut columns, &page, offset);

            let fetched = page.rows.len() as u64;
            rows.extend(page.rows);
            debug!("Fetched {} rows at offset {} ({} total)", fetched, offset, rows.len());

            if fetched < page_size {
                break;
            }
            offset += page_size;
        }

        let columns = columns.unwrap_or_else(|| infer_columns(&rows));
        info!("Fetched {} rows, {} columns", rows.len(), columns.len());
        Ok((columns, rows))
    }

    /// Submit, wait and fetch in one call
    pub async fn run(&self, sql: &str, poll: &PollConfig) -> Result<QueryResult> {
        let job_id = self.submit(sql).await?;
        info!("Waiting for query to complete...");
        let job = self.await_completion(&job_id, poll).await?;

        if job.row_count > 0 {
            info!("Fetching results...");
        }
        let (columns, records) = self
            .fetch_all_pages(&job_id, job.row_count, self.page_size)
            .await?;

        Ok(QueryResult {
            job_id,
            row_count: job.row_count,
            table: Table::from_records(columns, records),
        })
    }

    async fn recover_schema(&self, job_id: &str) -> Vec<String> {
        match self.client.result_page(job_id, 0, 1).await {
            Ok(page) => page.column_names().unwrap_or_else(|| {
                debug!("Empty result for job {} carried no schema", job_id);
                Vec::new()
            }),
            Err(e) => {
                warn!("Could not recover columns for empty result of job {}: {}", job_id, e);
                Vec::new()
            }
        }
    }
}

fn merge_schema(columns: &mut Option<Vec<String>>, page: &ResultPage, offset: u64) {
    let Some(names) = page.column_names() else {
        return;
    };
    match columns {
        None => *columns = Some(names),
        Some(existing) if *existing != names => {
            warn!(
                "Schema at offset {} differs from the first page ({:?} vs {:?}); keeping the first",
                offset, names, existing
            );
        }
        Some(_) => {}
    }
}

/// Column list for pages that never carried a schema: keys of the first row
fn infer_columns(rows: &[Map<String, Value>]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

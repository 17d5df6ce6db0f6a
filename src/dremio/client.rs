//! Typed calls against the Dremio v3 REST API

use super::types::{
    CatalogItem, CatalogListing, JobSnapshot, JobStatusResponse, ResultPage, SubmitResponse,
};
use crate::config::DremioConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RESULTS_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for one Dremio deployment
#[derive(Debug)]
pub struct DremioClient {
    http: HttpClient,
    base_url: String,
    page_size: u64,
}

impl DremioClient {
    /// Create a client from validated settings
    pub fn new(config: &DremioConfig) -> Result<Self> {
        let http = HttpClient::with_config(
            HttpClientConfig::builder()
                .base_url(config.base_url.clone())
                .bearer_token(config.api_key.clone())
                .header("Content-Type", "application/json")
                .timeout(REQUEST_TIMEOUT)
                .build(),
        )?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        })
    }

    /// Rows requested per results page
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Submit a SQL statement, returning the job id
    pub async fn submit_sql(&self, sql: &str) -> Result<String> {
        let response: SubmitResponse = self
            .http
            .post_json_with_config(
                "/api/v3/sql",
                RequestConfig::new()
                    .json(serde_json::json!({ "sql": sql }))
                    .timeout(REQUEST_TIMEOUT)
                    .action("submit query"),
            )
            .await?;
        Ok(response.id)
    }

    /// Fetch the current state of a job
    pub async fn job_status(&self, job_id: &str) -> Result<JobSnapshot> {
        let response: JobStatusResponse = self
            .http
            .get_json_with_config(
                &format!("/api/v3/job/{job_id}"),
                RequestConfig::new()
                    .timeout(REQUEST_TIMEOUT)
                    .action("check job status"),
            )
            .await?;
        Ok(JobSnapshot::from_response(job_id, response))
    }

    /// Fetch one page of a completed job's results
    pub async fn result_page(&self, job_id: &str, offset: u64, limit: u64) -> Result<ResultPage> {
        debug!("Fetching results for job {} at offset {} (limit {})", job_id, offset, limit);
        self.http
            .get_json_with_config(
                &format!("/api/v3/job/{job_id}/results"),
                RequestConfig::new()
                    .query("offset", offset)
                    .query("limit", limit)
                    .timeout(RESULTS_TIMEOUT)
                    .action(format!("fetch results at offset {offset}")),
            )
            .await
    }

    /// List the catalog root
    pub async fn catalog_root(&self) -> Result<Vec<CatalogItem>> {
        let listing: CatalogListing = self
            .http
            .get_json_with_config(
                "/api/v3/catalog",
                RequestConfig::new()
                    .timeout(REQUEST_TIMEOUT)
                    .action("list catalog"),
            )
            .await?;
        Ok(listing.data)
    }

    /// List the children of the node at `segments`
    pub async fn catalog_by_path(&self, segments: &[String]) -> Result<Vec<CatalogItem>> {
        let url = self.by_path_url(segments)?;
        let result: Result<CatalogListing> = self
            .http
            .get_json_with_config(
                url.as_str(),
                RequestConfig::new()
                    .timeout(REQUEST_TIMEOUT)
                    .action("access catalog"),
            )
            .await;

        match result {
            Ok(listing) => Ok(listing.children),
            Err(Error::HttpStatus { status, detail, .. }) => Err(Error::CatalogNotFound {
                path: segments.join("."),
                status,
                detail,
            }),
            Err(e) => Err(e),
        }
    }

    /// `{base}/api/v3/catalog/by-path/{seg}/...` with every segment percent-encoded
    pub fn by_path_url(&self, segments: &[String]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("base URL cannot have a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "v3", "catalog", "by-path"])
            .extend(segments);
        Ok(url)
    }
}

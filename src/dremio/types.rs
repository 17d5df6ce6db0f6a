//! Wire types for the Dremio REST API and the job model built from them

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Jobs
// ============================================================================

/// Lifecycle state of a query job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Accepted but not running yet (planning, queued, starting, ...)
    Submitted,
    /// Executing
    Running,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Canceled by a user or the engine
    Canceled,
    /// A state string this client does not know; treated as pending
    Unknown(String),
}

impl JobState {
    /// Map the server's `jobState` string
    pub fn from_server(raw: &str) -> Self {
        match raw {
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            "CANCELED" => Self::Canceled,
            "RUNNING" => Self::Running,
            "NOT_SUBMITTED"
            | "STARTING"
            | "SUBMITTED"
            | "PLANNING"
            | "PENDING"
            | "METADATA_RETRIEVAL"
            | "QUEUED"
            | "ENGINE_START"
            | "EXECUTION_PLANNING"
            | "CANCELLATION_REQUESTED" => Self::Submitted,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether polling can stop
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Canceled)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "SUBMITTED"),
            Self::Running => write!(f, "RUNNING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// Latest observation of a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub id: String,
    pub state: JobState,
    /// State exactly as the server reported it (`UNKNOWN` when missing)
    pub state_name: String,
    /// Rows produced; meaningful once completed
    pub row_count: u64,
    pub error_message: Option<String>,
}

impl JobSnapshot {
    /// Build a snapshot from a job status response
    pub fn from_response(id: impl Into<String>, response: JobStatusResponse) -> Self {
        let state_name = response
            .job_state
            .unwrap_or_else(|| "UNKNOWN".to_string());
        Self {
            id: id.into(),
            state: JobState::from_server(&state_name),
            state_name,
            row_count: response.row_count.unwrap_or(0),
            error_message: response.error_message,
        }
    }
}

/// Polling limits for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Give up once this much time has passed without a terminal state
    pub timeout: Duration,
    /// Pause between status checks
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            interval: Duration::from_secs(1),
        }
    }
}

impl PollConfig {
    /// Create from whole seconds, as exposed on the command line
    pub fn from_secs(timeout: u64, interval: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout),
            interval: Duration::from_secs(interval),
        }
    }
}

/// `POST /api/v3/sql` response
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub id: String,
}

/// `GET /api/v3/job/{id}` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_state: Option<String>,
    pub row_count: Option<u64>,
    pub error_message: Option<String>,
}

// ============================================================================
// Results
// ============================================================================

/// Column descriptor inside a results page
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<Value>,
}

/// `GET /api/v3/job/{id}/results` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    #[serde(default)]
    pub row_count: Option<u64>,
    #[serde(default)]
    pub schema: Option<Vec<SchemaField>>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

impl ResultPage {
    /// Column names carried by this page, if it has a schema
    pub fn column_names(&self) -> Option<Vec<String>> {
        self.schema
            .as_ref()
            .map(|fields| fields.iter().map(|f| f.name.clone()).collect())
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// One child in a catalog listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub container_type: Option<String>,
    #[serde(default)]
    pub dataset_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Catalog root (`data`) or node (`children`) response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogListing {
    #[serde(default)]
    pub data: Vec<CatalogItem>,
    #[serde(default)]
    pub children: Vec<CatalogItem>,
}

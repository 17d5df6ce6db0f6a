//! Error types for warehouse-export
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Library code never terminates the process; the binaries map any error
//! to exit code 1.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for warehouse-export
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required .env variables: {}", keys.join(", "))]
    MissingConfigKeys { keys: Vec<String>, path: PathBuf },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error(".env file not found: {}", path.display())]
    EnvFileNotFound { path: PathBuf },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("Failed to {action}: {source}")]
    Transport {
        action: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {action} (HTTP {status}): {detail}")]
    HttpStatus {
        action: String,
        status: u16,
        detail: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Query Job Errors
    // ============================================================================
    #[error("Query failed: {message}")]
    JobFailed { message: String },

    #[error("Query was canceled")]
    JobCanceled,

    #[error("Query timed out after {timeout_secs}s (state: {state})")]
    JobTimeout { timeout_secs: u64, state: String },

    // ============================================================================
    // Catalog Errors
    // ============================================================================
    #[error("Could not find '{path}' in catalog (HTTP {status}): {detail}")]
    CatalogNotFound {
        path: String,
        status: u16,
        detail: String,
    },

    #[error("Invalid catalog path: {message}")]
    InvalidPath { message: String },

    // ============================================================================
    // Database Errors
    // ============================================================================
    #[error("Failed to connect to {target}: {message}")]
    Connection { target: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("{failed} of {total} exports failed")]
    BatchFailed { failed: usize, total: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(action: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self::HttpStatus {
            action: action.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a job failure error
    pub fn job_failed(message: impl Into<String>) -> Self {
        Self::JobFailed {
            message: message.into(),
        }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Remediation hint printed below the error by the binaries
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::MissingConfigKeys { path, .. } => {
                Some(format!("Check your .env file at: {}", path.display()))
            }
            Error::EnvFileNotFound { .. } => {
                Some("Create the file or point to it with --env <PATH>".to_string())
            }
            Error::Connection { .. } => Some(
                "Troubleshooting:\n\
                 1. Check server name, port, and credentials\n\
                 2. Ensure the server allows remote connections\n\
                 3. Verify firewall settings allow access to the port"
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// Result type alias for warehouse-export
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

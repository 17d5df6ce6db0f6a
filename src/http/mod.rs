//! HTTP client module
//!
//! Thin wrapper over reqwest for JSON APIs.
//!
//! # Features
//!
//! - **Bearer Authentication**: token attached to every request
//! - **Per-Request Timeouts**: overrides on top of the client default
//! - **Error Detail**: server `errorMessage` surfaced on non-success status
//! - **No Retries**: one attempt per request, failures are returned as-is

mod client;

pub use client::{error_detail, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

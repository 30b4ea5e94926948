//! Client Types
//!
//! Connection settings shared by the service clients and the JSON bodies
//! exchanged with the analysis backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use log_insight_core::model::Classification;
use log_insight_core::proxy::ProxyConfig;

/// Default backend base address
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of extra attempts for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Connection settings injected into every client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the analysis backend; endpoint paths are joined onto it
    pub base_url: String,
    /// Timeout for a single HTTP attempt
    pub timeout: Duration,
    /// Extra attempts after a transient failure
    pub max_retries: u32,
    pub proxy: Option<ProxyConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            proxy: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }
}

/// Failure to construct a client. Raised once at startup, never per request.
#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("Invalid backend URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid endpoint path '{path}': {message}")]
    InvalidEndpoint { path: String, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for client construction
pub type ClientBuildResult<T> = Result<T, ClientBuildError>;

// ============================================================================
// Wire bodies
// ============================================================================

/// Body of both `/summarize` and `/classify`
#[derive(Debug, Serialize)]
pub struct LogTextRequest<'a> {
    pub log_text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyResponse {
    pub classification: Classification,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

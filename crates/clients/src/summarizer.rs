//! Summarizer Client
//!
//! `POST {base}/summarize` with `{ log_text }`, answered by `{ summary }`.

use async_trait::async_trait;
use url::Url;

use log_insight_core::error::{ServiceResult, Stage};
use log_insight_core::service::Summarizer;

use crate::transport::JsonTransport;
use crate::types::{ClientBuildResult, ClientConfig, LogTextRequest, SummarizeResponse};

const SUMMARIZE_PATH: &str = "summarize";

/// HTTP client for the summarization service
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    transport: JsonTransport,
    endpoint: Url,
}

impl HttpSummarizer {
    pub fn new(config: &ClientConfig) -> ClientBuildResult<Self> {
        Self::with_transport(JsonTransport::new(config)?)
    }

    /// Reuse an existing transport (and its connection pool)
    pub fn with_transport(transport: JsonTransport) -> ClientBuildResult<Self> {
        let endpoint = transport.endpoint(SUMMARIZE_PATH)?;
        Ok(Self {
            transport,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, log_text: &str) -> ServiceResult<String> {
        tracing::debug!(bytes = log_text.len(), "requesting summary");
        let response: SummarizeResponse = self
            .transport
            .post_json(Stage::Summarize, &self.endpoint, &LogTextRequest { log_text })
            .await?;
        Ok(response.summary)
    }
}

//! Classifier Client
//!
//! `POST {base}/classify` with `{ log_text }`, answered by
//! `{ classification: { severity, probabilities } }`. The pipeline sends the
//! summary here, not the raw log.

use async_trait::async_trait;
use url::Url;

use log_insight_core::error::{ServiceError, ServiceResult, Stage};
use log_insight_core::model::Classification;
use log_insight_core::service::Classifier;

use crate::transport::JsonTransport;
use crate::types::{ClassifyResponse, ClientBuildResult, ClientConfig, LogTextRequest};

const CLASSIFY_PATH: &str = "classify";

/// HTTP client for the severity classification service
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    transport: JsonTransport,
    endpoint: Url,
}

impl HttpClassifier {
    pub fn new(config: &ClientConfig) -> ClientBuildResult<Self> {
        Self::with_transport(JsonTransport::new(config)?)
    }

    /// Reuse an existing transport (and its connection pool)
    pub fn with_transport(transport: JsonTransport) -> ClientBuildResult<Self> {
        let endpoint = transport.endpoint(CLASSIFY_PATH)?;
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
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> ServiceResult<Classification> {
        tracing::debug!(bytes = text.len(), "requesting classification");
        let response: ClassifyResponse = self
            .transport
            .post_json(Stage::Classify, &self.endpoint, &LogTextRequest { log_text: text })
            .await?;

        let classification = response.classification;
        classification
            .validate()
            .map_err(|msg| ServiceError::malformed(Stage::Classify, msg))?;
        Ok(classification)
    }
}

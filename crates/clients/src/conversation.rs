//! Conversation Client
//!
//! `POST {base}/chat` with `{ message }`, answered by `{ response }`. Each
//! turn stands alone; no history is sent.

use async_trait::async_trait;
use url::Url;

use log_insight_core::error::{ServiceResult, Stage};
use log_insight_core::service::ConversationAssistant;

use crate::transport::JsonTransport;
use crate::types::{ChatRequest, ChatResponse, ClientBuildResult, ClientConfig};

const CHAT_PATH: &str = "chat";

/// HTTP client for the conversation assistant
#[derive(Debug, Clone)]
pub struct HttpConversation {
    transport: JsonTransport,
    endpoint: Url,
}

impl HttpConversation {
    pub fn new(config: &ClientConfig) -> ClientBuildResult<Self> {
        Self::with_transport(JsonTransport::new(config)?)
    }

    /// Reuse an existing transport (and its connection pool)
    pub fn with_transport(transport: JsonTransport) -> ClientBuildResult<Self> {
        let endpoint = transport.endpoint(CHAT_PATH)?;
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
impl ConversationAssistant for HttpConversation {
    async fn reply(&self, message: &str) -> ServiceResult<String> {
        let response: ChatResponse = self
            .transport
            .post_json(Stage::Chat, &self.endpoint, &ChatRequest { message })
            .await?;
        Ok(response.response)
    }
}

//! Analysis Service Traits
//!
//! The three external services the orchestrators depend on. HTTP
//! implementations live in `log-insight-clients`; tests substitute
//! in-memory mocks.

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::model::Classification;

/// Produces a natural-language summary of raw log text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, log_text: &str) -> ServiceResult<String>;
}

/// Assigns a severity and per-label probabilities to a piece of text.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> ServiceResult<Classification>;
}

/// Answers a single chat message. Stateless per turn: no transcript is sent.
#[async_trait]
pub trait ConversationAssistant: Send + Sync {
    async fn reply(&self, message: &str) -> ServiceResult<String>;
}

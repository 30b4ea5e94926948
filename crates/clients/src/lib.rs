//! Log Insight Clients
//!
//! HTTP adapters for the three analysis services:
//! - Summarizer (`/summarize`)
//! - Classifier (`/classify`)
//! - Conversation assistant (`/chat`)
//!
//! All three share one `JsonTransport` (base URL, timeout, proxy, bounded
//! retry) built from an injected `ClientConfig`.

pub mod classifier;
pub mod conversation;
pub mod http_client;
pub mod summarizer;
pub mod transport;
pub mod types;

use std::sync::Arc;

// Re-export main types
pub use classifier::HttpClassifier;
pub use conversation::HttpConversation;
pub use http_client::build_http_client;
pub use summarizer::HttpSummarizer;
pub use transport::JsonTransport;
pub use types::*;

/// The three service clients, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct ServiceClients {
    pub summarizer: Arc<HttpSummarizer>,
    pub classifier: Arc<HttpClassifier>,
    pub conversation: Arc<HttpConversation>,
}

impl ServiceClients {
    pub fn connect(config: &ClientConfig) -> ClientBuildResult<Self> {
        let transport = JsonTransport::new(config)?;
        tracing::debug!(base_url = %transport.base_url(), "service clients configured");
        Ok(Self {
            summarizer: Arc::new(HttpSummarizer::with_transport(transport.clone())?),
            classifier: Arc::new(HttpClassifier::with_transport(transport.clone())?),
            conversation: Arc::new(HttpConversation::with_transport(transport)?),
        })
    }
}

//! Application State
//!
//! One analysis pipeline and one chat session wired to the configured
//! service clients. Lives for a single CLI session.

use std::sync::Arc;

use log_insight_clients::ServiceClients;
use log_insight_core::{Classifier, ConversationAssistant, Summarizer};

use crate::models::settings::AppConfig;
use crate::services::chat::ChatSession;
use crate::services::pipeline::PipelineOrchestrator;
use crate::utils::error::{AppError, AppResult};

/// Session-scoped services
pub struct AppState {
    config: AppConfig,
    pipeline: PipelineOrchestrator,
    chat: ChatSession,
}

impl AppState {
    /// Validate `config` and connect HTTP clients to its backend
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;
        let clients = ServiceClients::connect(&config.client_config())?;
        tracing::info!(backend_url = %config.backend_url, "analysis services configured");

        Ok(Self::with_services(
            config,
            clients.summarizer,
            clients.classifier,
            clients.conversation,
        ))
    }

    /// Build the state around explicit service implementations
    pub fn with_services(
        config: AppConfig,
        summarizer: Arc<dyn Summarizer>,
        classifier: Arc<dyn Classifier>,
        assistant: Arc<dyn ConversationAssistant>,
    ) -> Self {
        let pipeline =
            PipelineOrchestrator::new(summarizer, classifier, config.keyword_extractor());
        let chat = ChatSession::new(assistant, config.min_response_delay());
        Self {
            config,
            pipeline,
            chat,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &PipelineOrchestrator {
        &self.pipeline
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }
}

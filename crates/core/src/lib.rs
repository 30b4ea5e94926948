//! Log Insight Core
//!
//! Data model, error types, service traits and keyword extraction shared by
//! the Log Insight workspace. This crate has no dependency on HTTP, the CLI,
//! or any other workspace crate.
//!
//! ## Module Organization
//!
//! - `error` - Service failure type (`ServiceError`, `Stage`, `ErrorCause`)
//! - `model` - Log input, analysis result, pipeline status and chat turn types
//! - `keywords` - Critical keyword ranking (`KeywordExtractor`)
//! - `service` - Async traits for the summarize, classify and chat services
//! - `proxy` - Proxy configuration data types used by the HTTP client factory

pub mod error;
pub mod keywords;
pub mod model;
pub mod proxy;
pub mod service;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{ErrorCause, ServiceError, ServiceResult, Stage};

// ── Data Model ─────────────────────────────────────────────────────────
pub use model::{
    AnalysisResult, ChatRole, ChatTurn, Classification, InputSource, KeywordHit, LogInput,
    PipelineSnapshot, PipelineStatus,
};

// ── Keyword Extraction ─────────────────────────────────────────────────
pub use keywords::{extract_keywords, KeywordExtractor, DEFAULT_KEYWORD_LIMIT, DEFAULT_VOCABULARY};

// ── Service Traits ─────────────────────────────────────────────────────
pub use service::{Classifier, ConversationAssistant, Summarizer};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};

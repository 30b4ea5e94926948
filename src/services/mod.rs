//! Services
//!
//! Business logic for the application: the analysis pipeline, the chat
//! session, log file ingestion and the reference backend.
//! Services are called by commands.

pub mod backend;
pub mod chat;
pub mod ingest;
pub mod pipeline;

pub use chat::{ChatSession, TurnOutcome};
pub use pipeline::{PipelineOrchestrator, RunOutcome};

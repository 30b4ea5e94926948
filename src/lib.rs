//! Log Insight - Application Library
//!
//! Log analysis pipeline and network assistant chat. It includes:
//! - CLI command handlers
//! - Business logic services (pipeline, chat session, reference backend)
//! - Storage layer (JSON config)
//! - Settings models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::{run, Cli, Command};
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::{ChatSession, PipelineOrchestrator, RunOutcome, TurnOutcome};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};

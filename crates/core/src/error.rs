//! Core Error Types
//!
//! Defines the failure type shared by every analysis service round trip.
//! A `ServiceError` names the stage that failed (summarize, classify, chat)
//! and why (network or malformed response), so orchestrators can decide
//! whether a failure aborts a run or only degrades it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which service round trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Summarize,
    Classify,
    Chat,
}

impl Stage {
    /// Human-readable description of the attempted operation.
    pub fn operation(&self) -> &'static str {
        match self {
            Stage::Summarize => "summarizing the log",
            Stage::Classify => "classifying the log summary",
            Stage::Chat => "contacting the assistant",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Summarize => write!(f, "summarize"),
            Stage::Classify => write!(f, "classify"),
            Stage::Chat => write!(f, "chat"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summarize" => Ok(Stage::Summarize),
            "classify" => Ok(Stage::Classify),
            "chat" => Ok(Stage::Chat),
            _ => Err(format!("Unknown service stage: {}", s)),
        }
    }
}

/// Why a service round trip failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCause {
    /// Connection failure, timeout, or a non-success HTTP status
    Network {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
    /// The service answered but the body did not match the contract
    MalformedResponse { message: String },
}

impl std::fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCause::Network {
                message,
                status: Some(status),
            } => write!(f, "network error (HTTP {}): {}", status, message),
            ErrorCause::Network {
                message,
                status: None,
            } => write!(f, "network error: {}", message),
            ErrorCause::MalformedResponse { message } => {
                write!(f, "malformed response: {}", message)
            }
        }
    }
}

/// A failed request to one of the analysis services.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{stage} request failed: {cause}")]
pub struct ServiceError {
    pub stage: Stage,
    pub cause: ErrorCause,
}

/// Result type alias for service round trips
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Create a network error without an HTTP status (connect failure, timeout)
    pub fn network(stage: Stage, msg: impl Into<String>) -> Self {
        Self {
            stage,
            cause: ErrorCause::Network {
                message: msg.into(),
                status: None,
            },
        }
    }

    /// Create a network error for a non-success HTTP status
    pub fn http_status(stage: Stage, status: u16, body: impl Into<String>) -> Self {
        Self {
            stage,
            cause: ErrorCause::Network {
                message: body.into(),
                status: Some(status),
            },
        }
    }

    /// Create a malformed-response error
    pub fn malformed(stage: Stage, msg: impl Into<String>) -> Self {
        Self {
            stage,
            cause: ErrorCause::MalformedResponse {
                message: msg.into(),
            },
        }
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Connection failures, timeouts, 429 and 5xx are transient; other
    /// statuses and malformed bodies are not.
    pub fn is_transient(&self) -> bool {
        match &self.cause {
            ErrorCause::Network { status: None, .. } => true,
            ErrorCause::Network {
                status: Some(status),
                ..
            } => *status == 429 || (500..=599).contains(status),
            ErrorCause::MalformedResponse { .. } => false,
        }
    }

    /// Notice suitable for showing to the operator.
    pub fn user_notice(&self) -> String {
        format!("Something went wrong while {}: {}", self.stage.operation(), self.cause)
    }
}

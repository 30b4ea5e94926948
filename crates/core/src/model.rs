//! Data Model
//!
//! Values produced and consumed by the analysis pipeline and the chat
//! session. Everything here is plain data: orchestrators own the mutable
//! state and publish these values by whole replacement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

// ============================================================================
// Log input
// ============================================================================

/// Where a piece of log text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSource {
    /// Read from a user-selected file
    Uploaded { file_name: String },
    /// Typed or pasted into the edit area
    Pasted,
}

/// Raw log text under analysis. Superseded wholesale by the next input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInput {
    pub text: String,
    pub source: InputSource,
}

impl LogInput {
    /// Create an input read from a file
    pub fn uploaded(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: InputSource::Uploaded {
                file_name: file_name.into(),
            },
        }
    }

    /// Create an input from pasted text
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: InputSource::Pasted,
        }
    }

    /// True when there is nothing to analyze.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ============================================================================
// Analysis results
// ============================================================================

/// One entry of the critical keyword ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub count: u32,
}

impl KeywordHit {
    pub fn new(keyword: impl Into<String>, count: u32) -> Self {
        Self {
            keyword: keyword.into(),
            count,
        }
    }
}

/// Severity verdict reported by the classifier service.
///
/// `severity` and `probabilities` are reported independently; the severity
/// is not required to be the most probable label and probabilities are not
/// required to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub severity: String,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
}

impl Classification {
    pub fn new(severity: impl Into<String>) -> Self {
        Self {
            severity: severity.into(),
            probabilities: BTreeMap::new(),
        }
    }

    /// Add a label probability
    pub fn with_probability(mut self, label: impl Into<String>, probability: f64) -> Self {
        self.probabilities.insert(label.into(), probability);
        self
    }

    /// Check that every probability is a finite number in [0, 1].
    pub fn validate(&self) -> Result<(), String> {
        for (label, p) in &self.probabilities {
            if !p.is_finite() || !(0.0..=1.0).contains(p) {
                return Err(format!(
                    "probability for '{}' must be within [0, 1], got {}",
                    label, p
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of one completed pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    /// `None` when the classify stage failed
    pub classification: Option<Classification>,
    pub keywords: Vec<KeywordHit>,
    /// Why `classification` is missing, if it is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_error: Option<ServiceError>,
    /// Completion time (Unix timestamp)
    pub completed_at: i64,
}

// ============================================================================
// Pipeline status
// ============================================================================

/// Lifecycle of the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed {
        reason: String,
    },
}

impl PipelineStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, PipelineStatus::Running)
    }

    /// Check if a run has finished, successfully or not
    pub fn is_finished(&self) -> bool {
        matches!(self, PipelineStatus::Succeeded | PipelineStatus::Failed { .. })
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStatus::Idle => write!(f, "idle"),
            PipelineStatus::Running => write!(f, "running"),
            PipelineStatus::Succeeded => write!(f, "succeeded"),
            PipelineStatus::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Everything the pipeline publishes, replaced as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PipelineSnapshot {
    /// Generation of the run that last wrote this snapshot
    pub generation: u64,
    pub status: PipelineStatus,
    pub input: Option<LogInput>,
    pub result: Option<AnalysisResult>,
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

//! Evaluation errors.

use crate::case::CaseId;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while managing, scoring or exporting test cases.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Export could not be handed to the host.
    #[error("Failed to export '{file_name}': {message}")]
    Export {
        /// Target file name.
        file_name: String,
        /// Error message.
        message: String,
    },

    /// A field name that is not one of the editable text fields.
    #[error("Unknown or read-only field: {0}")]
    UnknownField(String),

    /// Scorer error.
    #[error("Scorer '{scorer}' failed: {message}")]
    ScorerFailed {
        /// Scorer name.
        scorer: String,
        /// Error message.
        message: String,
    },

    /// Scoring a single case took too long.
    #[error("Scoring test case {id} exceeded timeout of {after:?}")]
    Timeout {
        /// Case that timed out.
        id: CaseId,
        /// Configured timeout.
        after: Duration,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Other error.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl EvalError {
    /// Create an export error.
    pub fn export(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Export {
            file_name: file_name.into(),
            message: message.into(),
        }
    }

    /// Create a scorer failed error.
    pub fn scorer_failed(scorer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ScorerFailed {
            scorer: scorer.into(),
            message: message.into(),
        }
    }

    /// Create an unknown field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }
}

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;

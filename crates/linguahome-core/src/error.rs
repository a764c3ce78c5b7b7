// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the LinguaHome request pipeline.

use thiserror::Error;

/// The primary error type used across the LinguaHome crates.
///
/// Every variant except [`LinguaError::Storage`] is converted into a failure
/// response at the pipeline boundary. Storage errors come from the memory
/// directory and are treated as fatal.
#[derive(Debug, Error)]
pub enum LinguaError {
    /// Configuration errors (missing credentials, unsupported model, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Generated code was rejected before execution.
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// Generated code faulted while running.
    #[error("execution error: {message}")]
    Execution { message: String },

    /// Generated code exceeded its wall-clock budget.
    #[error("execution timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Upstream model failures (network, rate limit, invalid model, bad payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Memory directory I/O failures.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LinguaError {
    /// Builds a provider error without an underlying cause.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for errors that must escape the pipeline instead of
    /// being folded into a failure response.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

impl From<std::io::Error> for LinguaError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage {
            source: Box::new(e),
        }
    }
}

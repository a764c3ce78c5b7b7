// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the pipeline, the gateway, and the sandbox.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LinguaError;

/// Unique identifier for a conversation session (one per user or channel).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Speaker of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role/content message exchanged with a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Builds usage from prompt/completion counts, deriving the total.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// A fully resolved completion request handed to a provider adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Canonical model identifier (aliases already resolved).
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A single text completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: String,
    /// Model identifier as reported by the provider.
    pub model_used: String,
    pub usage: TokenUsage,
}

/// Why an execution did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionFailure {
    /// The code never ran: lexical scan or parse rejected it.
    Rejected,
    /// The code faulted while running.
    Fault,
    /// The code exceeded its wall-clock budget.
    Timeout,
}

/// Outcome of running generated code.
///
/// `success == false` does not imply an empty `stdout`: whatever was printed
/// before the fault is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub failure: Option<ExecutionFailure>,
}

impl ExecutionResult {
    pub fn completed(stdout: String, stderr: String) -> Self {
        Self {
            success: true,
            stdout,
            stderr,
            failure: None,
        }
    }

    pub fn failed(failure: ExecutionFailure, stdout: String, stderr: String) -> Self {
        Self {
            success: false,
            stdout,
            stderr,
            failure: Some(failure),
        }
    }

    /// The error this outcome represents, if any. `timeout` is the budget
    /// the code ran under.
    pub fn error(&self, timeout: Duration) -> Option<LinguaError> {
        let message = self.stderr.trim().to_string();
        Some(match self.failure? {
            ExecutionFailure::Rejected => LinguaError::Validation { reason: message },
            ExecutionFailure::Fault => LinguaError::Execution { message },
            ExecutionFailure::Timeout => LinguaError::Timeout { duration: timeout },
        })
    }
}

/// What the pipeline hands back to a transport adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResponse {
    pub message: String,
    pub generated_code: Option<String>,
    pub code_executed: bool,
    pub success: bool,
}

impl AgentResponse {
    /// A failure response carrying only an error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            generated_code: None,
            code_executed: false,
            success: false,
        }
    }
}

// --- Home capability types ---

/// A single sensor reading as exposed to generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: i64,
    pub name: String,
    /// Raw textual value, e.g. `"23.9"`.
    pub value: String,
    pub status: String,
    pub location: String,
    pub sensor_type: String,
}

/// Result of an actuator command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActuatorOutcome {
    pub fn applied(state: impl Into<String>) -> Self {
        Self {
            success: true,
            state: Some(state.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            state: None,
            error: Some(error.into()),
        }
    }
}

/// One event from the home event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub timestamp: String,
    pub device: String,
    pub event: String,
}

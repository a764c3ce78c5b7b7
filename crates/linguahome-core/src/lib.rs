// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for LinguaHome.
//!
//! Provides the error taxonomy, the message/result types that flow through
//! the request pipeline, and the adapter traits for model providers and
//! home-automation backends.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LinguaError;
pub use traits::{ChatProvider, HomeCapabilities};
pub use types::{
    ActuatorOutcome, AgentResponse, ChatRequest, ChatResponse, ExecutionFailure,
    ExecutionResult, HistoryEvent, Message, Role, SensorReading, SessionId, TokenUsage,
};

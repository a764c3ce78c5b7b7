// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for chat-completion backends (OpenAI, Anthropic, Gemini).

use async_trait::async_trait;

use crate::error::LinguaError;
use crate::types::{ChatRequest, ChatResponse};

/// Adapter for a chat-completion API.
///
/// Implementations translate a role/content message sequence into a single
/// text completion. They must not retry: retry and backoff policy belongs to
/// the caller.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short provider name used in logs (e.g. "openai").
    fn name(&self) -> &str;

    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, LinguaError>;
}

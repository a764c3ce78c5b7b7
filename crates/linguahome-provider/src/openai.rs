// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions adapter.

use std::time::Duration;

use async_trait::async_trait;
use linguahome_core::{ChatProvider, ChatRequest, ChatResponse, LinguaError, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, join_url, post_json};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: String,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Calls `POST /v1/chat/completions` with bearer authentication.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, base_url: Option<&str>, timeout: Duration) -> Result<Self, LinguaError> {
        let bearer = format!("Bearer {api_key}");
        let client = build_client(&[("authorization", bearer.as_str())], timeout)?;
        Ok(Self {
            client,
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, LinguaError> {
        let body = CompletionRequest {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = join_url(&self.base_url, "/v1/chat/completions");
        debug!(model = %request.model, messages = body.messages.len(), "sending OpenAI request");
        let response: CompletionResponse = post_json(&self.client, &url, &body, "OpenAI").await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LinguaError::provider("OpenAI response contained no choices"))?
            .message
            .content
            .unwrap_or_default();
        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(ChatResponse {
            content,
            model_used: response.model.unwrap_or_else(|| request.model.clone()),
            usage,
        })
    }
}

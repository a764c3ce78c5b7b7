// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API adapter.
//!
//! The Messages API takes the system prompt as a top-level field, so system
//! messages are lifted out of the conversation before sending.

use std::time::Duration;

use async_trait::async_trait;
use linguahome_core::{ChatProvider, ChatRequest, ChatResponse, LinguaError, Role, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, join_url, post_json};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value.
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    model: Option<String>,
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Calls `POST /v1/messages` with `x-api-key` authentication.
#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: &str, base_url: Option<&str>, timeout: Duration) -> Result<Self, LinguaError> {
        let client = build_client(
            &[("x-api-key", api_key), ("anthropic-version", API_VERSION)],
            timeout,
        )?;
        Ok(Self {
            client,
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
        })
    }
}

/// Splits system messages from the turn sequence. Multiple system messages
/// are joined with a blank line.
fn split_system(request: &ChatRequest) -> (Option<String>, Vec<WireMessage<'_>>) {
    let mut system = Vec::new();
    let mut turns = Vec::new();
    for message in &request.messages {
        match message.role {
            Role::System => system.push(message.content.as_str()),
            Role::User => turns.push(WireMessage {
                role: "user",
                content: &message.content,
            }),
            Role::Assistant => turns.push(WireMessage {
                role: "assistant",
                content: &message.content,
            }),
        }
    }
    let system = (!system.is_empty()).then(|| system.join("\n\n"));
    (system, turns)
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, LinguaError> {
        let (system, messages) = split_system(&request);
        let body = MessageRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system,
            messages,
        };

        let url = join_url(&self.base_url, "/v1/messages");
        debug!(model = %request.model, "sending Anthropic request");
        let response: MessageResponse = post_json(&self.client, &url, &body, "Anthropic").await?;

        let content = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(ChatResponse {
            content,
            model_used: response.model.unwrap_or_else(|| request.model.clone()),
            usage: TokenUsage::new(response.usage.input_tokens, response.usage.output_tokens),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguahome_core::Message;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest {
            model: "claude-3-5-sonnet-20241022".into(),
            messages: vec![
                Message::system("You control a home."),
                Message::user("lights?"),
                Message::assistant("All off."),
                Message::user("turn on plug_0"),
            ],
            temperature: 0.1,
            max_tokens: 1024,
        }
    }

    #[test]
    fn system_messages_are_lifted() {
        let req = request();
        let (system, turns) = split_system(&req);
        assert_eq!(system.as_deref(), Some("You control a home."));
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, "user");
        assert_eq!(turns[1].role, "assistant");
    }

    #[tokio::test]
    async fn completes_with_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "system": "You control a home.",
                "max_tokens": 1024
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-5-sonnet-20241022",
                "content": [
                    {"type": "text", "text": "```rhai\n"},
                    {"type": "text", "text": "print(1);\n```"}
                ],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 40, "output_tokens": 9}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            AnthropicProvider::new("sk-ant-test", Some(&server.uri()), Duration::from_secs(5)).unwrap();
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "```rhai\nprint(1);\n```");
        assert_eq!(response.usage, TokenUsage::new(40, 9));
    }

    #[tokio::test]
    async fn overloaded_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let provider =
            AnthropicProvider::new("sk-ant-test", Some(&server.uri()), Duration::from_secs(5)).unwrap();
        let err = provider.complete(request()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "provider error: Anthropic API error (overloaded_error): Overloaded"
        );
    }
}

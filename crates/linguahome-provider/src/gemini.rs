// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini `generateContent` adapter.

use std::time::Duration;

use async_trait::async_trait;
use linguahome_core::{ChatProvider, ChatRequest, ChatResponse, LinguaError, Role, TokenUsage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, join_url, post_json};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// Strips the `gemini/` routing prefix used in canonical model names.
pub(crate) fn api_model_name(model: &str) -> &str {
    model.strip_prefix("gemini/").unwrap_or(model)
}

/// Calls `POST /v1beta/models/{model}:generateContent` with `x-goog-api-key`.
#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, base_url: Option<&str>, timeout: Duration) -> Result<Self, LinguaError> {
        let client = build_client(&[("x-goog-api-key", api_key)], timeout)?;
        Ok(Self {
            client,
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
        })
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, LinguaError> {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();
        for message in &request.messages {
            let part = Part {
                text: &message.content,
            };
            match message.role {
                Role::System => system_parts.push(part),
                Role::User => contents.push(Content {
                    role: "user",
                    parts: vec![part],
                }),
                Role::Assistant => contents.push(Content {
                    role: "model",
                    parts: vec![part],
                }),
            }
        }

        let body = GenerateRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then_some(SystemInstruction {
                parts: system_parts,
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let model = api_model_name(&request.model);
        let url = join_url(&self.base_url, &format!("/v1beta/models/{model}:generateContent"));
        debug!(model, "sending Gemini request");
        let response: GenerateResponse = post_json(&self.client, &url, &body, "Gemini").await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LinguaError::provider("Gemini response contained no candidates"))?;
        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        let usage = response
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(ChatResponse {
            content,
            model_used: response
                .model_version
                .unwrap_or_else(|| request.model.clone()),
            usage,
        })
    }
}

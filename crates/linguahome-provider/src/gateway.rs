// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-agnostic chat gateway.
//!
//! [`LlmGateway`] resolves the configured model alias, picks the provider
//! from the canonical name and checks its credential up front, so a missing
//! key fails at construction rather than on the first request.

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use linguahome_config::LlmConfig;
use linguahome_core::{ChatProvider, ChatRequest, ChatResponse, LinguaError, Message};
use tokio::runtime::{Handle, Runtime};
use tracing::{info, warn};

use crate::anthropic::AnthropicProvider;
use crate::gemini::GeminiProvider;
use crate::models::{ProviderKind, resolve_model};
use crate::openai::OpenAiProvider;

/// Environment variables consulted when the config carries no key, in order.
fn credential_env_vars(kind: ProviderKind) -> &'static [&'static str] {
    match kind {
        ProviderKind::OpenAi => &["OPENAI_API_KEY"],
        ProviderKind::Anthropic => &["ANTHROPIC_API_KEY"],
        ProviderKind::Google => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
    }
}

/// Resolves the API key for `kind`: config value, then environment, then error.
///
/// Empty strings count as absent.
pub fn resolve_api_key(
    kind: ProviderKind,
    config: &LlmConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String, LinguaError> {
    let configured = match kind {
        ProviderKind::OpenAi => config.openai_api_key.as_deref(),
        ProviderKind::Anthropic => config.anthropic_api_key.as_deref(),
        ProviderKind::Google => config.gemini_api_key.as_deref(),
    };
    if let Some(key) = configured.filter(|k| !k.trim().is_empty()) {
        return Ok(key.to_string());
    }

    let vars = credential_env_vars(kind);
    vars.iter()
        .find_map(|var| env(var).filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| {
            LinguaError::Config(format!(
                "no API key for {kind}: set llm.{}_api_key or {}",
                match kind {
                    ProviderKind::OpenAi => "openai",
                    ProviderKind::Anthropic => "anthropic",
                    ProviderKind::Google => "gemini",
                },
                vars.join(" / ")
            ))
        })
}

/// Runtime used by the blocking [`LlmGateway::chat`] path.
fn blocking_runtime() -> Result<&'static Runtime, LinguaError> {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    if let Some(rt) = RUNTIME.get() {
        return Ok(rt);
    }
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("linguahome-llm")
        .enable_all()
        .build()
        .map_err(|e| LinguaError::Internal(format!("failed to start LLM runtime: {e}")))?;
    Ok(RUNTIME.get_or_init(|| rt))
}

/// Sends message sequences to the configured model and returns one completion.
///
/// No retries: a failed call surfaces as [`LinguaError::Provider`] and the
/// caller decides what to do.
#[derive(Clone)]
pub struct LlmGateway {
    provider: Arc<dyn ChatProvider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmGateway {
    /// Builds a gateway from configuration, reading credentials from the
    /// process environment when the config has none.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LinguaError> {
        Self::from_config_with_env(config, |var| std::env::var(var).ok())
    }

    /// Like [`from_config`](Self::from_config) with an explicit environment lookup.
    pub fn from_config_with_env(
        config: &LlmConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, LinguaError> {
        let model = resolve_model(&config.model);
        let kind = ProviderKind::for_model(&model).ok_or_else(|| {
            LinguaError::Config(format!(
                "unsupported model '{model}': expected a gpt-, o1-, claude- or gemini model"
            ))
        })?;
        let api_key = resolve_api_key(kind, config, env)?;
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let provider: Arc<dyn ChatProvider> = match kind {
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                &api_key,
                config.openai_base_url.as_deref(),
                timeout,
            )?),
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
                &api_key,
                config.anthropic_base_url.as_deref(),
                timeout,
            )?),
            ProviderKind::Google => Arc::new(GeminiProvider::new(
                &api_key,
                config.gemini_base_url.as_deref(),
                timeout,
            )?),
        };

        info!(model = %model, provider = %kind, "LLM gateway initialized");
        Ok(Self {
            provider,
            model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Wraps an existing provider. The model name is still alias-resolved.
    pub fn with_provider(
        provider: Arc<dyn ChatProvider>,
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            provider,
            model: resolve_model(model),
            temperature,
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Name of the provider serving [`model`](Self::model).
    pub fn provider(&self) -> &str {
        self.provider.name()
    }

    /// Blocking chat call.
    ///
    /// Must not be called from inside a Tokio runtime; use
    /// [`chat_async`](Self::chat_async) there.
    pub fn chat(
        &self,
        messages: &[Message],
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<ChatResponse, LinguaError> {
        if Handle::try_current().is_ok() {
            return Err(LinguaError::Internal(
                "blocking chat called inside an async runtime; use chat_async".into(),
            ));
        }
        blocking_runtime()?.block_on(self.chat_async(messages, temperature, max_tokens))
    }

    /// Async chat call; yields while the request is in flight.
    pub async fn chat_async(
        &self,
        messages: &[Message],
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<ChatResponse, LinguaError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: temperature.unwrap_or(self.temperature),
            max_tokens: max_tokens.unwrap_or(self.max_tokens),
        };

        let started = Instant::now();
        match self.provider.complete(request).await {
            Ok(response) => {
                info!(
                    model = %response.model_used,
                    provider = self.provider.name(),
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "model call completed"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    model = %self.model,
                    provider = self.provider.name(),
                    error = %e,
                    "model call failed"
                );
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for LlmGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmGateway")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

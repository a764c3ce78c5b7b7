// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM gateway for LinguaHome.
//!
//! [`LlmGateway`] turns a message sequence into one text completion from
//! OpenAI, Anthropic or Google Gemini, chosen by the canonical model name.

pub mod anthropic;
pub mod gateway;
pub mod gemini;
mod http;
pub mod models;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use gateway::{LlmGateway, resolve_api_key};
pub use gemini::GeminiProvider;
pub use models::{MODEL_ALIASES, ProviderKind, list_supported_models, resolve_model};
pub use openai::OpenAiProvider;

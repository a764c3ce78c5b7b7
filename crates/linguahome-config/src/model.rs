// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for LinguaHome.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level LinguaHome configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LinguaConfig {
    /// Agent identity, logging, and workspace settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Model selection and provider credentials.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Generated-code execution limits.
    #[serde(default)]
    pub sandbox: SandboxConfig,

    /// Per-session pipeline registry settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl LinguaConfig {
    /// Returns a copy with every credential replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for key in [
            &mut config.llm.openai_api_key,
            &mut config.llm.anthropic_api_key,
            &mut config.llm.gemini_api_key,
        ] {
            if key.is_some() {
                *key = Some("<redacted>".to_string());
            }
        }
        config
    }
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory that holds the `memory/` folder.
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Number of conversation entries replayed into each prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            workspace: default_workspace(),
            history_window: default_history_window(),
        }
    }
}

fn default_agent_name() -> String {
    "linguahome".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

fn default_history_window() -> usize {
    10
}

/// Model and provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Model name or alias (e.g. `gpt-4o`, `claude`, `gemini`).
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature sent with every request.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Completion token cap sent with every request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP request timeout for provider calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// OpenAI API key. `None` falls back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub anthropic_api_key: Option<String>,

    /// Gemini API key. `None` falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Override for the OpenAI API base URL.
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// Override for the Anthropic API base URL.
    #[serde(default)]
    pub anthropic_base_url: Option<String>,

    /// Override for the Gemini API base URL.
    #[serde(default)]
    pub gemini_base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            openai_api_key: None,
            anthropic_api_key: None,
            gemini_api_key: None,
            openai_base_url: None,
            anthropic_base_url: None,
            gemini_base_url: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_request_timeout_secs() -> u64 {
    120
}

/// Generated-code sandbox configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SandboxConfig {
    /// Wall-clock budget per execution, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Run the deny-list scan before parsing. The parse check always runs.
    #[serde(default = "default_safe_mode")]
    pub safe_mode: bool,

    /// Hard cap on interpreter operations. `None` leaves only the timeout.
    #[serde(default)]
    pub max_operations: Option<u64>,

    /// Maximum bytes captured from each of stdout and stderr.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            safe_mode: default_safe_mode(),
            max_operations: None,
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_safe_mode() -> bool {
    true
}

fn default_max_output_bytes() -> usize {
    1024 * 1024
}

/// Session registry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Upper bound on live sessions. `None` keeps every session.
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

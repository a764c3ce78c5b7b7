// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./linguahome.toml` > `~/.config/linguahome/linguahome.toml`
//! > `/etc/linguahome/linguahome.toml` with environment variable overrides via
//! the `LINGUAHOME_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LinguaConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/linguahome/linguahome.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "linguahome.toml";
pub(crate) const USER_CONFIG_SUFFIX: &str = "linguahome/linguahome.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/linguahome/linguahome.toml` (system-wide)
/// 3. `~/.config/linguahome/linguahome.toml` (user XDG config)
/// 4. `./linguahome.toml` (local directory)
/// 5. `LINGUAHOME_*` environment variables
pub fn load_config() -> Result<LinguaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LinguaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LinguaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LinguaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LinguaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LinguaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join(USER_CONFIG_SUFFIX))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LINGUAHOME_LLM_OPENAI_API_KEY` must map to
/// `llm.openai_api_key`, not `llm.openai.api.key`. The bare
/// `LINGUAHOME_MODEL` maps to `llm.model`.
fn env_provider() -> Env {
    Env::prefixed("LINGUAHOME_").map(|key| {
        let key_str = key.as_str();
        if key_str == "model" {
            return "llm.model".into();
        }
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("llm_", "llm.", 1)
            .replacen("sandbox_", "sandbox.", 1)
            .replacen("session_", "session.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_env_var_maps_to_llm_section() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LINGUAHOME_MODEL", "claude");
            jail.set_env("LINGUAHOME_SANDBOX_TIMEOUT_SECS", "5");
            let config: LinguaConfig = Figment::new()
                .merge(Serialized::defaults(LinguaConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.llm.model, "claude");
            assert_eq!(config.sandbox.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn underscore_keys_keep_their_name() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LINGUAHOME_LLM_OPENAI_API_KEY", "sk-test");
            jail.set_env("LINGUAHOME_AGENT_HISTORY_WINDOW", "4");
            let config: LinguaConfig = Figment::new()
                .merge(Serialized::defaults(LinguaConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.llm.openai_api_key.as_deref(), Some("sk-test"));
            assert_eq!(config.agent.history_window, 4);
            Ok(())
        });
    }

    #[test]
    fn local_file_is_merged_from_working_directory() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_PATH,
                r#"
[llm]
model = "gemini"
"#,
            )?;
            let config: LinguaConfig = Figment::new()
                .merge(Serialized::defaults(LinguaConfig::default()))
                .merge(Toml::file(LOCAL_CONFIG_PATH))
                .extract()?;
            assert_eq!(config.llm.model, "gemini");
            Ok(())
        });
    }
}

// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: non-empty
//! paths, value ranges, and positive budgets.

use crate::diagnostic::ConfigError;
use crate::model::LinguaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LinguaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.agent.workspace.as_os_str().is_empty() {
        fail("agent.workspace must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.to_ascii_lowercase().as_str()) {
        fail(format!(
            "agent.log_level `{}` must be one of: {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.agent.history_window == 0 {
        fail("agent.history_window must be at least 1".to_string());
    }

    if config.llm.model.trim().is_empty() {
        fail("llm.model must not be empty".to_string());
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        fail(format!(
            "llm.temperature must be between 0.0 and 2.0, got {}",
            config.llm.temperature
        ));
    }

    if config.llm.max_tokens == 0 {
        fail("llm.max_tokens must be greater than 0".to_string());
    }

    if config.llm.request_timeout_secs == 0 {
        fail("llm.request_timeout_secs must be greater than 0".to_string());
    }

    if config.sandbox.timeout_secs == 0 {
        fail("sandbox.timeout_secs must be greater than 0".to_string());
    }

    if config.sandbox.max_operations == Some(0) {
        fail("sandbox.max_operations must be greater than 0 when set".to_string());
    }

    if config.sandbox.max_output_bytes == 0 {
        fail("sandbox.max_output_bytes must be greater than 0".to_string());
    }

    if config.session.max_sessions == Some(0) {
        fail("session.max_sessions must be greater than 0 when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the LinguaHome configuration system.

use linguahome_config::diagnostic::ConfigError;
use linguahome_config::model::LinguaConfig;
use linguahome_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_lingua_config() {
    let toml = r#"
[agent]
name = "home-test"
log_level = "debug"
workspace = "/tmp/linguahome"
history_window = 6

[llm]
model = "claude"
temperature = 0.3
max_tokens = 2048
request_timeout_secs = 30
anthropic_api_key = "sk-ant-123"
anthropic_base_url = "http://localhost:9000"

[sandbox]
timeout_secs = 5
safe_mode = false
max_operations = 100000
max_output_bytes = 4096

[session]
max_sessions = 50
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "home-test");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.workspace.to_str(), Some("/tmp/linguahome"));
    assert_eq!(config.agent.history_window, 6);
    assert_eq!(config.llm.model, "claude");
    assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.llm.request_timeout_secs, 30);
    assert_eq!(config.llm.anthropic_api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(
        config.llm.anthropic_base_url.as_deref(),
        Some("http://localhost:9000")
    );
    assert_eq!(config.sandbox.timeout_secs, 5);
    assert!(!config.sandbox.safe_mode);
    assert_eq!(config.sandbox.max_operations, Some(100_000));
    assert_eq!(config.sandbox.max_output_bytes, 4096);
    assert_eq!(config.session.max_sessions, Some(50));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "linguahome");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.agent.history_window, 10);
    assert_eq!(config.llm.model, "gpt-4o");
    assert_eq!(config.llm.max_tokens, 4096);
    assert!(config.llm.openai_api_key.is_none());
    assert_eq!(config.sandbox.timeout_secs, 30);
    assert!(config.sandbox.safe_mode);
    assert!(config.sandbox.max_operations.is_none());
    assert_eq!(config.sandbox.max_output_bytes, 1024 * 1024);
    assert!(config.session.max_sessions.is_none());
}

/// Unknown field in [sandbox] produces an error mentioning the key.
#[test]
fn unknown_field_in_sandbox_produces_error() {
    let toml = r#"
[sandbox]
timout_secs = 5
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("timout_secs"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "abc"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Dot-notation overrides land in the right section (env var mapping target).
#[test]
fn dotted_override_sets_model() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: LinguaConfig = Figment::new()
        .merge(Serialized::defaults(LinguaConfig::default()))
        .merge(Toml::string("[llm]\nmodel = \"gpt-4o\"\n"))
        .merge(("llm.model", "gemini"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.llm.model, "gemini");
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: LinguaConfig = Figment::new()
        .merge(Serialized::defaults(LinguaConfig::default()))
        .merge(Toml::file("/nonexistent/path/linguahome.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.agent.name, "linguahome");
}

#[test]
fn diagnostic_error_includes_suggestion() {
    let toml = r#"
[llm]
modle = "claude"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(!errors.is_empty());
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "modle");
            assert_eq!(suggestion.as_deref(), Some("model"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[sandbox]
timeout_secs = "soon"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }))
    );
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::Validation {
        message: "sandbox.timeout_secs must be greater than 0".to_string(),
    };
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = &error;
    GraphicalReportHandler::new()
        .render_report(&mut buf, diagnostic)
        .expect("render should succeed");
    assert!(buf.contains("timeout_secs"));
}

#[test]
fn load_and_validate_rejects_semantic_errors() {
    let toml = r#"
[llm]
temperature = 5.0

[session]
max_sessions = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
}

#[test]
fn redacted_config_hides_keys() {
    let config = load_config_from_str(
        r#"
[llm]
openai_api_key = "sk-secret"
"#,
    )
    .unwrap();
    let redacted = config.redacted();
    assert_eq!(redacted.llm.openai_api_key.as_deref(), Some("<redacted>"));
    assert!(redacted.llm.gemini_api_key.is_none());
    let rendered = toml::to_string(&redacted).unwrap();
    assert!(!rendered.contains("sk-secret"));
}

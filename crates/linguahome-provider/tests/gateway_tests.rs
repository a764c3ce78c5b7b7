// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway tests against mocked provider endpoints.

use linguahome_config::LlmConfig;
use linguahome_core::{LinguaError, Message};
use linguahome_provider::LlmGateway;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "model": "gpt-4o",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

fn openai_config(base_url: String) -> LlmConfig {
    LlmConfig {
        model: "gpt4o".into(),
        openai_api_key: Some("sk-test".into()),
        openai_base_url: Some(base_url),
        ..LlmConfig::default()
    }
}

#[tokio::test]
async fn async_chat_applies_defaults_and_overrides() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "gpt-4o", "max_tokens": 64})))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply("hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = LlmGateway::from_config_with_env(&openai_config(server.uri()), |_| None).unwrap();
    assert_eq!(gateway.model(), "gpt-4o");
    assert_eq!(gateway.provider(), "openai");

    let response = gateway
        .chat_async(&[Message::user("hello")], Some(0.0), Some(64))
        .await
        .unwrap();
    assert_eq!(response.content, "hi there");
    assert_eq!(response.usage.total_tokens, 15);
}

#[tokio::test]
async fn upstream_failure_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {"message": "Rate limit reached", "type": "requests"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = LlmGateway::from_config_with_env(&openai_config(server.uri()), |_| None).unwrap();
    let err = gateway
        .chat_async(&[Message::user("hello")], None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, LinguaError::Provider { .. }));
    assert!(err.to_string().contains("Rate limit reached"));
}

#[test]
fn blocking_chat_works_outside_a_runtime() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply("sync ok")))
            .mount(&server),
    );

    let gateway = LlmGateway::from_config_with_env(&openai_config(server.uri()), |_| None).unwrap();
    let first = gateway.chat(&[Message::user("one")], None, None).unwrap();
    let second = gateway.chat(&[Message::user("two")], None, None).unwrap();
    assert_eq!(first.content, "sync ok");
    assert_eq!(second.content, "sync ok");
}

#[tokio::test]
async fn blocking_chat_refuses_to_run_inside_a_runtime() {
    let config = LlmConfig {
        openai_api_key: Some("sk".into()),
        ..LlmConfig::default()
    };
    let gateway = LlmGateway::from_config_with_env(&config, |_| None).unwrap();
    let err = gateway.chat(&[Message::user("x")], None, None).unwrap_err();
    assert!(matches!(err, LinguaError::Internal(_)));
}

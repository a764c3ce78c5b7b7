// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline tests with a scripted provider and the mock home.

use std::time::Duration;

use linguahome_agent::PipelineState;
use linguahome_core::{HomeCapabilities, Role};
use linguahome_test_utils::{TestHarness, rhai_reply};

const ROBOT_CORNER: &str =
    "let s = sensors.get_sensor(1078);\nprint(`Robot Corner: ${s.value}°C`);";

#[tokio::test]
async fn robot_corner_temperature_is_reported() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply(ROBOT_CORNER)])
        .build()
        .unwrap();

    let response = harness
        .send_message("What's the temperature in Robot Corner?")
        .await
        .unwrap();

    assert!(response.success, "{}", response.message);
    assert!(response.code_executed);
    assert!(response.message.contains("23.9"));
    assert_eq!(response.generated_code.as_deref(), Some(ROBOT_CORNER));
    assert_eq!(harness.pipeline.state(), PipelineState::Idle);

    let today = harness.memory.read_today().unwrap();
    assert!(today.contains("Command: What's the temperature in Robot Corner?"));
    assert!(today.contains("Result: Robot Corner: 23.9°C"));
}

#[tokio::test]
async fn import_os_is_never_executed() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply("import os\nprint(\"ran\");")])
        .build()
        .unwrap();

    let response = harness.send_message("list files").await.unwrap();

    assert!(!response.success);
    assert!(!response.code_executed);
    assert_eq!(
        response.message,
        "Code validation failed: Forbidden pattern detected: import os"
    );
    assert!(harness.memory.read_today().unwrap().is_empty());
}

#[tokio::test]
async fn reply_without_code_is_returned_verbatim() {
    let reply = "I can only help with your home devices.";
    let mut harness = TestHarness::builder().with_replies([reply]).build().unwrap();

    let response = harness.send_message("tell me a joke").await.unwrap();

    assert!(response.success);
    assert!(!response.code_executed);
    assert_eq!(response.generated_code, None);
    assert_eq!(response.message, reply);
}

#[tokio::test]
async fn runaway_code_times_out() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply("let i = 0;\nloop { i += 1; }")])
        .with_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let response = harness.send_message("count forever").await.unwrap();

    assert!(!response.success);
    assert!(response.code_executed);
    assert_eq!(
        response.message,
        "Code execution failed:\nExecution timed out after 0.2 seconds"
    );
}

#[tokio::test]
async fn fault_message_quotes_stderr() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply("print(\"partial\");\nthrow \"sensor offline\";")])
        .build()
        .unwrap();

    let response = harness.send_message("read sensor").await.unwrap();

    assert!(!response.success);
    assert!(response.code_executed);
    assert!(response.message.starts_with("Code execution failed:\n"));
    assert!(response.message.contains("sensor offline"));
}

#[tokio::test]
async fn silent_code_reports_no_output() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply("actuator.set_value(35, \"turnOn\", 1);")])
        .build()
        .unwrap();

    let response = harness.send_message("turn on the Robot Corner plug").await.unwrap();

    assert!(response.success);
    assert_eq!(response.message, "Command executed (no output)");
    assert_eq!(harness.home.get_state(35).unwrap(), Some(true));
}

#[tokio::test]
async fn provider_failure_becomes_error_response() {
    let mut harness = TestHarness::builder().build().unwrap();
    harness.provider.set_failure(Some("rate limited"));

    let response = harness.send_message("hello").await.unwrap();

    assert!(!response.success);
    assert!(!response.code_executed);
    assert!(response.message.starts_with("Error: "));
    assert!(response.message.contains("rate limited"));
    assert!(harness.pipeline.conversation().is_empty());
}

#[tokio::test]
async fn history_sent_to_model_stays_within_window() {
    let window = 10;
    let mut harness = TestHarness::builder()
        .with_history_window(window)
        .build()
        .unwrap();

    for i in 0..window + 5 {
        harness.send_message(&format!("message {i}")).await.unwrap();
    }

    let requests = harness.provider.requests();
    let last = requests.last().unwrap();
    assert_eq!(last.messages[0].role, Role::System);
    let non_system = last.messages.len() - 1;
    assert!(non_system <= window + 1, "sent {non_system} entries");
    assert!(last.messages.last().unwrap().content.contains("message 14"));
    // Storage keeps everything; only the prompt is windowed.
    assert_eq!(harness.pipeline.conversation().len(), 2 * (window + 5));
}

#[tokio::test]
async fn follow_up_sees_previous_turn() {
    let mut harness = TestHarness::builder()
        .with_replies(["Which room?", "Done."])
        .build()
        .unwrap();

    harness.send_message("turn on the lights").await.unwrap();
    harness.send_message("the lab").await.unwrap();

    let second = &harness.provider.requests()[1];
    let contents: Vec<&str> = second.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents[1], "turn on the lights");
    assert_eq!(contents[2], "Which room?");
    assert_eq!(second.messages[2].role, Role::Assistant);
}

#[tokio::test]
async fn reset_clears_history_but_keeps_memory() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply(ROBOT_CORNER)])
        .build()
        .unwrap();

    harness.send_message("Robot Corner temperature?").await.unwrap();
    assert_eq!(harness.pipeline.conversation().len(), 2);

    harness.pipeline.reset();
    assert!(harness.pipeline.conversation().is_empty());
    assert!(
        harness
            .memory
            .get_memory_context()
            .unwrap()
            .contains("Robot Corner temperature?")
    );

    harness.send_message("anything else?").await.unwrap();
    let last = harness.provider.requests().pop().unwrap();
    assert_eq!(last.messages.len(), 2);
    assert!(last.messages[0].content.contains("Context from Previous Sessions"));
    assert!(last.messages[0].content.contains("Robot Corner temperature?"));
}

#[tokio::test]
async fn unwritable_memory_is_fatal() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply(ROBOT_CORNER)])
        .build()
        .unwrap();
    std::fs::remove_dir_all(harness.memory.memory_dir()).unwrap();

    let err = harness.send_message("Robot Corner?").await.unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn blocking_path_matches_async_path() {
    let mut harness = TestHarness::builder()
        .with_replies([rhai_reply(ROBOT_CORNER), "plain text".to_string()])
        .build()
        .unwrap();

    let first = harness.send_message_blocking("Robot Corner?").unwrap();
    assert!(first.success);
    assert!(first.message.contains("23.9"));

    let second = harness.send_message_blocking("hi").unwrap();
    assert_eq!(second.message, "plain text");
    assert_eq!(second.generated_code, None);
}

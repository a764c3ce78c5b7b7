// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for LinguaHome integration tests.
//!
//! - [`MockProvider`] - scripted chat provider that records requests
//! - [`TestHarness`] - full pipeline over a temporary workspace

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::{DEFAULT_REPLY, MockProvider};

/// Wraps `code` in a tagged fence the way a model reply would.
pub fn rhai_reply(code: &str) -> String {
    format!("Here is the code:\n\n```rhai\n{code}\n```\n")
}

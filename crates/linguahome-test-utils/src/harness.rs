// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end pipeline tests.
//!
//! `TestHarness` assembles a full pipeline around a [`MockProvider`], the
//! mock home and a memory store in a temporary workspace.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use linguahome_agent::{AgentComponents, AgentPipeline};
use linguahome_core::{AgentResponse, LinguaError, SessionId};
use linguahome_home::MockHome;
use linguahome_memory::MemoryStore;
use linguahome_provider::LlmGateway;
use linguahome_sandbox::{CodeSandbox, SandboxLimits};

use crate::mock_provider::MockProvider;

/// Builder for configuring a [`TestHarness`].
#[derive(Debug)]
pub struct TestHarnessBuilder {
    replies: Vec<String>,
    limits: SandboxLimits,
    history_window: usize,
    model: String,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            limits: SandboxLimits::default(),
            history_window: 10,
            model: "gpt-4o".to_string(),
        }
    }

    /// Queue model replies, returned in order.
    pub fn with_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies = replies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.limits.timeout = timeout;
        self
    }

    pub fn with_limits(mut self, limits: SandboxLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Build the harness, creating the temporary workspace.
    pub fn build(self) -> Result<TestHarness, LinguaError> {
        let workspace = tempfile::TempDir::new()?;
        let memory = Arc::new(MemoryStore::open(workspace.path())?);
        let home = Arc::new(MockHome::new());
        let provider = Arc::new(MockProvider::with_replies(self.replies));

        let components = AgentComponents {
            gateway: LlmGateway::with_provider(provider.clone(), &self.model, 0.1, 4096),
            sandbox: Arc::new(CodeSandbox::new(home.clone(), self.limits)),
            memory: Some(memory.clone()),
            history_window: self.history_window,
        };
        let pipeline = components.pipeline(SessionId::from("test-session"));

        Ok(TestHarness {
            provider,
            home,
            memory,
            components,
            pipeline,
            _workspace: workspace,
        })
    }
}

/// A complete pipeline with mock collaborators and a temporary workspace.
pub struct TestHarness {
    /// The scripted model provider.
    pub provider: Arc<MockProvider>,
    /// The mock home backing the sandbox.
    pub home: Arc<MockHome>,
    /// Memory store in the temporary workspace.
    pub memory: Arc<MemoryStore>,
    /// Shared components, for building further sessions.
    pub components: AgentComponents,
    /// The pipeline driven by [`send_message`](Self::send_message).
    pub pipeline: AgentPipeline,
    /// Kept alive so the workspace is removed on drop.
    _workspace: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn workspace(&self) -> &Path {
        self._workspace.path()
    }

    /// Runs `text` through the pipeline on the async path.
    pub async fn send_message(&mut self, text: &str) -> Result<AgentResponse, LinguaError> {
        self.pipeline.process_async(text).await
    }

    /// Runs `text` through the pipeline on the blocking path. Call from a
    /// plain `#[test]`, not inside a runtime.
    pub fn send_message_blocking(&mut self, text: &str) -> Result<AgentResponse, LinguaError> {
        self.pipeline.process(text)
    }
}

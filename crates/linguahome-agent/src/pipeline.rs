// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One request/response cycle: context, model call, code execution, memory.
//!
//! [`AgentPipeline::process`] is the error funnel for the whole cycle.
//! Every fault becomes a failure [`AgentResponse`] except memory-directory
//! I/O errors, which are returned as `Err` and treated as fatal.

use std::sync::Arc;
use std::time::Instant;

use linguahome_config::LinguaConfig;
use linguahome_context::ContextAssembler;
use linguahome_core::{
    AgentResponse, ExecutionResult, HomeCapabilities, LinguaError, Message, SessionId,
};
use linguahome_memory::MemoryStore;
use linguahome_provider::LlmGateway;
use linguahome_sandbox::{CodeSafety, CodeSandbox, SandboxLimits, extract_code};
use tracing::{debug, info, warn};

use crate::session::{Conversation, PipelineState};

/// Maximum characters of sandbox stderr quoted in a failure message.
const STDERR_EXCERPT_CHARS: usize = 500;

const NO_OUTPUT_MESSAGE: &str = "Command executed (no output)";

/// The pieces every session's pipeline is built from.
///
/// Sessions share the gateway, sandbox and memory store; each gets its own
/// [`Conversation`].
#[derive(Debug, Clone)]
pub struct AgentComponents {
    pub gateway: LlmGateway,
    pub sandbox: Arc<CodeSandbox>,
    pub memory: Option<Arc<MemoryStore>>,
    pub history_window: usize,
}

impl AgentComponents {
    /// Builds components from configuration. Home capabilities fall back to
    /// the mock backend when `home` is `None`.
    pub fn from_config(
        config: &LinguaConfig,
        home: Option<Arc<dyn HomeCapabilities>>,
    ) -> Result<Self, LinguaError> {
        let gateway = LlmGateway::from_config(&config.llm)?;
        let memory = MemoryStore::open(&config.agent.workspace)?;
        let home = linguahome_home::resolve_backend(home);
        let sandbox = CodeSandbox::new(home, SandboxLimits::from(&config.sandbox));

        Ok(Self {
            gateway,
            sandbox: Arc::new(sandbox),
            memory: Some(Arc::new(memory)),
            history_window: config.agent.history_window,
        })
    }

    /// A fresh pipeline for `session_id` with empty history.
    pub fn pipeline(&self, session_id: SessionId) -> AgentPipeline {
        AgentPipeline::new(
            session_id,
            self.gateway.clone(),
            self.sandbox.clone(),
            self.memory.clone(),
            self.history_window,
        )
    }
}

/// What the model reply asks for next.
enum NextStep {
    Done(AgentResponse),
    Execute(String),
}

/// Orchestrates requests for one session.
pub struct AgentPipeline {
    session_id: SessionId,
    gateway: LlmGateway,
    sandbox: Arc<CodeSandbox>,
    assembler: ContextAssembler,
    memory: Option<Arc<MemoryStore>>,
    conversation: Conversation,
    state: PipelineState,
}

impl AgentPipeline {
    pub fn new(
        session_id: SessionId,
        gateway: LlmGateway,
        sandbox: Arc<CodeSandbox>,
        memory: Option<Arc<MemoryStore>>,
        history_window: usize,
    ) -> Self {
        Self {
            session_id,
            gateway,
            sandbox,
            assembler: ContextAssembler::new(memory.clone()),
            memory,
            conversation: Conversation::new(history_window),
            state: PipelineState::Idle,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn gateway(&self) -> &LlmGateway {
        &self.gateway
    }

    /// Clears in-memory history. Persisted memory is untouched.
    pub fn reset(&mut self) {
        info!(session_id = %self.session_id, cleared = self.conversation.len(), "conversation reset");
        self.conversation.clear();
        self.transition(PipelineState::Idle);
    }

    /// Runs one request with a blocking model call.
    ///
    /// Must not be called from inside a Tokio runtime; use
    /// [`process_async`](Self::process_async) there.
    pub fn process(&mut self, user_text: &str) -> Result<AgentResponse, LinguaError> {
        let started = Instant::now();
        let messages = match self.build_messages(user_text) {
            Ok(messages) => messages,
            Err(e) => return self.fail(e),
        };

        self.transition(PipelineState::AwaitingModel);
        let reply = match self.gateway.chat(&messages, None, None) {
            Ok(reply) => reply.content,
            Err(e) => return self.fail(e),
        };

        let response = match self.after_model(user_text, reply) {
            NextStep::Done(response) => response,
            NextStep::Execute(code) => {
                let result = self.sandbox.execute(&code);
                self.respond(user_text, code, result)?
            }
        };
        self.finish(&response, started);
        Ok(response)
    }

    /// Runs one request, yielding during the model call. Code execution runs
    /// on the blocking pool.
    pub async fn process_async(&mut self, user_text: &str) -> Result<AgentResponse, LinguaError> {
        let started = Instant::now();
        let messages = match self.build_messages(user_text) {
            Ok(messages) => messages,
            Err(e) => return self.fail(e),
        };

        self.transition(PipelineState::AwaitingModel);
        let reply = match self.gateway.chat_async(&messages, None, None).await {
            Ok(reply) => reply.content,
            Err(e) => return self.fail(e),
        };

        let response = match self.after_model(user_text, reply) {
            NextStep::Done(response) => response,
            NextStep::Execute(code) => {
                let sandbox = self.sandbox.clone();
                let to_run = code.clone();
                let joined = tokio::task::spawn_blocking(move || sandbox.execute(&to_run)).await;
                match joined {
                    Ok(result) => self.respond(user_text, code, result)?,
                    Err(e) => {
                        return self.fail(LinguaError::Internal(format!(
                            "sandbox task failed: {e}"
                        )));
                    }
                }
            }
        };
        self.finish(&response, started);
        Ok(response)
    }

    /// System prompt, history window, then the wrapped user request.
    fn build_messages(&mut self, user_text: &str) -> Result<Vec<Message>, LinguaError> {
        self.transition(PipelineState::BuildingContext);
        let system = self.assembler.build_system_prompt()?;
        let window = self.conversation.window();

        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(Message::system(system));
        messages.extend_from_slice(window);
        messages.push(Message::user(self.assembler.build_user_prompt(user_text)));
        debug!(
            session_id = %self.session_id,
            history = window.len(),
            "context assembled"
        );
        Ok(messages)
    }

    /// Records the exchange and decides whether there is code to run.
    fn after_model(&mut self, user_text: &str, reply: String) -> NextStep {
        self.conversation.push(Message::user(user_text));
        self.conversation.push(Message::assistant(reply.clone()));

        let Some(code) = extract_code(&reply) else {
            debug!(session_id = %self.session_id, "no code in model reply");
            self.transition(PipelineState::Responding);
            return NextStep::Done(AgentResponse {
                message: reply,
                generated_code: None,
                code_executed: false,
                success: true,
            });
        };

        if let CodeSafety::Unsafe(reason) = self.sandbox.validate(&code) {
            let message = format!("Code validation failed: {reason}");
            let error = LinguaError::Validation { reason: reason.to_string() };
            warn!(session_id = %self.session_id, %error, "generated code rejected");
            self.transition(PipelineState::Responding);
            return NextStep::Done(AgentResponse {
                message,
                generated_code: Some(code),
                code_executed: false,
                success: false,
            });
        }

        self.transition(PipelineState::Executing);
        NextStep::Execute(code)
    }

    /// Turns an execution result into a response and records successful output.
    fn respond(
        &mut self,
        user_text: &str,
        code: String,
        result: ExecutionResult,
    ) -> Result<AgentResponse, LinguaError> {
        self.transition(PipelineState::Responding);

        if !result.success {
            if let Some(error) = result.error(self.sandbox.limits().timeout) {
                warn!(session_id = %self.session_id, %error, "generated code failed");
            }
            let excerpt: String = result.stderr.chars().take(STDERR_EXCERPT_CHARS).collect();
            return Ok(AgentResponse {
                message: format!("Code execution failed:\n{excerpt}"),
                generated_code: Some(code),
                code_executed: true,
                success: false,
            });
        }

        let output = result.stdout.trim();
        let message = if output.is_empty() {
            NO_OUTPUT_MESSAGE.to_string()
        } else {
            if let Some(memory) = &self.memory {
                if let Err(e) = memory.remember_command(user_text, output) {
                    return self.fail(e);
                }
            }
            output.to_string()
        };

        Ok(AgentResponse {
            message,
            generated_code: Some(code),
            code_executed: true,
            success: true,
        })
    }

    /// Converts a non-fatal error into a failure response.
    fn fail(&mut self, error: LinguaError) -> Result<AgentResponse, LinguaError> {
        self.transition(PipelineState::Idle);
        if error.is_fatal() {
            return Err(error);
        }
        warn!(session_id = %self.session_id, error = %error, "request failed");
        Ok(AgentResponse::failure(format!("Error: {error}")))
    }

    fn finish(&mut self, response: &AgentResponse, started: Instant) {
        info!(
            session_id = %self.session_id,
            success = response.success,
            code_executed = response.code_executed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request processed"
        );
        self.transition(PipelineState::Idle);
    }

    fn transition(&mut self, next: PipelineState) {
        if self.state != next {
            debug!(session_id = %self.session_id, from = %self.state, to = %next, "state transition");
            self.state = next;
        }
    }
}

impl std::fmt::Debug for AgentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentPipeline")
            .field("session_id", &self.session_id)
            .field("model", &self.gateway.model())
            .field("state", &self.state)
            .field("history", &self.conversation.len())
            .finish()
    }
}

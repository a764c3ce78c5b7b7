// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rhai execution sandbox for generated code.
//!
//! Every [`CodeSandbox::execute`] call builds a fresh [`Engine`] and
//! [`rhai::Scope`]: nothing bound by one script is visible to the next. The
//! only host access is the three capability objects plus `now_iso()`.
//! `eval` and `import` are disabled and module resolution goes nowhere.
//!
//! The wall-clock budget is checked from the engine's progress callback, so
//! it interrupts script loops on every platform. A single long native
//! capability call is not interrupted; it is checked when it returns.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use linguahome_config::SandboxConfig;
use linguahome_core::{ExecutionFailure, ExecutionResult, HomeCapabilities};
use rhai::module_resolvers::DummyModuleResolver;
use rhai::{Dynamic, Engine, EvalAltResult};
use tracing::{debug, info, warn};

use crate::capabilities;
use crate::validate::{CodeSafety, UnsafeReason, find_forbidden};

/// Progress callback granularity: the clock is read every this many operations.
const CLOCK_CHECK_INTERVAL: u64 = 256;

const MAX_CALL_LEVELS: usize = 64;
const MAX_EXPR_DEPTH: usize = 64;
const MAX_FUNCTION_EXPR_DEPTH: usize = 32;
const MAX_STRING_SIZE: usize = 1024 * 1024;
const MAX_ARRAY_SIZE: usize = 10_000;
const MAX_MAP_SIZE: usize = 10_000;

/// Execution limits for a [`CodeSandbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxLimits {
    pub timeout: Duration,
    /// Run the deny-list scan. The parse check always runs.
    pub safe_mode: bool,
    pub max_operations: Option<u64>,
    pub max_output_bytes: usize,
}

impl Default for SandboxLimits {
    fn default() -> Self {
        Self::from(&SandboxConfig::default())
    }
}

impl From<&SandboxConfig> for SandboxLimits {
    fn from(config: &SandboxConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            safe_mode: config.safe_mode,
            max_operations: config.max_operations,
            max_output_bytes: config.max_output_bytes,
        }
    }
}

/// Validates and runs generated Rhai code against a home backend.
///
/// A sandbox holds no per-execution state and can be shared across threads.
pub struct CodeSandbox {
    home: Arc<dyn HomeCapabilities>,
    limits: SandboxLimits,
}

impl CodeSandbox {
    pub fn new(home: Arc<dyn HomeCapabilities>, limits: SandboxLimits) -> Self {
        debug!(
            backend = home.name(),
            timeout_ms = limits.timeout.as_millis() as u64,
            safe_mode = limits.safe_mode,
            "code sandbox created"
        );
        Self { home, limits }
    }

    pub fn limits(&self) -> &SandboxLimits {
        &self.limits
    }

    /// Checks `code` against the deny-list (in safe mode), then parses it.
    pub fn validate(&self, code: &str) -> CodeSafety {
        if self.limits.safe_mode {
            if let Some(pattern) = find_forbidden(code) {
                return CodeSafety::Unsafe(UnsafeReason::Forbidden(pattern));
            }
        }

        match self.base_engine().compile(code) {
            Ok(_) => CodeSafety::Safe,
            Err(e) => CodeSafety::Unsafe(UnsafeReason::Syntax(e.to_string())),
        }
    }

    /// Validates, then runs `code` with captured output.
    ///
    /// Blocks the calling thread for up to the configured timeout. Output
    /// printed before a fault or timeout is kept in `stdout`.
    pub fn execute(&self, code: &str) -> ExecutionResult {
        if let CodeSafety::Unsafe(reason) = self.validate(code) {
            warn!(%reason, "generated code rejected");
            return ExecutionResult::failed(
                ExecutionFailure::Rejected,
                String::new(),
                format!("Code validation failed: {reason}"),
            );
        }

        let stdout = Arc::new(Mutex::new(String::new()));
        let stderr = Arc::new(Mutex::new(String::new()));
        let mut engine = self.base_engine();
        capabilities::register(&mut engine);

        let cap = self.limits.max_output_bytes;
        let out = stdout.clone();
        engine.on_print(move |text| {
            let mut buf = out.lock().unwrap_or_else(PoisonError::into_inner);
            append_capped(&mut buf, text, cap);
        });
        let err = stderr.clone();
        engine.on_debug(move |text, _source, _pos| {
            let mut buf = err.lock().unwrap_or_else(PoisonError::into_inner);
            append_capped(&mut buf, text, cap);
        });

        let started = Instant::now();
        let budget = self.limits.timeout;
        engine.on_progress(move |ops| {
            if ops % CLOCK_CHECK_INTERVAL == 0 && started.elapsed() >= budget {
                Some(Dynamic::UNIT)
            } else {
                None
            }
        });

        let mut scope = capabilities::scope_for(&self.home);
        let outcome = engine
            .compile(code)
            .map_err(Box::<EvalAltResult>::from)
            .and_then(|ast| engine.run_ast_with_scope(&mut scope, &ast));
        let elapsed_ms = started.elapsed().as_millis() as u64;
        drop(engine);

        let stdout = take(&stdout);
        let mut stderr = take(&stderr);

        match outcome {
            Ok(()) => {
                info!(elapsed_ms, stdout_bytes = stdout.len(), "generated code executed");
                ExecutionResult::completed(stdout, stderr)
            }
            Err(e) if matches!(*e, EvalAltResult::ErrorTerminated(..)) => {
                warn!(elapsed_ms, "generated code timed out");
                ExecutionResult::failed(
                    ExecutionFailure::Timeout,
                    stdout,
                    format!(
                        "Execution timed out after {} seconds",
                        format_secs(self.limits.timeout)
                    ),
                )
            }
            Err(e) => {
                warn!(elapsed_ms, error = %e, "generated code faulted");
                if !stderr.is_empty() && !stderr.ends_with('\n') {
                    stderr.push('\n');
                }
                stderr.push_str(&e.to_string());
                ExecutionResult::failed(ExecutionFailure::Fault, stdout, stderr)
            }
        }
    }

    /// Engine with the syntax restrictions and resource limits, but no
    /// capabilities or output hooks.
    fn base_engine(&self) -> Engine {
        let mut engine = Engine::new();
        engine.disable_symbol("eval");
        engine.disable_symbol("import");
        engine.set_module_resolver(DummyModuleResolver::new());
        engine.set_max_call_levels(MAX_CALL_LEVELS);
        engine.set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FUNCTION_EXPR_DEPTH);
        engine.set_max_string_size(MAX_STRING_SIZE);
        engine.set_max_array_size(MAX_ARRAY_SIZE);
        engine.set_max_map_size(MAX_MAP_SIZE);
        if let Some(max_ops) = self.limits.max_operations {
            engine.set_max_operations(max_ops);
        }
        engine
    }
}

impl std::fmt::Debug for CodeSandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeSandbox")
            .field("backend", &self.home.name())
            .field("limits", &self.limits)
            .finish()
    }
}

/// Appends `text` and a newline, stopping at `cap` bytes on a char boundary.
fn append_capped(buf: &mut String, text: &str, cap: usize) {
    let line = format!("{text}\n");
    let room = cap.saturating_sub(buf.len());
    if line.len() <= room {
        buf.push_str(&line);
        return;
    }
    let mut end = room;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    buf.push_str(&line[..end]);
}

fn take(buf: &Arc<Mutex<String>>) -> String {
    std::mem::take(&mut *buf.lock().unwrap_or_else(PoisonError::into_inner))
}

fn format_secs(d: Duration) -> String {
    if d.subsec_nanos() == 0 {
        d.as_secs().to_string()
    } else {
        format!("{:.1}", d.as_secs_f64())
    }
}

// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generated-code handling for LinguaHome.
//!
//! Model replies carry Rhai code in a fenced block. This crate extracts it,
//! screens it (deny-list scan, then parse), and runs it in a fresh Rhai
//! engine that sees only the home capability objects. All output is
//! captured into an [`linguahome_core::ExecutionResult`].

pub mod capabilities;
pub mod extract;
pub mod sandbox;
pub mod validate;

pub use extract::extract_code;
pub use sandbox::{CodeSandbox, SandboxLimits};
pub use validate::{CodeSafety, DENY_LIST, UnsafeReason};

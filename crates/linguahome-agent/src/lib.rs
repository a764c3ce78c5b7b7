// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request pipeline for LinguaHome.
//!
//! An [`AgentPipeline`] takes a natural-language request through context
//! assembly, one model call, code extraction and sandboxed execution, and
//! returns an [`linguahome_core::AgentResponse`]. [`SessionRegistry`] keeps
//! one pipeline per session so histories never interleave.

pub mod pipeline;
pub mod registry;
pub mod session;

pub use pipeline::{AgentComponents, AgentPipeline};
pub use registry::{PipelineFactory, SessionHandle, SessionRegistry};
pub use session::{Conversation, PipelineState};

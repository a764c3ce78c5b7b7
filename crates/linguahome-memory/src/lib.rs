// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable memory for LinguaHome.
//!
//! Two append-only markdown records live under `<workspace>/memory/`: a log
//! per calendar day for short-term continuity, and `MEMORY.md` for user
//! preferences that should shape every future prompt.
//!
//! Filesystem failures are returned as [`linguahome_core::LinguaError::Storage`];
//! callers treat them as fatal.

pub mod store;
pub mod types;

pub use store::MemoryStore;
pub use types::MemoryKind;

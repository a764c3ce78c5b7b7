// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions: the seams where backends plug in.

pub mod home;
pub mod provider;

pub use home::HomeCapabilities;
pub use provider::ChatProvider;

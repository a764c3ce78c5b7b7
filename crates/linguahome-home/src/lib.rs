// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Home-automation side of LinguaHome: the testbed device map and the mock
//! backend that stands in when no real controller is attached.

pub mod devices;
pub mod mock;

use std::sync::Arc;

use linguahome_core::HomeCapabilities;
use tracing::info;

pub use devices::{DEVICES, DeviceDescriptor, DeviceType, ROOMS};
pub use mock::MockHome;

/// Returns `backend` if present, otherwise a fresh [`MockHome`].
pub fn resolve_backend(backend: Option<Arc<dyn HomeCapabilities>>) -> Arc<dyn HomeCapabilities> {
    match backend {
        Some(backend) => {
            info!(backend = backend.name(), "using home backend");
            backend
        }
        None => {
            info!("no home backend attached, using mock home");
            Arc::new(MockHome::new())
        }
    }
}

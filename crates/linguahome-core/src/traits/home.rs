// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Home-automation capability trait exposed to generated code.

use crate::error::LinguaError;
use crate::types::{ActuatorOutcome, HistoryEvent, SensorReading};

/// The fixed capability surface available inside the sandbox.
///
/// Calls are synchronous: they run on the sandbox thread while a script is
/// executing. Errors surface to the script as runtime faults.
pub trait HomeCapabilities: Send + Sync {
    /// Short backend name used in logs (e.g. "mock").
    fn name(&self) -> &str;

    /// Lists every known sensor with its current reading.
    fn find_sensors(&self) -> Result<Vec<SensorReading>, LinguaError>;

    /// Returns a single sensor reading, or `None` for an unknown id.
    fn get_sensor(&self, sensor_id: i64) -> Result<Option<SensorReading>, LinguaError>;

    /// Applies `action` with a numeric payload to an actuator.
    fn set_value(
        &self,
        device_id: i64,
        action: &str,
        value: f64,
    ) -> Result<ActuatorOutcome, LinguaError>;

    /// Returns the on/off state of an actuator, or `None` for an unknown id.
    fn get_state(&self, device_id: i64) -> Result<Option<bool>, LinguaError>;

    /// Returns events recorded within the last `duration_ms` milliseconds.
    fn get_history(&self, duration_ms: i64) -> Result<Vec<HistoryEvent>, LinguaError>;
}

// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic in-memory home used when no real backend is attached.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use linguahome_core::{
    ActuatorOutcome, HistoryEvent, HomeCapabilities, LinguaError, SensorReading,
};
use tracing::debug;

use crate::devices::{self, DeviceDescriptor, DeviceType};

/// Baseline readings: (sensor id, value, status).
const READINGS: &[(i64, &str, &str)] = &[
    (1025, "95.3", "On"),
    (1035, "0.0", "Off"),
    (1037, "45.2", "On"),
    (1039, "0.0", "Off"),
    (1041, "120.5", "On"),
    (1028, "22.5", "Active"),
    (1060, "21.8", "Active"),
    (1066, "23.2", "Active"),
    (1072, "24.1", "Active"),
    (1078, "23.9", "Active"),
    (1029, "1", "Active"),
    (1061, "0", "Inactive"),
    (1067, "0", "Inactive"),
    (1073, "1", "Active"),
    (1079, "0", "Inactive"),
    (1022, "0", "Closed"),
    (1043, "1", "Open"),
    (1047, "0", "Closed"),
    (1051, "0", "Closed"),
    (1055, "1", "Open"),
];

/// Initial on/off state of each plug, keyed by device id.
const PLUG_STATES: &[(i64, bool)] = &[(25, true), (35, false), (37, true), (39, false), (41, true)];

/// Mock backend with the testbed's fixed readings.
///
/// Plug state lives here, not in the script context, so a `turnOn` in one
/// execution is visible to `get_state` in the next.
#[derive(Debug)]
pub struct MockHome {
    plug_states: Mutex<BTreeMap<i64, bool>>,
}

impl Default for MockHome {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHome {
    pub fn new() -> Self {
        Self {
            plug_states: Mutex::new(PLUG_STATES.iter().copied().collect()),
        }
    }

    fn states(&self) -> std::sync::MutexGuard<'_, BTreeMap<i64, bool>> {
        self.plug_states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn reading(&self, device: &DeviceDescriptor) -> Option<SensorReading> {
        let &(_, value, baseline_status) = READINGS
            .iter()
            .find(|(id, _, _)| *id == device.sensor_id)?;
        let status = if device.device_type == DeviceType::Plug {
            match self.states().get(&device.device_id) {
                Some(true) => "On",
                Some(false) => "Off",
                None => baseline_status,
            }
        } else {
            baseline_status
        };
        Some(SensorReading {
            sensor_id: device.sensor_id,
            name: device.name.to_string(),
            value: value.to_string(),
            status: status.to_string(),
            location: device.room.to_string(),
            sensor_type: device.device_type.sensor_type_name().to_string(),
        })
    }
}

impl HomeCapabilities for MockHome {
    fn name(&self) -> &str {
        "mock"
    }

    fn find_sensors(&self) -> Result<Vec<SensorReading>, LinguaError> {
        Ok(devices::DEVICES
            .iter()
            .filter_map(|d| self.reading(d))
            .collect())
    }

    fn get_sensor(&self, sensor_id: i64) -> Result<Option<SensorReading>, LinguaError> {
        Ok(devices::by_sensor_id(sensor_id).and_then(|d| self.reading(d)))
    }

    fn set_value(
        &self,
        device_id: i64,
        action: &str,
        _value: f64,
    ) -> Result<ActuatorOutcome, LinguaError> {
        let mut states = self.states();
        let Some(state) = states.get_mut(&device_id) else {
            return Ok(ActuatorOutcome::rejected(format!(
                "Device {device_id} not found"
            )));
        };
        let outcome = match action {
            "turnOn" => {
                *state = true;
                ActuatorOutcome::applied("On")
            }
            "turnOff" => {
                *state = false;
                ActuatorOutcome::applied("Off")
            }
            other => ActuatorOutcome::rejected(format!("Unknown action: {other}")),
        };
        debug!(device_id, action, success = outcome.success, "mock actuator command");
        Ok(outcome)
    }

    fn get_state(&self, device_id: i64) -> Result<Option<bool>, LinguaError> {
        Ok(self.states().get(&device_id).copied())
    }

    fn get_history(&self, _duration_ms: i64) -> Result<Vec<HistoryEvent>, LinguaError> {
        let now = Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string();
        Ok(vec![
            HistoryEvent {
                timestamp: now.clone(),
                device: "motion_0".to_string(),
                event: "motion_detected".to_string(),
            },
            HistoryEvent {
                timestamp: now,
                device: "door_1".to_string(),
                event: "opened".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robot_corner_reads_23_9() {
        let home = MockHome::new();
        let reading = home.get_sensor(1078).unwrap().unwrap();
        assert_eq!(reading.value, "23.9");
        assert_eq!(reading.location, "Robot Corner");
        assert_eq!(reading.sensor_type, "Temperature");
    }

    #[test]
    fn find_sensors_lists_every_device() {
        let home = MockHome::new();
        assert_eq!(home.find_sensors().unwrap().len(), devices::DEVICES.len());
    }

    #[test]
    fn unknown_sensor_is_none() {
        assert!(MockHome::new().get_sensor(9999).unwrap().is_none());
    }

    #[test]
    fn turn_on_changes_backend_state() {
        let home = MockHome::new();
        assert_eq!(home.get_state(35).unwrap(), Some(false));
        let outcome = home.set_value(35, "turnOn", 1.0).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.state.as_deref(), Some("On"));
        assert_eq!(home.get_state(35).unwrap(), Some(true));
        assert_eq!(home.get_sensor(1035).unwrap().unwrap().status, "On");
    }

    #[test]
    fn unknown_device_and_action_are_rejected() {
        let home = MockHome::new();
        let missing = home.set_value(99, "turnOn", 1.0).unwrap();
        assert!(!missing.success);
        assert_eq!(missing.error.as_deref(), Some("Device 99 not found"));

        let bad_action = home.set_value(25, "dim", 0.5).unwrap();
        assert!(!bad_action.success);
        assert_eq!(bad_action.error.as_deref(), Some("Unknown action: dim"));
        assert_eq!(home.get_state(25).unwrap(), Some(true));
    }

    #[test]
    fn history_has_two_canned_events() {
        let events = MockHome::new().get_history(60_000).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, "motion_detected");
        assert_eq!(events[1].device, "door_1");
    }
}

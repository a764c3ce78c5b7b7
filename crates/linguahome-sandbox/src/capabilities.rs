// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Script-facing wrappers around [`HomeCapabilities`].
//!
//! Each wrapper is a Rhai custom type bound into the script scope under a
//! fixed name (`sensors`, `actuator`, `history`). Backend errors become
//! script runtime errors.

use std::sync::Arc;

use linguahome_core::{HomeCapabilities, LinguaError};
use rhai::{Dynamic, Engine, EvalAltResult, INT, Scope};

type ScriptResult = Result<Dynamic, Box<EvalAltResult>>;

fn script_error(e: LinguaError) -> Box<EvalAltResult> {
    e.to_string().into()
}

fn to_script<T: serde::Serialize>(value: &T) -> ScriptResult {
    rhai::serde::to_dynamic(value)
}

/// `sensors`: list and look up sensor readings.
#[derive(Clone)]
pub struct SensorApi {
    home: Arc<dyn HomeCapabilities>,
}

impl SensorApi {
    fn find_sensors(&mut self) -> ScriptResult {
        to_script(&self.home.find_sensors().map_err(script_error)?)
    }

    fn get_sensor(&mut self, sensor_id: INT) -> ScriptResult {
        match self.home.get_sensor(sensor_id).map_err(script_error)? {
            Some(reading) => to_script(&reading),
            None => Ok(Dynamic::UNIT),
        }
    }

    fn get_sensor_by_name(&mut self, name: &str) -> ScriptResult {
        let readings = self.home.find_sensors().map_err(script_error)?;
        match readings.iter().find(|r| r.name == name) {
            Some(reading) => to_script(reading),
            None => Ok(Dynamic::UNIT),
        }
    }
}

/// `actuator`: switch controllable devices.
#[derive(Clone)]
pub struct ActuatorApi {
    home: Arc<dyn HomeCapabilities>,
}

impl ActuatorApi {
    fn set_value(&mut self, device_id: INT, action: &str, value: Dynamic) -> ScriptResult {
        let numeric = value
            .as_float()
            .or_else(|_| value.as_int().map(|i| i as f64))
            .map_err(|type_name| -> Box<EvalAltResult> {
                format!("set_value expects a number, got {type_name}").into()
            })?;
        let outcome = self
            .home
            .set_value(device_id, action, numeric)
            .map_err(script_error)?;
        to_script(&outcome)
    }

    fn get_state(&mut self, device_id: INT) -> ScriptResult {
        Ok(match self.home.get_state(device_id).map_err(script_error)? {
            Some(on) => Dynamic::from_bool(on),
            None => Dynamic::UNIT,
        })
    }
}

/// `history`: recent events and the device list.
#[derive(Clone)]
pub struct HistoryApi {
    home: Arc<dyn HomeCapabilities>,
}

impl HistoryApi {
    fn get_history(&mut self, duration_ms: INT) -> ScriptResult {
        to_script(&self.home.get_history(duration_ms).map_err(script_error)?)
    }

    fn get_devices(&mut self) -> ScriptResult {
        to_script(&self.home.find_sensors().map_err(script_error)?)
    }
}

/// Registers the capability types and helper functions on `engine`.
pub(crate) fn register(engine: &mut Engine) {
    engine
        .register_type_with_name::<SensorApi>("Sensors")
        .register_fn("find_sensors", SensorApi::find_sensors)
        .register_fn("get_sensor", SensorApi::get_sensor)
        .register_fn("get_sensor_by_name", SensorApi::get_sensor_by_name);

    engine
        .register_type_with_name::<ActuatorApi>("Actuator")
        .register_fn("set_value", ActuatorApi::set_value)
        .register_fn("get_state", ActuatorApi::get_state);

    engine
        .register_type_with_name::<HistoryApi>("History")
        .register_fn("get_history", HistoryApi::get_history)
        .register_fn("get_devices", HistoryApi::get_devices);

    engine.register_fn("now_iso", || {
        chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string()
    });
}

/// Binds the three capability objects into a fresh scope.
pub(crate) fn scope_for(home: &Arc<dyn HomeCapabilities>) -> Scope<'static> {
    let mut scope = Scope::new();
    scope.push("sensors", SensorApi { home: home.clone() });
    scope.push("actuator", ActuatorApi { home: home.clone() });
    scope.push("history", HistoryApi { home: home.clone() });
    scope
}

// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static device map of the testbed home.

use serde::Serialize;
use strum::{Display, EnumString};

/// Kind of device behind a sensor id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Plug,
    Temperature,
    Motion,
    Door,
}

impl DeviceType {
    /// Sensor type name reported by the home backend.
    pub fn sensor_type_name(self) -> &'static str {
        match self {
            Self::Plug => "Power",
            Self::Temperature => "Temperature",
            Self::Motion => "Motion",
            Self::Door => "Door",
        }
    }
}

/// Read-only description of one device in the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub name: &'static str,
    pub sensor_id: i64,
    pub device_id: i64,
    pub room: &'static str,
    pub device_type: DeviceType,
}

impl DeviceDescriptor {
    /// Only plugs accept actuator commands.
    pub fn controllable(&self) -> bool {
        self.device_type == DeviceType::Plug
    }
}

const fn device(
    name: &'static str,
    sensor_id: i64,
    device_id: i64,
    room: &'static str,
    device_type: DeviceType,
) -> DeviceDescriptor {
    DeviceDescriptor {
        name,
        sensor_id,
        device_id,
        room,
        device_type,
    }
}

/// Every room in the testbed.
pub const ROOMS: &[&str] = &[
    "Working area",
    "Robot Corner",
    "Kaspar Room",
    "Entrance",
    "Observation Room",
];

/// Every device in the testbed, grouped by type.
pub const DEVICES: &[DeviceDescriptor] = &[
    device("plug_0", 1025, 25, "Working area", DeviceType::Plug),
    device("plug_1", 1035, 35, "Robot Corner", DeviceType::Plug),
    device("plug_2", 1037, 37, "Kaspar Room", DeviceType::Plug),
    device("plug_3", 1039, 39, "Entrance", DeviceType::Plug),
    device("plug_4", 1041, 41, "Working area", DeviceType::Plug),
    device("motion_0_temperature", 1028, 28, "Working area", DeviceType::Temperature),
    device("motion_1_temperature", 1060, 60, "Entrance", DeviceType::Temperature),
    device("motion_2_temperature", 1066, 66, "Observation Room", DeviceType::Temperature),
    device("motion_3_temperature", 1072, 72, "Kaspar Room", DeviceType::Temperature),
    device("motion_4_temperature", 1078, 78, "Robot Corner", DeviceType::Temperature),
    device("motion_0_movement", 1029, 28, "Working area", DeviceType::Motion),
    device("motion_1_movement", 1061, 60, "Entrance", DeviceType::Motion),
    device("motion_2_movement", 1067, 66, "Observation Room", DeviceType::Motion),
    device("motion_3_movement", 1073, 72, "Kaspar Room", DeviceType::Motion),
    device("motion_4_movement", 1079, 78, "Robot Corner", DeviceType::Motion),
    device("door_0", 1022, 22, "Working area", DeviceType::Door),
    device("door_1", 1043, 43, "Robot Corner", DeviceType::Door),
    device("door_2", 1047, 47, "Kaspar Room", DeviceType::Door),
    device("door_3", 1051, 51, "Entrance", DeviceType::Door),
    device("door_4", 1055, 55, "Observation Room", DeviceType::Door),
];

pub fn by_name(name: &str) -> Option<&'static DeviceDescriptor> {
    DEVICES.iter().find(|d| d.name == name)
}

pub fn by_sensor_id(sensor_id: i64) -> Option<&'static DeviceDescriptor> {
    DEVICES.iter().find(|d| d.sensor_id == sensor_id)
}

/// Devices of one type, in table order.
pub fn of_type(device_type: DeviceType) -> impl Iterator<Item = &'static DeviceDescriptor> {
    DEVICES.iter().filter(move |d| d.device_type == device_type)
}

/// Devices that accept actuator commands.
pub fn controllable() -> impl Iterator<Item = &'static DeviceDescriptor> {
    DEVICES.iter().filter(|d| d.controllable())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn robot_corner_temperature_is_1078() {
        let d = by_name("motion_4_temperature").unwrap();
        assert_eq!(d.sensor_id, 1078);
        assert_eq!(d.room, "Robot Corner");
        assert_eq!(d.device_type, DeviceType::Temperature);
    }

    #[test]
    fn sensor_ids_are_unique() {
        let ids: HashSet<i64> = DEVICES.iter().map(|d| d.sensor_id).collect();
        assert_eq!(ids.len(), DEVICES.len());
    }

    #[test]
    fn every_device_is_in_a_known_room() {
        assert!(DEVICES.iter().all(|d| ROOMS.contains(&d.room)));
    }

    #[test]
    fn only_plugs_are_controllable() {
        let names: Vec<_> = controllable().map(|d| d.name).collect();
        assert_eq!(names, ["plug_0", "plug_1", "plug_2", "plug_3", "plug_4"]);
    }

    #[test]
    fn five_of_each_type() {
        for ty in [
            DeviceType::Plug,
            DeviceType::Temperature,
            DeviceType::Motion,
            DeviceType::Door,
        ] {
            assert_eq!(of_type(ty).count(), 5, "{ty}");
        }
    }
}

use super::properties::{Format, Perm, Props, Unit};
use crate::error::{Error, ErrorType};
use crate::uuid::ShortUuid;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};
use uuid::Uuid;

/// How a characteristic's values are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    /// A level: repeating the current value is not a change.
    Normal,
    /// A stream of discrete events (e.g. button presses): every push counts.
    SingleFire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CharacteristicType {
    On,
    Brightness,
    Hue,
    CurrentTemperature,
    TargetTemperature,
    CurrentAmbientLightLevel,
    BatteryLevel,
    StatusFault,
    ContactSensorState,
    MotionDetected,
    Volume,
    SetDuration,
    Name,
    ConfiguredName,
    Identify,
    ProgrammableSwitchEvent,
}

const ALL_TYPES: [CharacteristicType; 16] = [
    CharacteristicType::On,
    CharacteristicType::Brightness,
    CharacteristicType::Hue,
    CharacteristicType::CurrentTemperature,
    CharacteristicType::TargetTemperature,
    CharacteristicType::CurrentAmbientLightLevel,
    CharacteristicType::BatteryLevel,
    CharacteristicType::StatusFault,
    CharacteristicType::ContactSensorState,
    CharacteristicType::MotionDetected,
    CharacteristicType::Volume,
    CharacteristicType::SetDuration,
    CharacteristicType::Name,
    CharacteristicType::ConfiguredName,
    CharacteristicType::Identify,
    CharacteristicType::ProgrammableSwitchEvent,
];

static BY_NAME: Lazy<HashMap<&'static str, CharacteristicType>> =
    Lazy::new(|| ALL_TYPES.iter().map(|t| (t.name(), *t)).collect());

static BY_UUID: Lazy<HashMap<Uuid, CharacteristicType>> =
    Lazy::new(|| ALL_TYPES.iter().map(|t| (t.uuid(), *t)).collect());

const READ_NOTIFY: &[Perm] = &[Perm::PairedRead, Perm::Notify];
const READ_WRITE_NOTIFY: &[Perm] = &[Perm::PairedRead, Perm::PairedWrite, Perm::Notify];

impl CharacteristicType {
    pub fn from_uuid(uuid: &Uuid) -> Option<CharacteristicType> {
        BY_UUID.get(uuid).copied()
    }

    pub fn short_id(self) -> u32 {
        match self {
            CharacteristicType::On => 0x25,
            CharacteristicType::Brightness => 0x08,
            CharacteristicType::Hue => 0x13,
            CharacteristicType::CurrentTemperature => 0x11,
            CharacteristicType::TargetTemperature => 0x35,
            CharacteristicType::CurrentAmbientLightLevel => 0x6B,
            CharacteristicType::BatteryLevel => 0x68,
            CharacteristicType::StatusFault => 0x77,
            CharacteristicType::ContactSensorState => 0x6A,
            CharacteristicType::MotionDetected => 0x22,
            CharacteristicType::Volume => 0x119,
            CharacteristicType::SetDuration => 0xD3,
            CharacteristicType::Name => 0x23,
            CharacteristicType::ConfiguredName => 0xE3,
            CharacteristicType::Identify => 0x14,
            CharacteristicType::ProgrammableSwitchEvent => 0x73,
        }
    }

    pub fn uuid(self) -> Uuid {
        Uuid::from_short(self.short_id())
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacteristicType::On => "On",
            CharacteristicType::Brightness => "Brightness",
            CharacteristicType::Hue => "Hue",
            CharacteristicType::CurrentTemperature => "CurrentTemperature",
            CharacteristicType::TargetTemperature => "TargetTemperature",
            CharacteristicType::CurrentAmbientLightLevel => "CurrentAmbientLightLevel",
            CharacteristicType::BatteryLevel => "BatteryLevel",
            CharacteristicType::StatusFault => "StatusFault",
            CharacteristicType::ContactSensorState => "ContactSensorState",
            CharacteristicType::MotionDetected => "MotionDetected",
            CharacteristicType::Volume => "Volume",
            CharacteristicType::SetDuration => "SetDuration",
            CharacteristicType::Name => "Name",
            CharacteristicType::ConfiguredName => "ConfiguredName",
            CharacteristicType::Identify => "Identify",
            CharacteristicType::ProgrammableSwitchEvent => "ProgrammableSwitchEvent",
        }
    }

    /// Human readable name, as HAP shows it.
    pub fn display_name(self) -> &'static str {
        match self {
            CharacteristicType::On => "On",
            CharacteristicType::Brightness => "Brightness",
            CharacteristicType::Hue => "Hue",
            CharacteristicType::CurrentTemperature => "Current Temperature",
            CharacteristicType::TargetTemperature => "Target Temperature",
            CharacteristicType::CurrentAmbientLightLevel => "Current Ambient Light Level",
            CharacteristicType::BatteryLevel => "Battery Level",
            CharacteristicType::StatusFault => "Status Fault",
            CharacteristicType::ContactSensorState => "Contact Sensor State",
            CharacteristicType::MotionDetected => "Motion Detected",
            CharacteristicType::Volume => "Volume",
            CharacteristicType::SetDuration => "Set Duration",
            CharacteristicType::Name => "Name",
            CharacteristicType::ConfiguredName => "Configured Name",
            CharacteristicType::Identify => "Identify",
            CharacteristicType::ProgrammableSwitchEvent => "Programmable Switch Event",
        }
    }

    pub fn kind(self) -> EndpointKind {
        match self {
            CharacteristicType::ProgrammableSwitchEvent => EndpointKind::SingleFire,
            _ => EndpointKind::Normal,
        }
    }

    pub fn default_props(self) -> Props {
        match self {
            CharacteristicType::On => Props::new(Format::Bool, READ_WRITE_NOTIFY),
            CharacteristicType::Brightness => Props::new(Format::Int, READ_WRITE_NOTIFY)
                .range(0.0, 100.0)
                .unit(Unit::Percentage),
            CharacteristicType::Hue => Props::new(Format::Float, READ_WRITE_NOTIFY)
                .range(0.0, 360.0)
                .unit(Unit::ArcDegrees),
            CharacteristicType::CurrentTemperature => Props::new(Format::Float, READ_NOTIFY)
                .range(-270.0, 100.0)
                .unit(Unit::Celsius),
            CharacteristicType::TargetTemperature => {
                Props::new(Format::Float, READ_WRITE_NOTIFY)
                    .range(10.0, 38.0)
                    .unit(Unit::Celsius)
            }
            CharacteristicType::CurrentAmbientLightLevel => {
                Props::new(Format::Float, READ_NOTIFY)
                    .range(0.0001, 100000.0)
                    .unit(Unit::Lux)
            }
            CharacteristicType::BatteryLevel => Props::new(Format::UInt8, READ_NOTIFY)
                .range(0.0, 100.0)
                .unit(Unit::Percentage),
            CharacteristicType::StatusFault => {
                Props::new(Format::UInt8, READ_NOTIFY).range(0.0, 1.0)
            }
            CharacteristicType::ContactSensorState => {
                Props::new(Format::UInt8, READ_NOTIFY).range(0.0, 1.0)
            }
            CharacteristicType::MotionDetected => Props::new(Format::Bool, READ_NOTIFY),
            CharacteristicType::Volume => Props::new(Format::UInt8, READ_WRITE_NOTIFY)
                .range(0.0, 100.0)
                .unit(Unit::Percentage),
            CharacteristicType::SetDuration => Props::new(Format::UInt32, READ_WRITE_NOTIFY)
                .range(0.0, 3600.0)
                .unit(Unit::Seconds),
            CharacteristicType::Name => {
                Props::new(Format::String, &[Perm::PairedRead]).max_len(64)
            }
            CharacteristicType::ConfiguredName => {
                Props::new(Format::String, READ_WRITE_NOTIFY).max_len(64)
            }
            CharacteristicType::Identify => Props::new(Format::Bool, &[Perm::PairedWrite]),
            CharacteristicType::ProgrammableSwitchEvent => {
                Props::new(Format::UInt8, READ_NOTIFY).range(0.0, 2.0)
            }
        }
    }
}

impl fmt::Display for CharacteristicType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacteristicType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = BY_NAME.get(s) {
            return Ok(*t);
        }
        // also accept the (short) uuid
        Uuid::from_string(s)
            .ok()
            .and_then(|uuid| CharacteristicType::from_uuid(&uuid))
            .ok_or_else(|| {
                Error::from_string(
                    format!("{s}: not a valid characteristic type"),
                    ErrorType::InvalidCharacteristicType,
                )
            })
    }
}

impl TryFrom<String> for CharacteristicType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CharacteristicType> for String {
    fn from(value: CharacteristicType) -> Self {
        value.name().to_string()
    }
}

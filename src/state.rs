// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Externally consumed state snapshots.
//!
//! These are the values accessory-facing callers actually work with,
//! projected from the raw wire resources with the controller's quirks
//! applied: the airside flag folds into a reserved fan-speed value,
//! firmware strings swap `_` for `.`, and unknown mode numbers read as
//! automatic.

use crate::resource::{BasicInfo, ControlInfo, ModelInfo, SensorInfo};
use crate::types::Mode;

/// Operating state of the unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcState {
    /// Whether the unit is powered on.
    pub power: bool,
    /// Current operating mode.
    pub mode: Mode,
    /// Indoor (return air) temperature in degrees Celsius.
    pub current_temp: f64,
    /// Outdoor temperature, when the unit reports one.
    pub outdoor_temp: Option<f64>,
    /// Target temperature the unit is currently chasing.
    pub target_temp: f64,
    /// Stored heating target.
    pub heating_temp: f64,
    /// Stored cooling target.
    pub cooling_temp: f64,
    /// Fan speed 1-5, or [`FanSpeed::AIRSIDE`](crate::types::FanSpeed::AIRSIDE)
    /// when the airside economizer is active.
    pub fan_speed: u8,
    /// Whether the fan is in automatic mode.
    pub fan_auto: bool,
}

impl AcState {
    pub(crate) fn project(control: &ControlInfo, sensor: &SensorInfo) -> Self {
        Self {
            power: control.power(),
            mode: Mode::from_wire(control.mode).unwrap_or(Mode::Auto),
            current_temp: sensor.htemp,
            outdoor_temp: sensor.otemp,
            target_temp: control.stemp,
            heating_temp: control.dt1,
            cooling_temp: control.dt2,
            fan_speed: control.fan_speed_value(),
            fan_auto: control.fan_auto(),
        }
    }
}

/// Identity and capability limits of the unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcModel {
    /// Serial number: the adapter's MAC address, or a generated stand-in
    /// when the device does not report one.
    pub serial: String,
    /// Firmware version, dot-separated.
    pub firmware: Option<String>,
    /// Model name, taken from the adapter's SSID.
    pub name: Option<String>,
    /// Accepted cooling target range.
    pub cooling: TempThreshold,
    /// Accepted heating target range.
    pub heating: TempThreshold,
}

impl AcModel {
    pub(crate) fn project(basic: &BasicInfo, model: &ModelInfo, fallback_serial: &str) -> Self {
        Self {
            serial: basic
                .mac
                .clone()
                .unwrap_or_else(|| fallback_serial.to_string()),
            // The wire uses `_` where firmware strings use `.`.
            firmware: basic.ver.as_ref().map(|ver| ver.replace('_', ".")),
            name: basic.ssid.clone(),
            cooling: TempThreshold {
                min: model.cool_low,
                max: model.cool_high,
            },
            heating: TempThreshold {
                min: model.heat_low,
                max: model.heat_high,
            },
        }
    }
}

/// An inclusive target temperature range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempThreshold {
    /// Lowest accepted target.
    pub min: f64,
    /// Highest accepted target.
    pub max: f64,
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control parameters: power, mode, targets, fan.

use crate::error::ProtocolError;
use crate::protocol::wire::Fields;
use crate::types::{FanSpeed, Mode};

use super::{Resource, WritableResource};

/// The writable control block of the unit.
///
/// Field names mirror the wire protocol. `stemp` is the target temperature
/// the unit is currently chasing; `dt1`/`dt2` are the stored heat/cool
/// targets it snaps to on a mode change.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ControlInfo {
    /// Power flag, 0/1.
    pub pow: u8,
    /// Operating mode number (see [`Mode`]).
    pub mode: u8,
    /// Active target temperature.
    pub stemp: f64,
    /// Stored heating target.
    pub dt1: f64,
    /// Stored cooling target.
    pub dt2: f64,
    /// Fan rate 1-5.
    pub f_rate: u8,
    /// Fan auto flag, 0/1.
    pub f_auto: u8,
    /// Airside economizer flag, 0/1.
    pub f_airside: u8,
}

impl ControlInfo {
    /// Whether the unit is powered on.
    pub(crate) fn power(&self) -> bool {
        self.pow == 1
    }

    /// Externally visible fan speed, folding the airside flag into the
    /// reserved high value.
    pub(crate) fn fan_speed_value(&self) -> u8 {
        if self.f_airside == 1 {
            FanSpeed::AIRSIDE
        } else {
            self.f_rate
        }
    }

    /// Whether the fan is in automatic mode.
    pub(crate) fn fan_auto(&self) -> bool {
        self.f_auto == 1
    }

    // ========== Edits staged through the write coalescer ==========

    pub(crate) fn set_power(&mut self, on: bool) {
        self.pow = u8::from(on);
    }

    /// Changes mode, snapping the active target to the stored per-mode
    /// target the way the controller's own remote does.
    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode.as_wire();
        match mode {
            Mode::Heat => self.stemp = self.dt1,
            Mode::Cool => self.stemp = self.dt2,
            Mode::Auto => {}
        }
    }

    pub(crate) fn set_heating_temp(&mut self, temp: f64) {
        self.stemp = temp;
        self.dt1 = temp;
    }

    pub(crate) fn set_cooling_temp(&mut self, temp: f64) {
        self.stemp = temp;
        self.dt2 = temp;
    }

    pub(crate) fn set_fan_speed(&mut self, speed: FanSpeed) {
        if speed.is_airside() {
            self.f_airside = 1;
        } else {
            self.f_airside = 0;
            self.f_rate = speed.value();
        }
    }

    pub(crate) fn set_fan_auto(&mut self, auto: bool) {
        self.f_auto = u8::from(auto);
    }
}

impl Resource for ControlInfo {
    const NAME: &'static str = "control info";
    const GET_PATH: &'static str = "/skyfi/aircon/get_control_info";

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_fields(fields: &Fields) -> Result<Self, ProtocolError> {
        Ok(Self {
            pow: fields.require_number("pow")? as u8,
            mode: fields.require_number("mode")? as u8,
            stemp: fields.require_number("stemp")?,
            dt1: fields.require_number("dt1")?,
            dt2: fields.require_number("dt2")?,
            f_rate: fields.require_number("f_rate")? as u8,
            // Not every unit reports the auto/airside flags.
            f_auto: fields.number("f_auto").unwrap_or(0.0) as u8,
            f_airside: fields.number("f_airside").unwrap_or(0.0) as u8,
        })
    }
}

impl WritableResource for ControlInfo {
    const SET_PATH: &'static str = "/skyfi/aircon/set_control_info";

    fn write_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pow", self.pow.to_string()),
            ("mode", self.mode.to_string()),
            ("stemp", self.stemp.to_string()),
            ("dt1", self.dt1.to_string()),
            ("dt2", self.dt2.to_string()),
            ("f_rate", self.f_rate.to_string()),
            ("f_auto", self.f_auto.to_string()),
            ("f_airside", self.f_airside.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> ControlInfo {
        let fields = Fields::parse(
            "ret=OK,pow=1,mode=2,operate=2,stemp=24,dt1=21,dt2=24,f_rate=3,f_auto=0,f_airside=0",
        );
        ControlInfo::from_fields(&fields).unwrap()
    }

    #[test]
    fn parses_and_ignores_unknown_fields() {
        let c = control();
        assert!(c.power());
        assert_eq!(c.mode, 2);
        assert_eq!(c.stemp, 24.0);
        assert_eq!(c.f_rate, 3);
    }

    #[test]
    fn missing_flags_default_to_off() {
        let fields = Fields::parse("ret=OK,pow=0,mode=3,stemp=22,dt1=21,dt2=24,f_rate=1");
        let c = ControlInfo::from_fields(&fields).unwrap();
        assert!(!c.fan_auto());
        assert_eq!(c.f_airside, 0);
    }

    #[test]
    fn mode_change_snaps_target() {
        let mut c = control();
        c.set_mode(Mode::Heat);
        assert_eq!(c.mode, 1);
        assert_eq!(c.stemp, c.dt1);

        c.set_mode(Mode::Cool);
        assert_eq!(c.stemp, c.dt2);
    }

    #[test]
    fn temperature_edits_track_per_mode_slots() {
        let mut c = control();
        c.set_cooling_temp(26.0);
        assert_eq!(c.stemp, 26.0);
        assert_eq!(c.dt2, 26.0);

        c.set_heating_temp(20.0);
        assert_eq!(c.stemp, 20.0);
        assert_eq!(c.dt1, 20.0);
    }

    #[test]
    fn airside_speed_sets_flag_and_preserves_rate() {
        let mut c = control();
        c.set_fan_speed(FanSpeed::new(FanSpeed::AIRSIDE).unwrap());
        assert_eq!(c.f_airside, 1);
        assert_eq!(c.f_rate, 3);
        assert_eq!(c.fan_speed_value(), FanSpeed::AIRSIDE);

        c.set_fan_speed(FanSpeed::new(2).unwrap());
        assert_eq!(c.f_airside, 0);
        assert_eq!(c.fan_speed_value(), 2);
    }

    #[test]
    fn write_params_carry_the_full_resource() {
        let params = control().write_params();
        assert_eq!(params.len(), 8);
        assert!(params.contains(&("stemp", "24".to_string())));
        assert!(params.contains(&("pow", "1".to_string())));
    }
}

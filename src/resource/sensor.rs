// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ambient temperature readings.

use crate::error::ProtocolError;
use crate::protocol::wire::Fields;

use super::Resource;

/// Sensor readings from the indoor unit.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SensorInfo {
    /// Indoor (return air) temperature in degrees Celsius.
    pub htemp: f64,
    /// Outdoor temperature, when the unit reports one.
    pub otemp: Option<f64>,
}

impl Resource for SensorInfo {
    const NAME: &'static str = "sensor info";
    const GET_PATH: &'static str = "/skyfi/aircon/get_sensor_info";

    /// The indoor temperature doubles as the sanity check: the controller
    /// sends `-` when it has no reading, which fails numeric coercion here
    /// instead of turning into a phantom temperature.
    fn from_fields(fields: &Fields) -> Result<Self, ProtocolError> {
        Ok(Self {
            htemp: fields.require_number("htemp")?,
            otemp: fields.number("otemp"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reading() {
        let fields = Fields::parse("ret=OK,htemp=23.5,otemp=16");
        let sensor = SensorInfo::from_fields(&fields).unwrap();
        assert_eq!(sensor.htemp, 23.5);
        assert_eq!(sensor.otemp, Some(16.0));
    }

    #[test]
    fn outdoor_reading_is_optional() {
        let fields = Fields::parse("ret=OK,htemp=21");
        let sensor = SensorInfo::from_fields(&fields).unwrap();
        assert_eq!(sensor.otemp, None);
    }

    #[test]
    fn placeholder_indoor_reading_is_rejected() {
        let fields = Fields::parse("ret=OK,htemp=-,otemp=16");
        assert!(matches!(
            SensorInfo::from_fields(&fields),
            Err(ProtocolError::NotNumeric { field: "htemp", .. })
        ));
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone names and damper switches.

use crate::error::ProtocolError;
use crate::protocol::wire::Fields;
use crate::types::ZoneSwitches;

use super::{Resource, WritableResource};

/// Zone configuration: display names and the on/off map.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ZoneInfo {
    /// Zone display names, in zone order.
    pub names: Vec<String>,
    /// Per-zone damper switches.
    pub switches: ZoneSwitches,
}

impl Resource for ZoneInfo {
    const NAME: &'static str = "zone info";
    const GET_PATH: &'static str = "/skyfi/aircon/get_zone_setting";

    fn from_fields(fields: &Fields) -> Result<Self, ProtocolError> {
        let raw_names = fields.require_text("zone_name")?;
        let decoded = urlencoding::decode(&raw_names)
            .map_err(|err| ProtocolError::MalformedZoneMap(err.to_string()))?;
        let names = decoded.split(';').map(str::to_string).collect();

        Ok(Self {
            names,
            switches: ZoneSwitches::decode(&fields.require_text("zone_onoff")?)?,
        })
    }

    /// Controllers under load have been seen reporting every zone closed
    /// while dampers are audibly open. Treat an all-off reading as suspect
    /// whenever cached state still shows a zone on, and let the cache serve
    /// the previous value instead.
    fn validate(&self, prior: Option<&Self>) -> Result<(), ProtocolError> {
        if !self.switches.any_on()
            && let Some(previous) = prior
            && previous.switches.any_on()
        {
            return Err(ProtocolError::SuspectReading(
                "all zones reported off while cached state shows zones on".to_string(),
            ));
        }
        Ok(())
    }
}

impl WritableResource for ZoneInfo {
    const SET_PATH: &'static str = "/skyfi/aircon/set_zone_setting";

    fn write_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("zone_name", self.names.join(";")),
            ("zone_onoff", self.switches.as_delimited()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_fields(onoff: &str) -> Fields {
        Fields::parse(&format!(
            "ret=OK,zone_name=Living%3BKitchen%3BBeds,zone_onoff={onoff}"
        ))
    }

    #[test]
    fn parses_names_and_switches() {
        let zone = ZoneInfo::from_fields(&zone_fields("1%3B0%3B1")).unwrap();
        assert_eq!(zone.names, vec!["Living", "Kitchen", "Beds"]);
        assert!(zone.switches.get(1).unwrap());
        assert!(!zone.switches.get(2).unwrap());
    }

    #[test]
    fn all_off_is_fine_without_prior_state() {
        let zone = ZoneInfo::from_fields(&zone_fields("0%3B0%3B0")).unwrap();
        assert!(zone.validate(None).is_ok());
    }

    #[test]
    fn all_off_is_suspect_when_cache_shows_zones_on() {
        let prior = ZoneInfo::from_fields(&zone_fields("1%3B0%3B1")).unwrap();
        let reading = ZoneInfo::from_fields(&zone_fields("0%3B0%3B0")).unwrap();
        assert!(matches!(
            reading.validate(Some(&prior)),
            Err(ProtocolError::SuspectReading(_))
        ));
    }

    #[test]
    fn all_off_is_accepted_when_cache_agrees() {
        let prior = ZoneInfo::from_fields(&zone_fields("0%3B0%3B0")).unwrap();
        let reading = ZoneInfo::from_fields(&zone_fields("0%3B0%3B0")).unwrap();
        assert!(reading.validate(Some(&prior)).is_ok());
    }

    #[test]
    fn write_params_use_unescaped_values() {
        // The transport applies percent encoding exactly once at URL build.
        let zone = ZoneInfo::from_fields(&zone_fields("1%3B0%3B1")).unwrap();
        let params = zone.write_params();
        assert!(params.contains(&("zone_name", "Living;Kitchen;Beds".to_string())));
        assert!(params.contains(&("zone_onoff", "1;0;1".to_string())));
    }
}

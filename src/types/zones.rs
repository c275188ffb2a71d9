// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone on/off map codec.
//!
//! The controller transfers its per-zone damper state as a percent-escaped
//! string of `;`-separated `0`/`1` tokens, e.g. `1%3B0%3B1` for three zones
//! with the middle one closed. Zones are 1-indexed everywhere a caller sees
//! them; the vector underneath is 0-indexed.

use std::fmt;

use crate::error::{ProtocolError, ValueError};

/// Decoded per-zone on/off switches.
///
/// # Examples
///
/// ```
/// use skyfi_lib::types::ZoneSwitches;
///
/// let mut zones = ZoneSwitches::decode("1%3B0%3B1").unwrap();
/// assert_eq!(zones.len(), 3);
/// assert!(zones.get(1).unwrap());
/// assert!(!zones.get(2).unwrap());
///
/// zones.set(2, true).unwrap();
/// assert_eq!(zones.encode(), "1%3B1%3B1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSwitches(Vec<bool>);

impl ZoneSwitches {
    /// Decodes a percent-escaped `;`-delimited `0`/`1` string.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedZoneMap`] if the string is not
    /// valid percent encoding or contains tokens other than `0` and `1`.
    pub fn decode(escaped: &str) -> Result<Self, ProtocolError> {
        let raw = urlencoding::decode(escaped)
            .map_err(|err| ProtocolError::MalformedZoneMap(err.to_string()))?;

        let mut switches = Vec::new();
        for token in raw.split(';') {
            match token {
                "1" => switches.push(true),
                "0" => switches.push(false),
                other => {
                    return Err(ProtocolError::MalformedZoneMap(format!(
                        "unexpected token {other:?}"
                    )));
                }
            }
        }
        Ok(Self(switches))
    }

    /// Encodes back to the controller's percent-escaped representation.
    #[must_use]
    pub fn encode(&self) -> String {
        urlencoding::encode(&self.as_delimited()).into_owned()
    }

    /// The unescaped `;`-delimited form, as sent in a write request.
    #[must_use]
    pub fn as_delimited(&self) -> String {
        let tokens: Vec<&str> = self.0.iter().map(|on| if *on { "1" } else { "0" }).collect();
        tokens.join(";")
    }

    /// Number of zones in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the state of a zone (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ZoneOutOfRange`] if the zone does not exist.
    pub fn get(&self, zone: usize) -> Result<bool, ValueError> {
        self.index(zone).map(|i| self.0[i])
    }

    /// Sets the state of a zone (1-indexed).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::ZoneOutOfRange`] if the zone does not exist;
    /// the map is left untouched in that case.
    pub fn set(&mut self, zone: usize, active: bool) -> Result<(), ValueError> {
        let i = self.index(zone)?;
        self.0[i] = active;
        Ok(())
    }

    /// Returns `true` if at least one zone is open.
    #[must_use]
    pub fn any_on(&self) -> bool {
        self.0.iter().any(|on| *on)
    }

    fn index(&self, zone: usize) -> Result<usize, ValueError> {
        if zone >= 1 && zone <= self.0.len() {
            Ok(zone - 1)
        } else {
            Err(ValueError::ZoneOutOfRange {
                zone,
                count: self.0.len(),
            })
        }
    }
}

impl fmt::Display for ZoneSwitches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_delimited())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_three_zones() {
        let zones = ZoneSwitches::decode("1%3B0%3B1").unwrap();
        assert_eq!(zones.len(), 3);
        assert!(zones.get(1).unwrap());
        assert!(!zones.get(2).unwrap());
        assert!(zones.get(3).unwrap());
    }

    #[test]
    fn decode_single_zone_without_escapes() {
        // A one-zone map has no delimiter, so nothing gets escaped.
        let zones = ZoneSwitches::decode("1").unwrap();
        assert_eq!(zones.len(), 1);
        assert!(zones.any_on());
    }

    #[test]
    fn encode_decode_round_trip() {
        for escaped in ["1%3B0%3B1", "0%3B0", "1", "1%3B1%3B1%3B0"] {
            let zones = ZoneSwitches::decode(escaped).unwrap();
            assert_eq!(zones.encode(), escaped);
        }
    }

    #[test]
    fn set_zone_updates_encoding() {
        let mut zones = ZoneSwitches::decode("1%3B0%3B1").unwrap();
        zones.set(2, true).unwrap();
        assert_eq!(zones.as_delimited(), "1;1;1");
        assert_eq!(zones.encode(), "1%3B1%3B1");
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(matches!(
            ZoneSwitches::decode("1%3B2"),
            Err(ProtocolError::MalformedZoneMap(_))
        ));
        assert!(ZoneSwitches::decode("").is_err());
    }

    #[test]
    fn out_of_range_access() {
        let mut zones = ZoneSwitches::decode("1%3B0").unwrap();
        assert_eq!(
            zones.get(0).unwrap_err(),
            ValueError::ZoneOutOfRange { zone: 0, count: 2 }
        );
        assert!(zones.set(3, true).is_err());
        // Failed set leaves the map unchanged.
        assert_eq!(zones.as_delimited(), "1;0");
    }

    #[test]
    fn any_on() {
        assert!(ZoneSwitches::decode("0%3B1").unwrap().any_on());
        assert!(!ZoneSwitches::decode("0%3B0").unwrap().any_on());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identity.

use crate::error::ProtocolError;
use crate::protocol::wire::Fields;

use super::Resource;

/// Identity fields from the adapter's basic-info endpoint.
///
/// Everything is optional: older adapters omit fields freely, and the
/// projection layer substitutes fallbacks rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BasicInfo {
    /// MAC address, used as the serial number.
    pub mac: Option<String>,
    /// Firmware version, underscore-separated on the wire.
    pub ver: Option<String>,
    /// SSID of the adapter, which doubles as the closest thing to a
    /// human-facing model name the device offers.
    pub ssid: Option<String>,
}

impl Resource for BasicInfo {
    const NAME: &'static str = "basic info";
    const GET_PATH: &'static str = "/skyfi/common/basic_info";

    fn from_fields(fields: &Fields) -> Result<Self, ProtocolError> {
        Ok(Self {
            mac: fields.text("mac").map(str::to_string),
            ver: fields.text("ver").map(str::to_string),
            ssid: fields.text("ssid").map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identity() {
        let fields =
            Fields::parse("ret=OK,type=aircon,ver=1_2_3,mac=409F38D107AC,ssid=DaikinAP12345");
        let basic = BasicInfo::from_fields(&fields).unwrap();
        assert_eq!(basic.mac.as_deref(), Some("409F38D107AC"));
        assert_eq!(basic.ver.as_deref(), Some("1_2_3"));
        assert_eq!(basic.ssid.as_deref(), Some("DaikinAP12345"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let fields = Fields::parse("ret=OK,type=aircon");
        let basic = BasicInfo::from_fields(&fields).unwrap();
        assert!(basic.mac.is_none());
        assert!(basic.ver.is_none());
    }
}

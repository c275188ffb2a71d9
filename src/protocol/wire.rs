// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire format for `SkyFi` payloads.
//!
//! The controller answers every endpoint with one flat line of
//! `key=value,key=value` pairs, e.g.
//!
//! ```text
//! ret=OK,htemp=23.5,otemp=16.0
//! ```
//!
//! Values that parse as numbers are treated as numbers, everything else
//! stays text. A `ret=OK` marker is the device-level success flag and must
//! be checked on top of the HTTP status.

use std::collections::HashMap;

use crate::error::ProtocolError;

/// A single decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    /// The value parsed as a number.
    Number(f64),
    /// Anything that did not parse as a number.
    Text(String),
}

/// Decoded `key=value,key=value` payload.
#[derive(Debug, Clone, Default)]
pub(crate) struct Fields(HashMap<String, FieldValue>);

impl Fields {
    /// Parses a payload body. Items without a `=` are skipped.
    pub(crate) fn parse(body: &str) -> Self {
        let mut map = HashMap::new();
        for item in body.trim().split(',') {
            let Some((key, value)) = item.split_once('=') else {
                continue;
            };
            let decoded = match value.parse::<f64>() {
                Ok(number) => FieldValue::Number(number),
                Err(_) => FieldValue::Text(value.to_string()),
            };
            map.insert(key.to_string(), decoded);
        }
        Self(map)
    }

    /// Returns `true` if the payload carries the `ret=OK` success marker.
    pub(crate) fn ret_ok(&self) -> bool {
        matches!(self.0.get("ret"), Some(FieldValue::Text(v)) if v == "OK")
    }

    /// The raw `ret` marker, for error reporting.
    pub(crate) fn ret(&self) -> String {
        match self.0.get("ret") {
            Some(FieldValue::Text(v)) => v.clone(),
            Some(FieldValue::Number(n)) => n.to_string(),
            None => "<missing>".to_string(),
        }
    }

    /// Returns a numeric field, if present and numeric.
    pub(crate) fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns a textual field, if present and textual.
    pub(crate) fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(FieldValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns a required numeric field.
    pub(crate) fn require_number(&self, key: &'static str) -> Result<f64, ProtocolError> {
        match self.0.get(key) {
            Some(FieldValue::Number(n)) => Ok(*n),
            Some(FieldValue::Text(v)) => Err(ProtocolError::NotNumeric {
                field: key,
                value: v.clone(),
            }),
            None => Err(ProtocolError::MissingField(key)),
        }
    }

    /// Returns a required field as text.
    ///
    /// Numbers are rendered back to their string form: a one-zone map comes
    /// over the wire as a bare `1`, which the numeric coercion swallows.
    pub(crate) fn require_text(&self, key: &'static str) -> Result<String, ProtocolError> {
        match self.0.get(key) {
            Some(FieldValue::Text(v)) => Ok(v.clone()),
            Some(FieldValue::Number(n)) => Ok(n.to_string()),
            None => Err(ProtocolError::MissingField(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_payload() {
        let fields = Fields::parse("ret=OK,htemp=23.5,otemp=16,name=Lounge");
        assert!(fields.ret_ok());
        assert_eq!(fields.number("htemp"), Some(23.5));
        assert_eq!(fields.number("otemp"), Some(16.0));
        assert_eq!(fields.text("name"), Some("Lounge"));
    }

    #[test]
    fn placeholder_reading_stays_text() {
        let fields = Fields::parse("ret=OK,htemp=-,otemp=16");
        assert_eq!(fields.number("htemp"), None);
        assert!(matches!(
            fields.require_number("htemp"),
            Err(ProtocolError::NotNumeric { field: "htemp", .. })
        ));
    }

    #[test]
    fn ret_must_be_ok() {
        assert!(!Fields::parse("ret=PARAM NG,msg=404").ret_ok());
        assert!(!Fields::parse("htemp=23").ret_ok());
        assert_eq!(Fields::parse("htemp=23").ret(), "<missing>");
    }

    #[test]
    fn require_text_renders_numbers() {
        // zone_onoff for a single-zone unit is a bare digit.
        let fields = Fields::parse("ret=OK,zone_onoff=1");
        assert_eq!(fields.require_text("zone_onoff").unwrap(), "1");
    }

    #[test]
    fn missing_field() {
        let fields = Fields::parse("ret=OK");
        assert_eq!(
            fields.require_number("pow").unwrap_err(),
            ProtocolError::MissingField("pow")
        );
    }

    #[test]
    fn garbage_items_are_skipped() {
        let fields = Fields::parse("ret=OK,notapair,pow=1");
        assert_eq!(fields.number("pow"), Some(1.0));
    }

    #[test]
    fn empty_body_has_no_ret() {
        let fields = Fields::parse("");
        assert!(!fields.ret_ok());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static model limits.

use crate::error::ProtocolError;
use crate::protocol::wire::Fields;

use super::Resource;

/// Temperature range limits reported by the unit, per mode.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ModelInfo {
    /// Lowest accepted cooling target.
    pub cool_low: f64,
    /// Highest accepted cooling target.
    pub cool_high: f64,
    /// Lowest accepted heating target.
    pub heat_low: f64,
    /// Highest accepted heating target.
    pub heat_high: f64,
}

impl Resource for ModelInfo {
    const NAME: &'static str = "model info";
    const GET_PATH: &'static str = "/skyfi/aircon/get_model_info";

    fn from_fields(fields: &Fields) -> Result<Self, ProtocolError> {
        Ok(Self {
            cool_low: fields.require_number("cool_l")?,
            cool_high: fields.require_number("cool_h")?,
            heat_low: fields.require_number("heat_l")?,
            heat_high: fields.require_number("heat_h")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_limits() {
        let fields = Fields::parse("ret=OK,model=NOTSUPPORT,cool_l=16,cool_h=32,heat_l=10,heat_h=30");
        let model = ModelInfo::from_fields(&fields).unwrap();
        assert_eq!(model.cool_low, 16.0);
        assert_eq!(model.cool_high, 32.0);
        assert_eq!(model.heat_low, 10.0);
        assert_eq!(model.heat_high, 30.0);
    }

    #[test]
    fn missing_limit_is_an_error() {
        let fields = Fields::parse("ret=OK,cool_l=16,cool_h=32");
        assert!(matches!(
            ModelInfo::from_fields(&fields),
            Err(ProtocolError::MissingField("heat_l"))
        ));
    }
}

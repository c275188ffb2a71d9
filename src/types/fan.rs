// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed handling.

use std::fmt;

use crate::error::ValueError;

/// A validated fan speed.
///
/// Ducted `SkyFi` units drive their fan at rates 1-5. Units with an airside
/// economizer expose it as a separate flag on the wire; externally it appears
/// as the reserved speed value [`FanSpeed::AIRSIDE`].
///
/// # Examples
///
/// ```
/// use skyfi_lib::types::FanSpeed;
///
/// let speed = FanSpeed::new(3).unwrap();
/// assert_eq!(speed.value(), 3);
/// assert!(!speed.is_airside());
///
/// let airside = FanSpeed::new(FanSpeed::AIRSIDE).unwrap();
/// assert!(airside.is_airside());
///
/// assert!(FanSpeed::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FanSpeed(u8);

impl FanSpeed {
    /// Lowest regular fan rate.
    pub const MIN: u8 = 1;
    /// Highest regular fan rate.
    pub const MAX: u8 = 5;
    /// Reserved value selecting the airside economizer instead of a rate.
    pub const AIRSIDE: u8 = 7;

    /// Creates a fan speed, accepting 1-5 and the airside value.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::FanSpeedOutOfRange`] for anything else.
    pub const fn new(value: u8) -> Result<Self, ValueError> {
        if (value >= Self::MIN && value <= Self::MAX) || value == Self::AIRSIDE {
            Ok(Self(value))
        } else {
            Err(ValueError::FanSpeedOutOfRange(value))
        }
    }

    /// Returns the raw speed value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` if this speed selects the airside economizer.
    #[must_use]
    pub const fn is_airside(&self) -> bool {
        self.0 == Self::AIRSIDE
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_airside() {
            write!(f, "airside")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_range() {
        for value in FanSpeed::MIN..=FanSpeed::MAX {
            assert_eq!(FanSpeed::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn accepts_airside_value() {
        let speed = FanSpeed::new(FanSpeed::AIRSIDE).unwrap();
        assert!(speed.is_airside());
        assert_eq!(speed.to_string(), "airside");
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            FanSpeed::new(0).unwrap_err(),
            ValueError::FanSpeedOutOfRange(0)
        );
        assert!(FanSpeed::new(6).is_err());
        assert!(FanSpeed::new(8).is_err());
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode of the air conditioner.

use std::fmt;

/// Operating mode as understood by the `SkyFi` controller.
///
/// The controller numbers its modes: 1 = heat, 2 = cool, 3 = auto. Readings
/// with any other number are projected to [`Mode::Auto`].
///
/// # Examples
///
/// ```
/// use skyfi_lib::types::Mode;
///
/// assert_eq!(Mode::Heat.as_wire(), 1);
/// assert_eq!(Mode::from_wire(2), Some(Mode::Cool));
/// assert_eq!(Mode::from_wire(8), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Heating.
    Heat,
    /// Cooling.
    Cool,
    /// Device-managed automatic mode.
    Auto,
}

impl Mode {
    /// Returns the numeric value used on the wire.
    #[must_use]
    pub const fn as_wire(&self) -> u8 {
        match self {
            Self::Heat => 1,
            Self::Cool => 2,
            Self::Auto => 3,
        }
    }

    /// Parses the numeric wire value.
    #[must_use]
    pub const fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Heat),
            2 => Some(Self::Cool),
            3 => Some(Self::Auto),
            _ => None,
        }
    }

    /// Returns a lowercase label for logs and display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for mode in [Mode::Heat, Mode::Cool, Mode::Auto] {
            assert_eq!(Mode::from_wire(mode.as_wire()), Some(mode));
        }
    }

    #[test]
    fn unknown_wire_value() {
        assert_eq!(Mode::from_wire(0), None);
        assert_eq!(Mode::from_wire(8), None);
    }

    #[test]
    fn display() {
        assert_eq!(Mode::Cool.to_string(), "cool");
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types shared across the library.
//!
//! These types encode the controller's own vocabulary: numeric operating
//! modes, the small fan-speed range, and the delimited zone on/off map.

mod fan;
mod mode;
mod zones;

pub use fan::FanSpeed;
pub use mode::Mode;
pub use zones::ZoneSwitches;

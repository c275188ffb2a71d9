// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device resources.
//!
//! Each resource is one endpoint's worth of device state: plain value
//! records identified by their endpoint path, replaced wholesale on every
//! read, never partially mutated from outside the engine.

mod basic;
mod control;
mod model;
mod sensor;
mod zone;

pub(crate) use basic::BasicInfo;
pub(crate) use control::ControlInfo;
pub(crate) use model::ModelInfo;
pub(crate) use sensor::SensorInfo;
pub(crate) use zone::ZoneInfo;

use crate::error::ProtocolError;
use crate::protocol::wire::Fields;

/// A readable unit of device state.
pub(crate) trait Resource: Clone + PartialEq + Send + Sync + 'static {
    /// Human-readable name used in logs and errors.
    const NAME: &'static str;
    /// Endpoint path the resource is read from.
    const GET_PATH: &'static str;

    /// Builds the resource from a decoded payload.
    fn from_fields(fields: &Fields) -> Result<Self, ProtocolError>;

    /// Resource-specific sanity check, run before a reading is cached.
    ///
    /// `prior` is the freshest previously cached value, so rules can catch
    /// readings that contradict known state, not just malformed ones.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] to discard the reading; the caller then
    /// falls back to the last known good value.
    fn validate(&self, _prior: Option<&Self>) -> Result<(), ProtocolError> {
        Ok(())
    }
}

/// A resource that can also be written back to the device.
pub(crate) trait WritableResource: Resource {
    /// Endpoint path the resource is written to.
    const SET_PATH: &'static str;

    /// Query parameters carrying the full resource for a write.
    fn write_params(&self) -> Vec<(&'static str, String)>;
}

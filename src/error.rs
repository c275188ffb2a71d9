// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `SkyFi` library.
//!
//! The hierarchy mirrors how failures are absorbed: transport and protocol
//! errors are retried and then soaked up by the cache fallback, so the only
//! error most read paths can still surface is [`Error::Unavailable`].

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error reaching the device over HTTP.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The device answered, but the payload was unusable.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A caller-supplied value failed validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Both the live fetch and every cache tier came up empty.
    #[error("{resource} is unavailable: no cached value to fall back on")]
    Unavailable {
        /// Human-readable name of the resource that could not be read.
        resource: &'static str,
    },
}

/// Errors raised while talking to the device over HTTP.
///
/// These are retried inside the transport before they ever propagate.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request itself failed (connection refused, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success HTTP status.
    #[error("device returned HTTP {0}")]
    Status(u16),
}

/// Errors raised by payloads that violate the device's wire contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The payload carried a `ret` marker other than `OK`.
    #[error("device answered ret={0:?} instead of OK")]
    DeviceRejected(String),

    /// A field required by the resource is absent from the payload.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// A field that must be numeric came back as text.
    ///
    /// The controller reports `-` for sensor readings it cannot take, which
    /// lands here rather than producing a bogus temperature.
    #[error("field {field} is not numeric: {value:?}")]
    NotNumeric {
        /// The field that failed numeric coercion.
        field: &'static str,
        /// The raw textual value received.
        value: String,
    },

    /// A reading contradicted cached state badly enough to be discarded.
    #[error("suspect reading discarded: {0}")]
    SuspectReading(String),

    /// The zone on/off map could not be decoded.
    #[error("malformed zone map: {0}")]
    MalformedZoneMap(String),
}

/// Errors related to caller-supplied values and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Fan speeds are 1-5, plus the reserved airside value.
    #[error("fan speed {0} is not 1-5 or the airside value 7")]
    FanSpeedOutOfRange(u8),

    /// A zone number outside the device's zone map was addressed.
    #[error("zone {zone} is out of range (device reports {count} zones)")]
    ZoneOutOfRange {
        /// The 1-indexed zone number that was requested.
        zone: usize,
        /// How many zones the device actually reports.
        count: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device builder and tuning knobs.

use std::time::Duration;

use uuid::Uuid;

use crate::device::SkyfiDevice;
use crate::engine::{Engine, EngineTuning};
use crate::error::Error;
use crate::protocol::Transport;
use crate::retry::RetryPolicy;
use crate::subscription::CallbackRegistry;

/// Builder for a [`SkyfiDevice`].
///
/// The defaults match what one of these controllers actually tolerates:
/// around one request per second, short timeouts, and a couple of seconds of
/// write coalescing. Tighten them at your own risk.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use skyfi_lib::SkyfiDevice;
///
/// # fn example() -> skyfi_lib::Result<()> {
/// let device = SkyfiDevice::builder("192.168.1.40")
///     .with_timeout(Duration::from_secs(5))
///     .with_coalesce_window(Duration::from_secs(1))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SkyfiDeviceBuilder {
    host: String,
    port: u16,
    timeout: Duration,
    min_request_gap: Duration,
    coalesce_window: Duration,
    fresh_ttl: Duration,
    transport_attempts: u32,
    verify_attempts: u32,
    backoff_base: Duration,
    suspect_zone_all_off: bool,
}

impl SkyfiDeviceBuilder {
    /// Port the `SkyFi` adapter listens on.
    pub const DEFAULT_PORT: u16 = 2000;
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
    /// Default minimum spacing between consecutive device requests.
    pub const DEFAULT_MIN_REQUEST_GAP: Duration = Duration::from_secs(1);
    /// Default quiet period before a staged write is flushed.
    pub const DEFAULT_COALESCE_WINDOW: Duration = Duration::from_secs(2);
    /// Default lifetime of the fresh cache tier.
    pub const DEFAULT_FRESH_TTL: Duration = Duration::from_secs(5);
    /// Default transport retry budget.
    pub const DEFAULT_TRANSPORT_ATTEMPTS: u32 = 5;
    /// Default write-verify attempt budget.
    pub const DEFAULT_VERIFY_ATTEMPTS: u32 = 3;
    /// Default base delay for retry backoff.
    pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);

    /// Longest single backoff delay, before jitter.
    const BACKOFF_CAP: Duration = Duration::from_secs(8);

    pub(crate) fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
            min_request_gap: Self::DEFAULT_MIN_REQUEST_GAP,
            coalesce_window: Self::DEFAULT_COALESCE_WINDOW,
            fresh_ttl: Self::DEFAULT_FRESH_TTL,
            transport_attempts: Self::DEFAULT_TRANSPORT_ATTEMPTS,
            verify_attempts: Self::DEFAULT_VERIFY_ATTEMPTS,
            backoff_base: Self::DEFAULT_BACKOFF_BASE,
            suspect_zone_all_off: true,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum spacing between consecutive device requests.
    #[must_use]
    pub fn with_min_request_gap(mut self, gap: Duration) -> Self {
        self.min_request_gap = gap;
        self
    }

    /// Sets the quiet period before a staged write is flushed.
    #[must_use]
    pub fn with_coalesce_window(mut self, window: Duration) -> Self {
        self.coalesce_window = window;
        self
    }

    /// Sets how long cached reads stay fresh.
    #[must_use]
    pub fn with_fresh_ttl(mut self, ttl: Duration) -> Self {
        self.fresh_ttl = ttl;
        self
    }

    /// Sets the transport retry budget (attempts per request, including the
    /// first).
    #[must_use]
    pub fn with_transport_attempts(mut self, attempts: u32) -> Self {
        self.transport_attempts = attempts.max(1);
        self
    }

    /// Sets the write-verify attempt budget.
    #[must_use]
    pub fn with_verify_attempts(mut self, attempts: u32) -> Self {
        self.verify_attempts = attempts.max(1);
        self
    }

    /// Sets the base delay for retry backoff; it doubles per attempt.
    #[must_use]
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    /// Enables or disables the all-zones-off guard.
    ///
    /// Some controllers report every zone closed under load. With the guard
    /// on (the default), such a reading is discarded whenever cached state
    /// still shows a zone open.
    #[must_use]
    pub fn with_zone_all_off_guard(mut self, enabled: bool) -> Self {
        self.suspect_zone_all_off = enabled;
        self
    }

    /// Builds the device. No network access happens until the first read.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(self) -> Result<SkyfiDevice, Error> {
        let base_url = format!("http://{}:{}", self.host, self.port);
        let transport = Transport::new(
            base_url,
            self.timeout,
            self.min_request_gap,
            RetryPolicy {
                base_delay: self.backoff_base,
                max_delay: Self::BACKOFF_CAP,
                max_attempts: self.transport_attempts,
            },
        )?;

        let engine = Engine::new(
            transport,
            EngineTuning {
                fresh_ttl: self.fresh_ttl,
                coalesce_window: self.coalesce_window,
                verify_policy: RetryPolicy {
                    base_delay: self.backoff_base,
                    max_delay: Self::BACKOFF_CAP,
                    max_attempts: self.verify_attempts,
                },
                validate_against_prior: self.suspect_zone_all_off,
            },
        );

        Ok(SkyfiDevice::new(engine, CallbackRegistry::new(), Uuid::new_v4().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = SkyfiDeviceBuilder::new("192.168.1.40");
        assert_eq!(builder.port, SkyfiDeviceBuilder::DEFAULT_PORT);
        assert_eq!(builder.timeout, SkyfiDeviceBuilder::DEFAULT_TIMEOUT);
        assert!(builder.suspect_zone_all_off);
    }

    #[test]
    fn builder_overrides() {
        let builder = SkyfiDeviceBuilder::new("192.168.1.40")
            .with_port(8080)
            .with_min_request_gap(Duration::from_millis(100))
            .with_verify_attempts(0)
            .with_zone_all_off_guard(false);

        assert_eq!(builder.port, 8080);
        assert_eq!(builder.min_request_gap, Duration::from_millis(100));
        // A zero budget makes no sense; it is clamped to one attempt.
        assert_eq!(builder.verify_attempts, 1);
        assert!(!builder.suspect_zone_all_off);
    }

    #[test]
    fn build_succeeds_without_network() {
        assert!(SkyfiDeviceBuilder::new("192.168.1.40").build().is_ok());
    }
}

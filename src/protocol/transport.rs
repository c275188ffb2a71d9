// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rate-limited HTTP transport.
//!
//! The `SkyFi` WiFi adapter tolerates only a couple of requests per second
//! and occasionally answers garbage under load. The transport therefore
//! serializes every outbound request behind one pacing lock, enforces a
//! minimum gap between consecutive requests no matter how many callers pile
//! up, and retries failed requests with exponential backoff before letting
//! the error reach the caches.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, ProtocolError, TransportError};
use crate::retry::{RetryPolicy, retry_with_backoff};

use super::wire::Fields;

/// Serialized, paced, retrying access to the device's HTTP endpoints.
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    /// Issue time of the most recent request. Holding this lock across the
    /// request is what serializes callers.
    pace: Mutex<Option<Instant>>,
    min_gap: Duration,
    policy: RetryPolicy,
}

impl Transport {
    /// Creates a transport for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub(crate) fn new(
        base_url: String,
        timeout: Duration,
        min_gap: Duration,
        policy: RetryPolicy,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            http,
            base_url,
            pace: Mutex::new(None),
            min_gap,
            policy,
        })
    }

    /// Performs a paced GET and returns the decoded payload.
    ///
    /// Transport failures (connection, timeout, non-2xx) and protocol
    /// failures (no `ret=OK`) are retried with backoff; after the budget is
    /// spent the last error is surfaced for the caller's fallback policy.
    ///
    /// # Errors
    ///
    /// Returns the final [`TransportError`] or [`ProtocolError`] once the
    /// retry budget is exhausted.
    pub(crate) async fn request(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Fields, Error> {
        let url = self.build_url(path, params);
        retry_with_backoff(self.policy, |attempt| self.attempt(&url, attempt), |_| true).await
    }

    async fn attempt(&self, url: &str, attempt: u32) -> Result<Fields, Error> {
        let response = self.paced_get(url, attempt).await.map_err(TransportError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let body = response.text().await.map_err(TransportError::Http)?;
        let fields = Fields::parse(&body);
        if !fields.ret_ok() {
            return Err(ProtocolError::DeviceRejected(fields.ret()).into());
        }
        Ok(fields)
    }

    /// Issues one GET while holding the pacing lock, sleeping first if the
    /// previous request was issued less than `min_gap` ago.
    async fn paced_get(&self, url: &str, attempt: u32) -> Result<reqwest::Response, reqwest::Error> {
        let mut last_issued = self.pace.lock().await;

        if let Some(issued) = *last_issued {
            let since = issued.elapsed();
            if since < self.min_gap {
                tokio::time::sleep(self.min_gap - since).await;
            }
        }

        *last_issued = Some(Instant::now());
        debug!(%url, attempt, "issuing device request");
        self.http.get(url).send().await
    }

    fn build_url(&self, path: &str, params: &[(&'static str, String)]) -> String {
        let mut url = format!("{}{path}", self.base_url);
        let mut separator = '?';
        for (key, value) in params {
            url.push(separator);
            separator = '&';
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("min_gap", &self.min_gap)
            .finish_non_exhaustive()
    }
}

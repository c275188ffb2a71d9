// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded retry with exponential backoff.
//!
//! One utility drives both retry loops in the crate: the transport (retry on
//! error until the budget runs out) and the write verifier (retry until a
//! re-read matches the intended state). Callers pass an acceptance predicate;
//! an attempt that returns `Ok` but is not accepted is retried like an error.

use std::future::Future;
use std::time::Duration;

/// Backoff schedule and attempt budget for a retry loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    /// Delay before the second attempt; doubles per attempt after that.
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay, before jitter.
    pub max_delay: Duration,
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Backoff delay after the given 0-indexed attempt.
    ///
    /// `delay = min(base * 2^attempt, max) + jitter`
    ///
    /// Jitter is +-25%, seeded deterministically from the attempt number.
    /// Not random in the cryptographic sense, but enough to keep several
    /// clients of one controller from hammering it in lockstep.
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        #[allow(clippy::cast_possible_wrap)]
        let base = self.base_delay.as_secs_f64() * 2.0_f64.powi(attempt.min(30) as i32);
        let capped = base.min(self.max_delay.as_secs_f64());

        let jitter_factor = 1.0 + 0.25 * (f64::from(attempt) * 7.3).sin();
        Duration::from_secs_f64((capped * jitter_factor).max(0.0))
    }
}

/// Runs `op` until it produces an accepted value or the budget is spent.
///
/// - `Err` results are retried; the last error is returned when the budget
///   runs out.
/// - `Ok` results are passed to `accept`; rejected values are retried, and
///   the *last observed* value is returned when the budget runs out, so the
///   caller can inspect what the device actually settled on.
pub(crate) async fn retry_with_backoff<T, E, F, Fut, A>(
    policy: RetryPolicy,
    mut op: F,
    mut accept: A,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    A: FnMut(&T) -> bool,
{
    let mut attempt = 0;
    loop {
        let last_attempt = attempt + 1 >= policy.max_attempts;
        match op(attempt).await {
            Ok(value) if accept(&value) => return Ok(value),
            Ok(value) => {
                if last_attempt {
                    return Ok(value);
                }
            }
            Err(err) => {
                if last_attempt {
                    return Err(err);
                }
            }
        }
        tokio::time::sleep(policy.backoff(attempt)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            max_attempts: attempts,
        }
    }

    #[test]
    fn backoff_increases_exponentially() {
        let p = policy(5);
        let d0 = p.backoff(0);
        let d1 = p.backoff(1);
        let d2 = p.backoff(2);

        assert!(d1 > d0, "d1 ({d1:?}) should be greater than d0 ({d0:?})");
        assert!(d2 > d1, "d2 ({d2:?}) should be greater than d1 ({d1:?})");
    }

    #[test]
    fn backoff_caps_at_max_delay() {
        let p = policy(5);
        // With jitter up to +25%, the effective ceiling is max_delay * 1.25.
        assert!(p.backoff(20) <= Duration::from_secs_f64(5.0 * 1.25));
    }

    #[tokio::test(start_paused = true)]
    async fn returns_first_accepted_value() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, ()> = retry_with_backoff(
            policy(5),
            move |_| {
                let counter = counter.clone();
                async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
            },
            |value| *value >= 2,
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_last_value_when_never_accepted() {
        let result: Result<u32, ()> =
            retry_with_backoff(policy(3), |attempt| async move { Ok(attempt) }, |_| false).await;

        // Budget of 3 attempts, attempts are 0-indexed.
        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn surfaces_last_error_when_budget_spent() {
        let result: Result<(), u32> =
            retry_with_backoff(policy(4), |attempt| async move { Err(attempt) }, |()| true).await;

        assert_eq!(result.unwrap_err(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_errors() {
        let result: Result<&str, &str> = retry_with_backoff(
            policy(5),
            |attempt| async move {
                if attempt < 2 {
                    Err("transient")
                } else {
                    Ok("recovered")
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap(), "recovered");
    }
}

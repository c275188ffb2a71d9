// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-tier read cache for one resource.
//!
//! The `fresh` tier is short-lived and answers ordinary reads; the
//! `last_good` tier keeps the most recent *validated* value for as long as
//! the process lives and is consulted only when a live refresh fails.
//! Availability beats strict freshness: once anything good has been seen,
//! readers keep getting a value.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Caches for one resource. Lock scope is table access only; it is never
/// held across I/O.
#[derive(Debug)]
pub(crate) struct TieredCache<T> {
    tiers: Mutex<Tiers<T>>,
    ttl: Duration,
}

#[derive(Debug)]
struct Tiers<T> {
    fresh: Option<FreshEntry<T>>,
    last_good: Option<T>,
}

#[derive(Debug)]
struct FreshEntry<T> {
    value: T,
    written_at: Instant,
}

impl<T: Clone> TieredCache<T> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            tiers: Mutex::new(Tiers {
                fresh: None,
                last_good: None,
            }),
            ttl,
        }
    }

    /// Returns the fresh value if it has not expired, purging it otherwise.
    pub(crate) fn fresh(&self) -> Option<T> {
        let mut tiers = self.tiers.lock();
        match &tiers.fresh {
            Some(entry) if entry.written_at.elapsed() <= self.ttl => Some(entry.value.clone()),
            Some(_) => {
                tiers.fresh = None;
                None
            }
            None => None,
        }
    }

    /// Returns the last validated value, however old.
    pub(crate) fn last_good(&self) -> Option<T> {
        self.tiers.lock().last_good.clone()
    }

    /// The freshest value from either tier, for validation context.
    pub(crate) fn peek(&self) -> Option<T> {
        self.fresh().or_else(|| self.last_good())
    }

    /// Stores a validated value in both tiers.
    pub(crate) fn store(&self, value: T) {
        let mut tiers = self.tiers.lock();
        tiers.fresh = Some(FreshEntry {
            value: value.clone(),
            written_at: Instant::now(),
        });
        tiers.last_good = Some(value);
    }

    /// Publishes an optimistic value into the fresh tier only.
    ///
    /// Used while a write is pending so readers observe the intended state.
    /// `last_good` is untouched: it may only ever hold validated values.
    pub(crate) fn publish_fresh(&self, value: T) {
        self.tiers.lock().fresh = Some(FreshEntry {
            value,
            written_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_misses() {
        let cache: TieredCache<u32> = TieredCache::new(Duration::from_secs(5));
        assert_eq!(cache.fresh(), None);
        assert_eq!(cache.last_good(), None);
    }

    #[test]
    fn store_fills_both_tiers() {
        let cache = TieredCache::new(Duration::from_secs(5));
        cache.store(7);
        assert_eq!(cache.fresh(), Some(7));
        assert_eq!(cache.last_good(), Some(7));
    }

    #[test]
    fn fresh_tier_expires_but_last_good_survives() {
        let cache = TieredCache::new(Duration::from_millis(10));
        cache.store(7);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.fresh(), None);
        assert_eq!(cache.last_good(), Some(7));
    }

    #[test]
    fn publish_fresh_leaves_last_good_alone() {
        let cache = TieredCache::new(Duration::from_secs(5));
        cache.store(7);
        cache.publish_fresh(9);
        assert_eq!(cache.fresh(), Some(9));
        assert_eq!(cache.last_good(), Some(7));
    }

    #[test]
    fn peek_prefers_fresh() {
        let cache = TieredCache::new(Duration::from_secs(5));
        cache.store(7);
        cache.publish_fresh(9);
        assert_eq!(cache.peek(), Some(9));
    }

    #[test]
    fn peek_falls_back_to_last_good() {
        let cache = TieredCache::new(Duration::from_millis(10));
        cache.store(7);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.peek(), Some(7));
    }
}

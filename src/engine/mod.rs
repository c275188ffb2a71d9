// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The state synchronization engine.
//!
//! One [`Engine`] owns the transport plus a two-tier cache per resource and
//! a write slot per mutable resource. Reads prefer the fresh cache tier and
//! degrade to the last known good value when the device misbehaves; writes
//! are coalesced, flushed after a quiet period and verified against a
//! re-read (see [`write`](self::write)).

mod cache;
mod write;

use std::time::Duration;

use tracing::warn;

use crate::error::Error;
use crate::protocol::Transport;
use crate::resource::{BasicInfo, ControlInfo, ModelInfo, Resource, SensorInfo, ZoneInfo};
use crate::retry::RetryPolicy;

pub(crate) use cache::TieredCache;
pub(crate) use write::WriteSlot;

/// Knobs that shape the engine's caching and write behavior.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EngineTuning {
    /// How long a cached value answers reads without touching the device.
    pub fresh_ttl: Duration,
    /// Quiet period between the first staged edit and the device write.
    pub coalesce_window: Duration,
    /// Attempt budget and backoff for the write-verify loop.
    pub verify_policy: RetryPolicy,
    /// Feeds prior cached state into resource validation, which drives the
    /// all-zones-off guard. Off means readings are only checked in isolation.
    pub validate_against_prior: bool,
}

/// Cache and write-coalescing state for one device.
#[derive(Debug)]
pub(crate) struct Engine {
    transport: Transport,
    tuning: EngineTuning,
    pub(crate) sensor: TieredCache<SensorInfo>,
    pub(crate) model: TieredCache<ModelInfo>,
    pub(crate) basic: TieredCache<BasicInfo>,
    pub(crate) control: WriteSlot<ControlInfo>,
    pub(crate) zone: WriteSlot<ZoneInfo>,
}

impl Engine {
    pub(crate) fn new(transport: Transport, tuning: EngineTuning) -> Self {
        Self {
            transport,
            tuning,
            sensor: TieredCache::new(tuning.fresh_ttl),
            model: TieredCache::new(tuning.fresh_ttl),
            basic: TieredCache::new(tuning.fresh_ttl),
            control: WriteSlot::new(tuning.fresh_ttl),
            zone: WriteSlot::new(tuning.fresh_ttl),
        }
    }

    pub(crate) fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Reads a resource, preferring the fresh cache tier.
    ///
    /// With `allow_cache` unset the device is always consulted; either way a
    /// failed refresh falls back to the last known good value, so callers
    /// only ever see [`Error::Unavailable`] before the first successful read.
    pub(crate) async fn read<T: Resource>(
        &self,
        cache: &TieredCache<T>,
        allow_cache: bool,
    ) -> Result<T, Error> {
        if allow_cache
            && let Some(value) = cache.fresh()
        {
            return Ok(value);
        }

        match self.refresh(cache).await {
            Ok(value) => Ok(value),
            Err(err) => match cache.last_good() {
                Some(fallback) => {
                    warn!(
                        resource = T::NAME,
                        error = %err,
                        "refresh failed, serving last known good value"
                    );
                    Ok(fallback)
                }
                None => {
                    warn!(resource = T::NAME, error = %err, "refresh failed with nothing cached");
                    Err(Error::Unavailable { resource: T::NAME })
                }
            },
        }
    }

    /// Fetches, validates and caches a live reading.
    async fn refresh<T: Resource>(&self, cache: &TieredCache<T>) -> Result<T, Error> {
        let fields = self.transport.request(T::GET_PATH, &[]).await?;
        let value = T::from_fields(&fields)?;

        let prior = if self.tuning.validate_against_prior {
            cache.peek()
        } else {
            None
        };
        value.validate(prior.as_ref())?;

        cache.store(value.clone());
        Ok(value)
    }

    // Typed shortcuts so callers do not reach into cache fields directly.

    pub(crate) async fn read_sensor(&self, allow_cache: bool) -> Result<SensorInfo, Error> {
        self.read(&self.sensor, allow_cache).await
    }

    pub(crate) async fn read_model(&self, allow_cache: bool) -> Result<ModelInfo, Error> {
        self.read(&self.model, allow_cache).await
    }

    pub(crate) async fn read_basic(&self, allow_cache: bool) -> Result<BasicInfo, Error> {
        self.read(&self.basic, allow_cache).await
    }

    pub(crate) async fn read_control(&self, allow_cache: bool) -> Result<ControlInfo, Error> {
        self.read(self.control.cache(), allow_cache).await
    }

    pub(crate) async fn read_zone(&self, allow_cache: bool) -> Result<ZoneInfo, Error> {
        self.read(self.zone.cache(), allow_cache).await
    }
}

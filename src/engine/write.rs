// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Write coalescing and verification.
//!
//! Device writes are the slowest, scarcest operation the controller offers,
//! so mutations never hit the wire directly. The first edit to an idle
//! resource fetches an authoritative baseline, stages a desired copy and
//! arms a single flush timer; edits arriving inside the quiet window merge
//! into the same desired copy without resetting the timer. When the timer
//! fires the pending write is detached before any I/O, written, and then
//! verified by re-reading the device. A write that refuses to stick is
//! retried a few times; after that the caches are reconciled to whatever
//! state the device actually holds.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::{Error, ValueError};
use crate::resource::WritableResource;
use crate::retry::retry_with_backoff;

use super::{Engine, TieredCache};

/// A staged write: the caller's intended state and the snapshot it was
/// derived from.
#[derive(Debug)]
struct PendingWrite<T> {
    desired: T,
    baseline: T,
}

/// Cache plus pending-write state for one mutable resource.
///
/// `None` in the slot means idle; `Some` means a flush timer is armed.
/// The mutex is held across the baseline fetch so edits to one resource are
/// applied strictly in call order, but never across another resource's I/O.
#[derive(Debug)]
pub(crate) struct WriteSlot<T: WritableResource> {
    cache: TieredCache<T>,
    pending: Mutex<Option<PendingWrite<T>>>,
}

impl<T: WritableResource> WriteSlot<T> {
    pub(crate) fn new(fresh_ttl: std::time::Duration) -> Self {
        Self {
            cache: TieredCache::new(fresh_ttl),
            pending: Mutex::new(None),
        }
    }

    pub(crate) fn cache(&self) -> &TieredCache<T> {
        &self.cache
    }
}

impl Engine {
    /// Stages an edit for the resource behind `select`.
    ///
    /// The edit lands on the pending desired state if a write is already
    /// staged; otherwise a fresh baseline is fetched (cache bypassed) and a
    /// flush timer armed. Either way the desired state is published into the
    /// fresh cache tier so readers immediately observe the intent.
    ///
    /// # Errors
    ///
    /// Returns an error when no baseline could be obtained, or when the edit
    /// itself rejects a caller value. Flush failures are absorbed later and
    /// never reported here.
    pub(crate) async fn mutate<T, F>(
        self: Arc<Self>,
        select: fn(&Engine) -> &WriteSlot<T>,
        edit: F,
    ) -> Result<(), Error>
    where
        T: WritableResource,
        F: FnOnce(&mut T) -> Result<(), ValueError>,
    {
        let slot = select(&self);
        let mut pending = slot.pending.lock().await;

        if let Some(staged) = pending.as_mut() {
            edit(&mut staged.desired)?;
            slot.cache.publish_fresh(staged.desired.clone());
            return Ok(());
        }

        let baseline = self.read(&slot.cache, false).await?;
        let mut desired = baseline.clone();
        edit(&mut desired)?;
        slot.cache.publish_fresh(desired.clone());
        *pending = Some(PendingWrite { desired, baseline });
        drop(pending);

        let engine = Arc::clone(&self);
        tokio::spawn(async move {
            tokio::time::sleep(engine.tuning().coalesce_window).await;
            engine.flush(select).await;
        });
        Ok(())
    }

    /// Flushes the pending write for one resource, verifying it stuck.
    ///
    /// The pending write is detached under the lock before any I/O, so edits
    /// arriving mid-flush stage a new write instead of racing this one.
    async fn flush<T: WritableResource>(self: Arc<Self>, select: fn(&Engine) -> &WriteSlot<T>) {
        let slot = select(&self);
        let detached = slot.pending.lock().await.take();
        let Some(PendingWrite { desired, baseline }) = detached else {
            return;
        };

        if desired == baseline {
            debug!(resource = T::NAME, "staged edits cancel out, skipping device write");
            return;
        }

        let outcome = retry_with_backoff(
            self.tuning().verify_policy,
            |attempt| self.write_and_reread(&desired, attempt),
            |observed| *observed == desired,
        )
        .await;

        match outcome {
            Ok(observed) if observed == desired => {
                debug!(resource = T::NAME, "write verified");
                slot.cache.store(desired);
            }
            Ok(observed) => {
                // The device kept its own opinion; stop lying to readers.
                error!(
                    resource = T::NAME,
                    attempts = self.tuning().verify_policy.max_attempts,
                    "write never stuck, reconciling cache to device state"
                );
                slot.cache.store(observed);
            }
            Err(err) => {
                error!(
                    resource = T::NAME,
                    error = %err,
                    "flush failed, rolling cache back to pre-write state"
                );
                slot.cache.store(baseline);
            }
        }
    }

    /// One verify round: issue the write, then re-read past the cache.
    async fn write_and_reread<T: WritableResource>(
        &self,
        desired: &T,
        attempt: u32,
    ) -> Result<T, Error> {
        debug!(resource = T::NAME, attempt, "flushing coalesced write");
        self.transport()
            .request(T::SET_PATH, &desired.write_params())
            .await?;

        let fields = self.transport().request(T::GET_PATH, &[]).await?;
        Ok(T::from_fields(&fields)?)
    }
}

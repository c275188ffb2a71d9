// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power-change subscriptions.
//!
//! Zone-facing collaborators need to refresh their own derived state when
//! the unit is switched on or off, so the device lets them register a
//! callback that fires synchronously whenever a power mutation is accepted.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a subscription.
///
/// Returned when registering a callback and used to unsubscribe later.
/// IDs are unique within a device's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type PowerCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Registry of power-change callbacks.
///
/// Thread-safe; callbacks are dispatched synchronously in arbitrary order.
pub(crate) struct CallbackRegistry {
    next_id: AtomicU64,
    power_callbacks: RwLock<HashMap<SubscriptionId, PowerCallback>>,
}

impl CallbackRegistry {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            power_callbacks: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.power_callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Removes a callback. Returns `true` if it was registered.
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.power_callbacks.write().remove(&id).is_some()
    }

    /// Invokes every registered callback with the new power state.
    pub(crate) fn dispatch_power(&self, on: bool) {
        // Callbacks are cloned out so a subscriber registering or removing
        // callbacks from inside its own callback does not deadlock.
        let callbacks: Vec<PowerCallback> = self.power_callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(on);
        }
    }

    pub(crate) fn callback_count(&self) -> usize {
        self.power_callbacks.read().len()
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn subscription_id_display() {
        let registry = CallbackRegistry::new();
        let id = registry.on_power_changed(|_| {});
        assert_eq!(id.to_string(), format!("Sub({})", id.value()));
    }

    #[test]
    fn dispatch_reaches_every_subscriber() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let counter = counter.clone();
            registry.on_power_changed(move |on| {
                if on {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        registry.dispatch_power(true);
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        registry.dispatch_power(false);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn unsubscribe_stops_dispatch() {
        let registry = CallbackRegistry::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let id = registry.on_power_changed(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch_power(true);
        assert!(registry.unsubscribe(id));
        registry.dispatch_power(true);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!registry.unsubscribe(id));
    }

    #[test]
    fn ids_are_unique() {
        let registry = CallbackRegistry::new();
        let id1 = registry.on_power_changed(|_| {});
        let id2 = registry.on_power_changed(|_| {});
        assert_ne!(id1, id2);
        assert_eq!(registry.callback_count(), 2);
    }

    #[test]
    fn subscriber_can_register_from_inside_a_callback() {
        let registry = Arc::new(CallbackRegistry::new());
        let registry_clone = registry.clone();

        registry.on_power_changed(move |_| {
            registry_clone.on_power_changed(|_| {});
        });

        registry.dispatch_power(true);
        assert_eq!(registry.callback_count(), 2);
    }
}

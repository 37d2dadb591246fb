//! The live update channel: push notifications for metric table changes.
//!
//! The backing store signals every insert/update/delete touching the metric
//! table to all live subscribers. There is no payload-level filtering —
//! consumers re-fetch through the adapter when notified. Delivery is
//! at-least-once while subscribed; there is no ordering guarantee across
//! distinct change events.
//!
//! Subscriptions are scoped: dropping the `Subscription` handle
//! unsubscribes, and explicit `unsubscribe()` is idempotent. Each mounted
//! chart owns an independent subscription; the hub does not multiplex.
//! That is fine at household scale but worth watching if subscriber counts
//! grow.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, Weak},
};

use tracing::{debug, warn};

/// The kind of change the backing store observed.
///
/// No payload is carried — the notification only says that the metric table
/// changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

type ChangeCallback = Arc<dyn Fn(ChangeKind) + Send + Sync>;

#[derive(Default)]
struct HubState {
    subscribers: HashMap<u64, ChangeCallback>,
    next_id: u64,
}

/// Fan-out point for metric change notifications.
///
/// Cheap to clone; clones share the subscriber table. The reference backend
/// publishes into the hub whenever it mutates the metric table.
#[derive(Clone, Default)]
pub struct LiveUpdateHub {
    state: Arc<Mutex<HubState>>,
}

impl LiveUpdateHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `on_change` and return the handle that owns the registration.
    ///
    /// The callback fires on every published change until the handle is
    /// dropped or `unsubscribe()` is called.
    pub fn subscribe(
        &self,
        on_change: impl Fn(ChangeKind) + Send + Sync + 'static,
    ) -> Subscription {
        let mut state = self.state.lock().expect("live hub lock poisoned");
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.insert(id, Arc::new(on_change));

        debug!(subscription_id = id, subscribers = state.subscribers.len(), "subscribed");
        Subscription {
            id,
            state: Arc::downgrade(&self.state),
        }
    }

    /// Deliver `kind` to every live subscriber.
    ///
    /// Callbacks run outside the subscriber-table lock, so a callback may
    /// itself subscribe or unsubscribe without deadlocking.
    pub fn publish(&self, kind: ChangeKind) {
        let callbacks: Vec<ChangeCallback> = {
            let state = self.state.lock().expect("live hub lock poisoned");
            state.subscribers.values().cloned().collect()
        };

        debug!(kind = ?kind, subscribers = callbacks.len(), "publishing change");
        for callback in callbacks {
            callback(kind);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().expect("live hub lock poisoned").subscribers.len()
    }
}

/// Owns one registration in the hub.
///
/// Dropping the handle releases the subscription, so tying the handle's
/// lifetime to a component mount gives the mandatory teardown for free.
pub struct Subscription {
    id: u64,
    state: Weak<Mutex<HubState>>,
}

impl Subscription {
    /// Release the subscription.
    ///
    /// Idempotent: calling this more than once (or after the hub is gone)
    /// does nothing.
    pub fn unsubscribe(&self) {
        let Some(state) = self.state.upgrade() else {
            // Hub already dropped; nothing to release.
            return;
        };
        match state.lock() {
            Ok(mut state) => {
                if state.subscribers.remove(&self.id).is_some() {
                    debug!(subscription_id = self.id, "unsubscribed");
                }
            }
            Err(e) => warn!(subscription_id = self.id, error = %e, "live hub lock poisoned"),
        };
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

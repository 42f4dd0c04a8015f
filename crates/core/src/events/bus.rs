// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for routing registry events to subscribers

use super::event::RegistryEvent;
use super::subscription::{SubscriberId, Subscription};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Sender for event delivery
pub type EventSender = mpsc::UnboundedSender<RegistryEvent>;
/// Receiver for event delivery
pub type EventReceiver = mpsc::UnboundedReceiver<RegistryEvent>;

/// Routes events to matching subscribers
///
/// Clones share the same subscriber table.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<SubscriberId, (Subscription, EventSender)>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events matching the subscription's patterns
    ///
    /// Re-using an ID replaces the earlier subscription.
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.insert(subscription.id.clone(), (subscription, tx));
        rx
    }

    /// Subscribe to every event
    pub fn subscribe_all(&self, id: impl Into<String>) -> EventReceiver {
        self.subscribe(Subscription::new(id).with_pattern("**"))
    }

    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.remove(id);
    }

    /// Publish an event to all matching subscribers
    ///
    /// Subscribers whose receiver has been dropped are removed.
    pub fn publish(&self, event: RegistryEvent) {
        let name = event.name();
        let mut closed = Vec::new();
        {
            let subs = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
            for (id, (subscription, tx)) in subs.iter() {
                if subscription.matches(name) && tx.send(event.clone()).is_err() {
                    closed.push(id.clone());
                }
            }
        }

        if !closed.is_empty() {
            let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
            for id in &closed {
                subs.remove(id);
            }
        }
    }

    /// Get count of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;

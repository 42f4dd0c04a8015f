// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog state: items, members, and live reservation holds
//!
//! The catalog is a plain state container. Its invariants are enforced by
//! [`Registry`](crate::registry::Registry), the only code that mutates it.

use crate::id::{ItemId, MemberId, ReservationId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tokio::task::JoinHandle;

/// Lending status of an item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Available,
    Reserved,
    Borrowed,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemStatus::Available => "Available",
            ItemStatus::Reserved => "Reserved",
            ItemStatus::Borrowed => "Borrowed",
        };
        f.write_str(label)
    }
}

/// A lendable item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    /// Set only by the registry; seeds always start available
    #[serde(default, skip_deserializing)]
    pub status: ItemStatus,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            status: ItemStatus::Available,
        }
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }
}

/// A party who may hold items
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Borrowed items, oldest first; maintained only by borrow and return
    #[serde(default, skip_deserializing)]
    pub held: Vec<ItemId>,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            held: Vec::new(),
        }
    }

    pub fn holds(&self, item: ItemId) -> bool {
        self.held.contains(&item)
    }
}

/// An active hold on an item for one member
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub item: ItemId,
    pub member: MemberId,
    pub id: ReservationId,
}

/// Point-in-time counts over the catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub items: usize,
    pub available: usize,
    pub reserved: usize,
    pub borrowed: usize,
    pub members: usize,
    /// Reservations with an armed expiry timer
    pub live_timers: usize,
}

/// Background tasks owned by one reservation
///
/// Exists exactly while the item is `Reserved`. Dropping a `Hold` without
/// calling [`Hold::cancel`] would detach its tasks, so every removal path
/// cancels explicitly.
pub(crate) struct Hold {
    pub(crate) reservation: Reservation,
    pub(crate) expiry: JoinHandle<()>,
    pub(crate) fulfil: Option<JoinHandle<()>>,
}

impl Hold {
    /// Abort both background tasks and return the reservation they served
    ///
    /// The caller may itself be one of these tasks. Abort only takes effect at
    /// the task's next await point, and none follows a registry call.
    pub(crate) fn cancel(self) -> Reservation {
        self.expiry.abort();
        if let Some(fulfil) = self.fulfil {
            fulfil.abort();
        }
        self.reservation
    }
}

/// The registry's shared state
#[derive(Default)]
pub(crate) struct Catalog {
    pub(crate) items: BTreeMap<ItemId, Item>,
    pub(crate) members: BTreeMap<MemberId, Member>,
    pub(crate) holds: HashMap<ItemId, Hold>,
    last_reservation: u64,
}

impl Catalog {
    pub(crate) fn next_reservation_id(&mut self) -> ReservationId {
        self.last_reservation += 1;
        ReservationId(self.last_reservation)
    }

    pub(crate) fn next_item_id(&self) -> ItemId {
        let last = self.items.keys().next_back().map_or(0, |id| id.0);
        ItemId(last + 1)
    }

    pub(crate) fn reservation(&self, item: ItemId) -> Option<Reservation> {
        self.holds.get(&item).map(|hold| hold.reservation)
    }

    pub(crate) fn available(&self) -> Vec<Item> {
        self.items
            .values()
            .filter(|item| item.is_available())
            .cloned()
            .collect()
    }

    /// Items held by a member, in borrow order
    pub(crate) fn held_by(&self, member: MemberId) -> Vec<Item> {
        let Some(member) = self.members.get(&member) else {
            return Vec::new();
        };
        member
            .held
            .iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }

    pub(crate) fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            items: self.items.len(),
            members: self.members.len(),
            live_timers: self
                .holds
                .values()
                .filter(|hold| !hold.expiry.is_finished())
                .count(),
            ..RegistryStats::default()
        };
        for item in self.items.values() {
            match item.status {
                ItemStatus::Available => stats.available += 1,
                ItemStatus::Reserved => stats.reserved += 1,
                ItemStatus::Borrowed => stats.borrowed += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;

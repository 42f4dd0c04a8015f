// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lending registry
//!
//! [`Registry`] is the single authority over the catalog. Every mutation
//! takes the catalog's write lock for its whole check-then-act sequence, and
//! listings take the read lock, so operations on one item are totally ordered.
//!
//! A successful [`Registry::reserve`] arms two background tasks, both owned by
//! the reservation's hold record:
//! - an expiry timer that reverts the item to available after the hold window
//! - an optional speculative borrow that converts the reservation into a loan
//!
//! Whatever ends the reservation (borrow, expiry, or removal of the item)
//! aborts both tasks under the same lock acquisition. Tasks carry the
//! [`ReservationId`] they were armed with and re-check it under the lock, so a
//! task that loses the race for the lock becomes a no-op.

use crate::catalog::{Catalog, Hold, Item, ItemStatus, Member, RegistryStats, Reservation};
use crate::config::ReservationConfig;
use crate::error::RegistryError;
use crate::events::{EventBus, RegistryEvent};
use crate::id::{ItemId, MemberId, ReservationId};
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Receipt for an accepted reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReservationTicket {
    pub item: ItemId,
    pub member: MemberId,
    pub reservation: ReservationId,
    /// Hold window armed for this reservation
    #[serde(with = "humantime_serde")]
    pub expires_in: Duration,
}

struct Inner {
    catalog: RwLock<Catalog>,
    config: ReservationConfig,
    events: EventBus,
}

/// Shared handle to the registry; clones refer to the same catalog
#[derive(Clone)]
pub struct Registry {
    inner: Arc<Inner>,
}

impl Registry {
    pub fn new(config: ReservationConfig) -> Self {
        Self::with_events(config, EventBus::new())
    }

    /// Create a registry publishing to an existing event bus
    pub fn with_events(config: ReservationConfig, events: EventBus) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog: RwLock::new(Catalog::default()),
                config,
                events,
            }),
        }
    }

    pub fn config(&self) -> &ReservationConfig {
        &self.inner.config
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.catalog.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.catalog.write().unwrap_or_else(|e| e.into_inner())
    }

    fn downgrade(&self) -> Weak<Inner> {
        Arc::downgrade(&self.inner)
    }

    // === Catalog maintenance ===

    /// Insert or replace an item
    ///
    /// Replacing an existing item updates its title and author but keeps its
    /// lending status, so a live reservation or loan is never overwritten. A
    /// new item always starts `Available` whatever status it carries: only
    /// [`Registry::reserve`] and [`Registry::borrow`] move it out of that state.
    pub fn add_item(&self, item: Item) {
        let id = item.id;
        {
            let mut catalog = self.write();
            match catalog.items.get_mut(&id) {
                Some(existing) => {
                    existing.title = item.title;
                    existing.author = item.author;
                }
                None => {
                    let item = item.with_status(ItemStatus::Available);
                    catalog.items.insert(id, item);
                }
            }
        }
        debug!(item = %id, "item added");
        self.inner.events.publish(RegistryEvent::ItemAdded { item: id });
    }

    /// Delete an item, cancelling any reservation on it
    ///
    /// The item is also dropped from every member's held list. Returns the
    /// removed item, or `None` if it was unknown.
    pub fn remove_item(&self, id: ItemId) -> Option<Item> {
        let (item, cancelled) = {
            let mut catalog = self.write();
            let cancelled = catalog.holds.remove(&id).map(Hold::cancel);
            let item = catalog.items.remove(&id)?;
            for member in catalog.members.values_mut() {
                member.held.retain(|held| *held != id);
            }
            (item, cancelled)
        };

        info!(
            item = %id,
            cancelled = ?cancelled.map(|r| r.id),
            "item removed"
        );
        self.inner.events.publish(RegistryEvent::ItemRemoved {
            item: id,
            cancelled: cancelled.map(|r| r.id),
        });
        Some(item)
    }

    /// Insert or replace a member
    ///
    /// The supplied held list is ignored: a new member starts with nothing
    /// held and a replacement only renames, keeping its existing loans.
    pub fn add_member(&self, member: Member) {
        let mut catalog = self.write();
        match catalog.members.get_mut(&member.id) {
            Some(existing) => existing.name = member.name,
            None => {
                debug!(member = %member.id, "member added");
                let member = Member::new(member.id, member.name);
                catalog.members.insert(member.id, member);
            }
        }
    }

    /// The next unused item identifier
    pub fn next_item_id(&self) -> ItemId {
        self.read().next_item_id()
    }

    // === Lending ===

    /// Lend an item to a member
    ///
    /// A reserved item may only be borrowed by the member holding the
    /// reservation; doing so consumes the reservation and cancels its expiry.
    pub fn borrow(&self, item: ItemId, member: MemberId) -> Result<(), RegistryError> {
        self.lend(item, member, None).map(|_| ())
    }

    /// Borrow path shared with the speculative borrow
    ///
    /// With `expected`, the borrow goes ahead only while that reservation is
    /// still the item's live one, checked under the same write lock.
    fn lend(
        &self,
        item: ItemId,
        member: MemberId,
        expected: Option<ReservationId>,
    ) -> Result<Option<ReservationId>, RegistryError> {
        let consumed = {
            let mut guard = self.write();
            let Catalog {
                items,
                members,
                holds,
                ..
            } = &mut *guard;

            let entry = items
                .get_mut(&item)
                .ok_or(RegistryError::ItemNotFound(item))?;
            let borrower = members
                .get_mut(&member)
                .ok_or(RegistryError::MemberNotFound(member))?;

            if let Some(reservation) = expected {
                if holds.get(&item).map(|hold| hold.reservation.id) != Some(reservation) {
                    return Err(RegistryError::ReservationEnded { item, reservation });
                }
            }

            match entry.status {
                ItemStatus::Available => {}
                ItemStatus::Borrowed => return Err(RegistryError::AlreadyBorrowed(item)),
                ItemStatus::Reserved => match holds.get(&item) {
                    Some(hold) if hold.reservation.member == member => {}
                    Some(hold) => {
                        return Err(RegistryError::ReservedByOther {
                            item,
                            holder: hold.reservation.member,
                        })
                    }
                    None => return Err(RegistryError::AlreadyReserved(item)),
                },
            }

            entry.status = ItemStatus::Borrowed;
            borrower.held.push(item);
            holds.remove(&item).map(Hold::cancel)
        };

        let reservation = consumed.map(|r| r.id);
        info!(item = %item, member = %member, reservation = ?reservation, "item borrowed");
        self.inner.events.publish(RegistryEvent::ItemBorrowed {
            item,
            member,
            reservation,
        });
        Ok(reservation)
    }

    /// Take an item back from the member holding it
    pub fn return_item(&self, item: ItemId, member: MemberId) -> Result<(), RegistryError> {
        {
            let mut guard = self.write();
            let Catalog { items, members, .. } = &mut *guard;

            let entry = items
                .get_mut(&item)
                .ok_or(RegistryError::ItemNotFound(item))?;
            let holder = members
                .get_mut(&member)
                .ok_or(RegistryError::MemberNotFound(member))?;

            if entry.status == ItemStatus::Available {
                return Err(RegistryError::AlreadyAvailable(item));
            }
            let position = holder
                .held
                .iter()
                .position(|held| *held == item)
                .ok_or(RegistryError::NotHeld { item, member })?;

            holder.held.remove(position);
            entry.status = ItemStatus::Available;
        }

        info!(item = %item, member = %member, "item returned");
        self.inner
            .events
            .publish(RegistryEvent::ItemReturned { item, member });
        Ok(())
    }

    // === Reservations ===

    /// Place a hold on an available item for a member
    ///
    /// Arms the expiry timer and, when configured, the speculative borrow,
    /// then returns without waiting on either. Must be called from within a
    /// Tokio runtime.
    pub fn reserve(
        &self,
        item: ItemId,
        member: MemberId,
    ) -> Result<ReservationTicket, RegistryError> {
        let config = &self.inner.config;
        let ticket = {
            let mut guard = self.write();
            let catalog = &mut *guard;

            let status = catalog
                .items
                .get(&item)
                .ok_or(RegistryError::ItemNotFound(item))?
                .status;
            if !catalog.members.contains_key(&member) {
                return Err(RegistryError::MemberNotFound(member));
            }
            match status {
                ItemStatus::Available => {}
                ItemStatus::Borrowed => return Err(RegistryError::AlreadyBorrowed(item)),
                ItemStatus::Reserved => return Err(RegistryError::AlreadyReserved(item)),
            }

            let reservation = Reservation {
                item,
                member,
                id: catalog.next_reservation_id(),
            };
            // Spawned under the lock: neither task can act before the hold is stored.
            let expiry = tokio::spawn(expire_after(self.downgrade(), reservation, config.hold));
            let fulfil = config
                .speculative_delay()
                .map(|delay| tokio::spawn(fulfil_after(self.downgrade(), reservation, delay)));

            if let Some(entry) = catalog.items.get_mut(&item) {
                entry.status = ItemStatus::Reserved;
            }
            catalog.holds.insert(
                item,
                Hold {
                    reservation,
                    expiry,
                    fulfil,
                },
            );

            ReservationTicket {
                item,
                member,
                reservation: reservation.id,
                expires_in: config.hold,
            }
        };

        info!(
            item = %item,
            member = %member,
            reservation = %ticket.reservation,
            hold = ?config.hold,
            "reservation placed"
        );
        self.inner.events.publish(RegistryEvent::ReservationPlaced {
            item,
            member,
            reservation: ticket.reservation,
        });
        Ok(ticket)
    }

    /// Revert a reservation whose hold window elapsed
    ///
    /// No-op unless `reservation` is still the item's live reservation.
    fn expire(&self, reservation: Reservation) -> bool {
        {
            let mut catalog = self.write();
            let current = catalog.reservation(reservation.item).map(|r| r.id);
            if current != Some(reservation.id) {
                debug!(
                    item = %reservation.item,
                    reservation = %reservation.id,
                    "stale expiry ignored"
                );
                return false;
            }
            if let Some(hold) = catalog.holds.remove(&reservation.item) {
                // The expiry handle belongs to the running task; only the
                // speculative borrow needs stopping.
                if let Some(fulfil) = hold.fulfil {
                    fulfil.abort();
                }
            }
            if let Some(entry) = catalog.items.get_mut(&reservation.item) {
                entry.status = ItemStatus::Available;
            }
        }

        info!(
            item = %reservation.item,
            member = %reservation.member,
            reservation = %reservation.id,
            "reservation expired"
        );
        self.inner.events.publish(RegistryEvent::ReservationExpired {
            item: reservation.item,
            member: reservation.member,
            reservation: reservation.id,
        });
        true
    }

    /// Attempt to turn a reservation into a loan
    ///
    /// Runs the regular borrow checks, and also requires `reservation` to be
    /// the item's live reservation.
    fn fulfil(&self, reservation: Reservation) {
        match self.lend(reservation.item, reservation.member, Some(reservation.id)) {
            Ok(_) => {
                info!(
                    item = %reservation.item,
                    member = %reservation.member,
                    reservation = %reservation.id,
                    "speculative borrow succeeded"
                );
                self.inner.events.publish(RegistryEvent::ReservationFulfilled {
                    item: reservation.item,
                    member: reservation.member,
                    reservation: reservation.id,
                });
            }
            Err(error) => {
                warn!(
                    item = %reservation.item,
                    member = %reservation.member,
                    reservation = %reservation.id,
                    %error,
                    "speculative borrow failed"
                );
                self.inner
                    .events
                    .publish(RegistryEvent::ReservationFulfilFailed {
                        item: reservation.item,
                        member: reservation.member,
                        reservation: reservation.id,
                        error,
                    });
            }
        }
    }

    // === Snapshots ===

    /// Items currently available, ordered by id
    pub fn list_available(&self) -> Vec<Item> {
        self.read().available()
    }

    /// Items held by a member in borrow order; empty for unknown members
    pub fn list_held(&self, member: MemberId) -> Vec<Item> {
        self.read().held_by(member)
    }

    /// Every item, ordered by id
    pub fn list_items(&self) -> Vec<Item> {
        self.read().items.values().cloned().collect()
    }

    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.read().items.get(&id).cloned()
    }

    pub fn member(&self, id: MemberId) -> Option<Member> {
        self.read().members.get(&id).cloned()
    }

    /// The live reservation on an item, if any
    pub fn reservation(&self, item: ItemId) -> Option<Reservation> {
        self.read().reservation(item)
    }

    pub fn stats(&self) -> RegistryStats {
        self.read().stats()
    }
}

/// Expiry timer body
///
/// Holds only a weak reference so pending timers do not keep a dropped
/// registry alive.
async fn expire_after(registry: Weak<Inner>, reservation: Reservation, hold: Duration) {
    tokio::time::sleep(hold).await;
    if let Some(inner) = registry.upgrade() {
        Registry { inner }.expire(reservation);
    }
}

/// Speculative borrow body
async fn fulfil_after(registry: Weak<Inner>, reservation: Reservation, delay: Duration) {
    tokio::time::sleep(delay).await;
    if let Some(inner) = registry.upgrade() {
        Registry { inner }.fulfil(reservation);
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

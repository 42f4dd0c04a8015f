// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry events

use crate::error::RegistryError;
use crate::id::{ItemId, MemberId, ReservationId};

/// Something that happened inside the registry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An item was inserted or replaced
    ItemAdded { item: ItemId },
    /// An item was deleted, cancelling its reservation if one was live
    ItemRemoved {
        item: ItemId,
        cancelled: Option<ReservationId>,
    },
    /// An item was lent to a member, consuming a reservation if one existed
    ItemBorrowed {
        item: ItemId,
        member: MemberId,
        reservation: Option<ReservationId>,
    },
    ItemReturned { item: ItemId, member: MemberId },
    ReservationPlaced {
        item: ItemId,
        member: MemberId,
        reservation: ReservationId,
    },
    /// The hold window elapsed without a borrow
    ReservationExpired {
        item: ItemId,
        member: MemberId,
        reservation: ReservationId,
    },
    /// The speculative borrow converted the reservation into a loan
    ReservationFulfilled {
        item: ItemId,
        member: MemberId,
        reservation: ReservationId,
    },
    /// The speculative borrow was refused by the registry
    ReservationFulfilFailed {
        item: ItemId,
        member: MemberId,
        reservation: ReservationId,
        error: RegistryError,
    },
}

impl RegistryEvent {
    /// Colon-separated event name used for subscription matching
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::ItemAdded { .. } => "item:added",
            RegistryEvent::ItemRemoved { .. } => "item:removed",
            RegistryEvent::ItemBorrowed { .. } => "item:borrowed",
            RegistryEvent::ItemReturned { .. } => "item:returned",
            RegistryEvent::ReservationPlaced { .. } => "reservation:placed",
            RegistryEvent::ReservationExpired { .. } => "reservation:expired",
            RegistryEvent::ReservationFulfilled { .. } => "reservation:fulfilled",
            RegistryEvent::ReservationFulfilFailed { .. } => "reservation:fulfil_failed",
        }
    }

    /// The item this event concerns
    pub fn item(&self) -> ItemId {
        match self {
            RegistryEvent::ItemAdded { item }
            | RegistryEvent::ItemRemoved { item, .. }
            | RegistryEvent::ItemBorrowed { item, .. }
            | RegistryEvent::ItemReturned { item, .. }
            | RegistryEvent::ReservationPlaced { item, .. }
            | RegistryEvent::ReservationExpired { item, .. }
            | RegistryEvent::ReservationFulfilled { item, .. }
            | RegistryEvent::ReservationFulfilFailed { item, .. } => *item,
        }
    }
}

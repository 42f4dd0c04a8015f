// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for registry operations

use crate::id::{ItemId, MemberId, ReservationId};
use thiserror::Error;

/// Failure category of a registry operation
///
/// Every kind is recoverable; callers receive it as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown item or member
    NotFound,
    /// Current state precludes the request
    Conflict,
    /// Redundant request, e.g. returning an item that is already available
    InvalidState,
    /// Return without a matching borrow
    NotHeld,
}

/// Errors returned by the registry
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),
    #[error("item {0} is already borrowed")]
    AlreadyBorrowed(ItemId),
    #[error("item {0} is already reserved")]
    AlreadyReserved(ItemId),
    #[error("item {item} is reserved by member {holder}")]
    ReservedByOther { item: ItemId, holder: MemberId },
    #[error("item {0} is already available")]
    AlreadyAvailable(ItemId),
    #[error("item {item} is not held by member {member}")]
    NotHeld { item: ItemId, member: MemberId },
    #[error("reservation {reservation} on item {item} has ended")]
    ReservationEnded {
        item: ItemId,
        reservation: ReservationId,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::ItemNotFound(_) | RegistryError::MemberNotFound(_) => {
                ErrorKind::NotFound
            }
            RegistryError::AlreadyBorrowed(_)
            | RegistryError::AlreadyReserved(_)
            | RegistryError::ReservedByOther { .. }
            | RegistryError::ReservationEnded { .. } => ErrorKind::Conflict,
            RegistryError::AlreadyAvailable(_) => ErrorKind::InvalidState,
            RegistryError::NotHeld { .. } => ErrorKind::NotHeld,
        }
    }
}

/// Errors from the asynchronous reservation surface
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("reservation coordinator is closed")]
    Closed,
    #[error("reservation response was dropped")]
    Dropped,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

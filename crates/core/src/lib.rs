// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! lend-core: in-memory lending registry
//!
//! This crate provides:
//! - A catalog of lendable items and members behind a single authority
//! - Reservations with an auto-expiring hold window and a speculative borrow
//! - A channel-based coordinator that fans out reservation requests
//! - An event bus for observing state transitions and background outcomes

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod id;
pub mod registry;

pub use catalog::{Item, ItemStatus, Member, RegistryStats, Reservation};
pub use config::{ConfigError, CoordinatorConfig, LendingConfig, ReservationConfig};
pub use coordinator::{Coordinator, ReservationClient, ReservationRequest, ReservationResult};
pub use error::{ErrorKind, RegistryError, SubmitError};
pub use events::{EventBus, EventPattern, EventReceiver, RegistryEvent, Subscription};
pub use id::{ItemId, MemberId, ReservationId};
pub use registry::{Registry, ReservationTicket};

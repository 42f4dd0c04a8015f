// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event sink for registry observability
//!
//! This module provides:
//! - `RegistryEvent` - State transitions and background-task outcomes
//! - `EventBus` - Route events to matching subscribers using patterns
//! - `EventPattern` - Pattern matching for event subscriptions

mod bus;
mod event;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use event::RegistryEvent;
pub use subscription::{EventPattern, SubscriberId, Subscription};

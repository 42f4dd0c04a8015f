// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry configuration
//!
//! Loaded from TOML. Every section is optional:
//!
//! ```toml
//! [reservation]
//! hold = "5s"
//! speculative_borrow = "2s"
//! auto_borrow = true
//!
//! [coordinator]
//! queue_capacity = 32
//! max_in_flight = 64
//!
//! [[members]]
//! id = 1
//! name = "Abebe"
//!
//! [[items]]
//! id = 1
//! title = "alice in the wonderland"
//! author = "K. Cox"
//! ```

use crate::catalog::{Item, Member};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Timing of the reservation hold window and its speculative borrow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    /// How long a reservation holds the item before reverting to available
    #[serde(with = "humantime_serde")]
    pub hold: Duration,
    /// Delay before the automatic borrow attempt
    #[serde(with = "humantime_serde")]
    pub speculative_borrow: Duration,
    /// Whether every reservation schedules a speculative borrow
    pub auto_borrow: bool,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            hold: Duration::from_secs(5),
            speculative_borrow: Duration::from_secs(2),
            auto_borrow: true,
        }
    }
}

impl ReservationConfig {
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Set the speculative borrow delay, or disable it with `None`
    pub fn with_speculative_borrow(mut self, delay: Option<Duration>) -> Self {
        match delay {
            Some(delay) => {
                self.speculative_borrow = delay;
                self.auto_borrow = true;
            }
            None => self.auto_borrow = false,
        }
        self
    }

    /// Delay of the speculative borrow, if one is scheduled
    pub fn speculative_delay(&self) -> Option<Duration> {
        self.auto_borrow.then_some(self.speculative_borrow)
    }
}

/// Intake and fan-out limits of the reservation coordinator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Capacity of the inbound request queue
    pub queue_capacity: usize,
    /// Maximum number of dispatched requests running at once
    pub max_in_flight: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 32,
            max_in_flight: 64,
        }
    }
}

/// Complete configuration: timing, limits, and seed catalog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingConfig {
    pub reservation: ReservationConfig,
    pub coordinator: CoordinatorConfig,
    pub members: Vec<Member>,
    pub items: Vec<Item>,
}

impl LendingConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Small catalog for trying the tool without a config file
    pub fn demo() -> Self {
        Self {
            members: vec![
                Member::new(1, "Abebe"),
                Member::new(2, "Bob"),
                Member::new(3, "Charlie"),
            ],
            items: vec![
                Item::new(1, "alice in the wonderland", "K. Cox"),
                Item::new(2, "game of thrones", "A. Donovan"),
            ],
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reservation.hold.is_zero() {
            return Err(ConfigError::Invalid(
                "reservation.hold must be greater than zero".to_string(),
            ));
        }
        if self.coordinator.queue_capacity == 0 || self.coordinator.max_in_flight == 0 {
            return Err(ConfigError::Invalid(
                "coordinator limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a registry with this configuration's timing and seed catalog
    pub fn build_registry(&self) -> Registry {
        let registry = Registry::new(self.reservation.clone());
        self.seed(&registry);
        registry
    }

    /// Add configured members, then items, to a registry
    pub fn seed(&self, registry: &Registry) {
        for member in &self.members {
            registry.add_member(member.clone());
        }
        for item in &self.items {
            registry.add_item(item.clone());
        }
    }
}

#[cfg(test)]
#[path = "lending_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching and subscriptions

/// Pattern for matching event names
/// Supports:
///   - Exact: "reservation:expired"
///   - Single wildcard: "item:*" matches "item:borrowed", "item:returned"
///   - Trailing wildcard: "reservation:**" matches every remaining segment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.to_string())
    }

    /// Check if this pattern matches an event name
    pub fn matches(&self, event_name: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }
        if self.0 == "*" || self.0 == "**" {
            return true;
        }

        let mut pattern = self.0.split(':');
        let mut event = event_name.split(':');
        loop {
            match (pattern.next(), event.next()) {
                (None, None) => return true,
                (Some("**"), _) => return true,
                (Some("*"), Some(_)) => continue,
                (Some(p), Some(e)) if p == e => continue,
                _ => return false,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Subscriber handle for unsubscribing
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

/// A subscription to specific event patterns
#[derive(Clone, Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub patterns: Vec<EventPattern>,
}

impl Subscription {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: SubscriberId(id.into()),
            patterns: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns.push(EventPattern::new(pattern));
        self
    }

    /// Check if any pattern matches the event
    pub fn matches(&self, event_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(event_name))
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lend list` and `lend items` - Catalog snapshots

use lend_core::Registry;

use crate::output::{print_items, OutputFormat};

/// Print items currently available
pub fn available(registry: &Registry, format: OutputFormat) {
    print_items(&registry.list_available(), format, "No items available");
}

/// Print every item with its status
pub fn all(registry: &Registry, format: OutputFormat) {
    print_items(&registry.list_items(), format, "No items");
}

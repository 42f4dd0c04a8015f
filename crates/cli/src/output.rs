// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use lend_core::Item;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One item rendered as a table row
pub struct ItemRow<'a>(pub &'a Item);

impl fmt::Display for ItemRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item = self.0;
        write!(
            f,
            "{:<4} {:<28} {:<20} {}",
            item.id, item.title, item.author, item.status
        )
    }
}

/// Print items as rows, or `empty` when there are none
pub fn print_items(items: &[Item], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty);
            }
            for item in items {
                println!("{}", ItemRow(item));
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

/// Print a list of displayable records
pub fn print_list<T: Serialize + fmt::Display>(records: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for record in records {
                println!("{}", record);
            }
        }
        OutputFormat::Json => print_json(records),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

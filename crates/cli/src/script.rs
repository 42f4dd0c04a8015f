// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented command scripts
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! add Dune | F. Herbert
//! reserve 1 2
//! wait 3s
//! status 1
//! ```

use anyhow::{anyhow, bail, Context, Result};
use lend_core::{
    Item, ItemId, ItemStatus, MemberId, Registry, RegistryError, ReservationClient,
};
use std::time::Duration;

use crate::output::ItemRow;

/// A parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add { title: String, author: String },
    Remove(ItemId),
    Borrow(ItemId, MemberId),
    Return(ItemId, MemberId),
    Reserve(ItemId, MemberId),
    List,
    Held(MemberId),
    Status(ItemId),
    Wait(Duration),
}

impl ScriptCommand {
    /// Parse one line; `None` for blank lines and comments
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match verb {
            "add" => {
                let (title, author) = rest
                    .split_once('|')
                    .ok_or_else(|| anyhow!("usage: add TITLE | AUTHOR"))?;
                let (title, author) = (title.trim(), author.trim());
                if title.is_empty() {
                    bail!("usage: add TITLE | AUTHOR");
                }
                ScriptCommand::Add {
                    title: title.to_string(),
                    author: author.to_string(),
                }
            }
            "remove" => ScriptCommand::Remove(item_arg(&args, verb)?),
            "borrow" => {
                let (item, member) = pair_args(&args, verb)?;
                ScriptCommand::Borrow(item, member)
            }
            "return" => {
                let (item, member) = pair_args(&args, verb)?;
                ScriptCommand::Return(item, member)
            }
            "reserve" => {
                let (item, member) = pair_args(&args, verb)?;
                ScriptCommand::Reserve(item, member)
            }
            "list" => ScriptCommand::List,
            "held" => {
                let [member] = args.as_slice() else {
                    bail!("usage: held MEMBER");
                };
                ScriptCommand::Held(MemberId(parse_id(member)?))
            }
            "status" => ScriptCommand::Status(item_arg(&args, verb)?),
            "wait" => {
                let duration = humantime::parse_duration(rest)
                    .with_context(|| format!("invalid duration: {}", rest))?;
                ScriptCommand::Wait(duration)
            }
            other => bail!("unknown command: {}", other),
        };
        Ok(Some(command))
    }
}

fn parse_id(arg: &str) -> Result<u64> {
    arg.parse()
        .with_context(|| format!("invalid identifier: {}", arg))
}

fn item_arg(args: &[&str], verb: &str) -> Result<ItemId> {
    let [item] = args else {
        bail!("usage: {} ITEM", verb);
    };
    Ok(ItemId(parse_id(item)?))
}

fn pair_args(args: &[&str], verb: &str) -> Result<(ItemId, MemberId)> {
    let [item, member] = args else {
        bail!("usage: {} ITEM MEMBER", verb);
    };
    Ok((ItemId(parse_id(item)?), MemberId(parse_id(member)?)))
}

/// Executes script commands against a registry
pub struct ScriptRunner {
    registry: Registry,
    client: ReservationClient,
}

impl ScriptRunner {
    pub fn new(registry: Registry, client: ReservationClient) -> Self {
        Self { registry, client }
    }

    /// Run every line of a script, returning the output lines
    ///
    /// A failing line reports `error: ...` and the script continues.
    pub async fn run(&self, script: &str) -> Vec<String> {
        let mut output = Vec::new();
        for (number, line) in script.lines().enumerate() {
            let result = match ScriptCommand::parse(line) {
                Ok(Some(command)) => self.execute(command).await,
                Ok(None) => continue,
                Err(e) => Err(e.context(format!("line {}", number + 1))),
            };
            match result {
                Ok(lines) => output.extend(lines),
                Err(e) => output.push(format!("error: {:#}", e)),
            }
        }
        output
    }

    /// Execute one command
    pub async fn execute(&self, command: ScriptCommand) -> Result<Vec<String>> {
        let registry = &self.registry;
        let line = match command {
            ScriptCommand::Add { title, author } => {
                let id = registry.next_item_id();
                registry.add_item(Item::new(id, title, author));
                format!("added item {}", id)
            }
            ScriptCommand::Remove(item) => match registry.remove_item(item) {
                Some(_) => format!("removed item {}", item),
                None => return Err(RegistryError::ItemNotFound(item).into()),
            },
            ScriptCommand::Borrow(item, member) => {
                registry.borrow(item, member)?;
                format!("borrowed item {} by member {}", item, member)
            }
            ScriptCommand::Return(item, member) => {
                registry.return_item(item, member)?;
                format!("returned item {} by member {}", item, member)
            }
            ScriptCommand::Reserve(item, member) => {
                let ticket = self.client.reserve(item, member).await?;
                format!(
                    "reserved item {} for member {} ({}, expires in {})",
                    item,
                    member,
                    ticket.reservation,
                    humantime::format_duration(ticket.expires_in)
                )
            }
            ScriptCommand::List => {
                return Ok(rows(&registry.list_available(), "no items available"));
            }
            ScriptCommand::Held(member) => {
                let empty = format!("member {} holds no items", member);
                return Ok(rows(&registry.list_held(member), &empty));
            }
            ScriptCommand::Status(item) => {
                let current = registry
                    .item(item)
                    .ok_or(RegistryError::ItemNotFound(item))?;
                match registry.reservation(item) {
                    Some(r) if current.status == ItemStatus::Reserved => {
                        format!("item {}: {} (member {})", item, current.status, r.member)
                    }
                    _ => format!("item {}: {}", item, current.status),
                }
            }
            ScriptCommand::Wait(duration) => {
                tokio::time::sleep(duration).await;
                format!("waited {}", humantime::format_duration(duration))
            }
        };
        Ok(vec![line])
    }
}

fn rows(items: &[Item], empty: &str) -> Vec<String> {
    if items.is_empty() {
        return vec![empty.to_string()];
    }
    items.iter().map(|item| ItemRow(item).to_string()).collect()
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;

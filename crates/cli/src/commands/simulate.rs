// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lend simulate` - Concurrent reservations for one item

use anyhow::Result;
use clap::Args;
use lend_core::{Coordinator, CoordinatorConfig, ItemId, MemberId, Registry};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::output::{print_list, OutputFormat};

#[derive(Args)]
pub struct SimulateArgs {
    /// Item every member tries to reserve
    #[arg(long)]
    pub item: u64,

    /// Comma-separated member ids (e.g., 1,2,3)
    #[arg(long, value_delimiter = ',', required = true)]
    pub members: Vec<u64>,

    /// Wait this long after the reservations, then report the item status
    #[arg(long, value_parser = humantime::parse_duration)]
    pub settle: Option<Duration>,
}

/// Response received by one simulated member
#[derive(Serialize)]
pub struct Outcome {
    pub member: MemberId,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reservation, &self.error) {
            (Some(reservation), _) => write!(f, "member {}: reserved ({})", self.member, reservation),
            (None, Some(error)) => write!(f, "member {}: rejected: {}", self.member, error),
            (None, None) => write!(f, "member {}: no response", self.member),
        }
    }
}

pub async fn simulate(
    args: SimulateArgs,
    registry: &Registry,
    config: &CoordinatorConfig,
    format: OutputFormat,
) -> Result<()> {
    let item = ItemId(args.item);
    let (coordinator, client) = Coordinator::start(registry.clone(), config);

    // Submit everything before awaiting any response
    let mut pending = Vec::with_capacity(args.members.len());
    for member in args.members {
        let member = MemberId(member);
        pending.push((member, client.submit(item, member).await?));
    }
    drop(client);

    let mut outcomes = Vec::with_capacity(pending.len());
    for (member, rx) in pending {
        let outcome = match rx.await {
            Ok(Ok(ticket)) => Outcome {
                member,
                accepted: true,
                reservation: Some(ticket.reservation.to_string()),
                error: None,
            },
            Ok(Err(e)) => Outcome {
                member,
                accepted: false,
                reservation: None,
                error: Some(e.to_string()),
            },
            Err(_) => Outcome {
                member,
                accepted: false,
                reservation: None,
                error: None,
            },
        };
        outcomes.push(outcome);
    }
    coordinator.shutdown().await;

    print_list(&outcomes, format);

    if let Some(settle) = args.settle {
        tokio::time::sleep(settle).await;
        match registry.item(item) {
            Some(current) => println!("item {}: {}", item, current.status),
            None => println!("item {}: removed", item),
        }
    }
    Ok(())
}

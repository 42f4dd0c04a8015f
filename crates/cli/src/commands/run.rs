// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lend run [FILE]` - Execute a command script

use anyhow::{Context, Result};
use clap::Args;
use lend_core::{Coordinator, CoordinatorConfig, Registry};
use std::io::Read;
use std::path::PathBuf;

use crate::script::ScriptRunner;

#[derive(Args)]
pub struct RunArgs {
    /// Script file; reads stdin when omitted
    pub script: Option<PathBuf>,
}

pub async fn run(args: RunArgs, registry: &Registry, config: &CoordinatorConfig) -> Result<()> {
    let script = match &args.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            script
        }
    };

    let (coordinator, client) = Coordinator::start(registry.clone(), config);
    let runner = ScriptRunner::new(registry.clone(), client);
    for line in runner.run(&script).await {
        println!("{}", line);
    }
    drop(runner);
    coordinator.shutdown().await;
    Ok(())
}

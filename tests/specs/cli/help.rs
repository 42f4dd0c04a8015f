//! Help and version output

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    lend()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage: lend")
        .stdout_has("list")
        .stdout_has("items")
        .stdout_has("simulate")
        .stdout_has("run");
}

#[test]
fn simulate_help_shows_options() {
    lend()
        .args(&["simulate", "--help"])
        .passes()
        .stdout_has("--item")
        .stdout_has("--members")
        .stdout_has("--settle");
}

#[test]
fn version_prints_package_version() {
    lend()
        .args(&["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}

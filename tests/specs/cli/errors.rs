//! Startup failures exit non-zero with a message

use crate::prelude::*;

#[test]
fn missing_config_file_fails() {
    let project = Project::fast();
    let missing = project.path().join("nope.toml");

    lend()
        .args(&["--config", missing.to_str().unwrap(), "list"])
        .fails()
        .stderr_has("failed to read config");
}

#[test]
fn malformed_config_fails() {
    Project::with_config("[reservation]\nhold = \"soon\"\n")
        .lend()
        .args(&["list"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn zero_hold_is_rejected() {
    Project::with_config("[reservation]\nhold = \"0s\"\n")
        .lend()
        .args(&["list"])
        .fails()
        .stderr_has("reservation.hold must be greater than zero");
}

#[test]
fn unknown_subcommand_fails() {
    lend().args(&["lend-everything"]).fails();
}

#[test]
fn missing_script_file_fails() {
    let project = Project::fast();
    let missing = project.path().join("missing.script");

    project
        .lend()
        .args(&["run", missing.to_str().unwrap()])
        .fails()
        .stderr_has("failed to read script");
}

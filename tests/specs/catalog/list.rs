//! Catalog listings

use crate::prelude::*;

#[test]
fn list_without_config_shows_demo_catalog() {
    lend()
        .args(&["list"])
        .passes()
        .stdout_has("alice in the wonderland")
        .stdout_has("game of thrones")
        .stdout_has("Available");
}

#[test]
fn items_show_status_after_borrow() {
    let project = Project::with_config(
        r#"
[[members]]
id = 1
name = "Dana"

[[items]]
id = 1
title = "Dune"
author = "F. Herbert"

[[items]]
id = 2
title = "Solaris"
author = "S. Lem"
"#,
    );

    project
        .lend()
        .args(&["run"])
        .stdin("borrow 2 1\nstatus 2\nlist\n")
        .passes()
        .stdout_has("item 2: Borrowed\n")
        .stdout_has("Dune")
        .stdout_lacks("Solaris");
}

#[test]
fn seeded_status_is_ignored() {
    Project::with_config(
        r#"
[[items]]
id = 1
title = "Solaris"
author = "S. Lem"
status = "borrowed"
"#,
    )
    .lend()
    .args(&["list"])
    .passes()
    .stdout_has("Solaris")
    .stdout_has("Available");
}

#[test]
fn empty_catalog_reports_no_items() {
    Project::with_config("")
        .lend()
        .args(&["list"])
        .passes()
        .stdout_eq("No items available\n");
}

#[test]
fn items_as_json() {
    let output = Project::fast()
        .lend()
        .args(&["--format", "json", "items"])
        .passes();

    let items: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["status"], "available");
    assert_eq!(items[1]["title"], "game of thrones");
}

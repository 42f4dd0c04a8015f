//! `lend simulate` - simultaneous reservations for one item

use crate::prelude::*;

#[test]
fn exactly_one_member_wins() {
    let output = Project::without_auto_borrow()
        .lend()
        .args(&["simulate", "--item", "2", "--members", "1,2,3"])
        .passes();

    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.iter().filter(|l| l.contains(": reserved (r-1)")).count(), 1);
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.contains("rejected: item 2 is already reserved"))
            .count(),
        2
    );
}

#[test]
fn settle_reports_expired_reservation() {
    Project::without_auto_borrow()
        .lend()
        .args(&["simulate", "--item", "1", "--members", "1,2", "--settle", "1s"])
        .passes()
        .stdout_has("item 1: Available\n");
}

#[test]
fn settle_reports_speculative_borrow() {
    Project::fast()
        .lend()
        .args(&["simulate", "--item", "1", "--members", "2,3", "--settle", "400ms"])
        .passes()
        .stdout_has("item 1: Borrowed\n");
}

#[test]
fn missing_item_rejects_everyone() {
    Project::fast()
        .lend()
        .args(&["simulate", "--item", "9", "--members", "1,2"])
        .passes()
        .stdout_eq(
            "member 1: rejected: item not found: 9\n\
             member 2: rejected: item not found: 9\n",
        );
}

#[test]
fn json_outcomes() {
    let output = Project::without_auto_borrow()
        .lend()
        .args(&["--format", "json", "simulate", "--item", "1", "--members", "1,2"])
        .passes();

    let outcomes: serde_json::Value = serde_json::from_str(&output.stdout).unwrap();
    let outcomes = outcomes.as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    let accepted = outcomes.iter().filter(|o| o["accepted"] == true).count();
    assert_eq!(accepted, 1);
}

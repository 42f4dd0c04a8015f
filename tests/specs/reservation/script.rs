//! `lend run` scripts exercising borrow, return, and reservation timing

use crate::prelude::*;

#[test]
fn borrow_then_return_from_stdin() {
    Project::fast()
        .lend()
        .args(&["run"])
        .stdin("borrow 1 1\nstatus 1\nreturn 1 1\nstatus 1\n")
        .passes()
        .stdout_eq(
            "borrowed item 1 by member 1\n\
             item 1: Borrowed\n\
             returned item 1 by member 1\n\
             item 1: Available\n",
        );
}

#[test]
fn failing_lines_do_not_stop_the_script() {
    Project::fast()
        .lend()
        .args(&["run"])
        .stdin("borrow 1 1\nborrow 1 2\nreturn 1 3\nreturn 2 1\nstatus 1\n")
        .passes()
        .stdout_eq(
            "borrowed item 1 by member 1\n\
             error: item 1 is already borrowed\n\
             error: item 1 is not held by member 3\n\
             error: item 2 is already available\n\
             item 1: Borrowed\n",
        );
}

#[test]
fn script_file_argument() {
    let project = Project::fast();
    let script = project.write(
        "session.script",
        "# add a title and check it out\nadd Dune | F. Herbert\nborrow 3 2\nheld 2\n",
    );

    project
        .lend()
        .args(&["run", script.to_str().unwrap()])
        .passes()
        .stdout_has("added item 3\n")
        .stdout_has("borrowed item 3 by member 2\n")
        .stdout_has("Dune");
}

#[test]
fn reservation_blocks_other_members_until_it_expires() {
    Project::without_auto_borrow()
        .lend()
        .args(&["run"])
        .stdin("reserve 2 1\nborrow 2 3\nwait 1s\nstatus 2\nborrow 2 3\n")
        .passes()
        .stdout_eq(
            "reserved item 2 for member 1 (r-1, expires in 600ms)\n\
             error: item 2 is reserved by member 1\n\
             waited 1s\n\
             item 2: Available\n\
             borrowed item 2 by member 3\n",
        );
}

#[test]
fn holder_can_borrow_reserved_item() {
    Project::without_auto_borrow()
        .lend()
        .args(&["run"])
        .stdin("reserve 1 2\nborrow 1 2\nwait 1s\nstatus 1\n")
        .passes()
        .stdout_has("borrowed item 1 by member 2\n")
        .stdout_has("item 1: Borrowed\n");
}

#[test]
fn speculative_borrow_converts_reservation() {
    Project::fast()
        .lend()
        .args(&["run"])
        .stdin("reserve 1 3\nwait 400ms\nstatus 1\nwait 500ms\nstatus 1\n")
        .passes()
        .stdout_has("item 1: Borrowed\nwaited 500ms\nitem 1: Borrowed\n");
}

#[test]
fn removing_reserved_item_cancels_reservation() {
    Project::without_auto_borrow()
        .lend()
        .args(&["run"])
        .stdin("reserve 1 1\nremove 1\nwait 1s\nstatus 1\nlist\n")
        .passes()
        .stdout_has("removed item 1\n")
        .stdout_has("error: item not found: 1\n")
        .stdout_has("game of thrones");
}

#[test]
fn unknown_member_is_reported() {
    Project::fast()
        .lend()
        .args(&["run"])
        .stdin("reserve 1 42\n")
        .passes()
        .stdout_eq("error: member not found: 42\n");
}

mod common;

use common::cli::{BoardWorkspace, create_issue, run_cb};

#[test]
fn politician_broadcast_is_locked_to_update() {
    let ws = BoardWorkspace::new();

    let id = create_issue(
        &ws,
        [
            "--role",
            "Politician",
            "broadcast",
            "Water main repair scheduled for Friday",
            "--category",
            "Water",
        ],
        "broadcast",
    );

    let show = run_cb(&ws, ["show", &id, "--json"], "show broadcast").json();
    assert_eq!(show["title"], "Broadcast - Water");
    assert_eq!(show["status"], "Update");
    assert_eq!(show["reporterRole"], "Politician");

    let attempt = run_cb(
        &ws,
        ["--role", "Admin", "status", &id, "Resolved"],
        "resolve broadcast",
    );
    assert!(attempt.status.success());
    assert!(attempt.stdout.starts_with("No change:"), "{}", attempt.stdout);

    let after = run_cb(&ws, ["show", &id, "--json"], "show after attempt").json();
    assert_eq!(after["status"], "Update");

    let reply = run_cb(
        &ws,
        ["--role", "Citizen", "comment", &id, "Thanks for the notice"],
        "comment on broadcast",
    );
    assert!(reply.status.success());

    let feed = run_cb(&ws, ["feed", "--json"], "feed").json();
    assert_eq!(feed[0]["id"], id.as_str());
}

#[test]
fn only_politicians_may_broadcast() {
    let ws = BoardWorkspace::new();

    let out = run_cb(
        &ws,
        ["--role", "Moderator", "broadcast", "Road closed"],
        "moderator broadcast",
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stderr.contains("postBroadcast"), "{}", out.stderr);
    assert!(!ws.snapshot_path().exists());
}

#[test]
fn broadcast_without_category_uses_general() {
    let ws = BoardWorkspace::new();
    let id = create_issue(
        &ws,
        ["--role", "politician", "broadcast", "Town hall on Tuesday"],
        "broadcast",
    );
    let show = run_cb(&ws, ["show", &id, "--json"], "show").json();
    assert_eq!(show["title"], "Broadcast - General");
    assert_eq!(show["category"], "General");
}

//! Integration tests for the `slotwatch` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the plan, check and
//! watch subcommands against the JSON fixtures with a fixed clock.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slotwatch() -> Command {
    let mut cmd = Command::cargo_bin("slotwatch").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// plan
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn plan_lists_window_occurrences() {
    slotwatch()
        .args(["plan", "-c", &fixture("schedule.json"), "--now", "2024-01-01T08:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon 2024-01-01 18:00  Bovenverdieping  UNKNOWN"))
        .stdout(predicate::str::contains("Wed 2024-01-03 09:30  Boulderhal  UNKNOWN"))
        .stdout(predicate::str::contains("Mon 2024-01-08 18:00  Bovenverdieping  UNKNOWN"));
}

#[test]
fn plan_skips_slots_already_past() {
    slotwatch()
        .args(["plan", "-c", &fixture("schedule.json"), "--now", "2024-01-01T19:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01 18:00").not())
        .stdout(predicate::str::contains("Wed 2024-01-03 09:30"));
}

#[test]
fn plan_rejects_bad_config() {
    slotwatch()
        .args(["plan", "-c", &fixture("bad_schedule.json"), "--now", "2024-01-01T08:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schedule config"))
        .stderr(predicate::str::contains("hour"));
}

#[test]
fn plan_reports_missing_config_file() {
    slotwatch()
        .args(["plan", "-c", "/nonexistent/schedule.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}

#[test]
fn malformed_now_is_rejected() {
    slotwatch()
        .args(["plan", "-c", &fixture("schedule.json"), "--now", "monday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DDTHH:MM"));
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_prints_each_transition() {
    slotwatch()
        .args([
            "check",
            "-c",
            &fixture("schedule.json"),
            "-d",
            &fixture("snapshot.json"),
            "--now",
            "2024-01-01T08:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Bovenverdieping at Mon 2024-01-01 18:00: UNKNOWN -> AVAILABLE",
        ))
        .stdout(predicate::str::contains(
            "Boulderhal at Wed 2024-01-03 09:30: UNKNOWN -> TAKEN",
        ))
        .stdout(predicate::str::contains(
            "Bovenverdieping at Mon 2024-01-08 18:00: UNKNOWN -> FULL",
        ));
}

#[test]
fn check_json_emits_one_line_per_change() {
    let output = slotwatch()
        .args([
            "check",
            "-c",
            &fixture("schedule.json"),
            "-d",
            &fixture("snapshot.json"),
            "--now",
            "2024-01-01T08:00",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let changes: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();

    assert_eq!(changes.len(), 3);
    assert_eq!(changes[0]["datetime"], "2024-01-01T18:00:00");
    assert_eq!(changes[0]["area"], "Bovenverdieping");
    assert_eq!(changes[0]["old_state"], "UNKNOWN");
    assert_eq!(changes[0]["new_state"], "AVAILABLE");
    assert_eq!(changes[1]["new_state"], "TAKEN");
    assert_eq!(changes[2]["new_state"], "FULL");
}

#[test]
fn check_reports_missing_snapshot() {
    slotwatch()
        .args([
            "check",
            "-c",
            &fixture("schedule.json"),
            "-d",
            "/nonexistent/snapshot.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read snapshot"));
}

// ─────────────────────────────────────────────────────────────────────────────
// watch
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn watch_survives_unreadable_snapshot() {
    slotwatch()
        .args([
            "watch",
            "-c",
            &fixture("schedule.json"),
            "-d",
            "/nonexistent/snapshot.json",
            "--interval",
            "0",
            "--cycles",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("skipping cycle"));
}

#[test]
fn watch_stops_after_requested_cycles() {
    slotwatch()
        .args([
            "watch",
            "-c",
            &fixture("schedule.json"),
            "-d",
            &fixture("snapshot.json"),
            "--interval",
            "0",
            "--cycles",
            "1",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("cycle done"));
}

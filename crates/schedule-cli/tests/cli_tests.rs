//! Integration tests for the `faculty-schedule` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin input, file output, config
//! files and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn roster_path() -> String {
    fixture("roster.json")
}

/// Helper: run the binary with `args` and parse stdout as JSON.
fn run_json(args: &[&str]) -> Value {
    let output = Command::cargo_bin("faculty-schedule")
        .unwrap()
        .args(args)
        .output()
        .expect("binary should run");
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn pair_ids(report: &Value) -> Vec<(String, String)> {
    report["conflicts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["a"]["id"].as_str().unwrap().to_string(),
                c["b"]["id"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Conflicts subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicts_inclusive_by_default() {
    let report = run_json(&["conflicts", "-i", &roster_path()]);

    // f1-1 ends exactly when f1-2 starts: a conflict under the default policy.
    assert_eq!(
        pair_ids(&report),
        vec![pair("f1-1", "f1-2"), pair("r1-1", "r1-2")]
    );
    assert!(report["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn conflicts_half_open_flag() {
    let report = run_json(&["conflicts", "-i", &roster_path(), "--half-open"]);
    assert_eq!(pair_ids(&report), vec![pair("r1-1", "r1-2")]);
}

#[test]
fn conflicts_half_open_from_config() {
    let config = fixture("half_open.toml");
    let report = run_json(&["--config", &config, "conflicts", "-i", &roster_path()]);
    assert_eq!(pair_ids(&report), vec![pair("r1-1", "r1-2")]);
}

#[test]
fn conflicts_with_calendar_events() {
    let events = fixture("events.json");
    let report = run_json(&["conflicts", "-i", &roster_path(), "--calendar", &events]);

    assert_eq!(
        pair_ids(&report),
        vec![
            pair("f1-1", "f1-2"),
            pair("f2-1", "g-1"),
            pair("r1-1", "r1-2"),
        ]
    );
    let diagnostics = report["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["entry_id"], "g-2");
    assert_eq!(diagnostics[0]["reason"], "missing_owner");
}

#[test]
fn conflicts_from_stdin() {
    let roster = std::fs::read_to_string(roster_path()).expect("roster fixture must exist");

    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .arg("conflicts")
        .write_stdin(roster)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"conflicts\""))
        .stdout(predicate::str::contains("r1-2"));
}

#[test]
fn conflicts_to_output_file() {
    let output_path = std::env::temp_dir().join("faculty-schedule-conflicts.json");
    let _ = std::fs::remove_file(&output_path);

    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .args(["conflicts", "-i", &roster_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let report: Value = serde_json::from_str(&content).expect("output should be JSON");
    assert_eq!(report["conflicts"].as_array().unwrap().len(), 2);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn invalid_roster_fails() {
    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .arg("conflicts")
        .write_stdin("not a roster {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse roster JSON"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Availability subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn availability_day_for_known_faculty() {
    let slots = run_json(&[
        "availability",
        "-i",
        &roster_path(),
        "--faculty",
        "f1",
        "--at",
        "2026-03-17T12:00:00Z",
    ]);

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 9);
    let free: Vec<&str> = slots
        .iter()
        .filter(|s| s["available"] == true)
        .map(|s| s["instant"].as_str().unwrap())
        .collect();
    assert_eq!(
        free,
        vec![
            "2026-03-17T08:00:00Z",
            "2026-03-17T11:00:00Z",
            "2026-03-17T12:00:00Z",
            "2026-03-17T13:00:00Z",
        ]
    );
}

#[test]
fn availability_free_only_week() {
    let slots = run_json(&[
        "availability",
        "-i",
        &roster_path(),
        "--faculty",
        "f1",
        "--filter",
        "week",
        "--at",
        "2026-03-19T12:00:00Z",
        "--free-only",
    ]);

    // 45 weekday slots, 5 of them busy on Tuesday.
    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 40);
    assert!(slots.iter().all(|s| s["available"] == true));
}

#[test]
fn availability_unknown_faculty_is_empty() {
    let slots = run_json(&[
        "availability",
        "-i",
        &roster_path(),
        "--faculty",
        "unknown-id",
        "--at",
        "2026-03-17T12:00:00Z",
    ]);
    assert_eq!(slots, Value::Array(vec![]));
}

#[test]
fn availability_weekend_is_empty() {
    let slots = run_json(&[
        "availability",
        "-i",
        &roster_path(),
        "--faculty",
        "f1",
        "--at",
        "2026-03-21T12:00:00Z",
    ]);
    assert_eq!(slots, Value::Array(vec![]));
}

#[test]
fn availability_uses_configured_hours() {
    let config = fixture("late_hours.toml");
    let slots = run_json(&[
        "--config",
        &config,
        "availability",
        "-i",
        &roster_path(),
        "--faculty",
        "f1",
        "--at",
        "2026-03-17T12:00:00Z",
    ]);

    let slots = slots.as_array().unwrap();
    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0]["instant"], "2026-03-17T12:00:00Z");
    let free = slots.iter().filter(|s| s["available"] == true).count();
    assert_eq!(free, 3);
}

#[test]
fn availability_rejects_unknown_filter() {
    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .args([
            "availability",
            "-i",
            &roster_path(),
            "--faculty",
            "f1",
            "--filter",
            "year",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown availability filter"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Workload, occupancy and sync subcommands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn workload_summary_defaults() {
    let summary = run_json(&["workload", "-i", &roster_path()]);

    assert_eq!(summary["faculty_count"], 3);
    assert_eq!(summary["total_hours"], 75.0);
    assert_eq!(summary["teaching_percent"], 56);
    assert_eq!(summary["overbooked"], 1);
    assert_eq!(summary["underutilized"], 0);
}

#[test]
fn workload_summary_with_config_limits() {
    let config = fixture("late_hours.toml");
    let summary = run_json(&["--config", &config, "workload", "-i", &roster_path()]);

    assert_eq!(summary["overbooked"], 0);
}

#[test]
fn occupancy_at_instant() {
    let summary = run_json(&[
        "occupancy",
        "-i",
        &roster_path(),
        "--at",
        "2026-03-17T10:00:00Z",
    ]);

    assert_eq!(summary["total"], 4);
    assert_eq!(summary["available"], 2);
    assert_eq!(summary["occupied"], 1);
    assert_eq!(summary["maintenance"], 1);
    assert_eq!(summary["classroom_usage_percent"], 50.0);
    assert_eq!(summary["lab_usage_percent"], 0.0);
}

fn room_ids(rooms: &Value) -> Vec<&str> {
    rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect()
}

#[test]
fn rooms_filtered_by_status_and_kind() {
    let at = "2026-03-17T10:00:00Z";
    let roster = roster_path();

    let available = run_json(&["rooms", "-i", &roster, "--at", at, "--filter", "available"]);
    assert_eq!(room_ids(&available), vec!["r1", "r4"]);

    let occupied = run_json(&["rooms", "-i", &roster, "--at", at, "--filter", "occupied"]);
    assert_eq!(room_ids(&occupied), vec!["r2"]);
    assert_eq!(occupied[0]["status"], "occupied");
    assert_eq!(occupied[0]["next_available"], "2026-03-17T11:00:00Z");

    let labs = run_json(&["rooms", "-i", &roster, "--at", at, "--filter", "lab"]);
    assert_eq!(room_ids(&labs), vec!["r1", "r3"]);
    assert_eq!(labs[1]["status"], "maintenance");

    let all = run_json(&["rooms", "-i", &roster, "--at", at]);
    assert_eq!(room_ids(&all), vec!["r1", "r2", "r3", "r4"]);
}

#[test]
fn rooms_rejects_unknown_filter() {
    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .args(["rooms", "-i", &roster_path(), "--filter", "broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource filter"));
}

#[test]
fn sync_pushes_every_faculty_entry() {
    let report = run_json(&["sync", "-i", &roster_path()]);

    assert_eq!(report["pushed"].as_array().unwrap().len(), 4);
    assert!(report["failed"].as_array().unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_config_fails() {
    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .args(["--config", &roster_path(), "workload", "-i", &roster_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("conflicts"))
        .stdout(predicate::str::contains("availability"))
        .stdout(predicate::str::contains("workload"))
        .stdout(predicate::str::contains("occupancy"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("faculty-schedule")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}

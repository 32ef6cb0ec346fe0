use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::TempDir;

fn alarm() -> Command {
    cargo_bin_cmd!("roosty_alarm")
}

/// a config path inside a fresh temp dir, so the user's own config is never read
fn scratch_config() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml").to_string_lossy().to_string();
    (dir, path)
}

#[test]
fn neither_at_nor_in_is_a_usage_error() {
    let (_dir, config) = scratch_config();
    alarm()
        .args(["--config", &config, "-msg", "tea"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Either the --at or the --in option must be given",
        ))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn both_at_and_in_is_a_usage_error() {
    let (_dir, config) = scratch_config();
    alarm()
        .args(["--config", &config, "-at", "5:00PM", "-in", "5m"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Either the --at or the --in option"));
}

#[test]
fn malformed_duration_is_reported() {
    let (_dir, config) = scratch_config();
    alarm()
        .args(["--config", &config, "-in", "5x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Error parsing time at which to ring the alarm",
        ))
        .stderr(predicate::str::contains("is not a duration"));
}

#[test]
fn out_of_range_hour_is_reported() {
    let (_dir, config) = scratch_config();
    alarm()
        .args(["--config", &config, "--at", "24"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hours must be in the range [0..23]"));
}

#[test]
fn init_writes_the_default_config() {
    let (_dir, config) = scratch_config();
    alarm()
        .args(["--config", &config, "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_title = \"Alarm\""));
    assert!(written.contains("tick_interval_ms = 1000"));
}

#[test]
fn init_does_not_overwrite_without_force() {
    let (_dir, config) = scratch_config();
    std::fs::write(&config, "default_title = \"Mine\"\n").unwrap();

    alarm()
        .args(["--config", &config, "--init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("use --force"));
    assert!(std::fs::read_to_string(&config).unwrap().contains("Mine"));

    alarm()
        .args(["--config", &config, "--init", "--force"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&config)
        .unwrap()
        .contains("default_title = \"Alarm\""));
}

#[test]
fn force_without_init_is_rejected() {
    alarm().arg("--force").assert().failure();
}

#[test]
fn broken_config_is_fatal() {
    let (_dir, config) = scratch_config();
    std::fs::write(&config, "tick_interval_ms = 0\n").unwrap();
    alarm()
        .args(["--config", &config, "-in", "1s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn usage_errors_win_over_a_broken_config() {
    let (_dir, config) = scratch_config();
    std::fs::write(&config, "tick_interval_ms = 0\n").unwrap();
    alarm()
        .args(["--config", &config, "-msg", "tea"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Either the --at"))
        .stderr(predicate::str::contains("Configuration error").not());
}

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use avocado_irrigation::io::read_log;

/// Write a config whose weather endpoint is unreachable, so API mode always falls back.
fn offline_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("irrigation.toml");
    let log = dir.path().join("configured_log.csv");
    std::fs::write(
        &path,
        format!(
            "[weather]\nbase_url = \"http://127.0.0.1:9/v1/forecast\"\ntimeout_secs = 2\n\n[log]\npath = {:?}\n",
            log.to_str().unwrap()
        ),
    )
    .unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("avocado-irrigation").unwrap()
}

// --- Estimate subcommand ---

#[test]
fn test_estimate_manual_eto() {
    cmd()
        .args([
            "estimate", "--age", "3", "--canopy", "1.0", "--soil", "Πηλώδες", "--eto", "5.0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily Water Need"))
        .stdout(predicate::str::contains("about 2.0 liters/day"))
        .stdout(predicate::str::contains("0.65"));
}

#[test]
fn test_estimate_json_output() {
    let output = cmd()
        .args(["estimate", "--age", "5", "--canopy", "2.0", "--eto", "4.0", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kc"].as_f64().unwrap(), 0.75);
    assert_eq!(json["soil_factor"].as_f64().unwrap(), 1.0);
    let expected = 4.0 * 0.75 * std::f64::consts::PI;
    assert!((json["water_liters_per_day"].as_f64().unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_estimate_unknown_age_uses_default_kc() {
    let output = cmd()
        .args(["estimate", "--age", "7", "--canopy", "1.0", "--eto", "5.0", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kc"].as_f64().unwrap(), 0.8);
}

#[test]
fn test_estimate_canopy_out_of_range() {
    cmd()
        .args(["estimate", "--age", "3", "--canopy", "15", "--eto", "5.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("canopy diameter"));
}

#[test]
fn test_estimate_negative_eto() {
    cmd()
        .args(["estimate", "--age", "3", "--canopy", "1.0", "--eto=-1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ETo must be non-negative"));
}

#[test]
fn test_estimate_api_fallback_warns_and_proceeds() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);

    cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["estimate", "--age", "3", "--canopy", "1.0", "--soil", "Πηλώδες"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning"))
        .stderr(predicate::str::contains("5.0 mm/day"))
        .stdout(predicate::str::contains("about 2.0 liters/day"));
}

#[test]
fn test_estimate_save_twice() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log.csv");

    for age in ["3", "10"] {
        cmd()
            .args(["estimate", "--age", age, "--canopy", "1.5", "--eto", "5.5", "--save"])
            .args(["--log", log.to_str().unwrap()])
            .assert()
            .success()
            .stderr(predicate::str::contains("Saved to"));
    }

    let rows = read_log(&log).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].age, 3);
    assert_eq!(rows[1].age, 10);
    assert_eq!(rows[0].eto_source, "manual");

    let text = std::fs::read_to_string(&log).unwrap();
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn test_estimate_save_uses_configured_log() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);

    cmd()
        .args(["--config", config.to_str().unwrap()])
        .args(["estimate", "--age", "2", "--canopy", "1.0", "--eto", "3.0", "--save"])
        .assert()
        .success();

    let rows = read_log(dir.path().join("configured_log.csv")).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_estimate_save_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("missing_dir").join("log.csv");

    cmd()
        .args(["estimate", "--age", "3", "--canopy", "1.0", "--eto", "5.0", "--save"])
        .args(["--log", log.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily Water Need"))
        .stderr(predicate::str::contains("could not write"));
}

// --- Eto subcommand ---

#[test]
fn test_eto_offline_fallback() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);

    cmd()
        .args(["--config", config.to_str().unwrap(), "eto", "--lat", "35.5", "--lon", "24.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5.00"))
        .stdout(predicate::str::contains("fallback"));
}

#[test]
fn test_eto_invalid_latitude() {
    let dir = TempDir::new().unwrap();
    let config = offline_config(&dir);

    cmd()
        .args(["--config", config.to_str().unwrap(), "eto", "--lat", "-95"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("latitude"));
}

// --- History subcommand ---

#[test]
fn test_history_empty() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("none.csv");

    cmd()
        .args(["history", "--log", log.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries logged"));
}

#[test]
fn test_history_after_saves() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log.csv");

    for eto in ["4.0", "6.0"] {
        cmd()
            .args(["estimate", "--age", "5", "--canopy", "2.0", "--eto", eto, "--save"])
            .args(["--log", log.to_str().unwrap()])
            .assert()
            .success();
    }

    cmd()
        .args(["history", "--chart", "--log", log.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Irrigation Log"))
        .stdout(predicate::str::contains("Entries: 2"))
        .stdout(predicate::str::contains("Water Need per Entry"));
}

// --- Coefficients subcommand ---

#[test]
fn test_coefficients() {
    cmd()
        .arg("coefficients")
        .assert()
        .success()
        .stdout(predicate::str::contains("Crop Coefficients"))
        .stdout(predicate::str::contains("0.55"))
        .stdout(predicate::str::contains("Πηλώδες"));
}

#[test]
fn test_bad_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[weather]\ntimeout_secs = 0\n").unwrap();

    cmd()
        .args(["--config", path.to_str().unwrap(), "coefficients"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}

// --- General ---

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("estimate"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_missing_required_args() {
    cmd().args(["estimate", "--age", "3"]).assert().failure();
}

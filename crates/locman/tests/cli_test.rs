//! Integration tests for the `locman` CLI binary.
//!
//! Every test points `--config` at a temp file (or isolates HOME) so the
//! user's real configuration is never read or written.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

const ISOLATED_HOME: &str = "/tmp/locman-cli-test-nonexistent";

const CONFIG: &str = r#"
default_profile = "navigation"

[profiles.navigation]
keep_tracking = true

[profiles.navigation.permission]
rationale_message = "We need your location to navigate."
required_permissions = ["ACCESS_FINE_LOCATION"]

[profiles.navigation.play_services]
priority = "high_accuracy"
interval_ms = 10000
fastest_interval_ms = 5000
wait_period_ms = 15000

[profiles.navigation.default_providers]
wait_period_ms = 20000
gps_wait_period_ms = 30000
gps_message = "Please enable GPS"

[profiles.quick]
default_providers = {}

[profiles.broken]
default_providers = { required_time_interval_ms = -5 }

[profiles.providerless]
keep_tracking = true
"#;

/// Build a [`Command`] for the `locman` binary with env isolation.
fn locman_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("locman");
    cmd.env("HOME", ISOLATED_HOME)
        .env("XDG_CONFIG_HOME", ISOLATED_HOME)
        .env_remove("LOCMAN_CONFIG")
        .env_remove("LOCMAN_PROFILE")
        .env_remove("LOCMAN_DEFAULT_PROFILE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, CONFIG).unwrap();
    path
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = locman_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    locman_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("location")
            .and(predicate::str::contains("check"))
            .and(predicate::str::contains("profiles"))
            .and(predicate::str::contains("defaults")),
    );
}

#[test]
fn test_version_flag() {
    locman_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("locman"));
}

#[test]
fn test_completions_bash() {
    locman_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("locman"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    locman_cmd().arg("frobnicate").assert().code(2);
}

// ── check ───────────────────────────────────────────────────────────

#[test]
fn test_check_default_profile_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    let output = locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "json", "check"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["profile"], "navigation");
    assert_eq!(report["keep_tracking"], true);
    assert_eq!(report["permission"]["provider"], "default");
    assert_eq!(
        report["permission"]["required_permissions"],
        serde_json::json!(["ACCESS_FINE_LOCATION"])
    );
    assert_eq!(report["play_services"]["priority"], "high_accuracy");
    assert_eq!(report["play_services"]["wait_period_ms"], 15000);
    assert_eq!(report["default_providers"]["gps_wait_period_ms"], 30000);
    assert_eq!(report["default_providers"]["network_wait_period_ms"], 20000);
    assert_eq!(report["default_providers"]["ask_for_gps_enable"], true);
}

#[test]
fn test_check_named_profile_uses_stub_permissions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "plain", "check", "quick"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("profile=quick")
                .and(predicate::str::contains("permission.provider=stub"))
                .and(predicate::str::contains("play_services=disabled"))
                .and(predicate::str::contains(
                    "default_providers.gps_wait_period_ms=20000",
                )),
        );
}

#[test]
fn test_check_profile_flag_selects_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["--profile", "quick", "-o", "plain", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile=quick"));
}

#[test]
fn test_check_table_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Setting")
                .and(predicate::str::contains("default_providers.gps_message")),
        );
}

#[test]
fn test_check_negative_value_exits_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    let output = locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "broken"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("broken"), "Expected profile name in:\n{text}");
    assert!(text.contains("negative"), "Expected reason in:\n{text}");
}

#[test]
fn test_check_without_providers_exits_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    let output = locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "providerless"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("providerless"),
        "Expected profile name in:\n{text}"
    );
}

#[test]
fn test_check_unknown_profile_exits_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    let output = locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["check", "nope"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("nope"), "Expected profile name in:\n{text}");
}

#[test]
fn test_check_missing_explicit_config_exits_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let output = locman_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("check")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(
        text.contains("locman config init"),
        "Expected init hint in:\n{text}"
    );
}

#[test]
fn test_check_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[profiles.default.default_providers]\nwait_periods_ms = 10\n",
    )
    .unwrap();

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .assert()
        .code(1);
}

// ── profiles / defaults ─────────────────────────────────────────────

#[test]
fn test_profiles_plain_lists_sorted_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "plain", "profiles"])
        .assert()
        .success()
        .stdout("broken\nnavigation\nproviderless\nquick\n");
}

#[test]
fn test_profiles_json_marks_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    let output = locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "json", "profiles"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let profiles: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let defaults: Vec<&str> = profiles
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["default"] == true)
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(defaults, vec!["navigation"]);
}

#[test]
fn test_defaults_plain() {
    locman_cmd()
        .args(["-o", "plain", "defaults"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("location_interval_ms=300000")
                .and(predicate::str::contains("wait_period_ms=20000"))
                .and(predicate::str::contains("min_accuracy_m=5"))
                .and(predicate::str::contains("location_priority=high_accuracy")),
        );
}

#[test]
fn test_quiet_suppresses_output() {
    locman_cmd()
        .args(["-q", "defaults"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_writes_checkable_starter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["-o", "plain", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile=default"));
}

#[test]
fn test_config_init_refuses_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .code(2);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFIG);

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert_ne!(std::fs::read_to_string(&path).unwrap(), CONFIG);
}

#[test]
fn test_config_show_renders_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path());

    locman_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("default_profile = \"navigation\"")
                .and(predicate::str::contains("gps_wait_period_ms = 30000")),
        );
}

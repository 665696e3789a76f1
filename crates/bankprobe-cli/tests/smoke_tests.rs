//! Smoke tests for the bankprobe CLI
//!
//! These tests run the binary end to end for every command that does not
//! need a device.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the bankprobe binary with a clean environment
fn bankprobe() -> Command {
    let mut cmd = Command::cargo_bin("bankprobe").expect("bankprobe binary should exist");
    for key in [
        "BANKPROBE_CONFIG",
        "PLATFORM",
        "PERFECTO_SECURITY_TOKEN",
        "APPIUM_SERVER_URL",
        "TEST_USERNAME",
        "TEST_PASSWORD",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    bankprobe()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.1"));
}

#[test]
fn test_help_flag() {
    bankprobe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("locators"))
        .stdout(predicate::str::contains("smoke"));
}

#[test]
fn test_no_args_shows_help() {
    bankprobe().assert().failure(); // Requires a subcommand
}

// ============================================================================
// Locator Inspection
// ============================================================================

#[test]
fn test_locators_android_login() {
    bankprobe()
        .args(["--platform", "android", "--color", "never", "locators", "--page", "login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LoginPage (android"))
        .stdout(predicate::str::contains(
            "(ID, \"xyz.digitalbank.demo:id/login\")",
        ));
}

#[test]
fn test_locators_json() {
    let output = bankprobe()
        .args(["--platform", "ios", "locators", "--page", "sign-up", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["page"], "SignUpPage");
    assert_eq!(value["platform"], "ios");
    assert!(value["locators"].as_array().is_some_and(|l| !l.is_empty()));
}

#[test]
fn test_resolve_known_name() {
    bankprobe()
        .args(["--platform", "ios", "resolve", "--page", "login", "login_button"])
        .assert()
        .success()
        .stdout(predicate::str::diff("(ACCESSIBILITY_ID, \"LogIn\")\n"));
}

#[test]
fn test_resolve_unknown_name_fails() {
    bankprobe()
        .args(["--platform", "android", "resolve", "--page", "login", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_unknown_page_fails() {
    bankprobe()
        .args(["locators", "--page", "checkout"])
        .assert()
        .failure();
}

// ============================================================================
// Swipe Plans
// ============================================================================

#[test]
fn test_swipe_up_reference_screen() {
    bankprobe()
        .args(["swipe", "--direction", "up", "--width", "1000", "--height", "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(500,1600) -> (500,400)"));
}

#[test]
fn test_swipe_zero_width_fails() {
    bankprobe()
        .args(["swipe", "--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-zero"));
}

// ============================================================================
// Configuration and Capabilities
// ============================================================================

#[test]
fn test_config_masks_secrets() {
    bankprobe()
        .env("PERFECTO_SECURITY_TOKEN", "tok-123")
        .env("TEST_PASSWORD", "hunter2")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("appium_server_url"))
        .stdout(predicate::str::contains("tok-123").not())
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_config_file_and_platform_flag() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bankprobe.yaml");
    fs::write(
        &path,
        "platform: ios\nappium_server_url: http://grid.example:4723/wd/hub\n",
    )
    .unwrap();

    bankprobe()
        .args(["--config", path.to_str().unwrap(), "--platform", "android", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://grid.example:4723/wd/hub"))
        .stdout(predicate::str::contains("platform: android"));
}

#[test]
fn test_malformed_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.yaml");
    fs::write(&path, "implicit_wait_secs: [not, a, number]\n").unwrap();

    bankprobe()
        .args(["--config", path.to_str().unwrap(), "config"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_platform_env_fails() {
    bankprobe()
        .env("PLATFORM", "windows")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("windows"));
}

#[test]
fn test_capabilities_android() {
    let output = bankprobe()
        .env("PERFECTO_SECURITY_TOKEN", "tok-123")
        .args(["--platform", "android", "capabilities"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["platformName"], "Android");
    assert_eq!(value["appium:appPackage"], "xyz.digitalbank.demo");
    assert_eq!(value["appium:securityToken"], "***");
}

// ============================================================================
// Smoke Flows
// ============================================================================

#[test]
fn test_smoke_without_server_fails() {
    let temp = TempDir::new().unwrap();
    bankprobe()
        .current_dir(temp.path())
        .env("APPIUM_SERVER_URL", "http://127.0.0.1:9/wd/hub")
        .env("COMMAND_TIMEOUT", "1")
        .args(["smoke", "--flow", "login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
    assert!(temp.path().join("logs").join("test_execution.log").exists());
}

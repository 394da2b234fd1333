//! Integration tests for the poolhand CLI surface.
//!
//! These exercise argument parsing and pre-flight failures only — nothing
//! here reaches the cloud CLI.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn poolhand() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("poolhand"));
    cmd.env("NO_COLOR", "1");
    // Never prompt for credentials in tests.
    cmd.env("CI", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    poolhand().assert().code(2).stderr(predicate::str::contains(
        "Provision cloud VMs and register them as self-hosted pipeline agents",
    ));
}

#[test]
fn test_cli_help_flag_shows_help() {
    poolhand()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_help_shows_provision_and_config_commands() {
    poolhand()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command_shows_version() {
    poolhand()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("poolhand 0.3.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    poolhand()
        .arg("version")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"version":"0.3.0"}"#));
}

// --- Provision argument validation ---

#[test]
fn test_provision_without_required_args_fails_with_usage() {
    poolhand()
        .arg("provision")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_provision_rejects_unknown_platform() {
    poolhand()
        .args([
            "provision",
            "--organization-url",
            "https://dev.azure.com/contoso",
            "--pool",
            "SelfHostedPool",
            "--resource-group",
            "rg1",
            "--vm-name",
            "vm1",
            "--platform",
            "solaris",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

// --- Pre-flight failures (no cloud call is ever attempted) ---

#[test]
fn test_provision_malformed_public_ip_fails_fast() {
    poolhand()
        .args([
            "provision",
            "--organization-url",
            "https://dev.azure.com/contoso",
            "--pool",
            "SelfHostedPool",
            "--resource-group",
            "rg1",
            "--vm-name",
            "vm1",
            "--public-ip",
            "maybe",
        ])
        .env("AZP_TOKEN", "tok123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration for public-ip"));
}

#[test]
fn test_provision_subnet_without_vnet_fails_fast() {
    poolhand()
        .args([
            "provision",
            "--organization-url",
            "https://dev.azure.com/contoso",
            "--pool",
            "SelfHostedPool",
            "--resource-group",
            "rg1",
            "--vm-name",
            "vm1",
            "--subnet-name",
            "agents",
        ])
        .env("AZP_TOKEN", "tok123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration for subnet-name"));
}

#[test]
fn test_provision_without_token_is_missing_credential() {
    poolhand()
        .args([
            "provision",
            "--organization-url",
            "https://dev.azure.com/contoso",
            "--pool",
            "SelfHostedPool",
            "--resource-group",
            "rg1",
            "--vm-name",
            "vm1",
        ])
        .env_remove("AZP_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credential: AZP_TOKEN"));
}

#[test]
fn test_provision_windows_without_password_is_missing_credential() {
    poolhand()
        .args([
            "provision",
            "--organization-url",
            "https://dev.azure.com/contoso",
            "--pool",
            "SelfHostedPool",
            "--resource-group",
            "rg1",
            "--vm-name",
            "vm1",
            "--platform",
            "windows",
        ])
        .env("AZP_TOKEN", "tok123")
        .env_remove("WIN_ADMIN_PASSWORD")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credential: WIN_ADMIN_PASSWORD"));
}

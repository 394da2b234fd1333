//! Integration tests for `poolhand config`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn poolhand() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("poolhand"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_config_set_then_get_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");

    poolhand()
        .args(["config", "set", "defaults.location", "westeurope"])
        .env("POOLHAND_CONFIG", &path)
        .assert()
        .success();

    poolhand()
        .args(["config", "get", "defaults.location"])
        .env("POOLHAND_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("westeurope"));
}

#[test]
fn test_config_get_unset_key_prints_unset() {
    let dir = tempfile::tempdir().expect("tempdir");
    poolhand()
        .args(["config", "get", "defaults.vm-size"])
        .env("POOLHAND_CONFIG", dir.path().join("config.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(unset)"));
}

#[test]
fn test_config_rejects_unknown_key() {
    poolhand()
        .args(["config", "get", "defaults.image"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_path_prints_override() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    poolhand()
        .args(["config", "path"])
        .env("POOLHAND_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

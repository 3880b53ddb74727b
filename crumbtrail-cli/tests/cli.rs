//! Integration tests for the crumbtrail CLI surface: help, version and
//! argument errors.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_cli_no_arguments() {
    let env = TestEnv::new();
    env.command_bare()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version_flag() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crumbtrail"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_help_flag() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("breadcrumb trails"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_trail_requires_a_page() {
    let env = TestEnv::new();
    env.command()
        .arg("trail")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_trail_rejects_two_pages() {
    let env = TestEnv::new();
    env.command()
        .args(["trail", "--node", "3", "--view", "browse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_trail_without_store() {
    let env = TestEnv::new();
    env.command()
        .args(["trail", "--node", "3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Content store not found"));
    assert!(!env.data_dir.join("content.db").exists());
}

#[test]
fn test_completions_bash() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crumbtrail"));
}

//! Tests for error handling, exit codes, and suggestions.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn repoman() -> Command {
    let mut cmd = Command::cargo_bin("repoman").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok()
}

#[test]
fn test_status_outside_repository_exits_2() {
    let temp = TempDir::new().unwrap();

    repoman()
        .arg("-C")
        .arg(temp.path())
        .arg("status")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not a repository"))
        .stderr(predicate::str::contains("repoman init"));
}

#[test]
fn test_every_repository_command_checks_for_repository() {
    let temp = TempDir::new().unwrap();
    let commands: [&[&str]; 9] = [
        &["add", "README.md"],
        &["commit", "-m", "msg"],
        &["push"],
        &["pull"],
        &["branch", "feature"],
        &["merge", "feature"],
        &["checkout", "main"],
        &["branches"],
        &["license", "add", "MIT", "--author", "Acme"],
    ];

    for args in commands {
        repoman()
            .arg("-C")
            .arg(temp.path())
            .args(args)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Not a repository"));
    }
}

#[test]
fn test_add_without_files_is_usage_error() {
    repoman().arg("add").assert().code(2);
}

#[test]
fn test_missing_config_file_exits_4() {
    let temp = TempDir::new().unwrap();

    repoman()
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .args(["license", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_license_lists_available() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    repoman().arg("-C").arg(temp.path()).arg("init").assert().success();

    repoman()
        .arg("-C")
        .arg(temp.path())
        .args(["license", "add", "NotARealLicense", "--author", "Acme"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("NotARealLicense"))
        .stderr(predicate::str::contains("Apache-2.0"));

    assert!(!temp.path().join("LICENSE").exists());
}

#[test]
fn test_license_without_author_exits_2() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    repoman().arg("-C").arg(temp.path()).arg("init").assert().success();

    repoman()
        .arg("-C")
        .arg(temp.path())
        .args(["license", "add", "MIT"])
        .env_remove("REPOMAN_LICENSE__DEFAULT_AUTHOR")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires an author"))
        .stderr(predicate::str::contains("--author"));
}

#[test]
fn test_second_init_exits_2() {
    if !git_available() {
        return;
    }
    let temp = TempDir::new().unwrap();
    repoman().arg("-C").arg(temp.path()).arg("init").assert().success();

    repoman()
        .arg("-C")
        .arg(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_unavailable_tool_exits_4() {
    let temp = TempDir::new().unwrap();

    repoman()
        .arg("-C")
        .arg(temp.path())
        .arg("init")
        .env("REPOMAN_GIT__PROGRAM", "repoman-no-such-tool")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("repoman-no-such-tool"));
}

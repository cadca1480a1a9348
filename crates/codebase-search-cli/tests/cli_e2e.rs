//! End-to-end CLI tests using `assert_cmd`
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Helper to get cargo binary or fail test
fn cargo_bin() -> Command {
    let mut command = Command::cargo_bin("codebase-search")
        .unwrap_or_else(|err| panic!("Binary not found: {err}"));
    command.env("RUST_LOG", "off");
    command
}

/// Helper to create temp dir or fail test
fn temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"))
}

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

fn git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|err| panic!("Failed to run git: {err}"));
    assert!(output.status.success(), "git {args:?} failed");
}

/// Helper to create a git repository with one module and a few signals
fn rtl_repo() -> TempDir {
    let temp = temp_dir();
    fs::write(
        temp.path().join("counter.sv"),
        "module counter(\n  input wire clk,\n  output reg [7:0] count\n);\nendmodule\n",
    )
    .unwrap_or_else(|err| panic!("Failed to write counter.sv: {err}"));
    git(temp.path(), &["init", "-q"]);
    git(temp.path(), &["add", "-A"]);
    temp
}

#[test]
fn test_cli_help() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_invalid_command() {
    cargo_bin().arg("invalid-command-xyz").assert().failure();
}

#[test]
fn test_tools_lists_all_operations() {
    cargo_bin()
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("search_in_specific_file_with_context"))
        .stdout(predicate::str::contains("list_all_modules"))
        .stdout(predicate::str::contains("find_signal_usage"));
}

#[test]
fn test_config_reflects_timeout_flag() {
    let temp = temp_dir();
    let config = temp.path().join("config.toml");
    fs::write(&config, "[engine]\ngrep_program = \"git\"\n")
        .unwrap_or_else(|err| panic!("Failed to write config: {err}"));

    cargo_bin()
        .arg("config")
        .arg("--config")
        .arg(&config)
        .args(["--timeout", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timeout_seconds = 9"));
}

#[test]
fn test_invalid_repository_prints_sentinel() {
    let temp = temp_dir();

    cargo_bin()
        .arg("modules")
        .arg("--path")
        .arg(temp.path().join("missing"))
        .assert()
        .success()
        .stdout("Error Occurred\n");
}

#[test]
fn test_modules_and_usage() {
    if !git_available() {
        return;
    }
    let repo = rtl_repo();

    cargo_bin()
        .arg("modules")
        .arg("--path")
        .arg(repo.path())
        .assert()
        .success()
        .stdout("counter.sv:module counter(\n");

    cargo_bin()
        .args(["usage", "count"])
        .arg("--path")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("counter.sv:3:  output reg [7:0] count"));

    cargo_bin()
        .args(["usage", "missing_sig"])
        .arg("--path")
        .arg(repo.path())
        .assert()
        .success()
        .stdout("Signal \"missing_sig\" not found.\n");
}

#[test]
fn test_serve_answers_each_line() {
    if !git_available() {
        return;
    }
    let repo = rtl_repo();
    let path = repo.path().to_string_lossy().into_owned();
    let requests = format!(
        "{}\n{}\n",
        serde_json::json!({"id": 1, "tool": "list_all_signals", "params": {"path": path, "file": "counter.sv"}}),
        serde_json::json!({"id": 2, "tool": "no_such_tool", "params": {}}),
    );

    let output = cargo_bin()
        .arg("serve")
        .write_stdin(requests)
        .output()
        .unwrap_or_else(|err| panic!("Failed to run serve: {err}"));
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap_or_else(|err| panic!("{err}"));
    let responses: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|err| panic!("{err}: {line}")))
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["success"], true);
    assert!(
        responses[0]["message"]
            .as_str()
            .is_some_and(|message| message.contains("counter.sv:  input wire clk,"))
    );
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["success"], false);
}

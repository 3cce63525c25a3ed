//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the phantom-refine-cli crate
//! so that CARGO_BIN_EXE_phr is available.

use std::io::Write;
use std::process::{Command, Output};

/// Get a Command pointing to the `phr` binary.
fn phr_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_phr"))
}

fn run(args: &[&str]) -> Output {
    phr_binary()
        .args(args)
        .output()
        .expect("failed to execute phr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn definitions() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(
        br#"{ "version": 1, "namespace": "app",
              "types": [
                { "name": "Natural", "bases": ["int"], "predicate": { "ge": 0 } },
                { "name": "Small", "bases": ["Natural"], "predicate": { "less": 10 },
                  "description": "A small natural number." } ] }"#,
    )
    .expect("write definitions");
    file
}

#[test]
fn cli_responds_to_help() {
    let output = run(&["--help"]);
    assert!(
        output.status.success(),
        "phr --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = stdout(&output);
    assert!(
        stdout.contains("phr") || stdout.contains("Usage"),
        "phr --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = run(&["--nonexistent-flag"]);
    assert!(!output.status.success());
}

#[test]
fn cli_lists_builtins() {
    let output = run(&["list"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("phantom::sized::NonEmpty"));
    assert!(stdout.contains("phantom::sized::PhantomSized (abstract)"));
}

#[test]
fn cli_check_prints_result() {
    let output = run(&["check", "NonEmpty", "[1, 2]"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "true");

    let output = run(&["check", "NonEmpty", "[]"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "false");

    let output = run(&["--arrays", "list", "check", "NonEmpty", "[1, 2]"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "false");
}

#[test]
fn cli_check_abstract_fails() {
    let output = run(&["check", "PhantomSized", "[1]"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Abstract refinement type"));
}

#[test]
fn cli_uses_definition_files() {
    let defs = definitions();
    let path = defs.path().to_str().expect("utf-8 path");

    let output = run(&["--defs", path, "check", "app::Small", "7"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "true");

    let output = run(&["--defs", path, "parse", "Small", "7"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "7");

    let output = run(&["--defs", path, "parse", "Small", "12"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not parse app::Small from 12"));

    let output = run(&["--defs", path, "show", "Small"]);
    assert!(output.status.success());
    let shown = stdout(&output);
    assert!(shown.contains("Type: app::Small"));
    assert!(shown.contains("Bound:     int (inherited)"));
    assert!(shown.contains("Predicate: less(10)"));
    assert!(shown.contains("Ancestors: app::Natural"));
}

#[test]
fn cli_prints_schema() {
    let output = run(&["schema", "Empty"]);
    assert!(output.status.success());
    let schema: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("schema should be JSON");
    assert_eq!(schema["maxItems"], 0);
    assert_eq!(schema["type"], "array");
    assert_eq!(schema["title"], "Empty");
}

#[test]
fn cli_unknown_type_fails() {
    let output = run(&["check", "Nope", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

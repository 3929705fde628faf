// crates/find_code_dependencies/tests/integration_cli.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// --- Test: dependency listing ---
/// Paths come out with the code root applied, sorted, one per line, with
/// duplicates collapsed.
#[test]
fn test_find_code_dependencies_lists_sorted_unique_paths() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("index_raw.html");
    fs::write(
        &doc,
        concat!(
            "<h1>docs</h1>\n",
            "insert_code(zeta.cpp:1-2)\n",
            "insert_code(alpha.cpp:4-9)\n",
            "rev_insert_code(alpha.cpp:Example)\n",
            "<p>done</p>\n",
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("find_code_dependencies").unwrap();
    cmd.args(["--file", doc.to_str().unwrap(), "--code-root", "code/"]);
    cmd.assert()
        .success()
        .stdout("code/alpha.cpp\ncode/zeta.cpp\n");
}

/// --- Test: documents without commands ---
#[test]
fn test_find_code_dependencies_prints_nothing_without_commands() {
    let dir = TempDir::new().unwrap();
    let doc = dir.path().join("plain.html");
    fs::write(&doc, "just\nprose\n").unwrap();

    let mut cmd = Command::cargo_bin("find_code_dependencies").unwrap();
    cmd.args(["--file", doc.to_str().unwrap()]);
    cmd.assert().success().stdout("");
}

/// --- Test: the document flag is required ---
#[test]
fn test_find_code_dependencies_requires_a_file() {
    let mut cmd = Command::cargo_bin("find_code_dependencies").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--file"));
}

/// --- Test: missing document ---
#[test]
fn test_find_code_dependencies_fails_on_a_missing_document() {
    let mut cmd = Command::cargo_bin("find_code_dependencies").unwrap();
    cmd.args(["--file", "no_such_document.html"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not open document"));
}

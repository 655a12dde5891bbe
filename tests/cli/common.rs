//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("memex")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Memex converts"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("memex")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("memex")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("memex")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_convert_help() {
    cargo_bin_cmd!("memex")
        .args(["convert", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert a markdown document"));
}

#[test]
fn test_batch_help() {
    cargo_bin_cmd!("memex")
        .args(["batch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OUTPUT_DIR"));
}

#[test]
fn test_missing_explicit_config() {
    cargo_bin_cmd!("memex")
        .args(["--config", "/nonexistent/memex.toml", "convert"])
        .write_stdin("text")
        .assert()
        .failure();
}

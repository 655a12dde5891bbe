//! Batch subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_batch_converts_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("notes");
    let output_dir = temp_dir.path().join("site");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("one.md"), "# One").unwrap();
    fs::write(input_dir.join("two.md"), "**two**").unwrap();
    fs::write(input_dir.join("readme.txt"), "# skipped").unwrap();

    cargo_bin_cmd!("memex")
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 converted, 0 failed"));

    assert_eq!(
        fs::read_to_string(output_dir.join("one.html")).unwrap(),
        "<h1> One</h1>"
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("two.html")).unwrap(),
        "<p><i>two</i></p>"
    );
    assert!(!output_dir.join("readme.html").exists());
}

#[test]
fn test_batch_reports_failures() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("notes");
    let output_dir = temp_dir.path().join("site");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("good.md"), "fine").unwrap();
    fs::write(input_dir.join("bad.md"), "[never closed").unwrap();

    cargo_bin_cmd!("memex")
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 converted, 1 failed"))
        .stderr(predicate::str::contains("bad.md"));

    assert!(output_dir.join("good.html").exists());
    assert!(!output_dir.join("bad.html").exists());
}

#[test]
fn test_batch_force_replaces_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("notes");
    let output_dir = temp_dir.path().join("site");
    fs::create_dir(&input_dir).unwrap();
    fs::create_dir(&output_dir).unwrap();
    fs::write(input_dir.join("page.md"), "fresh").unwrap();
    fs::write(output_dir.join("page.html"), "stale").unwrap();

    cargo_bin_cmd!("memex")
        .args([
            "batch",
            input_dir.to_str().unwrap(),
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .failure();
    assert_eq!(
        fs::read_to_string(output_dir.join("page.html")).unwrap(),
        "stale"
    );

    cargo_bin_cmd!("memex")
        .args([
            "batch",
            "--force",
            input_dir.to_str().unwrap(),
            output_dir.to_str().unwrap(),
        ])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(output_dir.join("page.html")).unwrap(),
        "<p>fresh</p>"
    );
}

#[test]
fn test_batch_missing_input_dir() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("memex")
        .args([
            "batch",
            temp_dir.path().join("missing").to_str().unwrap(),
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `arbor` binary to verify that argument
//! parsing, help text, and error handling work end-to-end.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("arbor").unwrap()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("test"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("arbor"));
}

#[test]
fn unknown_subcommand_errors() {
    cmd().arg("validate").assert().failure();
}

// ---------------------------------------------------------------------------
// train
// ---------------------------------------------------------------------------

#[test]
fn train_without_arguments_errors() {
    cmd()
        .arg("train")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn train_requires_a_model_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("train.arff");
    std::fs::File::create(&data).unwrap();

    cmd().arg("train").arg(&data).assert().failure();
}

#[test]
fn train_rejects_a_missing_dataset() {
    cmd()
        .args(["train", "/nonexistent/train.arff", "-o", "/tmp/m.model"])
        .assert()
        .failure();
}

#[test]
fn train_and_test_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let train = dir.path().join("train.arff");
    let mut file = std::fs::File::create(&train).unwrap();
    file.write_all(
        b"@relation t\n@attribute f1 numeric\n@attribute class {1, 2}\n@data\n\
          1.0, 1\n1.1, 1\n0.9, 1\n5.0, 2\n5.1, 2\n4.9, 2\n",
    )
    .unwrap();
    let model = dir.path().join("classifier.model");
    let output = dir.path().join("predictions.txt");

    cmd()
        .arg("train")
        .arg(&train)
        .arg("-o")
        .arg(&model)
        .assert()
        .success();

    cmd()
        .arg("test")
        .arg(&model)
        .arg(&train)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    // 6 rows, 2 classes: 6 blocks of 3 lines.
    assert_eq!(contents.lines().count(), 18);
}

#[test]
fn train_with_unknown_classifier_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let train = dir.path().join("train.arff");
    let mut file = std::fs::File::create(&train).unwrap();
    file.write_all(b"@relation t\n@attribute f1 numeric\n@attribute class {1, 2}\n@data\n1.0, 1\n2.0, 2\n")
        .unwrap();

    cmd()
        .arg("train")
        .arg(&train)
        .args(["-o"])
        .arg(dir.path().join("m.model"))
        .args(["-c", "j48"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// test
// ---------------------------------------------------------------------------

#[test]
fn test_without_arguments_errors() {
    cmd()
        .arg("test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_with_a_corrupt_model_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("classifier.model");
    std::fs::write(&model, "junk").unwrap();
    let data = dir.path().join("test.arff");
    std::fs::write(
        &data,
        "@relation t\n@attribute f1 numeric\n@attribute class {1, 2}\n@data\n1.0, 1\n",
    )
    .unwrap();

    cmd()
        .arg("test")
        .arg(&model)
        .arg(&data)
        .arg("-o")
        .arg(dir.path().join("out.txt"))
        .assert()
        .failure();
}

//! Process-level CLI tests.
//!
//! Everything here exercises argument handling and the tool-error paths,
//! none of which needs Chrome installed. End-to-end validation runs live in
//! the smolder-harness integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn smolder() -> Command {
    Command::cargo_bin("smolder").expect("binary builds")
}

#[test]
fn help_exits_zero() {
    smolder()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn validate_help_documents_the_flags() {
    smolder()
        .args(["validate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--wait"))
        .stdout(predicate::str::contains("--chrome-path"));
}

#[test]
fn no_files_is_a_usage_error() {
    smolder().arg("validate").assert().code(2);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    smolder()
        .args(["validate", "--screenshot", "page.html"])
        .assert()
        .code(2);
}

#[test]
fn non_numeric_wait_is_a_usage_error() {
    smolder()
        .args(["validate", "--wait", "soon", "page.html"])
        .assert()
        .code(2);
}

#[test]
fn negative_wait_is_a_usage_error() {
    smolder()
        .args(["validate", "--wait", "-100", "page.html"])
        .assert()
        .code(2);
}

#[test]
fn missing_file_exits_two_before_launching() {
    smolder()
        .args(["validate", "/definitely/not/here.html"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn missing_file_among_existing_ones_still_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("ok.html");
    std::fs::write(&ok, "<html></html>").unwrap();

    smolder()
        .args(["validate"])
        .arg(&ok)
        .arg("/definitely/not/here.html")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
#[ignore] // Requires Chrome to be installed
fn mixed_outcome_run_exits_one_with_full_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("ok.html");
    std::fs::write(&ok, "<!DOCTYPE html><html><body><h1>fine</h1></body></html>").unwrap();
    let broken = dir.path().join("broken.html");
    std::fs::write(
        &broken,
        "<!DOCTYPE html><html><body><script>x.y = 1;</script></body></html>",
    )
    .unwrap();

    let assert = smolder()
        .args(["validate", "--wait", "500", "--quiet"])
        .arg(&ok)
        .arg(&broken)
        .assert()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let results = report.as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["file"], "ok.html");
    assert_eq!(results[0]["status"], "pass");
    assert_eq!(results[0]["error_count"], 0);
    assert_eq!(results[1]["file"], "broken.html");
    assert_eq!(results[1]["status"], "fail");
    assert_eq!(results[1]["errors"][0]["kind"], "uncaught_exception");
    assert!(results[1]["errors"][0]["text"]
        .as_str()
        .unwrap()
        .contains("x is not defined"));
}

#[test]
#[ignore] // Requires Chrome to be installed
fn all_passing_run_exits_zero_and_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let ok = dir.path().join("ok.html");
    std::fs::write(&ok, "<!DOCTYPE html><html><body>fine</body></html>").unwrap();

    smolder()
        .args(["validate", "--wait", "500", "--no-color"])
        .arg(&ok)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("validating: ok.html"))
        .stderr(predicate::str::contains("1 passed, 0 failed out of 1 file(s)"));
}

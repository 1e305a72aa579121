//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizdeck(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizdeck").unwrap();
    // Keep config lookup inside the sandbox.
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Timed quiz authoring, taking, and analytics",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizdeck"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizdeck(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizdeck.toml"))
        .stdout(predicate::str::contains("Created quizzes/sample.toml"));

    assert!(dir.path().join("quizdeck.toml").exists());
    assert!(dir.path().join("quizzes/sample.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizdeck(&dir).arg("init").assert().success();

    quizdeck(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn role_defaults_to_instructor() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["role", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dr. Smith (instructor)"));
}

#[test]
fn role_switch_roundtrip() {
    let dir = TempDir::new().unwrap();

    quizdeck(&dir)
        .args(["role", "--switch", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to learner: Alex Student"));

    quizdeck(&dir)
        .args(["role", "--switch", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Switched to instructor: Dr. Smith",
        ));
}

#[test]
fn list_empty_instructor_dashboard() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["list", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total quizzes: 0"))
        .stdout(predicate::str::contains("Average class score: N/A"));
}

#[test]
fn create_rejects_invalid_quiz() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("broken.toml"),
        r#"
[quiz]
title = "Broken"

[[questions]]
text = "Index out of range"
options = ["a", "b"]
correct_answers = [5]
"#,
    )
    .unwrap();

    quizdeck(&dir)
        .args(["create", "--file", "broken.toml", "--data-dir", "data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("validation"));
}

#[test]
fn create_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["create", "--file", "no_such.toml", "--data-dir", "data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read quiz file"));
}

#[test]
fn take_requires_learner_role() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["take", "--quiz", "anything", "--data-dir", "data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only the learner takes quizzes"));
}

#[test]
fn take_unknown_quiz_prints_placeholder() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["role", "--switch", "--data-dir", "data"])
        .assert()
        .success();

    quizdeck(&dir)
        .args(["take", "--quiz", "no-such-quiz", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz not found."));
}

#[test]
fn analytics_unknown_quiz_prints_placeholder() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["analytics", "--quiz", "no-such-quiz", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz not found."));
}

#[test]
fn result_unknown_submission_prints_placeholder() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["result", "--submission", "no-such-id", "--data-dir", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result not found."));
}

#[test]
fn generate_with_mock_source() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        r#"
default_source = "mock"

[sources.mock]
type = "mock"
"#,
    )
    .unwrap();

    quizdeck(&dir)
        .args([
            "generate",
            "--topic",
            "astronomy",
            "--count",
            "2",
            "--config",
            "config.toml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepted 2 questions from mock"))
        .stdout(predicate::str::contains("[[questions]]"));
}

#[test]
fn generate_unknown_source_fails() {
    let dir = TempDir::new().unwrap();
    quizdeck(&dir)
        .args(["generate", "--topic", "anything", "--source", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("source 'nope' not found"));
}

//! End-to-end runs of the `demarkx-action` binary against a shell fixer.

#![cfg(unix)]

use std::process::{Command, Output};

use demarkx_action::exit_codes;
use demarkx_action::test_support::TestRepo;

const CLEAN: &str = r#"{"fixReport":{"safeFixes":[],"inferredFixes":[],"lintIssues":[]}}"#;

const FIXER_SCRIPT: &str = r##"#!/bin/sh
case "$2" in
  *lint.md)
    printf '%s\n' '{"fixReport":{"safeFixes":[],"inferredFixes":[],"lintIssues":[{"message":"line too long"}]}}'
    exit 1
    ;;
  *safe.md)
    printf '%s\n' '{"fixReport":{"safeFixes":[{"message":"trim trailing space"}],"inferredFixes":[],"lintIssues":[],"fixedMarkdown":"# Safe\n"}}'
    exit 1
    ;;
  *broken.md)
    echo "cannot parse" >&2
    exit 3
    ;;
  *)
    printf '%s\n' 'CLEAN'
    exit 0
    ;;
esac
"##;

const INPUT_VARS: &[&str] = &[
    "INPUT_APPLY-SAFE-FIXES",
    "INPUT_FAIL-ON-INFERRED",
    "INPUT_FAIL-ON-LINT",
    "INPUT_DRY-RUN",
    "INPUT_MAX-FILES",
    "INPUT_SKIP-PATHS",
    "INPUT_FIXER-COMMAND",
    "INPUT_FIXER-TIMEOUT-SECS",
    "INPUT_GITHUB-TOKEN",
];

fn repo_with_fixer() -> TestRepo {
    let repo = TestRepo::new().expect("repo");
    repo.write_doc("fixer.sh", &FIXER_SCRIPT.replace("CLEAN", CLEAN))
        .expect("fixer script");
    repo
}

fn run_action(repo: &TestRepo, args: &[&str]) -> Output {
    action_command(repo, args)
        .output()
        .expect("run demarkx-action")
}

fn action_command(repo: &TestRepo, args: &[&str]) -> Command {
    let script = repo.path().join("fixer.sh");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_demarkx-action"));
    cmd.arg("--root")
        .arg(repo.path())
        .arg("--fixer-command")
        .arg(format!("sh {}", script.display()))
        .args(args)
        .env_remove("GITHUB_EVENT_PATH")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("GITHUB_API_URL")
        .env("RUST_LOG", "demarkx_action=info");
    for var in INPUT_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn clean_repository_exits_ok() {
    let repo = repo_with_fixer();
    repo.write_doc("README.md", "# Readme\n").expect("doc");

    let output = run_action(&repo, &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DeMarkX: Found 1 Markdown files for processing."));
    assert!(stderr.contains("DeMarkX: No critical issues found."));
}

#[test]
fn lint_threshold_fails_the_step() {
    let repo = repo_with_fixer();
    repo.write_doc("lint.md", "x\n").expect("doc");

    let output = run_action(&repo, &["--fail-on-lint", "true"]);

    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("::error::DeMarkX found issues that require attention"));
}

#[test]
fn lint_without_threshold_passes() {
    let repo = repo_with_fixer();
    repo.write_doc("lint.md", "x\n").expect("doc");

    let output = run_action(&repo, &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn safe_fixes_are_written_when_enabled() {
    let repo = repo_with_fixer();
    repo.write_doc("safe.md", "# Safe   \n").expect("doc");

    let output = run_action(&repo, &["--apply-safe-fixes", "true"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(repo.read_doc("safe.md").expect("doc"), "# Safe\n");
}

#[test]
fn fixer_failure_is_logged_and_skipped() {
    let repo = repo_with_fixer();
    repo.write_doc("broken.md", "x\n").expect("doc");
    repo.write_doc("ok.md", "x\n").expect("doc");

    let output = run_action(&repo, &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error processing broken.md"));
    assert!(stderr.contains("cannot parse"));
}

#[test]
fn step_outputs_carry_counts() {
    let repo = repo_with_fixer();
    repo.write_doc("lint.md", "x\n").expect("doc");
    repo.write_doc("broken.md", "x\n").expect("doc");
    let outputs = repo.path().join("outputs.txt");

    let output = action_command(&repo, &[])
        .env("GITHUB_OUTPUT", &outputs)
        .output()
        .expect("run demarkx-action");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let written = std::fs::read_to_string(&outputs).expect("outputs");
    assert!(written.contains("lint-issues=1\n"));
    assert!(written.contains("files-with-issues=1\n"));
    assert!(written.contains("files-skipped=1\n"));
}

#[test]
fn invalid_input_is_an_error() {
    let repo = repo_with_fixer();

    let output = run_action(&repo, &["--max-files", "0"]);

    assert_eq!(output.status.code(), Some(exit_codes::ERROR));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max-files"));
}

#[test]
fn truncation_warns_with_counts() {
    let repo = repo_with_fixer();
    for name in ["a.md", "b.md", "c.md"] {
        repo.write_doc(name, "x\n").expect("doc");
    }

    let output = run_action(&repo, &["--max-files", "2"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(
        "::warning::DeMarkX: Found 3 files, but max-files is set to 2. \
         Only the first 2 will be processed."
    ));
}

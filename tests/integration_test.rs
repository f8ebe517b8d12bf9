//! Integration tests for the commit-toolkit CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Creates a working directory with a config that keeps every external
/// surface inert: unset API key env var, unroutable endpoint, stub tools.
fn write_config(dir: &TempDir, body: &str) {
    std::fs::write(dir.path().join("commit-toolkit.toml"), body).expect("write config");
}

/// Config pointing the generator at nothing and the lint tools at stubs.
const INERT_CONFIG: &str = r#"
[message]
endpoint = "http://127.0.0.1:1/unreachable"
api_key_env = "CTK_IT_DEFINITELY_UNSET"

[lint.formatter]
command = "true"
args = []
check_args = []

[lint.linter]
command = "true"
args = []
check_args = []

[lint.typechecker]
command = "true"
args = []
check_args = []

[notify]
command = "definitely_not_a_real_dialog_12345"
"#;

#[test]
fn test_help() {
    Command::cargo_bin("ctk")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commit workflow utilities"));
}

#[test]
fn test_version() {
    Command::cargo_bin("ctk")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Configuration lifecycle
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().expect("create temp dir");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Created commit-toolkit.toml"));

    assert!(temp.path().join("commit-toolkit.toml").exists());
}

#[test]
fn test_init_already_exists() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, "");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, "");

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["init", "--force"])
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn test_validate_no_config() {
    let temp = TempDir::new().expect("create temp dir");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_validate_valid_config() {
    let temp = TempDir::new().expect("create temp dir");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("init")
        .current_dir(temp.path())
        .output()
        .expect("init");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("valid"));
}

#[test]
fn test_validate_invalid_config() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, "[message]\nmax_tokens = 0\n");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("validate")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_tokens"));
}

#[test]
fn test_config_not_found() {
    let temp = TempDir::new().expect("create temp dir");

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("config")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No configuration file"));
}

#[test]
fn test_config_raw_prints_contents() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, "# marker comment\n");

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["config", "--raw"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("marker comment"));
}

// =============================================================================
// Commit message generation
// =============================================================================

#[test]
fn test_message_without_api_key_prints_fallback() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["message", "add retry logic"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("Update project files\n"));
}

#[test]
fn test_message_without_prompt_prints_fallback() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("message")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("Update project files\n"));
}

#[test]
fn test_message_explain_reports_reason() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["message", "--explain", "add retry logic"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Update project files"))
        .stderr(predicate::str::contains("Fallback used"));
}

#[test]
fn test_message_connection_failure_prints_fallback() {
    // Key is present but the endpoint is unroutable: still exit 0.
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["message", "add retry logic"])
        .env("CTK_IT_DEFINITELY_UNSET", "test-key")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("Update project files\n"));
}

// =============================================================================
// Lint orchestration
// =============================================================================

#[test]
fn test_lint_all_passing_exits_zero() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["lint", "--check"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("All tools passed"));
}

#[test]
fn test_lint_failure_exits_one_and_runs_all_tools() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(
        &temp,
        r#"
[lint.formatter]
command = "true"

[lint.linter]
command = "false"

[lint.typechecker]
command = "true"
"#,
    );

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["lint", "--check"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("format"))
        .stderr(predicate::str::contains("lint"))
        .stderr(predicate::str::contains("typecheck"))
        .stderr(predicate::str::contains("1 tool(s) failed"));
}

#[test]
fn test_lint_missing_tool_is_reported_not_fatal() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(
        &temp,
        r#"
[lint.formatter]
command = "definitely_not_a_real_formatter_12345"

[lint.linter]
command = "true"

[lint.typechecker]
command = "true"
"#,
    );

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["lint", "--check"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 tool(s) failed"));
}

// =============================================================================
// Notifier
// =============================================================================

#[test]
fn test_notify_with_absent_dialog_still_succeeds() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["notify", "build finished"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn test_notify_rejects_bad_timeout() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(&temp, INERT_CONFIG);

    Command::cargo_bin("ctk")
        .unwrap()
        .args(["notify", "done", "--timeout", "not-a-duration"])
        .current_dir(temp.path())
        .assert()
        .code(78);
}

// =============================================================================
// Launcher
// =============================================================================

#[test]
fn test_launch_with_missing_runner_fails() {
    let temp = TempDir::new().expect("create temp dir");
    write_config(
        &temp,
        r#"
[launch]
runner = "definitely_not_a_real_runner_12345"
"#,
    );

    Command::cargo_bin("ctk")
        .unwrap()
        .arg("launch")
        .current_dir(temp.path())
        .assert()
        .code(127)
        .stderr(predicate::str::contains("Command not found"));
}

// =============================================================================
// Demo
// =============================================================================

#[test]
fn test_demo_prints_transcript() {
    Command::cargo_bin("ctk")
        .unwrap()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffold new my-project"))
        .stdout(predicate::str::contains("Template: python-cli"));
}

// =============================================================================
// Completions
// =============================================================================

#[test]
fn test_completions_bash() {
    Command::cargo_bin("ctk")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctk"));
}

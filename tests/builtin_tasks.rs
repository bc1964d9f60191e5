// tests/builtin_tasks.rs

mod common;
use crate::common::builders::TaskConfigBuilder;
use crate::common::init_tracing;

use std::error::Error;
use std::sync::Arc;

use serde_json::json;
use taskresult::errors::ResultError;
use taskresult::result::{EXITCODE_ERROR, EXITCODE_OK};
use taskresult::task::builtin::exec::STDERR_KEY;
use taskresult::task::{Task, TaskRegistry};
use taskresult_test_utils::with_timeout;

type TestResult = Result<(), Box<dyn Error>>;

fn build(task: taskresult::config::TaskConfig) -> Arc<dyn Task> {
    TaskRegistry::with_builtins()
        .create(&task.kind, &task.name, task.args)
        .expect("task should build")
}

#[test]
fn registry_knows_builtin_kinds() {
    let registry = TaskRegistry::with_builtins();
    let kinds: Vec<&str> = registry.kinds().collect();
    assert_eq!(kinds, vec!["echo", "exec", "fail", "require"]);
}

#[test]
fn unknown_kind_is_rejected() {
    let registry = TaskRegistry::with_builtins();
    match registry.create("teleport", "x", Default::default()) {
        Err(ResultError::UnknownTaskKind(kind)) => assert_eq!(kind, "teleport"),
        other => panic!("expected UnknownTaskKind, got {other:?}"),
    }
}

#[test]
fn bad_arguments_are_rejected() {
    let registry = TaskRegistry::with_builtins();
    let task = TaskConfigBuilder::new("x", "exec").arg("command", "ls").build();

    let res = registry.create(&task.kind, &task.name, task.args);
    assert!(matches!(res, Err(ResultError::TomlError(_))));
}

#[test]
fn require_without_checks_is_a_config_error() {
    let registry = TaskRegistry::with_builtins();
    let task = TaskConfigBuilder::new("empty", "require").build();

    let res = registry.create(&task.kind, &task.name, task.args);
    assert!(matches!(res, Err(ResultError::ConfigError(_))));
}

#[tokio::test]
async fn echo_succeeds_with_message() -> TestResult {
    let task = build(TaskConfigBuilder::echo("hi", "hello there").build());
    let result = with_timeout(task.run()).await?;

    assert_eq!(result.exit_code(), EXITCODE_OK);
    assert_eq!(result.message(), "hello there");
    Ok(())
}

#[tokio::test]
async fn fail_uses_configured_code() -> TestResult {
    let task = build(TaskConfigBuilder::fail("guard", "not allowed", 5).build());
    let result = with_timeout(task.run()).await?;

    assert_eq!(result.exit_code(), 5);
    assert_eq!(result.message(), "not allowed");
    Ok(())
}

#[tokio::test]
async fn fail_with_zero_code_still_fails() -> TestResult {
    let task = build(TaskConfigBuilder::fail("guard", "zero", 0).build());
    let result = with_timeout(task.run()).await?;

    assert_eq!(result.exit_code(), EXITCODE_ERROR);
    Ok(())
}

#[tokio::test]
async fn require_reports_missing_binary_as_missing_package() -> TestResult {
    let task = build(
        TaskConfigBuilder::new("tools", "require")
            .arg("binary", "definitely-not-a-real-binary-4711")
            .arg("package", "fancy-tools")
            .build(),
    );
    let result = with_timeout(task.run()).await?;

    assert_eq!(result.exit_code(), EXITCODE_ERROR);
    assert_eq!(
        result.message(),
        "Class definitely-not-a-real-binary-4711 not found. Please install fancy-tools dependency"
    );
    Ok(())
}

#[tokio::test]
async fn require_reports_missing_env_as_missing_extension() -> TestResult {
    let task = build(
        TaskConfigBuilder::new("gd", "require")
            .arg("env", "TASKRESULT_TEST_SURELY_UNSET_VAR")
            .arg("service", "image resize")
            .build(),
    );
    let result = with_timeout(task.run()).await?;

    assert_eq!(result.exit_code(), EXITCODE_ERROR);
    assert_eq!(
        result.message(),
        "runtime extension required for image resize. Please enable TASKRESULT_TEST_SURELY_UNSET_VAR"
    );
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn require_passes_when_binary_exists() -> TestResult {
    let task = build(TaskConfigBuilder::new("sh", "require").arg("binary", "sh").build());
    let result = with_timeout(task.run()).await?;

    assert!(result.was_successful());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn exec_captures_stdout() -> TestResult {
    init_tracing();

    let task = build(TaskConfigBuilder::exec("say", "echo hello").build());
    let result = with_timeout(task.run()).await?;

    assert!(result.was_successful());
    assert_eq!(result.output_data(), Some("hello"));
    assert!(result.execution_time().is_some());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn exec_failure_keeps_process_exit_code() -> TestResult {
    init_tracing();

    let task = build(TaskConfigBuilder::exec("boom", "echo oops >&2; exit 3").build());
    let result = with_timeout(task.run()).await?;

    assert_eq!(result.exit_code(), 3);
    assert_eq!(result.message(), "command exited with code 3");
    assert_eq!(result.get(STDERR_KEY), Some(&json!("oops")));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn exec_runs_in_configured_dir() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("marker.txt"), "x")?;

    let task = build(
        TaskConfigBuilder::exec("ls", "ls marker.txt")
            .arg("dir", dir.path().to_string_lossy().into_owned())
            .build(),
    );
    let result = with_timeout(task.run()).await?;

    assert!(result.was_successful());
    assert_eq!(result.output_data(), Some("marker.txt"));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn exec_metadata_lands_in_context() -> TestResult {
    let task = build(TaskConfigBuilder::exec("say", "true").build());
    let result = with_timeout(task.run()).await?;

    let ctx = result.get_context();
    assert_eq!(ctx.get("cmd"), Some(&json!("true")));
    assert_eq!(ctx.get("task"), Some(&json!("exec")));
    Ok(())
}

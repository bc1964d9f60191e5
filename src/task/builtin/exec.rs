// src/task/builtin/exec.rs

//! `exec` task: run a shell command.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::result::{DataBag, TaskResult};
use crate::task::{Task, TaskError, TaskFuture};

/// Bag key holding captured stderr of a failed command.
pub const STDERR_KEY: &str = "stderr";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecConfig {
    /// The command line, run through `sh -c` (or `cmd /C` on Windows).
    pub cmd: String,

    /// Optional working directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ExecTask {
    name: String,
    config: ExecConfig,
}

impl ExecTask {
    pub const KIND: &'static str = "exec";

    pub fn new(name: &str, config: ExecConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
        }
    }

    pub fn cmd(&self) -> &str {
        &self.config.cmd
    }
}

impl Task for ExecTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn metadata(&self) -> DataBag {
        let mut meta = DataBag::new();
        meta.insert("cmd".to_string(), self.config.cmd.clone().into());
        meta
    }

    fn run(self: Arc<Self>) -> TaskFuture {
        Box::pin(async move { run_command(self).await })
    }
}

async fn run_command(task: Arc<ExecTask>) -> Result<TaskResult, TaskError> {
    info!(task = %task.name, cmd = %task.config.cmd, "starting task process");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&task.config.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&task.config.cmd);
        c
    };

    if let Some(dir) = &task.config.dir {
        cmd.current_dir(dir);
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = Instant::now();
    let output = cmd
        .output()
        .await
        .with_context(|| format!("spawning process for task '{}'", task.name))?;
    let elapsed = started.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    for line in stderr.lines() {
        debug!(task = %task.name, "stderr: {}", line);
    }

    // Killed by a signal: no exit code.
    let code = output.status.code().unwrap_or(-1);
    info!(
        task = %task.name,
        exit_code = code,
        success = output.status.success(),
        "task process exited"
    );

    let mut data = DataBag::new();
    data.insert(
        crate::result::OUTPUT_KEY.to_string(),
        stdout.trim_end().to_string().into(),
    );

    let this: Arc<dyn Task> = task;
    let mut result = if output.status.success() {
        TaskResult::success(this, "", data)
    } else {
        if !stderr.is_empty() {
            data.insert(STDERR_KEY.to_string(), stderr.trim_end().to_string().into());
        }
        let message = format!("command exited with code {code}");
        TaskResult::new(this, code, message, data)
    };
    result.set_execution_time(elapsed);

    Ok(result)
}

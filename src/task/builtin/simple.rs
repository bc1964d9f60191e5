// src/task/builtin/simple.rs

//! `echo` and `fail` tasks.
//!
//! Both finish immediately without touching the system; they are handy for
//! announcing phases of a task file and for guarding it with a hard stop.

use std::sync::Arc;

use serde::Deserialize;

use crate::result::{DataBag, EXITCODE_ERROR, TaskResult};
use crate::task::{Task, TaskFuture};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct EchoConfig {
    #[serde(default)]
    pub message: String,
}

/// Succeeds with a fixed message.
#[derive(Debug, Clone)]
pub struct EchoTask {
    name: String,
    config: EchoConfig,
}

impl EchoTask {
    pub const KIND: &'static str = "echo";

    pub fn new(name: &str, config: EchoConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
        }
    }
}

impl Task for EchoTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn run(self: Arc<Self>) -> TaskFuture {
        Box::pin(async move {
            let message = self.config.message.clone();
            Ok(TaskResult::success(self, message, DataBag::new()))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailConfig {
    pub message: String,

    /// Exit code to fail with; the generic error code when omitted.
    #[serde(default)]
    pub code: Option<i32>,
}

/// Always fails.
#[derive(Debug, Clone)]
pub struct FailTask {
    name: String,
    config: FailConfig,
}

impl FailTask {
    pub const KIND: &'static str = "fail";

    pub fn new(name: &str, config: FailConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
        }
    }
}

impl Task for FailTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn run(self: Arc<Self>) -> TaskFuture {
        Box::pin(async move {
            // A code of 0 would read as success; treat it like "unset".
            let code = match self.config.code {
                Some(code) if code != 0 => code,
                _ => EXITCODE_ERROR,
            };
            let message = self.config.message.clone();
            Ok(TaskResult::new(self, code, message, DataBag::new()))
        })
    }
}

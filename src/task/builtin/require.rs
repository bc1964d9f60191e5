// src/task/builtin/require.rs

//! `require` task: check the environment before the real work starts.
//!
//! ```toml
//! [[task]]
//! name = "tools"
//! kind = "require"
//! binary = "convert"
//! package = "imagemagick"
//! env = "GD_ENABLED"
//! service = "image resize"
//! ```
//!
//! A missing binary yields a missing-package result, a missing environment
//! variable a missing-extension result.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{Result, ResultError};
use crate::result::{DataBag, TaskResult};
use crate::task::{Task, TaskFuture};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RequireConfig {
    /// Executable that must be on `PATH`.
    #[serde(default)]
    pub binary: Option<String>,

    /// Package to suggest when `binary` is missing (defaults to `binary`).
    #[serde(default)]
    pub package: Option<String>,

    /// Environment variable that must be set and non-empty.
    #[serde(default)]
    pub env: Option<String>,

    /// Service that needs `env`, used in the failure message.
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RequireTask {
    name: String,
    config: RequireConfig,
}

impl RequireTask {
    pub const KIND: &'static str = "require";

    pub fn new(name: &str, config: RequireConfig) -> Self {
        Self {
            name: name.to_string(),
            config,
        }
    }

    /// Reject configs that check nothing.
    pub fn validate(&self) -> Result<()> {
        if self.config.binary.is_none() && self.config.env.is_none() {
            return Err(ResultError::ConfigError(format!(
                "require task '{}' needs at least one of `binary` or `env`",
                self.name
            )));
        }
        Ok(())
    }
}

impl Task for RequireTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn run(self: Arc<Self>) -> TaskFuture {
        Box::pin(async move { Ok(check_requirements(self)) })
    }
}

fn check_requirements(task: Arc<RequireTask>) -> TaskResult {
    let this: Arc<dyn Task> = task.clone();

    if let Some(binary) = &task.config.binary {
        match which::which(binary) {
            Ok(path) => debug!(task = %task.name, binary = %binary, path = ?path, "binary found"),
            Err(_) => {
                let package = task.config.package.as_deref().unwrap_or(binary);
                return TaskResult::error_missing_package(this, binary, package);
            }
        }
    }

    if let Some(var) = &task.config.env {
        let enabled = std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false);
        if !enabled {
            let service = task.config.service.as_deref().unwrap_or(&task.name);
            return TaskResult::error_missing_extension(this, var, service);
        }
    }

    TaskResult::success(this, "", DataBag::new())
}

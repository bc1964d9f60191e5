// src/config/model.rs

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::Result;
use crate::task::{Task, TaskArgs, TaskRegistry};

/// Top-level task file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// stop_on_fail = true
///
/// [[task]]
/// name = "build"
/// cmd = "cargo build"
///
/// [[task]]
/// name = "done"
/// kind = "echo"
/// message = "all good"
/// ```
///
/// Tasks run in file order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All `[[task]]` entries, in order.
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// A validated task file. Build one with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: Vec<TaskConfig>) -> Self {
        Self { config, task }
    }

    /// Instantiate every task through the registry, in file order.
    pub fn build_tasks(&self, registry: &TaskRegistry) -> Result<Vec<Arc<dyn Task>>> {
        self.task
            .iter()
            .map(|t| registry.create(&t.kind, &t.name, t.args.clone()))
            .collect()
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Abort the whole run on the first failing task.
    #[serde(default)]
    pub stop_on_fail: bool,

    /// Print each result to stdout.
    #[serde(default = "default_print_results")]
    pub print_results: bool,
}

fn default_print_results() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            stop_on_fail: false,
            print_results: default_print_results(),
        }
    }
}

/// One `[[task]]` entry.
///
/// `name` and `kind` are read here; every other key is handed to the kind's
/// constructor untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub name: String,

    /// Registered task kind; `exec` when omitted.
    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(flatten)]
    pub args: TaskArgs,
}

fn default_kind() -> String {
    "exec".to_string()
}

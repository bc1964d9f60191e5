// src/task/registry.rs

//! Task kind registry.
//!
//! Each task kind registers a constructor closure under its kind tag. The
//! config loader uses it to instantiate `[[task]]` entries, and
//! [`crate::result::TaskResult::clone_task`] uses it to build a fresh task of
//! the same kind as the one that produced a result.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{Result, ResultError};
use crate::task::Task;
use crate::task::builtin::{EchoTask, ExecTask, FailTask, RequireTask};

/// Arguments forwarded to a task constructor (the `[[task]]` table minus
/// `name` and `kind`).
pub type TaskArgs = toml::Table;

/// Constructor closure for one task kind.
pub type TaskConstructor = Arc<dyn Fn(&str, TaskArgs) -> Result<Arc<dyn Task>> + Send + Sync>;

#[derive(Clone, Default)]
pub struct TaskRegistry {
    constructors: BTreeMap<String, TaskConstructor>,
}

impl fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("kinds", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TaskRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind (`exec`, `echo`, `fail`, `require`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(ExecTask::KIND, |name, args| {
            Ok(Arc::new(ExecTask::new(name, parse_args(args)?)) as Arc<dyn Task>)
        });
        registry.register(EchoTask::KIND, |name, args| {
            Ok(Arc::new(EchoTask::new(name, parse_args(args)?)) as Arc<dyn Task>)
        });
        registry.register(FailTask::KIND, |name, args| {
            Ok(Arc::new(FailTask::new(name, parse_args(args)?)) as Arc<dyn Task>)
        });
        registry.register(RequireTask::KIND, |name, args| {
            let task = RequireTask::new(name, parse_args(args)?);
            task.validate()?;
            Ok(Arc::new(task) as Arc<dyn Task>)
        });
        registry
    }

    /// Register (or replace) the constructor for `kind`.
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn(&str, TaskArgs) -> Result<Arc<dyn Task>> + Send + Sync + 'static,
    {
        let kind = kind.into();
        debug!(kind = %kind, "registering task kind");
        self.constructors.insert(kind, Arc::new(constructor));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Instantiate a task of the given kind.
    pub fn create(&self, kind: &str, name: &str, args: TaskArgs) -> Result<Arc<dyn Task>> {
        let constructor = self
            .constructors
            .get(kind)
            .ok_or_else(|| ResultError::UnknownTaskKind(kind.to_string()))?;
        constructor(name, args)
    }
}

/// Deserialize constructor arguments into a kind's typed config.
pub fn parse_args<T: DeserializeOwned>(args: TaskArgs) -> Result<T> {
    let value = toml::Value::Table(args);
    Ok(value.try_into::<T>()?)
}

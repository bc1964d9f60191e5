// src/result/lifecycle.rs

//! `TaskResult`: result data bound to the task that produced it.
//!
//! Constructors here are pure. Reporting (printer + stop-on-fail policy) is
//! the separate step in [`super::policy::ExecutionContext`], which also
//! offers reporting variants of every helper below.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::Result;
use crate::result::data::{DataBag, EXITCODE_ERROR, EXITCODE_OK, ResultData};
use crate::task::{Task, TaskArgs, TaskError, TaskRegistry, task_context};

/// Runtime name used in missing-extension messages.
pub const RUNTIME_NAME: &str = "runtime";

pub const CONTEXT_CODE_KEY: &str = "code";
pub const CONTEXT_DATA_KEY: &str = "data";
pub const CONTEXT_TIME_KEY: &str = "time";
pub const CONTEXT_MESSAGE_KEY: &str = "message";

/// The value produced when a task finishes.
///
/// Exit code, message and task are fixed at construction. The data bag may
/// gain entries afterwards (e.g. `already-printed`) but never loses any.
/// Read accessors of [`ResultData`] are available through `Deref`.
#[derive(Clone)]
pub struct TaskResult {
    task: Arc<dyn Task>,
    data: ResultData,
}

impl fmt::Debug for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskResult")
            .field("task", &self.task.name())
            .field("kind", &self.task.kind())
            .field("data", &self.data)
            .finish()
    }
}

impl Deref for TaskResult {
    type Target = ResultData;

    fn deref(&self) -> &ResultData {
        &self.data
    }
}

impl TaskResult {
    pub fn new(
        task: Arc<dyn Task>,
        exit_code: i32,
        message: impl Into<String>,
        data: DataBag,
    ) -> Self {
        Self {
            task,
            data: ResultData::new(exit_code, message, data),
        }
    }

    pub fn error_missing_extension(task: Arc<dyn Task>, extension: &str, service: &str) -> Self {
        let message =
            format!("{RUNTIME_NAME} extension required for {service}. Please enable {extension}");
        Self::error(task, message, DataBag::new())
    }

    pub fn error_missing_package(task: Arc<dyn Task>, class: &str, package: &str) -> Self {
        let message = format!("Class {class} not found. Please install {package} dependency");
        Self::error(task, message, DataBag::new())
    }

    pub fn error(task: Arc<dyn Task>, message: impl Into<String>, data: DataBag) -> Self {
        Self::new(task, EXITCODE_ERROR, message, data)
    }

    pub fn success(task: Arc<dyn Task>, message: impl Into<String>, data: DataBag) -> Self {
        Self::new(task, EXITCODE_OK, message, data)
    }

    /// Translate a task error into a failing result.
    ///
    /// The error's own code is kept when it is nonzero; otherwise the generic
    /// error code is used.
    pub fn from_error(task: Arc<dyn Task>, err: &TaskError, data: DataBag) -> Self {
        let exit_code = if err.code != 0 { err.code } else { EXITCODE_ERROR };
        Self::new(task, exit_code, err.message.clone(), data)
    }

    pub fn task(&self) -> &Arc<dyn Task> {
        &self.task
    }

    pub fn result_data(&self) -> &ResultData {
        &self.data
    }

    /// Add a bookkeeping entry to the bag.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key, value);
    }

    pub fn set_already_printed(&mut self) {
        self.data.set_already_printed();
    }

    pub fn set_execution_time(&mut self, elapsed: std::time::Duration) {
        self.data.set_execution_time(elapsed);
    }

    /// Context for log messages about this result.
    ///
    /// Starts from the task context; `code`, `data`, `time` and `message` are
    /// written last and win over same-named task keys. `data` is a copy.
    pub fn get_context(&self) -> DataBag {
        let mut ctx = task_context(self.task.as_ref());
        ctx.insert(CONTEXT_CODE_KEY.to_string(), Value::from(self.exit_code()));
        ctx.insert(
            CONTEXT_DATA_KEY.to_string(),
            Value::Object(self.array_copy()),
        );
        let time = match self.execution_time() {
            Some(elapsed) => Value::from(elapsed.as_secs_f64()),
            None => Value::Null,
        };
        ctx.insert(CONTEXT_TIME_KEY.to_string(), time);
        ctx.insert(
            CONTEXT_MESSAGE_KEY.to_string(),
            Value::String(self.message().to_string()),
        );
        ctx
    }

    /// Build a new task of the same kind as the one behind this result,
    /// passing `args` to the kind's registered constructor.
    pub fn clone_task(
        &self,
        registry: &TaskRegistry,
        name: &str,
        args: TaskArgs,
    ) -> Result<Arc<dyn Task>> {
        registry.create(self.task.kind(), name, args)
    }
}

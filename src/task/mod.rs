// src/task/mod.rs

//! Task abstraction consumed by the result layer.
//!
//! - [`info`] extracts the logging context for a task.
//! - [`registry`] maps task kind tags to constructor closures (used for
//!   config-driven instantiation and for cloning a task from its result).
//! - [`builtin`] holds the task kinds shipped with the crate.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::result::{DataBag, TaskResult};

pub mod builtin;
pub mod info;
pub mod registry;

pub use info::task_context;
pub use registry::{TaskArgs, TaskConstructor, TaskRegistry};

/// Boxed future returned by [`Task::run`].
pub type TaskFuture = Pin<Box<dyn Future<Output = Result<TaskResult, TaskError>> + Send>>;

/// A unit of work that produces a [`TaskResult`].
///
/// `run` returns the *unreported* result; the driver hands it to
/// [`crate::result::ExecutionContext::report`]. Failures should normally be
/// returned as a failing result. `Err` is reserved for unexpected errors,
/// which the driver translates with [`TaskResult::from_error`].
pub trait Task: Send + Sync + Debug {
    /// Instance name (e.g. `"build"`).
    fn name(&self) -> &str;

    /// Kind tag, the key this task was registered under (e.g. `"exec"`).
    fn kind(&self) -> &str;

    /// Extra entries merged into the logging context.
    fn metadata(&self) -> DataBag {
        DataBag::new()
    }

    fn run(self: Arc<Self>) -> TaskFuture;
}

/// An error raised while running a task, carrying an optional status code.
///
/// A `code` of `0` means "no specific code"; the result layer then falls
/// back to the generic error code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TaskError {
    pub code: i32,
    pub message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: message.into(),
        }
    }

    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        TaskError::new(err.to_string())
    }
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        TaskError::new(format!("{err:#}"))
    }
}

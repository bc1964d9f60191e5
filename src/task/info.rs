// src/task/info.rs

//! Task metadata used as the base of a result's logging context.

use serde_json::Value;

use crate::result::DataBag;
use crate::task::Task;

/// Context key holding the task instance name.
pub const NAME_KEY: &str = "name";

/// Context key holding the task kind tag.
pub const TASK_KEY: &str = "task";

/// Build the logging context for a task.
///
/// Task-provided [`Task::metadata`] entries come first; `name` and `task`
/// are then set from the task's identity so they cannot be spoofed.
pub fn task_context(task: &dyn Task) -> DataBag {
    let mut ctx = task.metadata();
    ctx.insert(NAME_KEY.to_string(), Value::String(task.name().to_string()));
    ctx.insert(TASK_KEY.to_string(), Value::String(task.kind().to_string()));
    ctx
}

/// Short label used by printers and log lines, e.g. `"build"` or `"exec"`.
pub fn format_task_name(task: &dyn Task) -> String {
    if task.name().is_empty() {
        task.kind().to_string()
    } else {
        task.name().to_string()
    }
}

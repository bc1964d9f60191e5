// src/runner.rs

//! Sequential task driver.
//!
//! Runs tasks one after the other, reports each result through the
//! [`ExecutionContext`] and halts as soon as a report comes back as
//! [`Outcome::Stop`]. The driver does not exit the process; it hands the
//! decision back in a [`RunSummary`] and `main` acts on it.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::result::{DataBag, EXITCODE_OK, ExecutionContext, Outcome, TaskResult};
use crate::task::Task;

/// What happened over a whole run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Exit status for the process: the stopping result's code, else the
    /// first failure's code, else OK.
    pub exit_code: i32,
    /// True if stop-on-fail cut the run short.
    pub stopped: bool,
    /// Reported results, in execution order.
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub fn was_successful(&self) -> bool {
        self.exit_code == EXITCODE_OK
    }
}

pub struct Runner {
    ctx: ExecutionContext,
    tasks: Vec<Arc<dyn Task>>,
}

impl fmt::Debug for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runner")
            .field("ctx", &self.ctx)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Runner {
    pub fn new(ctx: ExecutionContext, tasks: Vec<Arc<dyn Task>>) -> Self {
        Self { ctx, tasks }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Run every task in order.
    ///
    /// Returns early (with `stopped = true`) on the first `Outcome::Stop`.
    /// Printer errors abort the run and are returned as `Err`.
    pub async fn run(&self) -> Result<RunSummary> {
        info!(tasks = self.tasks.len(), "task run started");

        let mut results = Vec::with_capacity(self.tasks.len());
        let mut first_failure: Option<i32> = None;

        for task in self.tasks.iter() {
            let outcome = self.run_task(Arc::clone(task)).await?;

            if outcome.is_stop() {
                let exit_code = outcome.exit_code();
                results.push(outcome.into_result());
                warn!(task = %task.name(), exit_code, "run stopped on failure");
                return Ok(RunSummary {
                    exit_code,
                    stopped: true,
                    results,
                });
            }

            let result = outcome.into_result();
            if !result.was_successful() && first_failure.is_none() {
                first_failure = Some(result.exit_code());
            }
            results.push(result);
        }

        let exit_code = first_failure.unwrap_or(EXITCODE_OK);
        info!(exit_code, "task run finished");
        Ok(RunSummary {
            exit_code,
            stopped: false,
            results,
        })
    }

    /// Run a single task and report its result.
    ///
    /// An `Err` from the task is translated with [`TaskResult::from_error`].
    /// The measured duration is recorded unless the task set its own.
    pub async fn run_task(&self, task: Arc<dyn Task>) -> Result<Outcome> {
        debug!(task = %task.name(), kind = %task.kind(), "running task");

        let started = Instant::now();
        let mut result = match Arc::clone(&task).run().await {
            Ok(result) => result,
            Err(err) => {
                warn!(task = %task.name(), code = err.code, error = %err, "task raised an error");
                TaskResult::from_error(task, &err, DataBag::new())
            }
        };
        result.set_execution_time(started.elapsed());

        let outcome = self.ctx.report(result)?;
        let context = serde_json::Value::Object(outcome.result().get_context());
        debug!(%context, "task finished");
        Ok(outcome)
    }
}

// src/result/policy.rs

//! Reporting and the stop-on-fail policy.
//!
//! [`ExecutionContext`] carries what would otherwise be process-wide state:
//! the optional result printer and the stop-on-fail flag. Every result goes
//! through [`ExecutionContext::report`] exactly once:
//!
//! 1. the printer (if any) renders it; a `true` answer marks the result
//!    `already-printed`;
//! 2. if stop-on-fail is enabled, a failing result turns into
//!    [`Outcome::Stop`].
//!
//! The context never exits the process itself. The top-level driver looks at
//! the [`Outcome`] tag and terminates with the result's exit code, which
//! leaves room for cleanup on the way out.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::errors::Result;
use crate::printer::ResultPrinter;
use crate::result::data::DataBag;
use crate::result::lifecycle::TaskResult;
use crate::task::{Task, TaskError};

/// What the driver should do after a result has been reported.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Keep going.
    Continue(TaskResult),
    /// Stop-on-fail triggered: abort everything and exit with the result's
    /// exit code.
    Stop(TaskResult),
}

impl Outcome {
    pub fn result(&self) -> &TaskResult {
        match self {
            Outcome::Continue(result) | Outcome::Stop(result) => result,
        }
    }

    pub fn into_result(self) -> TaskResult {
        match self {
            Outcome::Continue(result) | Outcome::Stop(result) => result,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Outcome::Stop(_))
    }

    /// Exit status the process should end with if this outcome stops it.
    pub fn exit_code(&self) -> i32 {
        self.result().exit_code()
    }
}

/// Printer and stop-on-fail policy shared by everything that reports
/// results.
///
/// The flag is atomic so it can be flipped through a shared reference while
/// tasks are running.
#[derive(Default)]
pub struct ExecutionContext {
    printer: Option<Arc<dyn ResultPrinter>>,
    stop_on_fail: AtomicBool,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("has_printer", &self.printer.is_some())
            .field("stop_on_fail", &self.stop_on_fail_enabled())
            .finish()
    }
}

impl ExecutionContext {
    /// No printer, stop-on-fail off.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_printer(mut self, printer: Arc<dyn ResultPrinter>) -> Self {
        self.printer = Some(printer);
        self
    }

    pub fn with_stop_on_fail(self, enabled: bool) -> Self {
        self.set_stop_on_fail(enabled);
        self
    }

    pub fn printer(&self) -> Option<&Arc<dyn ResultPrinter>> {
        self.printer.as_ref()
    }

    pub fn set_stop_on_fail(&self, enabled: bool) {
        self.stop_on_fail.store(enabled, Ordering::SeqCst);
    }

    pub fn stop_on_fail_enabled(&self) -> bool {
        self.stop_on_fail.load(Ordering::SeqCst)
    }

    /// Report a freshly built result: print it, then apply stop-on-fail.
    ///
    /// Printer errors are returned, not swallowed.
    pub fn report(&self, mut result: TaskResult) -> Result<Outcome> {
        if let Some(printer) = &self.printer {
            if printer.print_result(&result)? {
                result.set_already_printed();
            }
        }

        debug!(
            task = %result.task().name(),
            exit_code = result.exit_code(),
            already_printed = result.already_printed(),
            "task result reported"
        );

        if self.stop_on_fail_enabled() {
            return self.stop_on_fail(result);
        }
        Ok(Outcome::Continue(result))
    }

    /// Apply the stop-on-fail policy to a result.
    ///
    /// A failing result gets the printer's stop notice and comes back as
    /// [`Outcome::Stop`]; a successful one passes through unchanged. This
    /// ignores the flag, so callers can force the check.
    pub fn stop_on_fail(&self, result: TaskResult) -> Result<Outcome> {
        if result.was_successful() {
            return Ok(Outcome::Continue(result));
        }

        if let Some(printer) = &self.printer {
            printer.print_stop_on_fail(&result)?;
        }
        warn!(
            task = %result.task().name(),
            exit_code = result.exit_code(),
            "stopping on failed task"
        );
        Ok(Outcome::Stop(result))
    }

    /// Construct a result and report it in one step.
    pub fn result(
        &self,
        task: Arc<dyn Task>,
        exit_code: i32,
        message: impl Into<String>,
        data: DataBag,
    ) -> Result<Outcome> {
        self.report(TaskResult::new(task, exit_code, message, data))
    }

    pub fn error_missing_extension(
        &self,
        task: Arc<dyn Task>,
        extension: &str,
        service: &str,
    ) -> Result<Outcome> {
        self.report(TaskResult::error_missing_extension(task, extension, service))
    }

    pub fn error_missing_package(
        &self,
        task: Arc<dyn Task>,
        class: &str,
        package: &str,
    ) -> Result<Outcome> {
        self.report(TaskResult::error_missing_package(task, class, package))
    }

    pub fn error(
        &self,
        task: Arc<dyn Task>,
        message: impl Into<String>,
        data: DataBag,
    ) -> Result<Outcome> {
        self.report(TaskResult::error(task, message, data))
    }

    pub fn success(
        &self,
        task: Arc<dyn Task>,
        message: impl Into<String>,
        data: DataBag,
    ) -> Result<Outcome> {
        self.report(TaskResult::success(task, message, data))
    }

    pub fn from_error(
        &self,
        task: Arc<dyn Task>,
        err: &TaskError,
        data: DataBag,
    ) -> Result<Outcome> {
        self.report(TaskResult::from_error(task, err, data))
    }
}

// src/printer.rs

//! Result printer contract and the default console implementation.
//!
//! The reporting step in [`crate::result::ExecutionContext`] talks to a
//! `ResultPrinter` rather than to stdout directly, so tests can swap in a
//! recording printer and callers can opt out of printing entirely.

use std::io::Write;
use std::sync::Mutex;

use crate::errors::{Result, ResultError};
use crate::result::TaskResult;
use crate::task::info::format_task_name;

/// Line emitted right before a stop-on-fail abort.
pub const STOP_ON_FAIL_NOTICE: &str = "Stopping on fail. Exiting....";

pub trait ResultPrinter: Send + Sync {
    /// Render a freshly constructed result.
    ///
    /// Returns `true` if anything was written, which marks the result as
    /// `already-printed`.
    fn print_result(&self, result: &TaskResult) -> Result<bool>;

    /// Final notice before a failing result stops the whole run.
    fn print_stop_on_fail(&self, result: &TaskResult) -> Result<()>;
}

/// Plain-text printer writing to any `Write` sink (stdout in production).
#[derive(Debug)]
pub struct ConsolePrinter<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsolePrinter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsolePrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Give back the sink (tests read what was written).
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| ResultError::PrinterError("output lock poisoned".to_string()))?;
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> ResultPrinter for ConsolePrinter<W> {
    fn print_result(&self, result: &TaskResult) -> Result<bool> {
        let label = format_task_name(result.task().as_ref());
        let mut lines = Vec::new();

        if result.was_successful() {
            if result.message().is_empty() {
                return Ok(false);
            }
            lines.push(format!("[{label}] {}", result.message()));
        } else {
            if !result.message().is_empty() {
                lines.push(format!("[{label}] {}", result.message()));
            }
            let mut summary = format!("[{label}] Exit code {}", result.exit_code());
            if let Some(time) = result.execution_time() {
                summary.push_str(&format!(" Time {:.3}s", time.as_secs_f64()));
            }
            lines.push(summary);
        }

        self.write_lines(&lines)?;
        Ok(true)
    }

    fn print_stop_on_fail(&self, _result: &TaskResult) -> Result<()> {
        self.write_lines(&[STOP_ON_FAIL_NOTICE.to_string()])
    }
}

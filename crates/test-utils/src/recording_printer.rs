#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use taskresult::errors::{Result, ResultError};
use taskresult::printer::ResultPrinter;
use taskresult::result::TaskResult;

/// One call observed by a [`RecordingPrinter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintCall {
    Result {
        task: String,
        exit_code: i32,
        message: String,
        /// Whether the result was already marked printed when it reached us.
        already_printed: bool,
    },
    StopOnFail {
        task: String,
        exit_code: i32,
    },
}

/// A printer that records every call instead of writing anything.
///
/// - `renders` controls what `print_result` answers (i.e. whether the result
///   gets marked `already-printed`).
/// - `fail_on_print` makes `print_result` return an error.
#[derive(Debug, Clone, Default)]
pub struct RecordingPrinter {
    calls: Arc<Mutex<Vec<PrintCall>>>,
    renders: bool,
    fail_on_print: bool,
}

impl RecordingPrinter {
    /// Printer that claims to have rendered every result.
    pub fn rendering() -> Self {
        Self {
            renders: true,
            ..Self::default()
        }
    }

    /// Printer that never renders anything.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Printer whose `print_result` always fails.
    pub fn failing() -> Self {
        Self {
            fail_on_print: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<PrintCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn result_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, PrintCall::Result { .. }))
            .count()
    }

    pub fn stop_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, PrintCall::StopOnFail { .. }))
            .count()
    }
}

impl ResultPrinter for RecordingPrinter {
    fn print_result(&self, result: &TaskResult) -> Result<bool> {
        self.calls.lock().unwrap().push(PrintCall::Result {
            task: result.task().name().to_string(),
            exit_code: result.exit_code(),
            message: result.message().to_string(),
            already_printed: result.already_printed(),
        });
        if self.fail_on_print {
            return Err(ResultError::PrinterError("recording printer told to fail".to_string()));
        }
        Ok(self.renders)
    }

    fn print_stop_on_fail(&self, result: &TaskResult) -> Result<()> {
        self.calls.lock().unwrap().push(PrintCall::StopOnFail {
            task: result.task().name().to_string(),
            exit_code: result.exit_code(),
        });
        Ok(())
    }
}

#![allow(dead_code)]

pub use taskresult_test_utils::builders;
pub use taskresult_test_utils::init_tracing;
pub use taskresult_test_utils::recording_printer::{PrintCall, RecordingPrinter};
pub use taskresult_test_utils::stub_task::{StubBehaviour, StubTask, stub};

use std::sync::Arc;

use taskresult::result::ExecutionContext;

/// Context wired to a recording printer; returns both.
pub fn recording_context(
    printer: RecordingPrinter,
    stop_on_fail: bool,
) -> (ExecutionContext, RecordingPrinter) {
    let ctx = ExecutionContext::new()
        .with_printer(Arc::new(printer.clone()))
        .with_stop_on_fail(stop_on_fail);
    (ctx, printer)
}

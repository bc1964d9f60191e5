// tests/reporting_policy.rs

mod common;
use crate::common::{PrintCall, RecordingPrinter, recording_context, stub};

use std::sync::Arc;

use serde_json::json;
use taskresult::errors::ResultError;
use taskresult::result::{
    ALREADY_PRINTED_KEY, DataBag, EXITCODE_ERROR, ExecutionContext, Outcome, TaskResult,
};
use taskresult::task::TaskError;

#[test]
fn context_defaults_to_no_printer_and_no_stop() {
    let ctx = ExecutionContext::new();
    assert!(ctx.printer().is_none());
    assert!(!ctx.stop_on_fail_enabled());

    let outcome = ctx.error(stub("t"), "failed", DataBag::new()).unwrap();
    assert!(!outcome.is_stop());
    assert!(!outcome.result().already_printed());
}

#[test]
fn printer_is_called_once_per_constructed_result() {
    let (ctx, printer) = recording_context(RecordingPrinter::silent(), false);

    ctx.success(stub("a"), "ok", DataBag::new()).unwrap();
    ctx.error(stub("b"), "bad", DataBag::new()).unwrap();

    assert_eq!(
        printer.calls(),
        vec![
            PrintCall::Result {
                task: "a".to_string(),
                exit_code: 0,
                message: "ok".to_string(),
                already_printed: false,
            },
            PrintCall::Result {
                task: "b".to_string(),
                exit_code: EXITCODE_ERROR,
                message: "bad".to_string(),
                already_printed: false,
            },
        ]
    );
}

#[test]
fn rendering_printer_marks_result_already_printed() {
    let (ctx, _printer) = recording_context(RecordingPrinter::rendering(), false);

    let result = ctx
        .success(stub("a"), "done", DataBag::new())
        .unwrap()
        .into_result();

    assert!(result.already_printed());
    assert_eq!(result.get(ALREADY_PRINTED_KEY), Some(&json!(true)));
}

#[test]
fn silent_printer_leaves_marker_absent() {
    let (ctx, _printer) = recording_context(RecordingPrinter::silent(), false);

    let result = ctx
        .success(stub("a"), "done", DataBag::new())
        .unwrap()
        .into_result();

    assert!(result.get(ALREADY_PRINTED_KEY).is_none());
}

#[test]
fn printer_errors_propagate() {
    let (ctx, printer) = recording_context(RecordingPrinter::failing(), true);

    let err = ctx
        .error(stub("a"), "bad", DataBag::new())
        .expect_err("printer failure must not be swallowed");

    assert!(matches!(err, ResultError::PrinterError(_)));
    // The stop notice is never reached.
    assert_eq!(printer.stop_calls(), 0);
}

#[test]
fn stop_on_fail_stops_failing_result_after_printing_it() {
    let (ctx, printer) = recording_context(RecordingPrinter::rendering(), true);

    let outcome = ctx.result(stub("deploy"), 7, "nope", DataBag::new()).unwrap();

    assert!(outcome.is_stop());
    assert_eq!(outcome.exit_code(), 7);
    assert!(outcome.result().already_printed());
    assert_eq!(
        printer.calls(),
        vec![
            PrintCall::Result {
                task: "deploy".to_string(),
                exit_code: 7,
                message: "nope".to_string(),
                already_printed: false,
            },
            PrintCall::StopOnFail {
                task: "deploy".to_string(),
                exit_code: 7,
            },
        ]
    );
}

#[test]
fn stop_on_fail_lets_success_through() {
    let (ctx, printer) = recording_context(RecordingPrinter::silent(), true);

    let outcome = ctx.success(stub("ok"), "", DataBag::new()).unwrap();

    assert!(matches!(outcome, Outcome::Continue(_)));
    assert_eq!(printer.stop_calls(), 0);
}

#[test]
fn disabled_policy_never_stops() {
    let (ctx, printer) = recording_context(RecordingPrinter::silent(), false);

    for code in [1, 2, 127, -1] {
        let outcome = ctx.result(stub("t"), code, "", DataBag::new()).unwrap();
        assert!(!outcome.is_stop(), "code {code} must not stop");
    }
    assert_eq!(printer.stop_calls(), 0);
}

#[test]
fn flag_can_be_toggled_through_shared_reference() {
    let (ctx, _printer) = recording_context(RecordingPrinter::silent(), false);
    let shared = Arc::new(ctx);

    let before = shared.error(stub("t"), "x", DataBag::new()).unwrap();
    assert!(!before.is_stop());

    shared.set_stop_on_fail(true);
    let after = shared.error(stub("t"), "x", DataBag::new()).unwrap();
    assert!(after.is_stop());

    shared.set_stop_on_fail(false);
    let again = shared.error(stub("t"), "x", DataBag::new()).unwrap();
    assert!(!again.is_stop());
}

#[test]
fn explicit_stop_on_fail_ignores_flag() {
    let (ctx, printer) = recording_context(RecordingPrinter::silent(), false);
    let result = TaskResult::error(stub("t"), "bad", DataBag::new());

    let outcome = ctx.stop_on_fail(result).unwrap();

    assert!(outcome.is_stop());
    assert_eq!(printer.result_calls(), 0);
    assert_eq!(printer.stop_calls(), 1);
}

#[test]
fn helpers_report_through_the_printer() {
    let (ctx, printer) = recording_context(RecordingPrinter::rendering(), false);

    let ext = ctx
        .error_missing_extension(stub("img"), "gd", "image resize")
        .unwrap();
    let pkg = ctx
        .error_missing_package(stub("lint"), "Linter", "acme/linter")
        .unwrap();
    let from = ctx
        .from_error(stub("raise"), &TaskError::with_code(9, "raised"), DataBag::new())
        .unwrap();

    assert_eq!(printer.result_calls(), 3);
    assert!(ext.result().already_printed());
    assert!(pkg.result().already_printed());
    assert_eq!(from.exit_code(), 9);
}

#[test]
fn already_printed_survives_a_second_report() {
    let (ctx, printer) = recording_context(RecordingPrinter::rendering(), false);

    let first = ctx.success(stub("t"), "once", DataBag::new()).unwrap().into_result();
    let second = ctx.report(first).unwrap().into_result();

    // The marker only records the first render; it does not suppress the
    // second one.
    assert_eq!(printer.result_calls(), 2);
    assert!(second.already_printed());
    match &printer.calls()[1] {
        PrintCall::Result { already_printed, .. } => assert!(*already_printed),
        other => panic!("unexpected call {other:?}"),
    }
}

// tests/exit_code_properties.rs

mod common;
use crate::common::{RecordingPrinter, recording_context, stub};

use proptest::prelude::*;
use taskresult::result::{DataBag, EXITCODE_ERROR, EXITCODE_OK, TaskResult};
use taskresult::process_exit_status;
use taskresult::task::TaskError;

proptest! {
    #[test]
    fn success_matches_exit_code(code in any::<i32>()) {
        let result = TaskResult::new(stub("p"), code, "", DataBag::new());
        prop_assert_eq!(result.was_successful(), code == EXITCODE_OK);
    }

    #[test]
    fn helpers_use_fixed_codes(message in ".{0,40}") {
        let ok = TaskResult::success(stub("p"), message.clone(), DataBag::new());
        let err = TaskResult::error(stub("p"), message.clone(), DataBag::new());

        prop_assert_eq!(ok.exit_code(), EXITCODE_OK);
        prop_assert_eq!(err.exit_code(), EXITCODE_ERROR);
        prop_assert_eq!(ok.message(), message.as_str());
        prop_assert_eq!(err.message(), message.as_str());
    }

    #[test]
    fn from_error_code_mapping(code in any::<i32>(), message in "[a-z ]{0,30}") {
        let err = TaskError::with_code(code, message.clone());
        let result = TaskResult::from_error(stub("p"), &err, DataBag::new());

        let expected = if code != 0 { code } else { EXITCODE_ERROR };
        prop_assert_eq!(result.exit_code(), expected);
        prop_assert_eq!(result.message(), message.as_str());
    }

    #[test]
    fn stop_on_fail_stops_exactly_the_failures(code in any::<i32>(), enabled in any::<bool>()) {
        let (ctx, printer) = recording_context(RecordingPrinter::silent(), enabled);

        let outcome = ctx.result(stub("p"), code, "", DataBag::new()).unwrap();

        let should_stop = enabled && code != EXITCODE_OK;
        prop_assert_eq!(outcome.is_stop(), should_stop);
        prop_assert_eq!(printer.result_calls(), 1);
        prop_assert_eq!(printer.stop_calls(), usize::from(should_stop));
        if should_stop {
            prop_assert_eq!(outcome.exit_code(), code);
        }
    }

    #[test]
    fn process_status_never_reads_as_success_for_failures(code in any::<i32>()) {
        let status = process_exit_status(code);
        prop_assert_eq!(status & 0xff == 0, code == EXITCODE_OK);
        if code & 0xff != 0 {
            prop_assert_eq!(status, code);
        }
    }
}

#[test]
fn process_status_maps_wrapping_codes_to_generic_error() {
    assert_eq!(process_exit_status(EXITCODE_OK), EXITCODE_OK);
    assert_eq!(process_exit_status(3), 3);
    assert_eq!(process_exit_status(256), EXITCODE_ERROR);
    assert_eq!(process_exit_status(-512), EXITCODE_ERROR);
}

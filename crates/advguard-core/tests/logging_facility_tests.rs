#![allow(clippy::unwrap_used, clippy::expect_used)]

use advguard_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_SKIPPED, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
};
use advguard_core::errors::{AliasLookupError, ValidationError};
use advguard_core::logging_facility::test_capture::init_test_capture;
use advguard_core::{log_check_skipped, log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code_for_policy_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    log_op_error!(op_name, ValidationError::AdvisoryRemoved, duration_ms = 10);

    capture.assert_field(op_name, EVENT_END_ERROR, FIELD_ERR_CODE, "ERR_ADVISORY_REMOVED");
}

#[test]
fn test_log_op_error_includes_code_for_lookup_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    log_op_error!(
        op_name,
        AliasLookupError::Timeout(std::time::Duration::from_secs(30)),
        duration_ms = 30_000,
        package = "curl"
    );

    capture.assert_field(op_name, EVENT_END_ERROR, FIELD_ERR_CODE, "ERR_EXTERNAL_LOOKUP");
    capture.assert_field(op_name, EVENT_END_ERROR, "package", "curl");
}

#[test]
fn test_check_skipped_carries_reason() {
    let capture = init_test_capture();
    let op_name = "test_check_skipped_unique_5";

    log_check_skipped!(op_name, "no package index provided");

    capture.assert_field(op_name, EVENT_SKIPPED, "reason", "no package index provided");
}

#[test]
fn test_boundary_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_6";

    log_op_start!(op_name, package = "curl");
    log_op_end!(op_name, duration_ms = 1);

    let count = |event: &str| {
        capture.count_events(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(event))
    };
    assert_eq!(count(EVENT_START), 1);
    assert_eq!(count(EVENT_END), 1);
}

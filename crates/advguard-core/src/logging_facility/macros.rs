//! Operation logging macros
//!
//! Every macro stamps `component`, `op` and `event`; extra `key = value`
//! fields pass straight through to `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use advguard_core::log_op_start;
/// log_op_start!("validate");
/// log_op_start!("fixed_versions", document_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, $op, $crate::core_types::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation; `duration_ms` is mandatory
///
/// ```
/// # use advguard_core::log_op_end;
/// log_op_end!("validate", duration_ms = 42);
/// log_op_end!("naming", duration_ms = 3, errors = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            info,
            $op,
            $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log an operation that ended in error
///
/// The error goes through [`AgError`](crate::errors::AgError), so its kind
/// and stable code are always recorded.
///
/// ```
/// # use advguard_core::log_op_error;
/// # use advguard_core::errors::{AgError, AgErrorKind};
/// let err = AgError::new(AgErrorKind::ExternalLookup).with_message("503");
/// log_op_error!("alias_completeness", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ag_err: $crate::errors::AgError = $err.into();
        $crate::__log_op!(
            error,
            $op,
            $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ag_err.kind(),
            err.code = ag_err.code(),
            message = %ag_err
            $(, $($field)*)?
        )
    }};
}

/// Log that a check did not run because an optional input is absent
///
/// ```
/// # use advguard_core::log_check_skipped;
/// log_check_skipped!("fixed_versions", "no package index provided");
/// ```
#[macro_export]
macro_rules! log_check_skipped {
    ($check:expr, $reason:expr) => {
        $crate::__log_op!(
            info,
            $check,
            $crate::core_types::schema::EVENT_SKIPPED,
            reason = $reason,
            "skipping {}: {}",
            $check,
            $reason
        )
    };
}

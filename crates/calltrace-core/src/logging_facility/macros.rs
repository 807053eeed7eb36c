//! Canonical logging macros
//!
//! Every wrapper record goes through one of these so that `component`,
//! `function` and `event` are always present.

/// Log entry into a wrapped function (INFO)
///
/// # Example
///
/// ```
/// # use calltrace_core::log_call_enter;
/// log_call_enter!("fetch", "Entering fetch");
/// ```
#[macro_export]
macro_rules! log_call_enter {
    ($function:expr, $message:expr) => {
        tracing::info!(
            component = module_path!(),
            function = $function,
            event = $crate::types::schema::EVENT_ENTER,
            "{}",
            $message
        );
    };
}

/// Log a successful exit from a wrapped function (INFO)
///
/// # Example
///
/// ```
/// # use calltrace_core::log_call_leave;
/// log_call_leave!("fetch", "Leaving fetch");
/// ```
#[macro_export]
macro_rules! log_call_leave {
    ($function:expr, $message:expr) => {
        tracing::info!(
            component = module_path!(),
            function = $function,
            event = $crate::types::schema::EVENT_LEAVE,
            "{}",
            $message
        );
    };
}

/// Log call detail (DEBUG): arguments, return values
///
/// # Example
///
/// ```
/// # use calltrace_core::log_call_debug;
/// # use calltrace_core::types::schema::EVENT_CALL;
/// log_call_debug!("fetch", EVENT_CALL, args = "1, b=7", "Calling fetch(1, b=7)");
/// ```
#[macro_export]
macro_rules! log_call_debug {
    ($function:expr, $event:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            function = $function,
            event = $event,
            $($field)*
        );
    };
}

/// Log a failed call (ERROR) with its detail and backtrace
///
/// The caller supplies the backtrace so it can be taken where the failure
/// happened rather than where it is logged.
///
/// # Example
///
/// ```
/// # use calltrace_core::log_call_error;
/// # use std::backtrace::Backtrace;
/// log_call_error!(
///     "fetch",
///     "boom",
///     error = "boom",
///     detail = "Custom { kind: Other }",
///     backtrace = Backtrace::force_capture()
/// );
/// ```
#[macro_export]
macro_rules! log_call_error {
    ($function:expr, $message:expr, error = $error:expr, detail = $detail:expr, backtrace = $backtrace:expr) => {{
        let error = &$error;
        let detail = &$detail;
        let backtrace = &$backtrace;
        tracing::error!(
            component = module_path!(),
            function = $function,
            event = $crate::types::schema::EVENT_ERROR,
            error = %error,
            error_detail = %detail,
            backtrace = %backtrace,
            "{}",
            $message
        );
    }};
}

/// Log the measured duration of a call (INFO)
///
/// # Example
///
/// ```
/// # use calltrace_core::log_call_finished;
/// # use std::time::Duration;
/// log_call_finished!("fetch", Duration::from_millis(1500));
/// ```
#[macro_export]
macro_rules! log_call_finished {
    ($function:expr, $elapsed:expr) => {{
        let function = $function;
        let elapsed: ::std::time::Duration = $elapsed;
        tracing::info!(
            component = module_path!(),
            function = function,
            event = $crate::types::schema::EVENT_FINISHED,
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            elapsed_secs = elapsed.as_secs_f64(),
            "Finished {} in {:.4} secs",
            function,
            elapsed.as_secs_f64()
        );
    }};
}

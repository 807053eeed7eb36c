//! Canonical schema constants for wrapper log records
//!
//! Every record emitted by `CallLogger` and `DurationTimer` carries
//! `component`, `function` and `event`, so sinks and test captures can
//! select records without parsing messages.
//!
//! tracing macros take field names as identifiers, so the logging macros
//! spell these keys literally; the facility's tests check that the two agree.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_FUNCTION: &str = "function";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_ARGS: &str = "args";
pub const FIELD_RETURN_VALUE: &str = "return_value";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_ELAPSED_SECS: &str = "elapsed_secs";

// Error fields
pub const FIELD_ERROR: &str = "error";
pub const FIELD_ERROR_DETAIL: &str = "error_detail";
pub const FIELD_BACKTRACE: &str = "backtrace";

// Canonical event names
pub const EVENT_ENTER: &str = "enter";
pub const EVENT_CALL: &str = "call";
pub const EVENT_RETURN: &str = "return";
pub const EVENT_LEAVE: &str = "leave";
pub const EVENT_ERROR: &str = "error";
pub const EVENT_FINISHED: &str = "finished";

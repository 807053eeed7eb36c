//! calltrace core - observability wrappers for ordinary function calls
//!
//! This crate provides two wrappers that compose around any named callable:
//! - [`CallLogger`]: logs entry, arguments, return value and failures, with
//!   per-function message templates and optional exit-on-failure
//! - [`DurationTimer`]: logs how long each call took
//!
//! plus the logging facility (subscriber initialization, canonical record
//! macros, in-memory capture for tests) both wrappers emit through.
//!
//! ```
//! use calltrace_core::{function, Invocable, InvocableExt, Kw};
//!
//! let test_func = function("test_func", |(a, b): (i32, Kw<i32>)| {
//!     Ok::<_, String>((a, *b))
//! })
//! .timed()
//! .logged();
//!
//! assert_eq!(test_func.call((1, Kw::new("b", 7))), Some((1, 7)));
//! ```

pub mod call_logger;
pub mod describe;
pub mod duration_timer;
pub mod errors;
pub mod hooks;
pub mod invocable;
pub mod logging_facility;
mod panic_site;
pub mod templates;

pub use calltrace_core_types as types;

// Re-export commonly used types
pub use call_logger::{CallLogger, CallLoggerConfig};
pub use describe::{ArgList, Describe, Kw, Redacted};
pub use duration_timer::DurationTimer;
pub use errors::{CallTraceError, ErrorKind, Result};
pub use hooks::{Clock, ExitHandler, MonotonicClock, ProcessExit};
pub use invocable::{function, AlwaysOk, Function, Invocable, InvocableExt, Named};
pub use templates::{LogTemplateRegistry, LogTemplateSet, ResolvedTemplates, Template};

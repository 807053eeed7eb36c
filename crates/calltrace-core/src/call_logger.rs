//! Entry/exit/failure logging around a call
//!
//! [`CallLogger`] wraps a fallible [`Invocable`] (one returning
//! `Result<T, E>`) and emits, per call:
//!
//! 1. INFO `enter` template, interpolated with the function name
//! 2. DEBUG `Calling name(args)`
//! 3. on success: DEBUG `name returned value: v`, then INFO `leave` template
//! 4. on `Err` or panic: ERROR `error` template, interpolated with the
//!    failure text, with the failure's debug detail and a backtrace
//!
//! For a panic the detail reads `panicked at <file:line:col>: <message>` and
//! the backtrace is the one taken at the panic site, before unwinding. For an
//! `Err` the backtrace is taken where the logger receives it. Both are always
//! captured, whatever `RUST_BACKTRACE` says.
//!
//! A failed call yields `None`; the failure never reaches the caller unless
//! `fail_exit` is set, in which case the process is terminated with
//! `exit_code` instead.
//!
//! Only functions returning `Result` can be logged directly. A function
//! returning a plain value, or another `CallLogger` (whose output is
//! `Option<T>`), is adapted first with
//! [`InvocableExt::infallible`](crate::invocable::InvocableExt::infallible):
//!
//! ```
//! use calltrace_core::{function, Invocable, InvocableExt};
//!
//! let add = function("add", |(a, b): (i32, i32)| a + b).infallible().logged();
//! assert_eq!(add.call((2, 3)), Some(5));
//!
//! let twice = function("twice", |(x,): (i32,)| Ok::<_, String>(x * 2))
//!     .logged()
//!     .infallible()
//!     .logged();
//! assert_eq!(twice.call((4,)), Some(Some(8)));
//! ```

use std::any::Any;
use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::describe::{ArgList, Describe};
use crate::hooks::{ExitHandler, ProcessExit};
use crate::invocable::{Invocable, Named};
use crate::panic_site::{self, PanicSite};
use crate::templates::{LogTemplateRegistry, ResolvedTemplates};
use crate::types::schema::{EVENT_CALL, EVENT_RETURN};
use crate::{log_call_debug, log_call_enter, log_call_error, log_call_leave};

/// Settings applied when a `CallLogger` is built
///
/// Deserializable so it can be embedded in an application's own settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallLoggerConfig {
    /// Per-function template overrides
    pub templates: LogTemplateRegistry,
    /// Terminate the process when the wrapped call fails
    pub fail_exit: bool,
    /// Status passed to the exit handler when `fail_exit` is set
    pub exit_code: i32,
}

impl CallLoggerConfig {
    pub fn with_templates(mut self, templates: LogTemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Exit with `exit_code` on failure instead of returning `None`
    pub fn fail_exit(mut self, exit_code: i32) -> Self {
        self.fail_exit = true;
        self.exit_code = exit_code;
        self
    }
}

/// Logging wrapper; see the module docs for the record sequence
pub struct CallLogger<I> {
    inner: I,
    templates: ResolvedTemplates,
    fail_exit: bool,
    exit_code: i32,
    exit: Arc<dyn ExitHandler>,
}

impl<I: Named> CallLogger<I> {
    /// Wrap with the default templates, swallowing failures
    pub fn new(inner: I) -> Self {
        Self::with_config(inner, CallLoggerConfig::default())
    }

    /// Wrap with `config`; templates are resolved here, once
    pub fn with_config(inner: I, config: CallLoggerConfig) -> Self {
        let templates = config.templates.resolve(inner.name());
        Self {
            inner,
            templates,
            fail_exit: config.fail_exit,
            exit_code: config.exit_code,
            exit: Arc::new(ProcessExit),
        }
    }
}

impl<I> CallLogger<I> {
    /// Replace the termination primitive used under `fail_exit`
    pub fn with_exit_handler<H>(mut self, handler: H) -> Self
    where
        H: ExitHandler + 'static,
    {
        self.exit = Arc::new(handler);
        self
    }

    pub fn templates(&self) -> &ResolvedTemplates {
        &self.templates
    }

    pub fn fail_exit(&self) -> bool {
        self.fail_exit
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Named> Named for CallLogger<I> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

impl<Args, I, T, E> Invocable<Args> for CallLogger<I>
where
    Args: ArgList,
    I: Invocable<Args, Output = Result<T, E>>,
    T: fmt::Debug,
    E: fmt::Display + fmt::Debug,
{
    type Output = Option<T>;

    fn call(&self, args: Args) -> Option<T> {
        let name = self.inner.name();
        let rendered_args = args.describe_args();

        log_call_enter!(name, self.templates.enter.render(name));
        log_call_debug!(
            name,
            EVENT_CALL,
            args = %rendered_args,
            "Calling {}({})",
            name,
            rendered_args
        );

        let failure = match panic_site::catch_with_site(|| self.inner.call(args)) {
            Ok(Ok(value)) => {
                let rendered_value = value.describe();
                log_call_debug!(
                    name,
                    EVENT_RETURN,
                    return_value = %rendered_value,
                    "{} returned value: {}",
                    name,
                    rendered_value
                );
                log_call_leave!(name, self.templates.leave.render(name));
                return Some(value);
            }
            Ok(Err(err)) => Failure::from_error(&err),
            Err((payload, site)) => Failure::from_panic(payload.as_ref(), site),
        };

        log_call_error!(
            name,
            self.templates.error.render(&failure.message),
            error = failure.message,
            detail = failure.detail,
            backtrace = failure.backtrace
        );

        if self.fail_exit {
            self.exit.exit(self.exit_code);
        }
        None
    }
}

impl<I: Named> fmt::Debug for CallLogger<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallLogger")
            .field("function", &self.inner.name())
            .field("templates", &self.templates)
            .field("fail_exit", &self.fail_exit)
            .field("exit_code", &self.exit_code)
            .finish_non_exhaustive()
    }
}

/// A failed call, reduced to what the error record needs
struct Failure {
    message: String,
    detail: String,
    backtrace: Backtrace,
}

impl Failure {
    /// The `Err` has already returned, so the trace starts at this frame
    fn from_error<E: fmt::Display + fmt::Debug>(err: &E) -> Self {
        Self {
            message: err.to_string(),
            detail: format!("{:?}", err),
            backtrace: Backtrace::force_capture(),
        }
    }

    fn from_panic(payload: &(dyn Any + Send), site: Option<PanicSite>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panic with a non-string payload".to_string()
        };
        match site {
            Some(PanicSite {
                location,
                backtrace,
            }) => Self {
                detail: match location {
                    Some(location) => format!("panicked at {}: {}", location, message),
                    None => format!("panicked: {}", message),
                },
                message,
                backtrace,
            },
            None => Self {
                detail: format!("panicked: {}", message),
                message,
                backtrace: Backtrace::force_capture(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocable::function;

    #[test]
    fn test_success_returns_value() {
        let logged = CallLogger::new(function("double", |(x,): (i32,)| Ok::<_, String>(x * 2)));
        assert_eq!(logged.call((21,)), Some(42));
    }

    #[test]
    fn test_error_is_swallowed() {
        let logged = CallLogger::new(function("always_fails", |(): ()| {
            Err::<(), _>("nope".to_string())
        }));
        assert_eq!(logged.call(()), None);
    }

    #[test]
    fn test_panic_is_swallowed() {
        let logged = CallLogger::new(function("panics", |(): ()| -> Result<(), String> {
            panic!("kaboom")
        }));
        assert_eq!(logged.call(()), None);
    }

    #[test]
    fn test_panic_payload_messages() {
        let from_str = Failure::from_panic(&"static message", None);
        assert_eq!(from_str.message, "static message");

        let from_string = Failure::from_panic(&String::from("owned message"), None);
        assert_eq!(from_string.message, "owned message");

        let other = Failure::from_panic(&42_u32, None);
        assert_eq!(other.message, "panic with a non-string payload");
    }

    #[test]
    fn test_panic_detail_names_location() {
        let site = PanicSite {
            location: Some("src/lib.rs:10:5".to_string()),
            backtrace: Backtrace::disabled(),
        };
        let failure = Failure::from_panic(&"index out of bounds", Some(site));
        assert_eq!(
            failure.detail,
            "panicked at src/lib.rs:10:5: index out of bounds"
        );
    }

    #[test]
    fn test_error_backtrace_is_captured_regardless_of_env() {
        let failure = Failure::from_error(&"plain failure");
        assert_eq!(
            failure.backtrace.status(),
            std::backtrace::BacktraceStatus::Captured
        );
    }

    #[test]
    fn test_config_builder() {
        let config = CallLoggerConfig::default().fail_exit(3);
        assert!(config.fail_exit);
        assert_eq!(config.exit_code, 3);
    }

    #[test]
    fn test_templates_resolved_at_wrap_time() {
        let registry = LogTemplateRegistry::from_toml_str(
            r#"
            [resolved_fn]
            enter = "IN %s"
            "#,
        )
        .unwrap();
        let logged = CallLogger::with_config(
            function("resolved_fn", |(): ()| Ok::<_, String>(())),
            CallLoggerConfig::default().with_templates(registry),
        );
        assert_eq!(logged.templates().enter.as_str(), "IN %s");
        assert_eq!(logged.templates().leave.as_str(), "Leaving %s");
    }
}

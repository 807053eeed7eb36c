//! The callable seam shared by functions and wrappers
//!
//! Wrapping is plain composition: [`function`] names a closure, and each
//! wrapper takes an [`Invocable`] and is itself one, reporting the inner
//! name.
//!
//! ```
//! use calltrace_core::describe::Kw;
//! use calltrace_core::invocable::{function, Invocable, InvocableExt, Named};
//!
//! let test_func = function("test_func", |(a, b): (i32, Kw<i32>)| {
//!     Ok::<_, String>((a, *b))
//! })
//! .timed()
//! .logged();
//!
//! assert_eq!(test_func.name(), "test_func");
//! assert_eq!(test_func.call((1, Kw::new("b", 7))), Some((1, 7)));
//! ```

use std::convert::Infallible;
use std::fmt;

use crate::call_logger::{CallLogger, CallLoggerConfig};
use crate::duration_timer::DurationTimer;

/// Anything with a function name for log records
pub trait Named {
    fn name(&self) -> &str;
}

/// A named callable taking its arguments as one tuple
pub trait Invocable<Args>: Named {
    type Output;

    fn call(&self, args: Args) -> Self::Output;
}

/// A closure or function paired with its name
#[derive(Clone)]
pub struct Function<F> {
    name: String,
    f: F,
}

/// Name a closure or function so it can be wrapped
pub fn function<F>(name: impl Into<String>, f: F) -> Function<F> {
    Function {
        name: name.into(),
        f,
    }
}

impl<F> Named for Function<F> {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<Args, F, R> Invocable<Args> for Function<F>
where
    F: Fn(Args) -> R,
{
    type Output = R;

    fn call(&self, args: Args) -> R {
        (self.f)(args)
    }
}

impl<F> fmt::Debug for Function<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Presents any invocable as one that always returns `Ok`
///
/// `CallLogger` only wraps invocables returning `Result`. This adapter lets
/// it wrap a function returning a plain value, or another `CallLogger`.
#[derive(Debug, Clone)]
pub struct AlwaysOk<I> {
    inner: I,
}

impl<I> AlwaysOk<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Named> Named for AlwaysOk<I> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

impl<Args, I: Invocable<Args>> Invocable<Args> for AlwaysOk<I> {
    type Output = Result<I::Output, Infallible>;

    fn call(&self, args: Args) -> Self::Output {
        Ok(self.inner.call(args))
    }
}

/// Wrapper combinators for anything named
pub trait InvocableExt: Named + Sized {
    /// Wrap the output in `Ok` so a `CallLogger` can be stacked on top
    fn infallible(self) -> AlwaysOk<Self> {
        AlwaysOk::new(self)
    }

    /// Time each call and log its duration
    fn timed(self) -> DurationTimer<Self> {
        DurationTimer::new(self)
    }

    /// Log entry, arguments, result and failures with default settings
    fn logged(self) -> CallLogger<Self> {
        CallLogger::new(self)
    }

    /// Log entry, arguments, result and failures with `config`
    fn logged_with(self, config: CallLoggerConfig) -> CallLogger<Self> {
        CallLogger::with_config(self, config)
    }
}

impl<T: Named> InvocableExt for T {}

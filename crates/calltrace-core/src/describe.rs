//! Diagnostic rendering of arguments and return values
//!
//! - [`Describe`]: the debug representation of any `Debug` value
//! - [`ArgList`]: an argument tuple rendered as `a, b, key=value`
//! - [`Kw`]: a keyword argument, rendered as `name=value`
//! - [`Redacted`]: a sensitive argument, rendered as `***REDACTED***`

use std::fmt;
use std::ops::Deref;

/// Describe a value for diagnostics
pub trait Describe {
    fn describe(&self) -> String;
}

impl<T: fmt::Debug + ?Sized> Describe for T {
    fn describe(&self) -> String {
        format!("{:?}", self)
    }
}

/// An argument list that can be rendered for a call record
///
/// Implemented for `()` and for tuples of up to twelve `Debug` elements.
/// Elements are rendered in tuple order and joined with `", "`; nothing is
/// reordered. Keyword arguments therefore appear where the caller put them,
/// so put every [`Kw`] after the positional arguments to get the familiar
/// `f(1, 2, key=value)` rendering.
pub trait ArgList {
    fn describe_args(&self) -> String;
}

impl ArgList for () {
    fn describe_args(&self) -> String {
        String::new()
    }
}

macro_rules! impl_arg_list {
    ($($name:ident),+) => {
        impl<$($name: fmt::Debug),+> ArgList for ($($name,)+) {
            #[allow(non_snake_case)]
            fn describe_args(&self) -> String {
                let ($($name,)+) = self;
                [$($name.describe()),+].join(", ")
            }
        }
    };
}

impl_arg_list!(A);
impl_arg_list!(A, B);
impl_arg_list!(A, B, C);
impl_arg_list!(A, B, C, D);
impl_arg_list!(A, B, C, D, E);
impl_arg_list!(A, B, C, D, E, F);
impl_arg_list!(A, B, C, D, E, F, G);
impl_arg_list!(A, B, C, D, E, F, G, H);
impl_arg_list!(A, B, C, D, E, F, G, H, I);
impl_arg_list!(A, B, C, D, E, F, G, H, I, J);
impl_arg_list!(A, B, C, D, E, F, G, H, I, J, K);
impl_arg_list!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Keyword argument
///
/// Dereferences to the wrapped value; its debug representation is
/// `name=value`. It is rendered at its position in the argument tuple, so
/// keyword arguments belong after the positional ones.
///
/// ```
/// use calltrace_core::describe::{ArgList, Kw};
///
/// assert_eq!((1, Kw::new("b", 7)).describe_args(), "1, b=7");
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Kw<T> {
    name: &'static str,
    value: T,
}

impl<T> Kw<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Kw<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Kw<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.name, self.value)
    }
}

/// Wrapper for sensitive arguments
///
/// Redacts itself in `Debug` and `Display`, so call and return records never
/// contain the value. The wrapped function reads it with [`Redacted::expose`].
///
/// ```
/// use calltrace_core::describe::{ArgList, Redacted};
///
/// let args = ("alice", Redacted::new("hunter2"));
/// assert_eq!(args.describe_args(), "\"alice\", ***REDACTED***");
/// assert_eq!(args.1.expose(), &"hunter2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

impl<T> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***REDACTED***")
    }
}

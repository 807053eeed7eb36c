//! External collaborators injected into the wrappers
//!
//! [`Clock`] is the monotonic time source used by `DurationTimer`;
//! [`ExitHandler`] is the termination primitive `CallLogger` invokes when
//! configured to exit on failure. Production code uses [`MonotonicClock`]
//! and [`ProcessExit`]; tests substitute their own implementations.

use std::time::Instant;

/// Monotonic, non-decreasing time source
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by `std::time::Instant`
///
/// # Example
/// ```
/// use calltrace_core::hooks::{Clock, MonotonicClock};
///
/// let clock = MonotonicClock;
/// let t0 = clock.now();
/// assert!(clock.now() >= t0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Unconditional process termination
///
/// Implementations must not return.
pub trait ExitHandler: Send + Sync {
    fn exit(&self, code: i32) -> !;
}

/// Terminates the current process via `std::process::exit`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl ExitHandler for ProcessExit {
    fn exit(&self, code: i32) -> ! {
        std::process::exit(code)
    }
}

//! Wall-clock timing of a call
//!
//! [`DurationTimer`] reads the clock, calls the inner function, reads the
//! clock again and emits one INFO record,
//! `Finished <name> in <seconds, 4 decimals> secs`. The result is returned
//! unchanged. A panic in the inner function unwinds straight through and no
//! record is emitted for that call.

use std::fmt;
use std::sync::Arc;

use crate::hooks::{Clock, MonotonicClock};
use crate::invocable::{Invocable, Named};
use crate::log_call_finished;

pub struct DurationTimer<I> {
    inner: I,
    clock: Arc<dyn Clock>,
}

impl<I> DurationTimer<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            clock: Arc::new(MonotonicClock),
        }
    }

    /// Measure with `clock` instead of the system monotonic clock
    pub fn with_clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Named> Named for DurationTimer<I> {
    fn name(&self) -> &str {
        self.inner.name()
    }
}

impl<Args, I> Invocable<Args> for DurationTimer<I>
where
    I: Invocable<Args>,
{
    type Output = I::Output;

    fn call(&self, args: Args) -> I::Output {
        let started = self.clock.now();
        let result = self.inner.call(args);
        let elapsed = self.clock.now().saturating_duration_since(started);
        log_call_finished!(self.inner.name(), elapsed);
        result
    }
}

impl<I: Named> fmt::Debug for DurationTimer<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DurationTimer")
            .field("function", &self.inner.name())
            .finish_non_exhaustive()
    }
}

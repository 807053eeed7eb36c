use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use calltrace_core::{Clock, ExitHandler};

/// Exit handler that panics instead of terminating the test process
///
/// The panic message is `exit(<code>)`, so tests can assert on it with
/// `#[should_panic]` or `catch_unwind`.
#[allow(dead_code)]
pub struct PanickingExit;

impl ExitHandler for PanickingExit {
    fn exit(&self, code: i32) -> ! {
        panic!("exit({code})")
    }
}

/// Clock that advances by a fixed step on every read
#[allow(dead_code)]
pub struct SteppingClock {
    origin: Instant,
    step: Duration,
    reads: AtomicU32,
}

#[allow(dead_code)]
impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            reads: AtomicU32::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.origin + self.step * n
    }
}

/// Extract the message of a caught panic payload
#[allow(dead_code)]
pub fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default()
}

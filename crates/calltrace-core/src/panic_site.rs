//! Panic site capture for logged calls
//!
//! By the time `catch_unwind` returns, the failing frames are gone. A chained
//! process panic hook, installed once, records the panic location and a
//! forced backtrace into a thread-local while a logged call is running on
//! that thread. Outside logged calls the hook defers to the previous hook,
//! so ordinary panics are reported exactly as before.

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Where a caught panic happened
#[derive(Debug)]
pub(crate) struct PanicSite {
    pub(crate) location: Option<String>,
    pub(crate) backtrace: Backtrace,
}

thread_local! {
    static CAPTURE_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_SITE: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static HOOK_ONCE: Once = Once::new();

fn install_hook() {
    HOOK_ONCE.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CAPTURE_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }
            let site = PanicSite {
                location: info.location().map(|l| l.to_string()),
                backtrace: Backtrace::force_capture(),
            };
            LAST_SITE.with(|slot| *slot.borrow_mut() = Some(site));
        }));
    });
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        CAPTURE_DEPTH.with(|d| d.set(d.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        CAPTURE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Run `f`, catching a panic together with the site it was raised at
pub(crate) fn catch_with_site<R>(
    f: impl FnOnce() -> R,
) -> Result<R, (Box<dyn std::any::Any + Send>, Option<PanicSite>)> {
    install_hook();
    // A panic caught inside `f` by its own code may have left a site behind.
    LAST_SITE.with(|slot| slot.borrow_mut().take());
    let outcome = {
        let _guard = DepthGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    outcome.map_err(|payload| {
        let site = LAST_SITE.with(|slot| slot.borrow_mut().take());
        (payload, site)
    })
}

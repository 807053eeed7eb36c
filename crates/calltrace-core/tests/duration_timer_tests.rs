//! DurationTimer Tests
//!
//! This test suite verifies that a timed call emits exactly one `finished`
//! record with its measured duration, returns the inner result unchanged and
//! lets panics propagate without a record.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use calltrace_core::logging_facility::test_capture::init_test_capture;
use calltrace_core::types::schema::{EVENT_FINISHED, FIELD_DURATION_MS, FIELD_ELAPSED_SECS};
use calltrace_core::{function, Invocable, InvocableExt};
use proptest::prelude::*;
use tracing::Level;

use common::SteppingClock;

#[test]
fn test_emits_single_finished_record() {
    let capture = init_test_capture();
    let name = "dt_single_record_unique_1";

    let timed = function(name, |(a, b): (u32, u32)| a * b).timed();
    assert_eq!(timed.call((6, 7)), 42);

    let events = capture.events_for(name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::INFO);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_FINISHED));

    let message = events[0].message.clone().unwrap_or_default();
    assert!(
        message.starts_with(&format!("Finished {name} in ")) && message.ends_with(" secs"),
        "unexpected message: {message}"
    );
}

#[test]
fn test_duration_formatted_to_four_decimals() {
    let capture = init_test_capture();
    let name = "dt_four_decimals_unique_2";

    let timed = function(name, |(): ()| "done")
        .timed()
        .with_clock(SteppingClock::new(Duration::from_micros(1_234_567)));
    timed.call(());

    assert_eq!(
        capture.messages_for(name),
        vec![format!("Finished {name} in 1.2346 secs")]
    );
    let event = &capture.events_for(name)[0];
    assert_eq!(event.field(FIELD_DURATION_MS), Some("1234"));
}

#[test]
fn test_duration_is_non_negative_with_real_clock() {
    let capture = init_test_capture();
    let name = "dt_real_clock_unique_3";

    function(name, |(ms,): (u64,)| std::thread::sleep(Duration::from_millis(ms)))
        .timed()
        .call((5,));

    let event = &capture.events_for(name)[0];
    let secs: f64 = event
        .field(FIELD_ELAPSED_SECS)
        .expect("elapsed_secs field")
        .parse()
        .expect("numeric elapsed_secs");
    assert!(secs >= 0.005, "slept 5ms but measured {secs}");
}

#[test]
fn test_err_results_are_timed_and_returned() {
    let capture = init_test_capture();
    let name = "dt_err_result_unique_4";

    let timed = function(name, |(s,): (&str,)| s.parse::<i32>()).timed();
    assert!(timed.call(("not a number",)).is_err());

    capture.assert_event_exists(name, EVENT_FINISHED);
}

#[test]
fn test_panic_propagates_without_record() {
    let capture = init_test_capture();
    let name = "dt_panic_unique_5";

    let timed = function(name, |(): ()| -> u8 { panic!("inner failure") }).timed();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| timed.call(())));

    assert!(outcome.is_err(), "panic must reach the caller");
    assert!(capture.events_for(name).is_empty());
}

#[test]
fn test_timer_reports_inner_name() {
    let timed = function("dt_named_unique_6", |(): ()| ()).timed();
    assert_eq!(calltrace_core::Named::name(&timed), "dt_named_unique_6");
}

proptest! {
    #[test]
    fn prop_timed_call_is_value_identity(v in proptest::collection::vec(any::<i64>(), 0..16)) {
        let reverse = |(mut v,): (Vec<i64>,)| { v.reverse(); v };
        let timed = function("dt_prop_reverse", reverse).timed();
        prop_assert_eq!(timed.call((v.clone(),)), reverse((v,)));
    }
}

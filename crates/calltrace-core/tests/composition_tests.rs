//! Composition Tests
//!
//! This test suite verifies how `CallLogger` and `DurationTimer` interleave
//! their records when stacked in either order, on success, `Err` and panic.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use calltrace_core::logging_facility::test_capture::init_test_capture;
use calltrace_core::types::schema::{
    EVENT_CALL, EVENT_ENTER, EVENT_ERROR, EVENT_FINISHED, EVENT_LEAVE, EVENT_RETURN,
};
use calltrace_core::{function, CallLogger, DurationTimer, Invocable, InvocableExt, Kw, Named};

#[test]
fn test_timer_inside_logger_record_order() {
    let capture = init_test_capture();
    let name = "comp_order_unique_1";

    let test_func = function(name, |(a, b): (i32, Kw<i32>)| Ok::<_, String>((a, *b)))
        .timed()
        .logged();

    assert_eq!(test_func.call((1, Kw::new("b", 7))), Some((1, 7)));
    assert_eq!(
        capture.event_names_for(name),
        vec![EVENT_ENTER, EVENT_CALL, EVENT_FINISHED, EVENT_RETURN, EVENT_LEAVE]
    );

    let messages = capture.messages_for(name);
    assert_eq!(messages[0], format!("Entering {name}"));
    assert_eq!(messages[1], format!("Calling {name}(1, b=7)"));
    assert!(messages[2].starts_with(&format!("Finished {name} in ")));
    assert_eq!(messages[3], format!("{name} returned value: (1, 7)"));
    assert_eq!(messages[4], format!("Leaving {name}"));
}

#[test]
fn test_explicit_constructors_compose_like_combinators() {
    let capture = init_test_capture();
    let name = "comp_explicit_unique_2";

    let test_func = CallLogger::new(DurationTimer::new(function(name, |(x,): (u8,)| {
        Ok::<_, String>(x)
    })));

    assert_eq!(test_func.name(), name);
    assert_eq!(test_func.call((5,)), Some(5));
    assert_eq!(capture.event_names_for(name).len(), 5);
}

#[test]
fn test_inner_panic_skips_timer_record_and_is_logged() {
    let capture = init_test_capture();
    let name = "comp_panic_unique_3";

    let test_func = function(name, |(): ()| -> Result<(), String> { panic!("worker crashed") })
        .timed()
        .logged();

    assert_eq!(test_func.call(()), None);
    assert_eq!(
        capture.event_names_for(name),
        vec![EVENT_ENTER, EVENT_CALL, EVENT_ERROR]
    );
    assert_eq!(
        capture.messages_for(name).last().map(String::as_str),
        Some("worker crashed")
    );
}

#[test]
fn test_logger_inside_timer_times_the_logged_call() {
    let capture = init_test_capture();
    let name = "comp_reversed_unique_4";

    let test_func = function(name, |(): ()| Err::<(), _>("refused"))
        .logged()
        .timed();

    assert_eq!(test_func.call(()), None);
    assert_eq!(
        capture.event_names_for(name),
        vec![EVENT_ENTER, EVENT_CALL, EVENT_ERROR, EVENT_FINISHED]
    );
}

#[test]
fn test_wrappers_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let test_func = function("comp_threads_unique_5", |(x,): (u64,)| Ok::<_, String>(x + 1))
        .timed()
        .logged();
    assert_send_sync(&test_func);

    let results: Vec<Option<u64>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4u64)
            .map(|i| {
                let f = &test_func;
                s.spawn(move || f.call((i,)))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, vec![Some(1), Some(2), Some(3), Some(4)]);
}

#[test]
fn test_plain_value_function_is_logged_through_infallible() {
    let capture = init_test_capture();
    let name = "comp_plain_value_unique_6";

    let add = function(name, |(a, b): (i32, i32)| a + b)
        .infallible()
        .logged();

    assert_eq!(add.call((2, 3)), Some(5));
    assert_eq!(
        capture.event_names_for(name),
        vec![EVENT_ENTER, EVENT_CALL, EVENT_RETURN, EVENT_LEAVE]
    );
    assert!(capture
        .messages_for(name)
        .contains(&format!("{name} returned value: 5")));
}

#[test]
fn test_stacked_loggers_nest_their_records() {
    let capture = init_test_capture();
    let name = "comp_stacked_unique_7";

    let twice = function(name, |(x,): (i32,)| Ok::<_, String>(x * 2))
        .logged()
        .infallible()
        .logged();

    assert_eq!(twice.call((4,)), Some(Some(8)));
    assert_eq!(
        capture.event_names_for(name),
        vec![
            EVENT_ENTER,
            EVENT_CALL,
            EVENT_ENTER,
            EVENT_CALL,
            EVENT_RETURN,
            EVENT_LEAVE,
            EVENT_RETURN,
            EVENT_LEAVE,
        ]
    );
    assert!(capture
        .messages_for(name)
        .contains(&format!("{name} returned value: Some(8)")));
}

#[test]
fn test_stacked_loggers_inner_failure_reaches_outer_as_none() {
    let capture = init_test_capture();
    let name = "comp_stacked_failure_unique_8";

    let failing = function(name, |(): ()| Err::<u8, _>("inner refused"))
        .logged()
        .infallible()
        .logged();

    assert_eq!(failing.call(()), Some(None));
    assert_eq!(
        capture.event_names_for(name),
        vec![
            EVENT_ENTER,
            EVENT_CALL,
            EVENT_ENTER,
            EVENT_CALL,
            EVENT_ERROR,
            EVENT_RETURN,
            EVENT_LEAVE,
        ]
    );
}

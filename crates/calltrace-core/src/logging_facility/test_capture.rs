//! Test capture mode for deterministic logging assertions
//!
//! This module provides a test-only subscriber that captures log events
//! in memory for assertion in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::Visit;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use calltrace_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_FUNCTION, FIELD_MESSAGE};

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub function: Option<String>,
    pub event: Option<String>,
    pub message: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn is_for(&self, function: &str) -> bool {
        self.function.as_deref() == Some(function)
    }

    /// Look up a recorded field by its schema key (`FIELD_*`)
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    fn insert(&mut self, field: &tracing::field::Field, value: String) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.insert(field, value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.insert(field, value.to_string());
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.insert(field, value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.insert(field, value.to_string());
    }
}

/// Test capture layer for collecting log events
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        let capture = TestCapture { events };
        (layer, capture)
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *metadata.level(),
            component: visitor.fields.get(FIELD_COMPONENT).cloned(),
            function: visitor.fields.get(FIELD_FUNCTION).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            message: visitor.fields.get(FIELD_MESSAGE).cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for accessing captured events in tests
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events emitted for one wrapped function, in emission order
    pub fn events_for(&self, function: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.is_for(function))
            .collect()
    }

    /// Event names emitted for one wrapped function, in emission order
    pub fn event_names_for(&self, function: &str) -> Vec<String> {
        self.events_for(function)
            .into_iter()
            .filter_map(|e| e.event)
            .collect()
    }

    /// Rendered messages emitted for one wrapped function, in emission order
    pub fn messages_for(&self, function: &str) -> Vec<String> {
        self.events_for(function)
            .into_iter()
            .filter_map(|e| e.message)
            .collect()
    }

    /// Assert that an event exists for the given function and event name
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, function: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.is_for(function) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event function={} event={} not found in {} captured events",
            function,
            event,
            events.len()
        );
    }

    /// Clear all captured events
    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize test capture mode
///
/// This should be called at the start of each test that needs to capture logs.
/// Returns a shared global capture instance. Tests share the capture, so
/// each test should wrap functions with a name no other test uses.
///
/// # Example
///
/// ```
/// use calltrace_core::logging_facility::test_capture::init_test_capture;
/// use calltrace_core::log_call_enter;
///
/// let capture = init_test_capture();
/// log_call_enter!("my_function", "Entering my_function");
/// capture.assert_event_exists("my_function", "enter");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}

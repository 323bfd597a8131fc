//! In-memory event capture for logging assertions
//!
//! Every event is recorded as a map of field name to rendered value. All
//! tests in a binary share one global subscriber, so lookups always go
//! through an op name and each test should log under names of its own.

use mongodiff_core_types::schema::{FIELD_EVENT, FIELD_OP};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Fields of one captured event
#[derive(Clone, Debug, Default)]
pub struct CapturedEvent {
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct FieldVisitor<'a>(&'a mut HashMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type Events = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer(Events);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = CapturedEvent::default();
        event.record(&mut FieldVisitor(&mut captured.fields));
        if let Ok(mut events) = self.0.lock() {
            events.push(captured);
        }
    }
}

/// Handle onto the shared capture buffer
#[derive(Clone)]
pub struct TestCapture(Events);

impl TestCapture {
    /// Events logged for `op` with the given `event` name, in log order
    pub fn events_for(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.0
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.field(FIELD_OP) == Some(op) && e.field(FIELD_EVENT) == Some(event))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber on first use
///
/// ```
/// use mongodiff_core::logging_facility::test_capture::init_test_capture;
/// use mongodiff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// assert_eq!(capture.events_for("doc_example_op", "start").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Events::default();
            tracing_subscriber::registry()
                .with(CaptureLayer(events.clone()))
                .init();
            TestCapture(events)
        })
        .clone()
}

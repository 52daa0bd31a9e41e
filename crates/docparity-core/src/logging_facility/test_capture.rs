//! In-memory capture of log events for assertions in tests
//!
//! Each captured event carries its own fields plus the `run_id` of the
//! enclosing `parity_run` span, so tests running concurrently in one process
//! can pick out the events of their own run.

use docparity_core_types::schema::{FIELD_DOC_TYPE, FIELD_EVENT, FIELD_OP, FIELD_RUN_ID};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub doc_type: Option<String>,
    /// Inherited from the innermost span that recorded a `run_id`
    pub run_id: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

/// Field values rendered to strings; `Debug` output for anything else
#[derive(Default)]
struct Fields(HashMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

// Numeric and bool values go through `record_debug`, whose output for these
// types equals their `Display` output.

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    sink: Sink,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(fields);
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        let fields = fields.0;

        let run_id = ctx.event_scope(event).and_then(|scope| {
            scope
                .filter_map(|span| {
                    span.extensions()
                        .get::<Fields>()
                        .and_then(|f| f.0.get(FIELD_RUN_ID).cloned())
                })
                .next()
        });

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            doc_type: fields.get(FIELD_DOC_TYPE).cloned(),
            run_id,
            fields,
        };
        if let Ok(mut events) = self.sink.lock() {
            events.push(captured);
        }
    }
}

/// Handle onto the process-wide capture
#[derive(Clone)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events emitted inside the run with this id
    pub fn events_for_run(&self, run_id: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.run_id.as_deref() == Some(run_id))
    }

    /// Events emitted for one document type
    pub fn events_for_doc_type(&self, doc_type: &str) -> Vec<CapturedEvent> {
        self.filtered(|e| e.doc_type.as_deref() == Some(doc_type))
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.filtered(predicate).len()
    }

    /// # Panics
    ///
    /// Panics if no captured event has this `op` and `event`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    fn filtered<F>(&self, predicate: F) -> Vec<CapturedEvent>
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().into_iter().filter(|e| predicate(e)).collect()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber (first call only) and return its handle
///
/// The capture is shared by every test in the process; filter by run id,
/// doc type or a unique `op`.
///
/// # Example
///
/// ```
/// use docparity_core::logging_facility::test_capture::init_test_capture;
/// use docparity_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("my_operation");
/// capture.assert_event_exists("my_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let sink = Sink::default();
            let layer = CaptureLayer { sink: sink.clone() };
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { sink }
        })
        .clone()
}

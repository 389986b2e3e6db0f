//! # Test Support
//!
//! Helpers for asserting on what the container did, without a global
//! subscriber and without sleeping.
//!
//! - [`LogCapture`] is a `tracing` layer that records every event into memory.
//!   Install it for one closure with [`LogCapture::run`] and then assert on the
//!   warnings and errors the container emitted.
//! - [`CallLog`] is a shared, ordered list of strings that lifecycle hooks can
//!   append to, so tests can check hook ordering across beans.
//!
//! ```rust
//! use bean_container::testing::LogCapture;
//! use bean_container::Container;
//! use std::sync::Arc;
//!
//! struct Plain;
//! impl bean_container::Component for Plain {}
//!
//! let capture = LogCapture::new();
//! capture.run(|| {
//!     let container = Container::new();
//!     container.register(Arc::new(Plain));
//!     container.register(Arc::new(Plain));
//! });
//! assert!(capture.contains("Type already registered"));
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One recorded `tracing` event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Layer recording events in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this layer as the thread's default subscriber.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Whether any event message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.events.lock().iter().any(|e| e.message.contains(needle))
    }

    /// Number of events whose message contains `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.message.contains(needle))
            .count()
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.has(Level::WARN, needle)
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.has(Level::ERROR, needle)
    }

    fn has(&self, level: Level, needle: &str) -> bool {
        self.events
            .lock()
            .iter()
            .any(|e| e.level == level && e.message.contains(needle))
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl fmt::Debug for LogCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogCapture")
            .field("events", &self.events.lock().len())
            .finish()
    }
}

impl<S> Layer<S> for LogCapture
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name().to_string(), format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Ordered record of calls, shared between beans and the test body.
#[derive(Clone, Default, Debug)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Position of the first call equal to `call`.
    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls.lock().iter().position(|c| c == call)
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{info, warn};

    #[test]
    fn test_capture_records_level_message_and_fields() {
        let capture = LogCapture::new();
        capture.run(|| {
            info!(bean = "A", "first");
            warn!(count = 2, "second");
        });

        let events = capture.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].level, Level::INFO);
        assert_eq!(events[0].field("bean"), Some("A"));
        assert_eq!(events[1].field("count"), Some("2"));
        assert!(capture.has_warning("second"));
        assert!(!capture.has_error("second"));
    }

    #[test]
    fn test_capture_is_scoped_to_closure() {
        let capture = LogCapture::new();
        capture.run(|| info!("inside"));
        info!("outside");
        assert_eq!(capture.count("inside"), 1);
        assert!(!capture.contains("outside"));
    }

    #[test]
    fn test_call_log_keeps_order() {
        let log = CallLog::new();
        let shared = log.clone();
        shared.record("a");
        log.record("b");
        assert_eq!(log.calls(), vec!["a", "b"]);
        assert_eq!(log.position("b"), Some(1));
        assert_eq!(log.position("c"), None);
    }
}

//! Bridge from tracing to a named logger

use crate::{Level, Logger, Record};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{Event, Subscriber, field::Visit};
use tracing_subscriber::{Layer, layer::Context, registry::LookupSpan};

/// A tracing layer that forwards events to a logger
pub struct TracingBridge<S> {
    logger: Arc<dyn Logger>,
    _phantom: std::marker::PhantomData<fn(S)>,
}

impl<S> TracingBridge<S> {
    /// Create a new tracing bridge
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S> Layer<S> for TracingBridge<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let level = match *event.metadata().level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::TRACE => Level::Trace,
        };

        if !self.logger.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let spans: Vec<&str> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();

        let text = visitor.finish();
        let message = if spans.is_empty() {
            text
        } else {
            format!("{}: {text}", spans.join("::"))
        };

        let mut record = Record::new(level, message).with_target(event.metadata().target());

        if let (Some(file), Some(line)) = (event.metadata().file(), event.metadata().line()) {
            record = record.with_location(file, line);
        }

        self.logger.log(record);
    }
}

/// Visitor to extract the message and fields from tracing events
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        let _ = write!(&mut self.fields, " {name}={value}");
    }

    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.push_field(field.name(), value);
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.push_field(field.name(), value);
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.push_field(field.name(), value);
    }
}

/// Install a global subscriber that forwards all tracing events to `logger`
///
/// # Example
/// ```no_run
/// use cli_logger::{ConsoleSink, Formatter, Level, NamedLogger, compat::init_tracing_bridge};
/// use std::sync::Arc;
///
/// let formatter = Arc::new(Formatter::new("{level} {message}").unwrap());
/// let logger = NamedLogger::new("app", Level::Info)
///     .with_sink(ConsoleSink::new(Level::Info, formatter));
/// init_tracing_bridge(Arc::new(logger)).expect("Failed to set tracing bridge");
/// ```
pub fn init_tracing_bridge(logger: Arc<dyn Logger>) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(TracingBridge::new(logger))
        .try_init()?;

    Ok(())
}

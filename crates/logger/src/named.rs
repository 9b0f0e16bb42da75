//! A named logger that fans records out to its sinks

use crate::{Level, Logger, Record, Sink};
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

/// Logger bound to a name, owning its sinks
///
/// Sinks can only be attached through `&mut self`, so once a logger is
/// shared behind an `Arc` its sink set is fixed.
pub struct NamedLogger {
    name: String,
    level: Level,
    sinks: Vec<Box<dyn Sink>>,
    sink_errors: AtomicU64,
}

impl NamedLogger {
    /// Create a logger with no sinks
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level,
            sinks: Vec::new(),
            sink_errors: AtomicU64::new(0),
        }
    }

    /// Attach a sink
    pub fn add_sink(&mut self, sink: Box<dyn Sink>) {
        self.sinks.push(sink);
    }

    /// Builder-style variant of [`NamedLogger::add_sink`]
    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    /// Minimum level accepted by the logger itself
    pub fn level(&self) -> Level {
        self.level
    }

    /// Attached sinks, in attachment order
    pub fn sinks(&self) -> &[Box<dyn Sink>] {
        &self.sinks
    }

    /// Failed sink writes and flushes since the logger was created
    pub fn sink_errors(&self) -> u64 {
        self.sink_errors.load(Ordering::Relaxed)
    }

    fn report_sink_error(&self, sink: &dyn Sink, action: &str, error: io::Error) {
        self.sink_errors.fetch_add(1, Ordering::Relaxed);
        eprintln!(
            "Failed to {action} {:?} sink of logger '{}': {error}",
            sink.kind(),
            self.name
        );
    }
}

impl fmt::Debug for NamedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLogger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field(
                "sinks",
                &self.sinks.iter().map(|s| (s.kind(), s.threshold())).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Logger for NamedLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, record: Record<'_>) {
        if record.level < self.level {
            return;
        }

        let record = if record.logger.is_none() {
            record.with_logger(&self.name)
        } else {
            record
        };

        for sink in self.sinks.iter().filter(|sink| sink.is_enabled(record.level)) {
            if let Err(e) = sink.emit(&record) {
                self.report_sink_error(sink.as_ref(), "write to", e);
            }
        }
    }

    fn flush(&self) {
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                self.report_sink_error(sink.as_ref(), "flush", e);
            }
        }
    }

    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.level && self.sinks.iter().any(|sink| sink.is_enabled(level))
    }
}

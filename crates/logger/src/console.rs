//! Console sink

use crate::{Formatter, Level, Record, Sink, SinkKind};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Where console output goes
#[derive(Clone, Default)]
pub enum ConsoleTarget {
    /// Standard output
    Stdout,
    /// Standard error
    #[default]
    Stderr,
    /// Any shared writer (useful for capturing output)
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl ConsoleTarget {
    /// Wrap a writer as a console target
    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        Self::Writer(Arc::new(Mutex::new(writer)))
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Self::Stderr => {
                let mut out = io::stderr().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Self::Writer(writer) => {
                let mut out = writer.lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::Stderr => io::stderr().flush(),
            Self::Writer(writer) => writer.lock().flush(),
        }
    }
}

impl fmt::Debug for ConsoleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Sink that writes one formatted line per record to the console
#[derive(Debug)]
pub struct ConsoleSink {
    target: ConsoleTarget,
    threshold: Level,
    formatter: Arc<Formatter>,
}

impl ConsoleSink {
    /// Create a console sink writing to standard error
    pub fn new(threshold: Level, formatter: Arc<Formatter>) -> Self {
        Self {
            target: ConsoleTarget::default(),
            threshold,
            formatter,
        }
    }

    /// Write to a different console target
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }
}

impl Sink for ConsoleSink {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        self.target.write_line(&self.formatter.format(record))
    }

    fn flush(&self) -> io::Result<()> {
        self.target.flush()
    }
}

//! Bridge from the `log` crate to a named logger

use crate::{Level, Logger, Record};
use log::{Log, Metadata, Record as LogRecord};
use std::sync::Arc;

/// Wrapper to implement the log crate's Log trait
pub struct LogBridge {
    logger: Arc<dyn Logger>,
}

impl LogBridge {
    /// Create a new log bridge
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.logger.is_enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let mut bridged = Record::new(map_level(record.level()), message).with_target(record.target());

        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            bridged = bridged.with_location(file, line);
        }

        self.logger.log(bridged);
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

/// Map log levels to our levels
fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

/// Route every `log` macro call in the process to `logger`
///
/// # Example
/// ```no_run
/// use cli_logger::{ConsoleSink, Formatter, Level, NamedLogger, compat::init_log_bridge};
/// use std::sync::Arc;
///
/// let formatter = Arc::new(Formatter::new("{level} {message}").unwrap());
/// let logger = NamedLogger::new("app", Level::Info)
///     .with_sink(ConsoleSink::new(Level::Info, formatter));
/// init_log_bridge(Arc::new(logger)).expect("Failed to set log bridge");
/// ```
pub fn init_log_bridge(logger: Arc<dyn Logger>) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

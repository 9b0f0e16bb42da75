//! Core logger trait

use crate::{Level, Record};
use std::borrow::Cow;

/// Core logger trait
pub trait Logger: Send + Sync + 'static {
    /// Name the logger was registered under
    fn name(&self) -> &str;

    /// Log a record
    fn log(&self, record: Record<'_>);

    /// Flush any buffered logs
    fn flush(&self);

    /// Check if a level is enabled (for fast filtering)
    fn is_enabled(&self, level: Level) -> bool;
}

/// Extension trait for convenient logging methods
pub trait LoggerExt: Logger {
    /// Log at an arbitrary level
    #[inline]
    fn log_at(&self, level: Level, msg: impl Into<Cow<'static, str>>) {
        if self.is_enabled(level) {
            let message: Cow<'static, str> = msg.into();
            self.log(Record::new(level, message).with_target(self.name()));
        }
    }

    /// Log a critical failure
    #[inline]
    fn critical(&self, msg: impl Into<Cow<'static, str>>) {
        self.log_at(Level::Critical, msg);
    }

    /// Log an error
    #[inline]
    fn error(&self, msg: impl Into<Cow<'static, str>>) {
        self.log_at(Level::Error, msg);
    }

    /// Log a warning
    #[inline]
    fn warn(&self, msg: impl Into<Cow<'static, str>>) {
        self.log_at(Level::Warn, msg);
    }

    /// Log info
    #[inline]
    fn info(&self, msg: impl Into<Cow<'static, str>>) {
        self.log_at(Level::Info, msg);
    }

    /// Log debug
    #[inline]
    fn debug(&self, msg: impl Into<Cow<'static, str>>) {
        self.log_at(Level::Debug, msg);
    }

    /// Log trace
    #[inline]
    fn trace(&self, msg: impl Into<Cow<'static, str>>) {
        self.log_at(Level::Trace, msg);
    }
}

// Implement for all loggers
impl<T: Logger + ?Sized> LoggerExt for T {}

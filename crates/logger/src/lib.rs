//! Named loggers with leveled records and pluggable sinks
//!
//! This crate provides the logging substrate used by the logger factory:
//! - `Level` and `Record` describe a single log event
//! - `Formatter` renders records from a `{placeholder}` template
//! - `Sink` is an output destination with its own severity threshold
//! - `NamedLogger` owns a set of sinks and fans records out to them
//!
//! Bridges for the `log` and `tracing` crates are available behind the
//! `log-compat` and `tracing-compat` features.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod console;
mod error;
mod formatter;
mod level;
mod logger;
mod named;
mod record;
mod sink;

pub mod compat;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use console::{ConsoleSink, ConsoleTarget};
pub use error::{Error, Result};
pub use formatter::Formatter;
pub use level::{Level, ParseLevelError};
pub use logger::{Logger, LoggerExt};
pub use named::NamedLogger;
pub use record::Record;
pub use sink::{Sink, SinkKind};

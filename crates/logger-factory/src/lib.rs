//! Factory for configured, cached named loggers
//!
//! `get_logger(name, overrides)` returns the logger registered under `name`,
//! building it on first use with a console sink and, unless disabled, a
//! size-rotated file sink:
//!
//! ```no_run
//! use cli_logger::{Level, LoggerExt};
//! use cli_logger_factory::{LoggerOverrides, get_logger};
//!
//! let logger = get_logger(
//!     "cli",
//!     Some(
//!         LoggerOverrides::new()
//!             .log_file_path("logs/cli.log")
//!             .console_level(Level::Warn),
//!     ),
//! )?;
//! logger.info("written to the file only");
//! # Ok::<(), cli_logger_factory::Error>(())
//! ```
//!
//! Tests and embedders that need isolation should create their own
//! [`LoggerRegistry`] instead of using the process-wide one.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod registry;

pub use config::{LoggerConfig, LoggerOverrides, ValidatedConfig, defaults};
pub use error::{Error, Result};
pub use registry::{LoggerRegistry, get_logger, global};

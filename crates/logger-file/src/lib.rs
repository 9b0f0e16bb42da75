//! File-based sink with size rotation
//!
//! This crate provides a sink for `cli-logger` that:
//! - Appends formatted records to a file, one per line
//! - Rotates the file once it grows past a size limit
//! - Keeps a bounded number of rotated backups (`app_r00000.log`, ...)
//!
//! Rotation and cleanup are done by `flexi_logger`'s file writer.

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod writer;

pub use config::{FileSinkConfig, RotationPolicy};
pub use error::{Error, Result};
pub use writer::{RotatingFileSink, list_backups, prepare_parent_dir};

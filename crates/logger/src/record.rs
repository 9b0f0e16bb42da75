//! Log record type

use crate::Level;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// A single log event
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Log level
    pub level: Level,
    /// The log message
    pub message: Cow<'a, str>,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
    /// Target module
    pub target: &'a str,
    /// File location
    pub file: Option<&'a str>,
    /// Line number
    pub line: Option<u32>,
    /// Name of the logger that emitted the record
    pub logger: Option<&'a str>,
}

impl<'a> Record<'a> {
    /// Create a new record stamped with the current time
    #[inline]
    pub fn new(level: Level, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            target: module_path!(),
            file: None,
            line: None,
            logger: None,
        }
    }

    /// Builder-style method for setting target
    #[inline]
    pub fn with_target(mut self, target: &'a str) -> Self {
        self.target = target;
        self
    }

    /// Builder-style method for setting location
    #[inline]
    pub fn with_location(mut self, file: &'a str, line: u32) -> Self {
        self.file = Some(file);
        self.line = Some(line);
        self
    }

    /// Builder-style method for setting the emitting logger's name
    #[inline]
    pub fn with_logger(mut self, logger: &'a str) -> Self {
        self.logger = Some(logger);
        self
    }
}

//! Output destinations

use crate::{Level, Record};
use std::io;

/// What kind of destination a sink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Standard output, standard error or a custom console writer
    Console,
    /// A file on disk
    File,
}

/// An output destination with its own severity threshold
pub trait Sink: Send + Sync {
    /// Minimum level this sink writes
    fn threshold(&self) -> Level;

    /// Destination kind
    fn kind(&self) -> SinkKind;

    /// Whether a record at `level` passes this sink's threshold
    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        level >= self.threshold()
    }

    /// Format and write one record
    fn emit(&self, record: &Record<'_>) -> io::Result<()>;

    /// Flush buffered output
    fn flush(&self) -> io::Result<()>;
}

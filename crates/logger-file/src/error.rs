//! Error types for file-based logging

use std::io;
use std::path::PathBuf;

/// Result type for file sink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while setting up or rotating a log file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create log directory
    #[error("Failed to create log directory '{}': {source}", path.display())]
    CreateDirectory {
        /// The directory that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to open the log file
    #[error("Failed to set up file handler for log file '{}': {source}", path.display())]
    Open {
        /// The log file path
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// The rotating writer rejected the log file
    #[error("Failed to set up rotation for log file '{}': {source}", path.display())]
    Writer {
        /// The log file path
        path: PathBuf,
        /// The underlying error
        source: flexi_logger::FlexiLoggerError,
    },
}

impl Error {
    /// The underlying I/O error, if the failure came from the filesystem
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::CreateDirectory { source, .. } | Self::Open { source, .. } => Some(source),
            Self::Writer { .. } => None,
        }
    }
}

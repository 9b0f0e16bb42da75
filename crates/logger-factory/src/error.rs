//! Error types for logger setup

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for factory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while building a logger
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range; nothing was created
    #[error("Invalid {field}: {value}. {reason}")]
    InvalidConfiguration {
        /// Offending option
        field: &'static str,
        /// Offending value as given
        value: String,
        /// What the value must satisfy
        reason: String,
    },

    /// Creating the log directory or opening the log file failed
    #[error(transparent)]
    Io(#[from] cli_logger_file::Error),

    /// Reading an overrides file failed
    #[error("Failed to read logger config '{}': {source}", path.display())]
    ReadConfig {
        /// The overrides file
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// An overrides file is not valid TOML or has unknown keys
    #[error("Invalid logger config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

impl Error {
    /// The underlying I/O error for filesystem failures
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io(e) => e.io_error(),
            Self::ReadConfig { source, .. } => Some(source),
            _ => None,
        }
    }
}

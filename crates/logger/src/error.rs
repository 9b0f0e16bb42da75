//! Error types for the logging substrate

use thiserror::Error;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing a format template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Template names a placeholder that is not recognised
    #[error("Unknown placeholder {{{0}}} in format template")]
    UnknownPlaceholder(String),

    /// A `{` was opened but never closed
    #[error("Unterminated placeholder starting at byte {0}")]
    UnterminatedPlaceholder(usize),

    /// A lone `}` that does not close a placeholder
    #[error("Unmatched '}}' at byte {0}")]
    UnmatchedBrace(usize),
}

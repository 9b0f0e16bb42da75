//! Configuration for the rotating file sink

use std::num::NonZeroU64;
use std::path::PathBuf;

/// When the log file is rotated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Append forever
    Never,
    /// Rotate once the active file grows past `max_bytes`
    Size {
        /// Size limit of the active file
        max_bytes: NonZeroU64,
        /// Rotated files kept next to the active one; `0` disables rotation
        backup_count: usize,
    },
}

impl RotationPolicy {
    /// Size-based rotation
    pub const fn size(max_bytes: NonZeroU64, backup_count: usize) -> Self {
        Self::Size {
            max_bytes,
            backup_count,
        }
    }
}

/// Where and how a rotating file sink writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSinkConfig {
    /// Active log file
    pub path: PathBuf,
    /// Rotation policy
    pub rotation: RotationPolicy,
}

impl FileSinkConfig {
    /// Create a config for `path` with the given rotation policy
    pub fn new(path: impl Into<PathBuf>, rotation: RotationPolicy) -> Self {
        Self {
            path: path.into(),
            rotation,
        }
    }
}

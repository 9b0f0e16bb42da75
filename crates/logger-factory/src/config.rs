//! Logger configuration and per-call overrides

use crate::{Error, Result};
use cli_logger::{Formatter, Level};
use cli_logger_file::RotationPolicy;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

/// Default values for every configuration option
pub mod defaults {
    use cli_logger::Level;

    /// File logging is on unless disabled
    pub const LOG_TO_FILE: bool = true;
    /// Relative to the working directory
    pub const LOG_FILE_PATH: &str = "logs/cli_tool.log";
    /// Minimum level accepted by the logger
    pub const MAIN_LEVEL: Level = Level::Info;
    /// Minimum level written to the console
    pub const CONSOLE_LEVEL: Level = Level::Info;
    /// Minimum level written to the log file
    pub const FILE_LEVEL: Level = Level::Info;
    /// Record template shared by all sinks
    pub const FORMAT: &str = "{timestamp} - {name} - {level} - {message}";
    /// 10 MiB
    pub const MAX_BYTES: i64 = 10 * 1024 * 1024;
    /// Rotated files kept next to the active one
    pub const BACKUP_COUNT: i64 = 3;
    /// Size rotation is on unless disabled
    pub const USE_ROTATING_HANDLER: bool = true;
}

/// Effective configuration for one logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Attach a rotating file sink
    pub log_to_file: bool,
    /// Active log file
    pub log_file_path: PathBuf,
    /// Minimum level accepted by the logger
    pub main_level: Level,
    /// Console sink threshold
    pub console_level: Level,
    /// File sink threshold
    pub file_level: Level,
    /// Format template, see [`cli_logger::Formatter`]
    pub format: String,
    /// Rotate once the file grows past this many bytes; must be positive
    pub max_bytes: i64,
    /// Rotated files to keep; must not be negative
    pub backup_count: i64,
    /// When false the file sink appends without rotating
    pub use_rotating_handler: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_to_file: defaults::LOG_TO_FILE,
            log_file_path: PathBuf::from(defaults::LOG_FILE_PATH),
            main_level: defaults::MAIN_LEVEL,
            console_level: defaults::CONSOLE_LEVEL,
            file_level: defaults::FILE_LEVEL,
            format: defaults::FORMAT.to_string(),
            max_bytes: defaults::MAX_BYTES,
            backup_count: defaults::BACKUP_COUNT,
            use_rotating_handler: defaults::USE_ROTATING_HANDLER,
        }
    }
}

/// Output of a successful [`LoggerConfig::validate`]
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Parsed format template
    pub formatter: Formatter,
    /// Rotation policy for the file sink
    pub rotation: RotationPolicy,
}

impl LoggerConfig {
    /// This configuration with every set override applied
    pub fn merged(&self, overrides: &LoggerOverrides) -> Self {
        let mut config = self.clone();

        if let Some(log_to_file) = overrides.log_to_file {
            config.log_to_file = log_to_file;
        }
        if let Some(path) = &overrides.log_file_path {
            config.log_file_path.clone_from(path);
        }
        if let Some(level) = overrides.main_level {
            config.main_level = level;
        }
        if let Some(level) = overrides.console_level {
            config.console_level = level;
        }
        if let Some(level) = overrides.file_level {
            config.file_level = level;
        }
        if let Some(format) = &overrides.format {
            config.format.clone_from(format);
        }
        if let Some(max_bytes) = overrides.max_bytes {
            config.max_bytes = max_bytes;
        }
        if let Some(backup_count) = overrides.backup_count {
            config.backup_count = backup_count;
        }
        if let Some(rotate) = overrides.use_rotating_handler {
            config.use_rotating_handler = rotate;
        }

        config
    }

    /// Check numeric limits and parse the format template
    ///
    /// Runs before any sink is built, so a rejected configuration never
    /// touches the filesystem.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let max_bytes = u64::try_from(self.max_bytes)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or_else(|| Error::InvalidConfiguration {
                field: "max_bytes",
                value: self.max_bytes.to_string(),
                reason: "It must be a positive integer.".to_string(),
            })?;

        let backup_count =
            usize::try_from(self.backup_count).map_err(|_| Error::InvalidConfiguration {
                field: "backup_count",
                value: self.backup_count.to_string(),
                reason: "It must be non-negative.".to_string(),
            })?;

        let formatter = Formatter::new(&self.format).map_err(|e| Error::InvalidConfiguration {
            field: "format",
            value: self.format.clone(),
            reason: e.to_string(),
        })?;

        let rotation = if self.use_rotating_handler {
            RotationPolicy::size(max_bytes, backup_count)
        } else {
            RotationPolicy::Never
        };

        Ok(ValidatedConfig {
            formatter,
            rotation,
        })
    }
}

/// Partial configuration; unset fields fall back to the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerOverrides {
    /// Attach a rotating file sink
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_to_file: Option<bool>,
    /// Active log file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<PathBuf>,
    /// Minimum level accepted by the logger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_level: Option<Level>,
    /// Console sink threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_level: Option<Level>,
    /// File sink threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_level: Option<Level>,
    /// Format template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Rotation size limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<i64>,
    /// Rotated files to keep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_count: Option<i64>,
    /// Enable size rotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_rotating_handler: Option<bool>,
}

impl LoggerOverrides {
    /// No overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read overrides from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set `log_to_file`
    pub fn log_to_file(mut self, enabled: bool) -> Self {
        self.log_to_file = Some(enabled);
        self
    }

    /// Set `log_file_path`
    pub fn log_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }

    /// Set `main_level`
    pub fn main_level(mut self, level: Level) -> Self {
        self.main_level = Some(level);
        self
    }

    /// Set `console_level`
    pub fn console_level(mut self, level: Level) -> Self {
        self.console_level = Some(level);
        self
    }

    /// Set `file_level`
    pub fn file_level(mut self, level: Level) -> Self {
        self.file_level = Some(level);
        self
    }

    /// Set `format`
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = Some(template.into());
        self
    }

    /// Set `max_bytes`
    pub fn max_bytes(mut self, max_bytes: i64) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Set `backup_count`
    pub fn backup_count(mut self, backup_count: i64) -> Self {
        self.backup_count = Some(backup_count);
        self
    }

    /// Set `use_rotating_handler`
    pub fn use_rotating_handler(mut self, enabled: bool) -> Self {
        self.use_rotating_handler = Some(enabled);
        self
    }
}

//! Name-keyed cache of configured loggers

use crate::{LoggerConfig, LoggerOverrides, Result};
use cli_logger::{ConsoleSink, ConsoleTarget, Formatter, Logger, LoggerExt, NamedLogger};
use cli_logger_file::{FileSinkConfig, RotatingFileSink, RotationPolicy, prepare_parent_dir};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static GLOBAL: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::new);

/// The process-wide registry behind [`get_logger`]
pub fn global() -> &'static LoggerRegistry {
    &GLOBAL
}

/// Get or create `name` in the process-wide registry
///
/// See [`LoggerRegistry::get_logger`].
pub fn get_logger(name: &str, overrides: Option<LoggerOverrides>) -> Result<Arc<NamedLogger>> {
    GLOBAL.get_logger(name, overrides)
}

/// Cache of configured loggers, at most one per name
///
/// The first request for a name builds its logger; later requests return
/// the same instance and ignore their configuration. Construction happens
/// under the registry lock, so concurrent first requests for a name build
/// exactly one set of sinks.
#[derive(Debug)]
pub struct LoggerRegistry {
    defaults: LoggerConfig,
    console: ConsoleTarget,
    loggers: Mutex<HashMap<String, Arc<NamedLogger>>>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Empty registry using the default configuration and standard error
    pub fn new() -> Self {
        Self {
            defaults: LoggerConfig::default(),
            console: ConsoleTarget::default(),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Send console output of loggers built from now on to `target`
    pub fn with_console(mut self, target: ConsoleTarget) -> Self {
        self.console = target;
        self
    }

    /// Base configuration that overrides are applied to
    pub fn with_defaults(mut self, defaults: LoggerConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Return the cached logger for `name`, building it on first use
    ///
    /// On the first request the overrides are merged over the defaults and
    /// validated, then a console sink and (if enabled) a rotating file sink
    /// are attached. If any step fails nothing is cached, and the next call
    /// for `name` starts over.
    pub fn get_logger(
        &self,
        name: &str,
        overrides: Option<LoggerOverrides>,
    ) -> Result<Arc<NamedLogger>> {
        let mut loggers = self.loggers.lock();

        if let Some(logger) = loggers.get(name) {
            debug!(logger = name, "serving cached logger");
            return Ok(logger.clone());
        }

        let config = match &overrides {
            Some(overrides) => self.defaults.merged(overrides),
            None => self.defaults.clone(),
        };

        let logger = Arc::new(self.build(name, &config).inspect_err(|e| {
            warn!(logger = name, error = %e, "logger setup failed");
        })?);
        loggers.insert(name.to_string(), logger.clone());

        debug!(
            logger = name,
            sinks = logger.sinks().len(),
            "created logger"
        );
        Ok(logger)
    }

    /// Cached logger for `name`, without building one
    pub fn get(&self, name: &str) -> Option<Arc<NamedLogger>> {
        self.loggers.lock().get(name).cloned()
    }

    /// Whether `name` has been built
    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Number of cached loggers
    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    /// Whether no logger has been built yet
    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Names of all cached loggers, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Flush every sink of every cached logger
    pub fn flush_all(&self) {
        for logger in self.loggers.lock().values() {
            logger.flush();
        }
    }

    /// Flush and forget every cached logger
    ///
    /// Handles already given out keep working; the next request for a name
    /// builds a fresh logger.
    pub fn clear(&self) {
        let drained: Vec<_> = self.loggers.lock().drain().collect();
        for (_, logger) in drained {
            logger.flush();
        }
    }

    fn build(&self, name: &str, config: &LoggerConfig) -> Result<NamedLogger> {
        let validated = config.validate()?;
        let formatter = Arc::new(validated.formatter);

        let mut logger = NamedLogger::new(name, config.main_level);
        logger.add_sink(Box::new(
            ConsoleSink::new(config.console_level, formatter.clone())
                .with_target(self.console.clone()),
        ));

        if config.log_to_file {
            attach_file_sink(&mut logger, config, validated.rotation, formatter)?;
        }

        Ok(logger)
    }
}

fn attach_file_sink(
    logger: &mut NamedLogger,
    config: &LoggerConfig,
    rotation: RotationPolicy,
    formatter: Arc<Formatter>,
) -> Result<()> {
    let path = &config.log_file_path;

    prepare_parent_dir(path).inspect_err(|e| logger.error(e.to_string()))?;

    let sink = RotatingFileSink::open(
        FileSinkConfig::new(path.clone(), rotation),
        config.file_level,
        formatter,
    )
    .inspect_err(|e| logger.error(e.to_string()))?;

    logger.add_sink(Box::new(sink));
    Ok(())
}

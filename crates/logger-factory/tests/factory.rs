//! End-to-end tests for building loggers through a registry

use assert_matches::assert_matches;
use cli_logger::test_support::CaptureBuffer;
use cli_logger::{Level, Logger, LoggerExt, SinkKind};
use cli_logger_factory::{Error, LoggerConfig, LoggerOverrides, LoggerRegistry};
use cli_logger_file::list_backups;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn registry() -> (LoggerRegistry, CaptureBuffer) {
    let console = CaptureBuffer::new();
    let registry = LoggerRegistry::new().with_console(console.target());
    (registry, console)
}

fn file_overrides(path: &Path) -> LoggerOverrides {
    LoggerOverrides::new()
        .log_file_path(path)
        .format("{name} {level} {message}")
}

#[test]
fn test_same_name_returns_cached_instance() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _console) = registry();

    let first = registry
        .get_logger("cli", Some(file_overrides(&temp_dir.path().join("cli.log"))))
        .unwrap();
    let second = registry
        .get_logger(
            "cli",
            Some(LoggerOverrides::new().log_to_file(false).main_level(Level::Error)),
        )
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    // The second call's configuration was ignored
    assert_eq!(second.level(), Level::Info);
    assert_eq!(second.sinks().len(), 2);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_distinct_names_get_distinct_loggers() {
    let (registry, _console) = registry();
    let overrides = LoggerOverrides::new().log_to_file(false);

    let a = registry.get_logger("a", Some(overrides.clone())).unwrap();
    let b = registry.get_logger("b", Some(overrides)).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_invalid_max_bytes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _console) = registry();
    let path = temp_dir.path().join("nested/app.log");

    for bad in [0, -1] {
        let result = registry.get_logger("app", Some(file_overrides(&path).max_bytes(bad)));
        assert_matches!(
            result,
            Err(Error::InvalidConfiguration { field: "max_bytes", .. })
        );
    }

    // Validation happens before any filesystem work
    assert!(!temp_dir.path().join("nested").exists());
    assert!(!registry.contains("app"));

    registry
        .get_logger("app", Some(file_overrides(&path).max_bytes(1)))
        .unwrap();
    assert!(registry.contains("app"));
}

#[test]
fn test_invalid_backup_count() {
    let (registry, _console) = registry();
    let overrides = LoggerOverrides::new().log_to_file(false);

    let result = registry.get_logger("app", Some(overrides.clone().backup_count(-1)));
    assert_matches!(
        result,
        Err(Error::InvalidConfiguration { field: "backup_count", value, .. }) if value == "-1"
    );

    registry
        .get_logger("app", Some(overrides.backup_count(0)))
        .unwrap();
}

#[test]
fn test_console_only_creates_nothing_on_disk() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, console) = registry();
    let path = temp_dir.path().join("never/app.log");

    let logger = registry
        .get_logger("quiet", Some(file_overrides(&path).log_to_file(false)))
        .unwrap();
    logger.info("console only");

    assert_eq!(logger.sinks().len(), 1);
    assert_eq!(logger.sinks()[0].kind(), SinkKind::Console);
    assert!(!temp_dir.path().join("never").exists());
    assert_eq!(console.lines(), vec!["quiet INFO console only".to_string()]);
}

#[test]
fn test_nested_directories_are_created() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _console) = registry();
    let path = temp_dir.path().join("a/b/c/app.log");

    let logger = registry
        .get_logger("nested", Some(file_overrides(&path)))
        .unwrap();
    logger.warn("first message");
    logger.flush();

    assert!(temp_dir.path().join("a/b/c").is_dir());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "nested WARNING first message\n"
    );
    assert_eq!(logger.sinks()[1].kind(), SinkKind::File);
}

#[test]
fn test_rotation_bounds_backup_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _console) = registry();
    let path = temp_dir.path().join("rotating.log");

    let logger = registry
        .get_logger(
            "rotating",
            Some(file_overrides(&path).max_bytes(64).backup_count(2)),
        )
        .unwrap();

    for i in 0..50 {
        logger.info(format!("message number {i:02}"));
    }
    logger.flush();

    assert_eq!(list_backups(&path).unwrap().len(), 2);
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 3);
    assert!(
        fs::read_to_string(&path)
            .unwrap()
            .contains("rotating INFO message number 49")
    );
}

#[test]
fn test_rotation_disabled_keeps_single_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _console) = registry();
    let path = temp_dir.path().join("append.log");

    let logger = registry
        .get_logger(
            "append",
            Some(
                file_overrides(&path)
                    .max_bytes(16)
                    .use_rotating_handler(false),
            ),
        )
        .unwrap();

    for i in 0..10 {
        logger.info(format!("line {i}"));
    }
    logger.flush();

    assert!(list_backups(&path).unwrap().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 10);
}

#[test]
fn test_independent_sink_thresholds() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, console) = registry();
    let path = temp_dir.path().join("split.log");

    let logger = registry
        .get_logger(
            "split",
            Some(
                file_overrides(&path)
                    .console_level(Level::Warn)
                    .file_level(Level::Info),
            ),
        )
        .unwrap();

    logger.info("routine detail");
    logger.error("something broke");

    assert_eq!(console.lines(), vec!["split ERROR something broke".to_string()]);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "split INFO routine detail\nsplit ERROR something broke\n"
    );
}

#[test]
fn test_main_level_gates_every_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, console) = registry();
    let path = temp_dir.path().join("main.log");

    let logger = registry
        .get_logger(
            "main",
            Some(
                file_overrides(&path)
                    .main_level(Level::Error)
                    .console_level(Level::Debug)
                    .file_level(Level::Debug),
            ),
        )
        .unwrap();

    logger.warn("dropped by the logger");
    assert!(!logger.is_enabled(Level::Warn));
    assert!(console.logs().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    logger.critical("shutting down");
    logger.flush();
    assert_eq!(console.lines(), vec!["main CRITICAL shutting down".to_string()]);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "main CRITICAL shutting down\n"
    );
}

#[test]
fn test_registry_defaults_are_overridable() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let console = CaptureBuffer::new();
    let path = temp_dir.path().join("defaults.log");
    let registry = LoggerRegistry::new()
        .with_console(console.target())
        .with_defaults(LoggerConfig {
            log_to_file: false,
            main_level: Level::Warn,
            format: "[{name}] {message}".to_string(),
            ..LoggerConfig::default()
        });

    let plain = registry.get_logger("plain", None).unwrap();
    plain.info("below the registry default");
    plain.warn("from defaults");
    assert_eq!(plain.sinks().len(), 1);

    let tuned = registry
        .get_logger(
            "tuned",
            Some(
                LoggerOverrides::new()
                    .log_to_file(true)
                    .log_file_path(&path)
                    .main_level(Level::Debug),
            ),
        )
        .unwrap();
    tuned.info("from overrides");
    tuned.flush();

    assert_eq!(tuned.level(), Level::Debug);
    assert_eq!(tuned.sinks().len(), 2);
    assert_eq!(
        console.lines(),
        vec![
            "[plain] from defaults".to_string(),
            "[tuned] from overrides".to_string(),
        ]
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "[tuned] from overrides\n");
}

#[test]
fn test_directory_failure_is_reported_and_not_cached() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, console) = registry();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, b"a file, not a directory").unwrap();

    let result = registry.get_logger("broken", Some(file_overrides(&blocker.join("logs/app.log"))));

    let err = result.unwrap_err();
    assert_matches!(
        err,
        Error::Io(cli_logger_file::Error::CreateDirectory { .. })
    );
    assert!(err.io_error().is_some());
    assert!(console.contains("broken ERROR Failed to create log directory"));
    assert!(!registry.contains("broken"));

    // A later call starts from scratch
    let logger = registry
        .get_logger("broken", Some(LoggerOverrides::new().log_to_file(false)))
        .unwrap();
    assert_eq!(logger.sinks().len(), 1);
}

#[test]
fn test_file_open_failure_is_reported_and_not_cached() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, console) = registry();
    let dir_as_file = temp_dir.path().join("taken");
    fs::create_dir(&dir_as_file).unwrap();

    let result = registry.get_logger("open", Some(file_overrides(&dir_as_file)));

    assert_matches!(result, Err(Error::Io(cli_logger_file::Error::Open { .. })));
    assert!(console.contains("open ERROR Failed to set up file handler for log file"));
    assert!(registry.is_empty());
}

#[test]
fn test_concurrent_first_requests_build_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (registry, _console) = registry();
    let registry = Arc::new(registry);
    let path = temp_dir.path().join("shared.log");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            let overrides = file_overrides(&path);
            std::thread::spawn(move || registry.get_logger("shared", Some(overrides)).unwrap())
        })
        .collect();

    let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for logger in &loggers[1..] {
        assert!(Arc::ptr_eq(&loggers[0], logger));
    }
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_clear_forgets_loggers() {
    let (registry, _console) = registry();
    let overrides = LoggerOverrides::new().log_to_file(false);

    let before = registry.get_logger("temp", Some(overrides.clone())).unwrap();
    registry.flush_all();
    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.get("temp").is_none());

    let after = registry.get_logger("temp", Some(overrides)).unwrap();
    assert!(!Arc::ptr_eq(&before, &after));

    // Handles given out before the clear still work
    before.info("still usable");
}

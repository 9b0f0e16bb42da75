//! Rotating file sink backed by `flexi_logger`'s file writer

use crate::{Error, FileSinkConfig, Result, RotationPolicy};
use cli_logger::{Formatter, Level, Record, Sink, SinkKind};
use flexi_logger::writers::{FileLogWriter, LogWriter};
use flexi_logger::{Cleanup, Criterion, DeferredNow, FileSpec, Naming, WriteMode};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Infix between the file stem and the backup number, e.g. `app_r00003.log`
const BACKUP_INFIX: &str = "_r";

/// Create the parent directory of `path` (and any missing ancestors)
///
/// Paths without a parent component, such as `app.log`, need nothing.
pub fn prepare_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| Error::CreateDirectory {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Rotated backups of `path`, newest first
///
/// Backups sit next to the active file and carry an increasing number
/// between stem and extension: `logs/app.log` rotates to
/// `logs/app_r00000.log`, `logs/app_r00001.log`, ... The first entry is the
/// most recently rotated file.
pub fn list_backups(path: &Path) -> io::Result<Vec<PathBuf>> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let prefix = format!("{stem}{BACKUP_INFIX}");
    let suffix = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let mut numbered = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let number = name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(&suffix))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u64>().ok());
        if let Some(number) = number {
            numbered.push((number, entry.path()));
        }
    }

    numbered.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

/// Sink that appends records to a file and rotates it by size
pub struct RotatingFileSink {
    config: FileSinkConfig,
    threshold: Level,
    formatter: Arc<Formatter>,
    writer: FileLogWriter,
}

impl std::fmt::Debug for RotatingFileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFileSink")
            .field("config", &self.config)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl RotatingFileSink {
    /// Open (or create) the log file in append mode
    ///
    /// The parent directory must already exist; see [`prepare_parent_dir`].
    pub fn open(config: FileSinkConfig, threshold: Level, formatter: Arc<Formatter>) -> Result<Self> {
        let open_err = |source| Error::Open {
            path: config.path.clone(),
            source,
        };

        // The writer opens its file lazily; surface permission and
        // not-a-file errors here instead of on the first record.
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)
            .map_err(open_err)?;

        let writer = build_writer(&config).map_err(|source| Error::Writer {
            path: config.path.clone(),
            source,
        })?;

        Ok(Self {
            config,
            threshold,
            formatter,
            writer,
        })
    }

    /// Active log file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Write one already formatted line, rotating first if needed
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        LogWriter::write(
            &self.writer,
            &mut DeferredNow::new(),
            &log::Record::builder().args(format_args!("{line}")).build(),
        )
    }
}

fn build_writer(
    config: &FileSinkConfig,
) -> std::result::Result<FileLogWriter, flexi_logger::FlexiLoggerError> {
    let spec = FileSpec::try_from(config.path.clone())?.suppress_timestamp();
    let builder = FileLogWriter::builder(spec)
        .format(preformatted)
        .write_mode(WriteMode::Direct)
        .append();

    let builder = match config.rotation {
        RotationPolicy::Size {
            max_bytes,
            backup_count,
        } if backup_count > 0 => builder
            .rotate(
                Criterion::Size(max_bytes.get()),
                Naming::NumbersDirect,
                Cleanup::KeepLogFiles(backup_count),
            )
            .cleanup_in_background_thread(false),
        _ => builder,
    };

    builder.try_build()
}

/// Records reach the writer already rendered by our [`Formatter`]
fn preformatted(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &log::Record,
) -> io::Result<()> {
    write!(w, "{}", record.args())
}

impl Sink for RotatingFileSink {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        self.write_line(&self.formatter.format(record))
    }

    fn flush(&self) -> io::Result<()> {
        LogWriter::flush(&self.writer)
    }
}

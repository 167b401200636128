//! `log` backend for the daemon
//!
//! Every record goes to stderr. Enabled log types mirror it to the kernel
//! log device and/or the daemon log file.

use log::{Level, Log, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use super::{LogControl, LogLevel, LogSettings, LogType};
use crate::constants::{KMSG_DEVICE, LOG_FILE};

/// Identifier prefixed to mirrored kernel log lines
const KMSG_IDENT: &str = "bootd";

static LOGGER: OnceLock<BootLogger> = OnceLock::new();

/// Install the process-wide logger and return a handle to it.
///
/// Safe to call more than once; later calls return the logger installed by
/// the first. Never fails: if another `log` backend was already set, the
/// returned handle still works as a [`LogControl`] but receives no records.
pub fn init() -> &'static BootLogger {
    let logger = LOGGER.get_or_init(BootLogger::new);
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level().to_level_filter());
    }
    logger
}

/// Logger holding the live log settings
#[derive(Debug)]
pub struct BootLogger {
    /// Base instant that record timestamps and `elapsed` are measured from
    base: Instant,
    settings: RwLock<LogSettings>,
    kmsg_path: PathBuf,
    file_path: PathBuf,
}

impl Default for BootLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl BootLogger {
    pub fn new() -> Self {
        Self::with_sinks(KMSG_DEVICE, LOG_FILE)
    }

    /// Create a logger whose `kmsg` and `file` log types write to the given paths
    pub fn with_sinks(kmsg_path: impl Into<PathBuf>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            base: Instant::now(),
            settings: RwLock::new(LogSettings::default()),
            kmsg_path: kmsg_path.into(),
            file_path: file_path.into(),
        }
    }

    /// Time since the logger was created
    pub fn elapsed(&self) -> Duration {
        self.base.elapsed()
    }

    pub fn level(&self) -> LogLevel {
        self.read().level
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> LogSettings {
        self.read().clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, LogSettings> {
        self.settings.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LogSettings> {
        self.settings.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn format_line(&self, record: &Record) -> String {
        let elapsed = self.elapsed();
        format!(
            "[{:>5}.{:03}] {:<5} {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.args()
        )
    }

    /// Best-effort append; a missing or read-only sink never disturbs the caller.
    fn append(path: &Path, line: &str) {
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = write_record(&mut file, line);
        }
    }
}

/// Write `line` and its newline in a single call.
///
/// `/dev/kmsg` turns every `write()` into its own record, so the terminator
/// must not be written separately.
fn write_record<W: Write>(sink: &mut W, line: &str) -> std::io::Result<()> {
    let buf = format!("{}\n", line);
    sink.write_all(buf.as_bytes())
}

/// Syslog priority used in the kernel log prefix
fn kmsg_priority(level: Level) -> u8 {
    match level {
        Level::Error => 3,
        Level::Warn => 4,
        Level::Info => 6,
        Level::Debug | Level::Trace => 7,
    }
}

impl Log for BootLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level().to_level_filter()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_line(record);
        eprintln!("{}", line);

        let (kmsg, file) = {
            let settings = self.read();
            (settings.is_enabled(LogType::Kmsg), settings.is_enabled(LogType::File))
        };
        if kmsg {
            let kmsg_line = format!(
                "<{}>{}: {}",
                kmsg_priority(record.level()),
                KMSG_IDENT,
                record.args()
            );
            Self::append(&self.kmsg_path, &kmsg_line);
        }
        if file {
            let file_line = format!("{} {}", chrono::Utc::now().to_rfc3339(), line);
            Self::append(&self.file_path, &file_line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

impl LogControl for BootLogger {
    fn enable_log_type(&self, log_type: LogType) {
        self.write().enable(log_type);
    }

    fn change_log_level(&self, level: LogLevel) {
        self.write().level = level;
        log::set_max_level(level.to_level_filter());
    }
}

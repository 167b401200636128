//! Log configuration registry and the daemon's `log` backend
//!
//! The resolver never touches a global directly: it is handed a
//! [`LogControl`] and calls it for every log type it enables and every level
//! it selects. [`BootLogger`] is the production implementation; it is also
//! the `log::Log` backend installed by [`init`].

mod backend;

pub use backend::{init, BootLogger};

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Severity threshold names accepted in configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    #[default]
    Debug,
}

impl LogLevel {
    /// Resolve a level name, case-insensitively. `warn` is accepted for `warning`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additional outputs a configuration layer can switch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// Mirror records into the kernel log device
    Kmsg,
    /// Append records to the daemon log file
    File,
    /// Any name the daemon does not know; enabling it has no effect
    Unknown,
}

impl LogType {
    /// Resolve a log type name. Unrecognized names map to [`LogType::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "kmsg" => LogType::Kmsg,
            "file" => LogType::File,
            _ => LogType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Kmsg => "kmsg",
            LogType::File => "file",
            LogType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective log level plus the set of enabled log types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogSettings {
    pub level: LogLevel,
    pub enabled: BTreeSet<LogType>,
}

impl LogSettings {
    /// Enable a log type. Returns false for [`LogType::Unknown`], which is never stored.
    pub fn enable(&mut self, log_type: LogType) -> bool {
        if log_type == LogType::Unknown {
            return false;
        }
        self.enabled.insert(log_type);
        true
    }

    pub fn is_enabled(&self, log_type: LogType) -> bool {
        self.enabled.contains(&log_type)
    }
}

/// Handle through which configuration resolution drives the active logger
pub trait LogControl {
    /// Turn on an additional output. Unknown types are ignored.
    fn enable_log_type(&self, log_type: LogType);

    /// Replace the active severity threshold.
    fn change_log_level(&self, level: LogLevel);
}

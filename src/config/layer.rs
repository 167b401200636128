//! Configuration layers and how each one is applied
//!
//! A layer is a JSON object found under a selector key of the configuration
//! tree. Only `logger.logType` and `logger.logLevel` are recognized.

use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::constants::{KEY_LOGGER, KEY_LOGGER_LOG_LEVEL, KEY_LOGGER_LOG_TYPE};
use crate::logging::{LogControl, LogLevel, LogSettings, LogType};

/// Category a layer is selected by, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Common,
    Machine,
    Distro,
    DistroVariant,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selector::Common => "common",
            Selector::Machine => "machine",
            Selector::Distro => "distro",
            Selector::DistroVariant => "distro_variant",
        };
        f.write_str(name)
    }
}

/// Merge one layer into `settings`, forwarding every change to `control`.
///
/// Log types are unioned in; a log level replaces the current one. Anything
/// else in the layer is ignored.
pub fn apply_layer(layer: &Value, settings: &mut LogSettings, control: &dyn LogControl) {
    let Some(logger) = layer.get(KEY_LOGGER) else {
        return;
    };

    if let Some(log_types) = logger.get(KEY_LOGGER_LOG_TYPE) {
        match log_types.as_array() {
            Some(items) => {
                for item in items {
                    match item.as_str() {
                        Some(name) => {
                            let log_type = LogType::from_name(name);
                            settings.enable(log_type);
                            control.enable_log_type(log_type);
                        }
                        None => warn!("Ignoring non-string {} entry: {}", KEY_LOGGER_LOG_TYPE, item),
                    }
                }
            }
            None => warn!("Ignoring {}: expected an array, got {}", KEY_LOGGER_LOG_TYPE, log_types),
        }
    }

    if let Some(level) = logger.get(KEY_LOGGER_LOG_LEVEL) {
        match level.as_str().map(|name| (name, LogLevel::from_name(name))) {
            Some((_, Some(level))) => {
                settings.level = level;
                control.change_log_level(level);
            }
            Some((name, None)) => warn!("Ignoring unknown {} \"{}\"", KEY_LOGGER_LOG_LEVEL, name),
            None => warn!("Ignoring {}: expected a string, got {}", KEY_LOGGER_LOG_LEVEL, level),
        }
    }
}

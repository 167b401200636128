//! Data models module
//!
//! Defines the structures shared by the binary:
//! - RunConfig: Parsed command line
//! - Command: Which report to produce
//! - SystemReport: Diagnostic snapshot of the resolved configuration and probes

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{format_elapsed, ResolvedConfig, SourcePaths};

/// Report selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Full diagnostic report (default)
    Info,
    /// Clamped HDMI display count
    Displays,
    /// Network boot flag
    Netboot,
}

/// Configuration for a single invocation
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub command: Command,
    /// Configuration and kernel files to read
    pub paths: SourcePaths,
    /// DRM class directory to enumerate
    pub drm_root: PathBuf,
    /// Whether to output JSON format
    pub json_output: bool,
}

/// Everything `bootd info` reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemReport {
    pub device_type: String,
    pub distro: String,
    pub distro_variant: String,
    pub network_boot: bool,
    /// Omitted when the hostname file could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Configuration file resolution read from
    pub config_source: String,
    /// Layers applied, lowest precedence first
    pub applied_layers: Vec<String>,
    pub log_level: String,
    pub log_types: Vec<String>,
    /// Clamped to 1..=2
    pub display_count: u32,
    /// Seconds since the logger base instant, `<sec>.<ms>`
    pub time_diff: String,
}

impl SystemReport {
    pub fn new(config: &ResolvedConfig, display_count: u32, elapsed: Duration) -> Self {
        let target = config.target();
        Self {
            device_type: target.machine.clone(),
            distro: target.distro.clone(),
            distro_variant: target.distro_variant.clone(),
            network_boot: config.is_network_boot(),
            hostname: config.hostname().map(str::to_string),
            config_source: config.source().display().to_string(),
            applied_layers: config.applied().iter().map(|s| s.to_string()).collect(),
            log_level: config.log_level().to_string(),
            log_types: config.log().enabled.iter().map(|t| t.to_string()).collect(),
            display_count,
            time_diff: format_elapsed(elapsed),
        }
    }
}

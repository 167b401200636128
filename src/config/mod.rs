//! Effective daemon configuration
//!
//! Resolution reads one JSON file (the device-local debug file when present,
//! otherwise the shipped default) and applies its layers in a fixed order:
//! 1. `common`
//! 2. The machine identifier
//! 3. The distribution identifier
//! 4. The distribution variant identifier
//!
//! Later layers override the log level and add log types. Missing layers are
//! skipped. Resolution never fails: a missing or broken file leaves the
//! defaults in place and is logged.

pub mod layer;

pub use layer::{apply_layer, Selector};

use log::{error, info};
use nix::unistd::{access, AccessFlags};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::constants::{
    DEBUG_CONF_FILE, DEFAULT_CONF_FILE, ETC_HOSTNAME, KEY_COMMON, PROC_CMDLINE, TARGET_DISTRO,
    TARGET_DISTRO_VARIANT, TARGET_MACHINE,
};
use crate::logging::{LogControl, LogLevel, LogSettings};
use crate::probe::{probe_boot_facts, BootFacts};

/// Failures while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration {} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}

/// Files read during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    /// Replaces `default_conf` whenever it exists
    pub debug_conf: PathBuf,
    pub default_conf: PathBuf,
    pub cmdline: PathBuf,
    pub hostname: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            debug_conf: PathBuf::from(DEBUG_CONF_FILE),
            default_conf: PathBuf::from(DEFAULT_CONF_FILE),
            cmdline: PathBuf::from(PROC_CMDLINE),
            hostname: PathBuf::from(ETC_HOSTNAME),
        }
    }
}

impl SourcePaths {
    /// The debug file if it exists, otherwise the default file
    pub fn select_source(&self) -> &Path {
        if access(self.debug_conf.as_path(), AccessFlags::F_OK).is_ok() {
            &self.debug_conf
        } else {
            &self.default_conf
        }
    }
}

/// Identifiers of the image the daemon runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetIdentity {
    pub machine: String,
    pub distro: String,
    pub distro_variant: String,
}

impl Default for TargetIdentity {
    fn default() -> Self {
        Self {
            machine: TARGET_MACHINE.to_string(),
            distro: TARGET_DISTRO.to_string(),
            distro_variant: TARGET_DISTRO_VARIANT.to_string(),
        }
    }
}

impl TargetIdentity {
    /// Layer keys paired with their selector, lowest precedence first
    pub fn selectors(&self) -> Vec<(Selector, &str)> {
        vec![
            (Selector::Common, KEY_COMMON),
            (Selector::Machine, self.machine.as_str()),
            (Selector::Distro, self.distro.as_str()),
            (Selector::DistroVariant, self.distro_variant.as_str()),
        ]
    }
}

/// Configuration in effect for the lifetime of the process
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    source: PathBuf,
    target: TargetIdentity,
    log: LogSettings,
    /// Selectors whose layer object was applied, in application order
    applied: Vec<Selector>,
    #[serde(flatten)]
    boot: BootFacts,
}

impl ResolvedConfig {
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &TargetIdentity {
        &self.target
    }

    pub fn log(&self) -> &LogSettings {
        &self.log
    }

    pub fn log_level(&self) -> LogLevel {
        self.log.level
    }

    pub fn applied(&self) -> &[Selector] {
        &self.applied
    }

    pub fn is_network_boot(&self) -> bool {
        self.boot.network_boot
    }

    pub fn hostname(&self) -> Option<&str> {
        self.boot.hostname.as_deref()
    }
}

/// Parse a configuration file into its top-level object
pub fn load_tree(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(tree) => Ok(tree),
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Builds the [`ResolvedConfig`] and pushes log settings into a [`LogControl`]
pub struct ConfigResolver<'a> {
    paths: SourcePaths,
    target: TargetIdentity,
    control: &'a dyn LogControl,
}

impl<'a> ConfigResolver<'a> {
    /// Resolver over the compiled-in paths and target identifiers
    pub fn new(control: &'a dyn LogControl) -> Self {
        Self {
            paths: SourcePaths::default(),
            target: TargetIdentity::default(),
            control,
        }
    }

    pub fn with_paths(mut self, paths: SourcePaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_target(mut self, target: TargetIdentity) -> Self {
        self.target = target;
        self
    }

    pub fn paths(&self) -> &SourcePaths {
        &self.paths
    }

    pub fn target(&self) -> &TargetIdentity {
        &self.target
    }

    /// Resolve the configuration and probe boot facts. Never fails.
    pub fn initialize(&self) -> ResolvedConfig {
        let source = self.paths.select_source().to_path_buf();
        info!("Read configuration ({})", source.display());

        let mut log = LogSettings::default();
        let applied = match load_tree(&source) {
            Ok(tree) => self.apply_tree(&tree, &mut log),
            Err(e) => {
                error!("{}", e);
                Vec::new()
            }
        };

        let boot = probe_boot_facts(&self.paths.cmdline, &self.paths.hostname);

        ResolvedConfig {
            source,
            target: self.target.clone(),
            log,
            applied,
            boot,
        }
    }

    /// Apply every layer of `tree` in selector order. Selectors whose value is
    /// missing or not an object are skipped.
    ///
    /// Returns the selectors that were applied.
    pub fn apply_tree(&self, tree: &Map<String, Value>, settings: &mut LogSettings) -> Vec<Selector> {
        let mut applied = Vec::new();
        for (selector, key) in self.target.selectors() {
            // Only objects can carry settings; anything else is not a layer
            if let Some(layer) = tree.get(key).filter(|layer| layer.is_object()) {
                apply_layer(layer, settings, self.control);
                applied.push(selector);
            }
        }
        applied
    }
}

/// Log the identification and timing summary
pub fn print_information(config: &ResolvedConfig, elapsed: Duration) {
    let target = config.target();
    info!("--DeviceType={}", target.machine);
    info!("--Distro={}", target.distro);
    info!("--DistroVariant={}", target.distro_variant);
    info!("--NFSBoot={}", if config.is_network_boot() { "YES" } else { "NO" });
    info!("--TimeDiff={}(s)", format_elapsed(elapsed));
}

/// `<seconds>.<milliseconds>` with milliseconds zero-padded
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}.{:03}", elapsed.as_secs(), elapsed.subsec_millis())
}

//! Live system probes
//!
//! Stateless, read-only queries against pseudo-filesystems:
//! - Network boot detection from the kernel command line
//! - Hostname lookup for diagnostics
//! - Counting connected and enabled HDMI connectors under DRM sysfs
//!
//! Nothing here caches; every call re-reads the filesystem, so probes may be
//! called repeatedly and from several threads.

pub mod cmdline;
pub mod display;

pub use cmdline::{
    detect_network_boot, is_network_boot, probe_boot_facts, read_hostname, read_kernel_cmdline,
    BootFacts,
};
pub use display::{
    clamp_display_count, connector_state, count_active_connectors, display_count,
    is_hdmi_connector_name, ConnectorState,
};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading probe inputs
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("File Open Failed({}): {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to enumerate display directory {}: {source}", path.display())]
    DisplayDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

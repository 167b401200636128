//! Kernel command line and hostname probes

use log::{debug, error};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::ProbeError;
use crate::constants::NFS_ROOT_TOKEN;

/// Facts read from the kernel command line and hostname file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootFacts {
    /// Root filesystem is mounted over NFS
    pub network_boot: bool,
    /// Contents of the hostname file, trimmed; diagnostics only
    pub hostname: Option<String>,
}

/// True when the command line mentions an NFS root anywhere
pub fn is_network_boot(cmdline: &str) -> bool {
    cmdline.contains(NFS_ROOT_TOKEN)
}

fn read_whole(path: &Path) -> Result<String, ProbeError> {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| ProbeError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Read the full kernel command line
pub fn read_kernel_cmdline(path: &Path) -> Result<String, ProbeError> {
    read_whole(path)
}

/// Read the hostname file with surrounding whitespace removed
pub fn read_hostname(path: &Path) -> Result<String, ProbeError> {
    read_whole(path).map(|hostname| hostname.trim().to_string())
}

/// Network boot state; an unreadable command line counts as a local boot.
pub fn detect_network_boot(cmdline_path: &Path) -> bool {
    match read_kernel_cmdline(cmdline_path) {
        Ok(cmdline) => is_network_boot(&cmdline),
        Err(e) => {
            error!("detect_network_boot={}", e);
            false
        }
    }
}

/// Read both inputs, logging failures at error severity without aborting
pub fn probe_boot_facts(cmdline_path: &Path, hostname_path: &Path) -> BootFacts {
    let network_boot = detect_network_boot(cmdline_path);

    let hostname = match read_hostname(hostname_path) {
        Ok(hostname) => {
            debug!("Hostname: {}", hostname);
            Some(hostname)
        }
        Err(e) => {
            error!("probe_boot_facts={}", e);
            None
        }
    };

    BootFacts {
        network_boot,
        hostname,
    }
}

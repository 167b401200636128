//! Global constants for bootd
//!
//! Centralized location for compiled-in paths, target identifiers and
//! configuration key names

/// Machine identifier of the image this daemon was built for
pub const TARGET_MACHINE: &str = env!("BOOTD_TARGET_MACHINE");

/// Distribution identifier of the image
pub const TARGET_DISTRO: &str = env!("BOOTD_TARGET_DISTRO");

/// Distribution variant identifier of the image
pub const TARGET_DISTRO_VARIANT: &str = env!("BOOTD_TARGET_DISTRO_VARIANT");

/// Device-local configuration that replaces the shipped one when present
pub const DEBUG_CONF_FILE: &str = env!("BOOTD_DEBUG_CONF_FILE");

/// Shipped configuration file
pub const DEFAULT_CONF_FILE: &str = env!("BOOTD_DEFAULT_CONF_FILE");

/// Version string reported by `--version`
pub const VERSION: &str = env!("BOOTD_VERSION");

/// Short commit hash of the build
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Kernel command line
pub const PROC_CMDLINE: &str = "/proc/cmdline";

/// Hostname file, read for diagnostics only
pub const ETC_HOSTNAME: &str = "/etc/hostname";

/// DRM class directory holding one symlink per connector
pub const DRM_CLASS_DIR: &str = "/sys/class/drm";

/// Kernel log device used by the `kmsg` log type
pub const KMSG_DEVICE: &str = "/dev/kmsg";

/// Log file used by the `file` log type
pub const LOG_FILE: &str = "/tmp/bootd.log";

/// Kernel command line token marking an NFS root filesystem
pub const NFS_ROOT_TOKEN: &str = "nfsroot";

/// Layer applied to every target
pub const KEY_COMMON: &str = "common";
pub const KEY_LOGGER: &str = "logger";
pub const KEY_LOGGER_LOG_TYPE: &str = "logType";
pub const KEY_LOGGER_LOG_LEVEL: &str = "logLevel";

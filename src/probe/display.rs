//! HDMI display enumeration through DRM sysfs
//!
//! Each connector appears under the DRM class directory as a symlink named
//! `cardN-<type>-M` into the device tree. A connector counts as a display
//! when its `status` attribute reads `connected` and its `enabled` attribute
//! reads `enabled`.
//!
//! The reported count is clamped to `1..=2`: callers only distinguish a
//! single display from several, and they assume a primary display exists
//! even when none is confirmed.

use glob::Pattern;
use log::debug;
use std::fs;
use std::path::Path;

use super::ProbeError;

/// Connector names selected for counting
const HDMI_CONNECTOR_PATTERN: &str = "card*-HDMI-*";

const STATUS_FILE: &str = "status";
const ENABLED_FILE: &str = "enabled";
const STATUS_CONNECTED: &str = "connected";
const ENABLED_ENABLED: &str = "enabled";

/// Smallest count ever reported
pub const MIN_REPORTED_DISPLAYS: u32 = 1;
/// Largest count ever reported
pub const MAX_REPORTED_DISPLAYS: u32 = 2;

/// Readiness of a single connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorState {
    /// Connected and enabled
    Active,
    /// Attributes readable but not both at their active values
    Inactive { status: String, enabled: String },
    /// Attributes not published yet (early boot)
    NotReady,
}

fn hdmi_connector_pattern() -> Option<Pattern> {
    Pattern::new(HDMI_CONNECTOR_PATTERN).ok()
}

/// True for `card*` entries that carry `-HDMI-` in their name
pub fn is_hdmi_connector_name(name: &str) -> bool {
    hdmi_connector_pattern().is_some_and(|pattern| pattern.matches(name))
}

/// First line of a sysfs attribute, without the line terminator
fn read_attribute(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    Some(content.lines().next().unwrap_or_default().to_string())
}

/// Inspect the `status` and `enabled` attributes in a resolved connector directory
pub fn connector_state(connector_dir: &Path) -> ConnectorState {
    let status = read_attribute(&connector_dir.join(STATUS_FILE));
    let enabled = read_attribute(&connector_dir.join(ENABLED_FILE));

    match (status, enabled) {
        (Some(status), Some(enabled)) => {
            if status == STATUS_CONNECTED && enabled == ENABLED_ENABLED {
                ConnectorState::Active
            } else {
                ConnectorState::Inactive { status, enabled }
            }
        }
        _ => ConnectorState::NotReady,
    }
}

/// Count HDMI connectors that are connected and enabled, without clamping
pub fn count_active_connectors(drm_root: &Path) -> Result<usize, ProbeError> {
    let entries = fs::read_dir(drm_root).map_err(|source| ProbeError::DisplayDirectory {
        path: drm_root.to_path_buf(),
        source,
    })?;

    let Some(pattern) = hdmi_connector_pattern() else {
        return Ok(0);
    };
    let mut active = 0;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        // Connectors are links into the device tree; real files and dirs are not
        let is_link = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
        if !is_link {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !pattern.matches(&name) {
            continue;
        }

        let resolved = match fs::canonicalize(entry.path()) {
            Ok(path) => path,
            Err(e) => {
                debug!("{} unresolved: {}", name, e);
                continue;
            }
        };

        match connector_state(&resolved) {
            ConnectorState::Active => {
                active += 1;
                debug!(
                    "{} (ready) enabled({}), status({})",
                    name, ENABLED_ENABLED, STATUS_CONNECTED
                );
            }
            ConnectorState::Inactive { status, enabled } => {
                debug!("{} (ready) enabled({}), status({})", name, enabled, status);
            }
            ConnectorState::NotReady => {
                debug!("{} not ready", resolved.join(STATUS_FILE).display());
            }
        }
    }

    Ok(active)
}

/// Map a raw connector count onto the reported range
pub fn clamp_display_count(raw: usize) -> u32 {
    match raw {
        0 => {
            debug!("No Connected HDMI devices({}),but return {}", raw, MIN_REPORTED_DISPLAYS);
            MIN_REPORTED_DISPLAYS
        }
        1 => {
            debug!("Connected HDMI devices({})", raw);
            1
        }
        _ => {
            debug!("Connected HDMI devices({}),but return {}", raw, MAX_REPORTED_DISPLAYS);
            MAX_REPORTED_DISPLAYS
        }
    }
}

/// Number of connected HDMI displays, always `1` or `2`
pub fn display_count(drm_root: &Path) -> u32 {
    let raw = count_active_connectors(drm_root).unwrap_or_else(|e| {
        debug!("{}", e);
        0
    });
    clamp_display_count(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    /// DRM class directory backed by a fake device tree
    struct FakeDrm {
        dir: TempDir,
    }

    impl FakeDrm {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            fs::create_dir(dir.path().join("class")).unwrap();
            fs::create_dir(dir.path().join("devices")).unwrap();
            Self { dir }
        }

        fn root(&self) -> PathBuf {
            self.dir.path().join("class")
        }

        /// Add a linked connector; `None` leaves the attribute unpublished
        fn connector(&self, name: &str, status: Option<&str>, enabled: Option<&str>) {
            let device = self.dir.path().join("devices").join(name);
            fs::create_dir(&device).unwrap();
            if let Some(status) = status {
                fs::write(device.join("status"), format!("{}\n", status)).unwrap();
            }
            if let Some(enabled) = enabled {
                fs::write(device.join("enabled"), format!("{}\n", enabled)).unwrap();
            }
            symlink(&device, self.root().join(name)).unwrap();
        }

        fn active(&self, name: &str) {
            self.connector(name, Some("connected"), Some("enabled"));
        }
    }

    #[test]
    fn test_connector_name_filter() {
        assert!(is_hdmi_connector_name("card0-HDMI-A-1"));
        assert!(is_hdmi_connector_name("card1-HDMI-B-2"));
        assert!(!is_hdmi_connector_name("card0-eDP-1"));
        assert!(!is_hdmi_connector_name("card0-DP-1"));
        assert!(!is_hdmi_connector_name("card0"));
        assert!(!is_hdmi_connector_name("renderD128"));
        assert!(!is_hdmi_connector_name("xcard0-HDMI-A-1"));
    }

    #[test]
    fn test_mixed_directory_counts_only_hdmi_links() {
        let drm = FakeDrm::new();
        drm.active("card0-HDMI-A-1");
        drm.active("card0-eDP-1");
        drm.active("card1-HDMI-A-1");
        fs::create_dir(drm.root().join("card2-HDMI-A-1")).unwrap();
        fs::write(drm.root().join("version"), "drm 1.1.0\n").unwrap();
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 2);
    }

    #[test]
    fn test_clamp_policy() {
        assert_eq!(clamp_display_count(0), 1);
        assert_eq!(clamp_display_count(1), 1);
        assert_eq!(clamp_display_count(2), 2);
        assert_eq!(clamp_display_count(5), 2);
    }

    #[test]
    fn test_no_connectors_reports_one() {
        let drm = FakeDrm::new();
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 0);
        assert_eq!(display_count(&drm.root()), 1);
    }

    #[test]
    fn test_single_active_connector() {
        let drm = FakeDrm::new();
        drm.active("card0-HDMI-A-1");
        drm.connector("card0-HDMI-A-2", Some("disconnected"), Some("disabled"));
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 1);
        assert_eq!(display_count(&drm.root()), 1);
    }

    #[test]
    fn test_three_active_connectors_report_two() {
        let drm = FakeDrm::new();
        drm.active("card0-HDMI-A-1");
        drm.active("card0-HDMI-A-2");
        drm.active("card1-HDMI-A-1");
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 3);
        assert_eq!(display_count(&drm.root()), 2);
    }

    #[test]
    fn test_non_hdmi_connectors_are_ignored() {
        let drm = FakeDrm::new();
        drm.active("card0-eDP-1");
        drm.active("card0-DP-1");
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 0);
    }

    #[test]
    fn test_non_symlink_entry_is_ignored() {
        let drm = FakeDrm::new();
        let plain = drm.root().join("card0-HDMI-A-1");
        fs::create_dir(&plain).unwrap();
        fs::write(plain.join("status"), "connected\n").unwrap();
        fs::write(plain.join("enabled"), "enabled\n").unwrap();
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 0);
    }

    #[test]
    fn test_connector_requires_both_values() {
        let drm = FakeDrm::new();
        drm.connector("card0-HDMI-A-1", Some("connected"), Some("disabled"));
        drm.connector("card0-HDMI-A-2", Some("disconnected"), Some("enabled"));
        drm.connector("card0-HDMI-A-3", Some("unknown"), Some("enabled"));
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 0);
    }

    #[test]
    fn test_unpublished_attributes_are_not_ready() {
        let drm = FakeDrm::new();
        drm.connector("card0-HDMI-A-1", Some("connected"), None);
        drm.connector("card0-HDMI-A-2", None, Some("enabled"));
        drm.active("card1-HDMI-A-1");
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 1);

        let device = drm.root().join("card0-HDMI-A-1");
        assert_eq!(
            connector_state(&fs::canonicalize(device).unwrap()),
            ConnectorState::NotReady
        );
    }

    #[test]
    fn test_inactive_state_carries_values() {
        let drm = FakeDrm::new();
        drm.connector("card0-HDMI-A-1", Some("disconnected"), Some("disabled"));
        let resolved = fs::canonicalize(drm.root().join("card0-HDMI-A-1")).unwrap();
        assert_eq!(
            connector_state(&resolved),
            ConnectorState::Inactive {
                status: "disconnected".to_string(),
                enabled: "disabled".to_string(),
            }
        );
    }

    #[test]
    fn test_dangling_link_is_skipped() {
        let drm = FakeDrm::new();
        symlink(drm.dir.path().join("gone"), drm.root().join("card0-HDMI-A-1")).unwrap();
        drm.active("card0-HDMI-A-2");
        assert_eq!(count_active_connectors(&drm.root()).unwrap(), 1);
    }

    #[test]
    fn test_missing_drm_root_reports_one() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("drm");
        assert!(matches!(
            count_active_connectors(&missing),
            Err(ProbeError::DisplayDirectory { .. })
        ));
        assert_eq!(display_count(&missing), 1);
    }

    #[test]
    fn test_repeated_calls_see_new_state() {
        let drm = FakeDrm::new();
        drm.active("card0-HDMI-A-1");
        assert_eq!(display_count(&drm.root()), 1);
        drm.active("card0-HDMI-A-2");
        assert_eq!(display_count(&drm.root()), 2);
    }
}

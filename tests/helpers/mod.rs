#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fake root holding configuration files, kernel files and a DRM tree
pub struct FakeSystem {
    pub temp_dir: TempDir,
}

impl FakeSystem {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("sys/class/drm"))?;
        fs::create_dir_all(temp_dir.path().join("sys/devices"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn debug_config(&self) -> PathBuf {
        self.path().join("debug.json")
    }

    pub fn default_config(&self) -> PathBuf {
        self.path().join("default.json")
    }

    pub fn cmdline(&self) -> PathBuf {
        self.path().join("cmdline")
    }

    pub fn hostname(&self) -> PathBuf {
        self.path().join("hostname")
    }

    pub fn drm_root(&self) -> PathBuf {
        self.path().join("sys/class/drm")
    }

    pub fn write_default_config(&self, value: &Value) -> anyhow::Result<()> {
        fs::write(self.default_config(), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn write_debug_config(&self, value: &Value) -> anyhow::Result<()> {
        fs::write(self.debug_config(), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn write_cmdline(&self, cmdline: &str) -> anyhow::Result<()> {
        fs::write(self.cmdline(), cmdline)?;
        Ok(())
    }

    pub fn write_hostname(&self, hostname: &str) -> anyhow::Result<()> {
        fs::write(self.hostname(), format!("{}\n", hostname))?;
        Ok(())
    }

    /// Add a connector link with the given attribute values
    pub fn add_connector(&self, name: &str, status: &str, enabled: &str) -> anyhow::Result<()> {
        let device = self.path().join("sys/devices").join(name);
        fs::create_dir_all(&device)?;
        fs::write(device.join("status"), format!("{}\n", status))?;
        fs::write(device.join("enabled"), format!("{}\n", enabled))?;
        symlink(&device, self.drm_root().join(name))?;
        Ok(())
    }

    pub fn add_active_connector(&self, name: &str) -> anyhow::Result<()> {
        self.add_connector(name, "connected", "enabled")
    }

    /// `bootd` pointed at this fake system
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo_bin_cmd!("bootd");
        cmd.arg("--debug-config")
            .arg(self.debug_config())
            .arg("--default-config")
            .arg(self.default_config())
            .arg("--cmdline")
            .arg(self.cmdline())
            .arg("--hostname")
            .arg(self.hostname())
            .arg("--drm-root")
            .arg(self.drm_root());
        cmd
    }

    /// Run `bootd info --json` and parse the report
    pub fn info_json(&self) -> Value {
        let output = self
            .command()
            .args(["info", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("info --json should print valid JSON")
    }
}

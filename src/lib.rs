//! bootd - boot daemon configuration and system probes
//!
//! This library resolves the daemon's effective configuration from layered
//! JSON files and exposes the read-only probes used at boot: network root
//! detection and HDMI display counting.

pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod probe;

//! Output formatting module
//!
//! Handles:
//! - Human-readable rendering of the diagnostic report
//! - JSON output of the report and single-value probes

use anyhow::Result;
use bootd::models::SystemReport;
use serde_json::json;

/// Render the report as aligned `key: value` lines
pub fn render_human(report: &SystemReport) -> String {
    let mut lines = vec![
        format!("Device type:     {}", report.device_type),
        format!("Distro:          {}", report.distro),
        format!("Distro variant:  {}", report.distro_variant),
        format!("NFS boot:        {}", yes_no(report.network_boot)),
    ];

    if let Some(hostname) = &report.hostname {
        lines.push(format!("Hostname:        {}", hostname));
    }

    lines.push(format!("Configuration:   {}", report.config_source));
    if report.applied_layers.is_empty() {
        lines.push("Applied layers:  (none)".to_string());
    } else {
        lines.push(format!("Applied layers:  {}", report.applied_layers.join(", ")));
    }
    lines.push(format!("Log level:       {}", report.log_level));
    if !report.log_types.is_empty() {
        lines.push(format!("Log types:       {}", report.log_types.join(", ")));
    }
    lines.push(format!("HDMI displays:   {}", report.display_count));
    lines.push(format!("Time diff:       {}(s)", report.time_diff));

    lines.join("\n")
}

/// Print the full report
pub fn format_report(report: &SystemReport, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", render_human(report));
    }
    Ok(())
}

pub fn format_display_count(count: u32, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string(&json!({ "display_count": count }))?);
    } else {
        println!("{}", count);
    }
    Ok(())
}

pub fn format_network_boot(network_boot: bool, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string(&json!({ "network_boot": network_boot }))?);
    } else {
        println!("{}", yes_no(network_boot));
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

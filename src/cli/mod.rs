//! CLI argument parsing module
//!
//! Handles command-line interface using clap, including:
//! - Report selection (info, displays, netboot)
//! - Path overrides for the configuration, kernel and DRM inputs
//! - Output format selection (human/JSON)

use bootd::config::SourcePaths;
use bootd::constants::{DRM_CLASS_DIR, VERSION};
use bootd::models::{Command as ReportCommand, RunConfig};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Version with the commit it was built from
const LONG_VERSION: &str = concat!(env!("BOOTD_VERSION"), " (", env!("GIT_HASH"), ")");

/// Build the clap command tree
pub fn build_command() -> Command {
    Command::new("bootd")
        .version(VERSION)
        .long_version(LONG_VERSION)
        .about("Resolve boot daemon configuration and probe boot-time system state")
        .long_about("Resolves the effective boot daemon configuration from layered JSON files and reports network boot state and connected HDMI displays.")
        .subcommand(Command::new("info").about("Resolve configuration and print the full report (default)"))
        .subcommand(Command::new("displays").about("Print the number of connected HDMI displays (1 or 2)"))
        .subcommand(Command::new("netboot").about("Print whether the root filesystem is mounted over NFS"))
        .arg(path_arg("debug-config", "FILE", "Debug configuration file that replaces the default one when present"))
        .arg(path_arg("default-config", "FILE", "Default configuration file"))
        .arg(path_arg("cmdline", "FILE", "Kernel command line file"))
        .arg(path_arg("hostname", "FILE", "Hostname file"))
        .arg(path_arg("drm-root", "DIR", "Directory holding DRM connector links"))
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

fn path_arg(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(value_name)
        .help(help)
        .global(true)
        .value_parser(clap::value_parser!(PathBuf))
}

/// Parse command line arguments and return configuration.
///
/// Exits the process for `--help`, `--version` and usage errors, as clap does.
pub fn parse_args() -> RunConfig {
    parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
}

/// Parse an explicit argument list, returning usage errors instead of exiting
pub fn parse_from<I, T>(args: I) -> Result<RunConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    Ok(run_config(&matches))
}

fn run_config(matches: &ArgMatches) -> RunConfig {
    let command = match matches.subcommand_name() {
        Some("displays") => ReportCommand::Displays,
        Some("netboot") => ReportCommand::Netboot,
        _ => ReportCommand::Info,
    };

    // Global args are propagated into the subcommand's matches
    let matches = matches
        .subcommand()
        .map(|(_, sub)| sub)
        .unwrap_or(matches);

    let defaults = SourcePaths::default();
    let path = |name: &str, default: PathBuf| {
        matches.get_one::<PathBuf>(name).cloned().unwrap_or(default)
    };

    RunConfig {
        command,
        paths: SourcePaths {
            debug_conf: path("debug-config", defaults.debug_conf),
            default_conf: path("default-config", defaults.default_conf),
            cmdline: path("cmdline", defaults.cmdline),
            hostname: path("hostname", defaults.hostname),
        },
        drm_root: path("drm-root", PathBuf::from(DRM_CLASS_DIR)),
        json_output: matches.get_flag("json"),
    }
}

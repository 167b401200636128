#![forbid(unsafe_code)]

mod cli;
mod output;

use anyhow::Result;
use bootd::config::{self, ConfigResolver};
use bootd::constants::{GIT_HASH, VERSION};
use bootd::logging;
use bootd::models::{Command, SystemReport};
use bootd::probe;
use log::info;

fn main() -> Result<()> {
    let run = cli::parse_args();

    let logger = logging::init();
    info!("bootd {} ({})", VERSION, GIT_HASH);

    // Configuration is resolved before any probe runs
    let config = ConfigResolver::new(logger)
        .with_paths(run.paths.clone())
        .initialize();

    match run.command {
        Command::Info => {
            config::print_information(&config, logger.elapsed());
            let displays = probe::display_count(&run.drm_root);
            let report = SystemReport::new(&config, displays, logger.elapsed());
            output::format_report(&report, run.json_output)?;
        }
        Command::Displays => {
            let displays = probe::display_count(&run.drm_root);
            output::format_display_count(displays, run.json_output)?;
        }
        Command::Netboot => {
            output::format_network_boot(config.is_network_boot(), run.json_output)?;
        }
    }

    log::logger().flush();
    Ok(())
}

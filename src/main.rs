mod cli;
mod config;
mod lookup;
mod report;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, LevelFilter};
use picoport_rs::{find_pico_port, SystemPorts, RASPBERRY_PI_PICO};

use crate::cli::Cli;
use crate::config::Config;
use crate::lookup::Lookup;

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::load(&cli).context("Failed to load configuration")?;
    let target = config.target();
    let name = config.display_name();
    debug!("Resolved configuration: {:?}", config);
    info!("Searching for {} ({})", name, target);

    let lookup = if !cli.list && target == RASPBERRY_PI_PICO {
        find_pico_port().map(Lookup::found)
    } else {
        lookup::locate(&SystemPorts, target, cli.list)
    };
    let lookup = lookup
        .inspect_err(|e| error!("Could not list serial ports: {}", e))
        .context("Failed to query the platform for serial ports")?;

    for line in &lookup.listing {
        println!("{}", line);
    }
    println!("{}", report::render_outcome(&name, lookup.found.as_deref()));
    Ok(())
}

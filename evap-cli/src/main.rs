//! Evap CLI - Command line tool for open-water evaporation estimates.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "evap-cli",
    version,
    about = "Open-water evaporation from aerodynamic, energy balance and Penman models"
)]
struct Cli {
    #[command(subcommand)]
    command: evap_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Starting evap-cli");
    evap_cmd::run(cli.command)
}

//! Command implementations for the evaporation CLI.
//!
//! Provides subcommands for the single-point panels, the side-by-side
//! dashboard and the diurnal forcing table.

use clap::Subcommand;

pub mod config;
pub mod diurnal;
pub mod panel;

use config::{AerodynamicConfig, CombinedConfig, DashboardConfig, EnergyBalanceConfig, GeometryConfig};

#[derive(Subcommand)]
pub enum Command {
    /// Evaporation from the aerodynamic (mass transfer) model
    Aerodynamic(AerodynamicConfig),

    /// Evaporation from the energy balance model
    EnergyBalance(EnergyBalanceConfig),

    /// Evaporation from the combined Penman model
    Combined(CombinedConfig),

    /// Evaluate all three panels side by side
    Dashboard {
        /// Dashboard TOML file; missing keys take the default panel values
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Evaluate a diurnal forcing table with coefficients derived from z and z0
    Diurnal {
        /// Forcing table CSV (the default daily profile if omitted)
        #[arg(short, long)]
        input: Option<String>,

        #[command(flatten)]
        geometry: GeometryConfig,

        /// Output path for the result table CSV
        #[arg(short, long)]
        output: Option<String>,

        /// Output path for the chart series JSON
        #[arg(long)]
        chart: Option<String>,
    },

    /// Write the default forcing table as a starting point for editing
    DefaultTable {
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Aerodynamic(config) => panel::run_aerodynamic(&config),
        Command::EnergyBalance(config) => panel::run_energy_balance(&config),
        Command::Combined(config) => panel::run_combined(&config),
        Command::Dashboard { config } => {
            let config = match config {
                Some(path) => DashboardConfig::load(path)?,
                None => DashboardConfig::default(),
            };
            panel::run_dashboard(&config)
        }
        Command::Diurnal {
            input,
            geometry,
            output,
            chart,
        } => diurnal::run_diurnal(input.as_deref(), &geometry, output.as_deref(), chart.as_deref()),
        Command::DefaultTable { output } => diurnal::run_default_table(output.as_deref()),
    }
}

//! Single-point commands: one panel, or the three side by side.

use crate::config::{AerodynamicConfig, CombinedConfig, DashboardConfig, EnergyBalanceConfig};
use evap_core::error::DomainError;
use evap_core::panel::{AerodynamicReadout, CombinedReadout, DashboardReport, EnergyBalanceReadout};
use evap_utils::format::{format_fixed, format_kv, format_rate};
use log::{error, info};

pub const AERODYNAMIC_HEADER: &str = "Aerodynamic method";
pub const ENERGY_BALANCE_HEADER: &str = "Energy balance method";
pub const COMBINED_HEADER: &str = "Combined Penman method";

pub fn render_aerodynamic(readout: &AerodynamicReadout) -> String {
    [
        AERODYNAMIC_HEADER.to_string(),
        format!("  Kv = {} [kPa^-1]", format_kv(readout.kv.0)),
        format!(
            "  es(Tw) = {} [kPa], ea = {} [kPa]",
            format_fixed(readout.model.saturation_at_water, 4),
            format_fixed(readout.model.actual_vapor_pressure, 4)
        ),
        format!("  {}", format_rate("Ea", readout.model.evaporation)),
    ]
    .join("\n")
}

pub fn render_energy_balance(readout: &EnergyBalanceReadout) -> String {
    [
        ENERGY_BALANCE_HEADER.to_string(),
        format!("  Kh = {} [J °C m^-3]", format_fixed(readout.kh.0, 2)),
        format!("  H = {} [W m^-2]", format_fixed(readout.model.sensible_heat, 2)),
        format!("  {}", format_rate("Eb", readout.model.evaporation)),
    ]
    .join("\n")
}

pub fn render_combined(readout: &CombinedReadout) -> String {
    [
        COMBINED_HEADER.to_string(),
        format!("  Kv = {} [kPa^-1]", format_kv(readout.kv.0)),
        format!("  Delta = {} [kPa K^-1]", format_fixed(readout.model.slope, 5)),
        format!("  gamma = {} [kPa K^-1]", format_fixed(readout.model.psychrometric_constant, 5)),
        format!("  {}", format_rate("Ec", readout.model.evaporation)),
    ]
    .join("\n")
}

fn render_failure(header: &str, err: &DomainError) -> String {
    format!("{}\n  cannot evaluate: {}", header, err)
}

pub fn run_aerodynamic(config: &AerodynamicConfig) -> anyhow::Result<()> {
    let readout = config.panel().evaluate()?;
    println!("{}", render_aerodynamic(&readout));
    Ok(())
}

pub fn run_energy_balance(config: &EnergyBalanceConfig) -> anyhow::Result<()> {
    let readout = config.panel().evaluate()?;
    println!("{}", render_energy_balance(&readout));
    Ok(())
}

pub fn run_combined(config: &CombinedConfig) -> anyhow::Result<()> {
    let readout = config.panel().evaluate()?;
    println!("{}", render_combined(&readout));
    Ok(())
}

/// Render every panel, successful or not, and count the failures.
pub fn render_dashboard(report: &DashboardReport) -> (String, usize) {
    let mut failures = 0;
    let mut sections = Vec::with_capacity(3);

    match &report.aerodynamic {
        Ok(readout) => sections.push(render_aerodynamic(readout)),
        Err(e) => {
            failures += 1;
            sections.push(render_failure(AERODYNAMIC_HEADER, e));
        }
    }
    match &report.energy_balance {
        Ok(readout) => sections.push(render_energy_balance(readout)),
        Err(e) => {
            failures += 1;
            sections.push(render_failure(ENERGY_BALANCE_HEADER, e));
        }
    }
    match &report.combined {
        Ok(readout) => sections.push(render_combined(readout)),
        Err(e) => {
            failures += 1;
            sections.push(render_failure(COMBINED_HEADER, e));
        }
    }

    (sections.join("\n\n"), failures)
}

pub fn run_dashboard(config: &DashboardConfig) -> anyhow::Result<()> {
    let report = config.dashboard().evaluate();
    let (text, failures) = render_dashboard(&report);
    println!("{}", text);
    if failures > 0 {
        error!("{} of 3 panels could not be evaluated", failures);
        anyhow::bail!("{} panel(s) have inputs outside the models' domain", failures);
    }
    info!("Dashboard evaluated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evap_core::coefficients::{CoefficientSource, SiteGeometry};
    use evap_core::panel::Dashboard;

    #[test]
    fn test_render_default_panels() {
        let report = Dashboard::default().evaluate();
        let (text, failures) = render_dashboard(&report);
        assert_eq!(failures, 0);
        assert!(text.contains("Ea = 14.40 [mm/day]"));
        assert!(text.contains("Eb = 10.74 [mm/day]"));
        assert!(text.contains("Ec = 11.38 [mm/day]"));
        assert!(text.contains("Kv = 266E-10 [kPa^-1]"));
        assert!(text.contains("H = -52.44 [W m^-2]"));
        assert!(text.contains("Delta = 0.24344 [kPa K^-1]"));
        assert!(text.contains("gamma = 0.06712 [kPa K^-1]"));
    }

    #[test]
    fn test_render_reports_failed_panel() {
        let mut dashboard = Dashboard::default();
        dashboard.combined.kv = CoefficientSource::Derived(SiteGeometry::new(1.0, 1.0));
        let (text, failures) = render_dashboard(&dashboard.evaluate());
        assert_eq!(failures, 1);
        assert!(text.contains("Combined Penman method\n  cannot evaluate:"));
        assert!(text.contains("Ea = 14.40 [mm/day]"));
    }

    #[test]
    fn test_run_panel_propagates_domain_error() {
        let config = AerodynamicConfig {
            relative_humidity: 150.0,
            ..AerodynamicConfig::default()
        };
        let err = run_aerodynamic(&config).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::HumidityOutOfRange(150.0))
        );
    }
}

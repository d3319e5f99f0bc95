//! Independent input snapshots for the three dashboard panels.
//!
//! Every panel carries its own copy of the forcing and its own coefficient
//! source, so changing the wind speed on one panel never moves another.

use crate::coefficients::{CoefficientSource, HeatTransfer, SiteGeometry, VaporTransfer};
use crate::error::DomainError;
use crate::models::{aerodynamic, combined, energy_balance, Aerodynamic, Combined, EnergyBalance};
use crate::observation::MeteorologicalObservation;

/// Initial slider values of the dashboard.
pub mod defaults {
    pub const WIND_SPEED: f64 = 3.0;
    pub const WATER_TEMPERATURE: f64 = 26.0;
    pub const AIR_TEMPERATURE: f64 = 30.0;
    pub const RELATIVE_HUMIDITY: f64 = 30.0;
    pub const NET_RADIATION: f64 = 250.0;
    /// Kv in units of 10⁻¹⁰ kPa⁻¹
    pub const KV_SCALED: f64 = 266.0;
    pub const KH: f64 = 4.37;
    pub const MEASUREMENT_HEIGHT: f64 = 2.0;
    pub const ROUGHNESS_HEIGHT: f64 = 0.003;
}

/// Inputs of the aerodynamic panel. It has no radiation input.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct AerodynamicPanel {
    pub wind_speed: f64,
    pub water_temperature: f64,
    pub air_temperature: f64,
    pub relative_humidity: f64,
    pub kv: CoefficientSource<VaporTransfer>,
}

/// What the aerodynamic panel shows.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct AerodynamicReadout {
    pub kv: VaporTransfer,
    pub model: Aerodynamic,
}

impl Default for AerodynamicPanel {
    fn default() -> Self {
        AerodynamicPanel {
            wind_speed: defaults::WIND_SPEED,
            water_temperature: defaults::WATER_TEMPERATURE,
            air_temperature: defaults::AIR_TEMPERATURE,
            relative_humidity: defaults::RELATIVE_HUMIDITY,
            kv: CoefficientSource::Direct(VaporTransfer::from_scaled(defaults::KV_SCALED)),
        }
    }
}

impl AerodynamicPanel {
    pub fn observation(&self) -> MeteorologicalObservation {
        MeteorologicalObservation {
            wind_speed: self.wind_speed,
            air_temperature: self.air_temperature,
            water_temperature: self.water_temperature,
            relative_humidity: self.relative_humidity,
            net_radiation: 0.0,
        }
    }

    pub fn evaluate(&self) -> Result<AerodynamicReadout, DomainError> {
        let kv = self.kv.resolve()?;
        let model = aerodynamic(&self.observation(), kv)?;
        Ok(AerodynamicReadout { kv, model })
    }
}

/// Inputs of the energy balance panel. It has no humidity input.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct EnergyBalancePanel {
    pub net_radiation: f64,
    pub wind_speed: f64,
    pub water_temperature: f64,
    pub air_temperature: f64,
    pub kh: CoefficientSource<HeatTransfer>,
}

/// What the energy balance panel shows.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct EnergyBalanceReadout {
    pub kh: HeatTransfer,
    pub model: EnergyBalance,
}

impl Default for EnergyBalancePanel {
    fn default() -> Self {
        EnergyBalancePanel {
            net_radiation: defaults::NET_RADIATION,
            wind_speed: defaults::WIND_SPEED,
            water_temperature: defaults::WATER_TEMPERATURE,
            air_temperature: defaults::AIR_TEMPERATURE,
            kh: CoefficientSource::Direct(HeatTransfer(defaults::KH)),
        }
    }
}

impl EnergyBalancePanel {
    pub fn observation(&self) -> MeteorologicalObservation {
        MeteorologicalObservation {
            wind_speed: self.wind_speed,
            air_temperature: self.air_temperature,
            water_temperature: self.water_temperature,
            relative_humidity: 0.0,
            net_radiation: self.net_radiation,
        }
    }

    pub fn evaluate(&self) -> Result<EnergyBalanceReadout, DomainError> {
        let kh = self.kh.resolve()?;
        let model = energy_balance(&self.observation(), kh)?;
        Ok(EnergyBalanceReadout { kh, model })
    }
}

/// Inputs of the combined (Penman) panel.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CombinedPanel {
    pub net_radiation: f64,
    pub wind_speed: f64,
    pub water_temperature: f64,
    pub air_temperature: f64,
    pub relative_humidity: f64,
    pub kv: CoefficientSource<VaporTransfer>,
}

/// What the combined panel shows.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CombinedReadout {
    pub kv: VaporTransfer,
    pub model: Combined,
}

impl Default for CombinedPanel {
    fn default() -> Self {
        CombinedPanel {
            net_radiation: defaults::NET_RADIATION,
            wind_speed: defaults::WIND_SPEED,
            water_temperature: defaults::WATER_TEMPERATURE,
            air_temperature: defaults::AIR_TEMPERATURE,
            relative_humidity: defaults::RELATIVE_HUMIDITY,
            kv: CoefficientSource::Direct(VaporTransfer::from_scaled(defaults::KV_SCALED)),
        }
    }
}

impl CombinedPanel {
    pub fn observation(&self) -> MeteorologicalObservation {
        MeteorologicalObservation {
            wind_speed: self.wind_speed,
            air_temperature: self.air_temperature,
            water_temperature: self.water_temperature,
            relative_humidity: self.relative_humidity,
            net_radiation: self.net_radiation,
        }
    }

    pub fn evaluate(&self) -> Result<CombinedReadout, DomainError> {
        let kv = self.kv.resolve()?;
        let model = combined(&self.observation(), kv)?;
        Ok(CombinedReadout { kv, model })
    }
}

/// The three panels side by side.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Dashboard {
    pub aerodynamic: AerodynamicPanel,
    pub energy_balance: EnergyBalancePanel,
    pub combined: CombinedPanel,
}

/// One result per panel; a failing panel leaves the others intact.
#[derive(Debug, PartialEq, Clone)]
pub struct DashboardReport {
    pub aerodynamic: Result<AerodynamicReadout, DomainError>,
    pub energy_balance: Result<EnergyBalanceReadout, DomainError>,
    pub combined: Result<CombinedReadout, DomainError>,
}

impl Dashboard {
    pub fn evaluate(&self) -> DashboardReport {
        DashboardReport {
            aerodynamic: self.aerodynamic.evaluate(),
            energy_balance: self.energy_balance.evaluate(),
            combined: self.combined.evaluate(),
        }
    }
}

/// Default geometry used when a panel switches to calculated coefficients.
pub fn default_site() -> SiteGeometry {
    SiteGeometry::new(defaults::MEASUREMENT_HEIGHT, defaults::ROUGHNESS_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::derive_transfer_coefficients;

    #[test]
    fn test_default_dashboard() {
        let report = Dashboard::default().evaluate();
        let aero = report.aerodynamic.unwrap();
        let energy = report.energy_balance.unwrap();
        let penman = report.combined.unwrap();
        assert!((aero.model.evaporation - 14.404478).abs() < 1e-5);
        assert!((energy.model.evaporation - 10.736797).abs() < 1e-5);
        assert!((penman.model.evaporation - 11.384256).abs() < 1e-5);
        assert!((aero.kv.scaled() - 266.0).abs() < 1e-9);
    }

    #[test]
    fn test_panels_are_independent() {
        let mut dashboard = Dashboard::default();
        dashboard.aerodynamic.wind_speed = 9.0;
        let report = dashboard.evaluate();
        let baseline = Dashboard::default().evaluate();
        assert_ne!(report.aerodynamic, baseline.aerodynamic);
        assert_eq!(report.energy_balance, baseline.energy_balance);
        assert_eq!(report.combined, baseline.combined);
    }

    #[test]
    fn test_failing_panel_does_not_hide_others() {
        let mut dashboard = Dashboard::default();
        dashboard.energy_balance.kh = CoefficientSource::Derived(SiteGeometry::new(2.0, 2.0));
        let report = dashboard.evaluate();
        assert_eq!(report.energy_balance, Err(DomainError::EqualHeights(2.0)));
        assert!(report.aerodynamic.is_ok());
        assert!(report.combined.is_ok());
    }

    #[test]
    fn test_calculated_coefficients() {
        let panel = EnergyBalancePanel {
            kh: CoefficientSource::Derived(default_site()),
            ..EnergyBalancePanel::default()
        };
        let readout = panel.evaluate().unwrap();
        let expected = derive_transfer_coefficients(&default_site()).unwrap().kh;
        assert_eq!(readout.kh, expected);
    }
}

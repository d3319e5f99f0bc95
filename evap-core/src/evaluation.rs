//! Single-point evaluation of all three models.

use crate::coefficients::TransferCoefficients;
use crate::error::DomainError;
use crate::models::{aerodynamic, combined, energy_balance, Model};
use crate::observation::MeteorologicalObservation;
use log::debug;
use serde::Serialize;

/// Evaporation from all three models for one observation, with the terms
/// that went into them.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct EvaporationResult {
    /// Aerodynamic rate Ea (mm/day)
    pub ea: f64,
    /// Energy balance rate Eb (mm/day)
    pub eb: f64,
    /// Sensible heat flux H (W/m²)
    pub eh: f64,
    /// Combined rate Ec (mm/day)
    pub ec: f64,
    pub coefficients: TransferCoefficients,
    /// es at the water surface temperature (kPa)
    pub saturation_at_water: f64,
    /// es at the air temperature (kPa)
    pub saturation_at_air: f64,
    /// ea of the air (kPa)
    pub actual_vapor_pressure: f64,
    /// λ (kJ/kg)
    pub latent_heat: f64,
    /// Δ (kPa/K)
    pub slope: f64,
    /// γ (kPa/K)
    pub psychrometric_constant: f64,
}

impl EvaporationResult {
    pub fn rate(&self, model: Model) -> f64 {
        match model {
            Model::Aerodynamic => self.ea,
            Model::EnergyBalance => self.eb,
            Model::Combined => self.ec,
        }
    }
}

/// Run the aerodynamic, energy balance and combined models on one observation.
pub fn compute_single_point(
    observation: &MeteorologicalObservation,
    coefficients: &TransferCoefficients,
) -> Result<EvaporationResult, DomainError> {
    observation.validate()?;
    coefficients.validate()?;

    let aero = aerodynamic(observation, coefficients.kv)?;
    let energy = energy_balance(observation, coefficients.kh)?;
    let penman = combined(observation, coefficients.kv)?;

    debug!(
        "Ea={:.4} Eb={:.4} Ec={:.4} (H={:.3}, delta={:.5}, gamma={:.5})",
        aero.evaporation,
        energy.evaporation,
        penman.evaporation,
        energy.sensible_heat,
        penman.slope,
        penman.psychrometric_constant
    );

    Ok(EvaporationResult {
        ea: aero.evaporation,
        eb: energy.evaporation,
        eh: energy.sensible_heat,
        ec: penman.evaporation,
        coefficients: *coefficients,
        saturation_at_water: aero.saturation_at_water,
        saturation_at_air: penman.saturation_at_air,
        actual_vapor_pressure: aero.actual_vapor_pressure,
        latent_heat: energy.latent_heat,
        slope: penman.slope,
        psychrometric_constant: penman.psychrometric_constant,
    })
}

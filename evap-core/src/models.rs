//! The three evaporation models.
//!
//! Each takes the forcing for one instant plus the coefficient it needs and
//! returns an evaporation rate in mm/day together with the terms a display
//! shows next to it. Rates are signed: a negative value means condensation.

use crate::coefficients::{check_coefficient, HeatTransfer, TransferCoefficient, VaporTransfer};
use crate::error::{ensure_finite, DomainError};
use crate::observation::MeteorologicalObservation;
use crate::psychrometrics::{
    actual_vapor_pressure, latent_heat_of_vaporization, psychrometric_constant,
    saturation_vapor_pressure, slope_of_saturation_curve,
};
use serde::{Deserialize, Serialize};

/// Converts m/s of water to mm/day.
pub const MM_PER_DAY: f64 = 1000.0 * 3600.0 * 24.0;

/// Density of water (kg/m³).
pub const WATER_DENSITY: f64 = 998.0;

/// Which of the three models produced a value.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Model {
    Aerodynamic,
    EnergyBalance,
    Combined,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Aerodynamic, Model::EnergyBalance, Model::Combined];

    /// Short symbol used in tables and legends.
    pub fn symbol(self) -> &'static str {
        match self {
            Model::Aerodynamic => "Ea",
            Model::EnergyBalance => "Eb",
            Model::Combined => "Ec",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Model::Aerodynamic => "Aerodynamic model",
            Model::EnergyBalance => "Energy balance model",
            Model::Combined => "Combined model",
        }
    }
}

/// Result of the aerodynamic (mass transfer) model.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Aerodynamic {
    pub saturation_at_water: f64,
    pub actual_vapor_pressure: f64,
    /// Ea (mm/day)
    pub evaporation: f64,
}

/// `Ea = c Kv v (es(Tw) - ea)`.
pub fn aerodynamic(observation: &MeteorologicalObservation, kv: VaporTransfer) -> Result<Aerodynamic, DomainError> {
    observation.validate()?;
    let kv = check_coefficient(kv)?.value();
    let saturation_at_water = saturation_vapor_pressure(observation.water_temperature)?;
    let actual_vapor_pressure =
        actual_vapor_pressure(observation.air_temperature, observation.relative_humidity)?;
    let evaporation =
        MM_PER_DAY * kv * observation.wind_speed * (saturation_at_water - actual_vapor_pressure);
    Ok(Aerodynamic {
        saturation_at_water,
        actual_vapor_pressure,
        evaporation: ensure_finite("Ea", evaporation)?,
    })
}

/// Result of the energy balance model.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct EnergyBalance {
    /// λ at the water temperature (kJ/kg)
    pub latent_heat: f64,
    /// H (W/m²)
    pub sensible_heat: f64,
    /// Eb (mm/day)
    pub evaporation: f64,
}

/// `Eb = c (Rn - H) / (ρw λ)` with `H = Kh v (Tw - Ta)`.
///
/// Ground heat flux and change in stored heat are left out.
pub fn energy_balance(observation: &MeteorologicalObservation, kh: HeatTransfer) -> Result<EnergyBalance, DomainError> {
    observation.validate()?;
    let kh = check_coefficient(kh)?.value();
    let latent_heat = latent_heat_of_vaporization(observation.water_temperature)?;
    let sensible_heat =
        kh * observation.wind_speed * (observation.water_temperature - observation.air_temperature);
    let evaporation =
        MM_PER_DAY * (observation.net_radiation - sensible_heat) / (WATER_DENSITY * latent_heat * 1000.0);
    Ok(EnergyBalance {
        latent_heat,
        sensible_heat: ensure_finite("H", sensible_heat)?,
        evaporation: ensure_finite("Eb", evaporation)?,
    })
}

/// Result of the combined (Penman) model.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Combined {
    /// Δ at the air temperature (kPa/K)
    pub slope: f64,
    /// γ (kPa/K)
    pub psychrometric_constant: f64,
    pub saturation_at_air: f64,
    pub actual_vapor_pressure: f64,
    /// Radiation-driven rate Eb* (m/s)
    pub radiative_term: f64,
    /// Drying-power rate Ea* (m/s)
    pub aerodynamic_term: f64,
    /// Ec (mm/day)
    pub evaporation: f64,
}

/// `Ec = c [Δ/(Δ+γ) Eb* + γ/(Δ+γ) Ea*]`.
///
/// `Ea* = Kv v (es(Ta) - ea)` takes saturation at the air temperature, unlike
/// [`aerodynamic`] which uses the water surface temperature.
pub fn combined(observation: &MeteorologicalObservation, kv: VaporTransfer) -> Result<Combined, DomainError> {
    observation.validate()?;
    let kv = check_coefficient(kv)?.value();
    let saturation_at_air = saturation_vapor_pressure(observation.air_temperature)?;
    let actual_vapor_pressure =
        actual_vapor_pressure(observation.air_temperature, observation.relative_humidity)?;
    let slope = slope_of_saturation_curve(observation.air_temperature)?;
    let latent_heat = latent_heat_of_vaporization(observation.water_temperature)?;
    let gamma = psychrometric_constant(latent_heat)?;

    let (radiative_weight, aerodynamic_weight) = penman_weights(slope, gamma)?;

    let radiative_term = observation.net_radiation / (WATER_DENSITY * latent_heat * 1e3);
    let aerodynamic_term = kv * observation.wind_speed * (saturation_at_air - actual_vapor_pressure);
    let evaporation =
        MM_PER_DAY * (radiative_weight * radiative_term + aerodynamic_weight * aerodynamic_term);

    Ok(Combined {
        slope,
        psychrometric_constant: gamma,
        saturation_at_air,
        actual_vapor_pressure,
        radiative_term,
        aerodynamic_term,
        evaporation: ensure_finite("Ec", evaporation)?,
    })
}

/// `(Δ/(Δ+γ), γ/(Δ+γ))`, the shares of the radiative and drying-power terms.
fn penman_weights(slope: f64, gamma: f64) -> Result<(f64, f64), DomainError> {
    let weight_sum = slope + gamma;
    if weight_sum == 0.0 {
        return Err(DomainError::DegenerateWeighting);
    }
    Ok((slope / weight_sum, gamma / weight_sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> MeteorologicalObservation {
        MeteorologicalObservation {
            wind_speed: 3.0,
            air_temperature: 30.0,
            water_temperature: 26.0,
            relative_humidity: 30.0,
            net_radiation: 250.0,
        }
    }

    #[test]
    fn test_aerodynamic_scenario() {
        let result = aerodynamic(&scenario(), VaporTransfer(266e-10)).unwrap();
        let expected = MM_PER_DAY
            * 266e-10
            * 3.0
            * (saturation_vapor_pressure(26.0).unwrap() - 0.3 * saturation_vapor_pressure(30.0).unwrap());
        assert!((result.evaporation - expected).abs() < 1e-9);
        assert!((result.evaporation - 14.404478).abs() < 1e-5);
        assert!((result.actual_vapor_pressure - 1.273336).abs() < 1e-5);
    }

    #[test]
    fn test_energy_balance_scenario() {
        let result = energy_balance(&scenario(), HeatTransfer(4.37)).unwrap();
        assert!((result.sensible_heat - (-52.44)).abs() < 1e-9);
        let expected = MM_PER_DAY * (250.0 + 52.44) / (998.0 * (2500.0 - 2.36 * 26.0) * 1000.0);
        assert!((result.evaporation - expected).abs() < 1e-9);
        assert!((result.evaporation - 10.736797).abs() < 1e-5);
    }

    #[test]
    fn test_combined_scenario() {
        let result = combined(&scenario(), VaporTransfer(266e-10)).unwrap();
        assert!((result.slope - 0.2434422).abs() < 1e-6);
        assert!((result.psychrometric_constant - 0.0671178).abs() < 1e-6);
        assert!((result.evaporation - 11.384256).abs() < 1e-5);
    }

    #[test]
    fn test_penman_weights() {
        let (radiative, aerodynamic) = penman_weights(0.2434422, 0.0671178).unwrap();
        assert!((radiative + aerodynamic - 1.0).abs() < 1e-12);
        assert!((radiative - 0.2434422 / 0.31056).abs() < 1e-12);
        assert_eq!(penman_weights(-0.0671178, 0.0671178), Err(DomainError::DegenerateWeighting));
    }

    #[test]
    fn test_combined_uses_air_saturation() {
        // Tw does not enter the drying-power term, only λ.
        let warm_water = MeteorologicalObservation {
            water_temperature: 40.0,
            ..scenario()
        };
        let base = combined(&scenario(), VaporTransfer(266e-10)).unwrap();
        let warm = combined(&warm_water, VaporTransfer(266e-10)).unwrap();
        assert_eq!(base.aerodynamic_term, warm.aerodynamic_term);
        assert_ne!(base.radiative_term, warm.radiative_term);
    }

    #[test]
    fn test_condensation_is_not_clamped() {
        // Saturated air warmer than the water: vapour flows to the surface.
        let humid = MeteorologicalObservation {
            relative_humidity: 100.0,
            net_radiation: -150.0,
            ..scenario()
        };
        let ea = aerodynamic(&humid, VaporTransfer(266e-10)).unwrap();
        assert!(ea.evaporation < 0.0);
        let eb = energy_balance(
            &MeteorologicalObservation {
                water_temperature: 35.0,
                ..humid
            },
            HeatTransfer(4.37),
        )
        .unwrap();
        assert!(eb.evaporation < 0.0);
        let ec = combined(&humid, VaporTransfer(266e-10)).unwrap();
        assert!(ec.evaporation < 0.0);
    }

    #[test]
    fn test_zero_wind_leaves_radiation_only() {
        let calm = MeteorologicalObservation {
            wind_speed: 0.0,
            ..scenario()
        };
        assert_eq!(aerodynamic(&calm, VaporTransfer(266e-10)).unwrap().evaporation, 0.0);
        let eb = energy_balance(&calm, HeatTransfer(4.37)).unwrap();
        assert_eq!(eb.sensible_heat, 0.0);
        assert!(eb.evaporation > 0.0);
    }

    #[test]
    fn test_invalid_inputs_fail_before_computing() {
        let bad = MeteorologicalObservation {
            relative_humidity: 140.0,
            ..scenario()
        };
        assert_eq!(
            aerodynamic(&bad, VaporTransfer(266e-10)),
            Err(DomainError::HumidityOutOfRange(140.0))
        );
        assert!(matches!(
            energy_balance(&scenario(), HeatTransfer(f64::INFINITY)),
            Err(DomainError::InvalidCoefficient { name: "Kh", .. })
        ));
    }
}

//! Vapour pressure and related thermodynamic properties of moist air.
//!
//! Pressures are in kPa, temperatures in °C, latent heat in kJ/kg.

use crate::error::{ensure_finite, DomainError};

/// Temperature (°C) at which the Tetens denominator `237.3 + T` vanishes.
pub const SATURATION_ASYMPTOTE: f64 = -237.3;

/// Atmospheric pressure used by the psychrometric constant (kPa).
pub const ATMOSPHERIC_PRESSURE: f64 = 101.3;

/// Specific heat capacity of air (J/kg/K).
pub const SPECIFIC_HEAT_AIR: f64 = 1005.0;

/// Ratio of the molecular weights of water vapour and dry air.
pub const MOLECULAR_WEIGHT_RATIO: f64 = 0.622;

/// Saturation vapour pressure over water at `temperature`, in kPa.
///
/// `es = 611 exp(17.27 T / (237.3 + T)) * 1e-3`
pub fn saturation_vapor_pressure(temperature: f64) -> Result<f64, DomainError> {
    let temperature = ensure_finite("temperature", temperature)?;
    if temperature <= SATURATION_ASYMPTOTE {
        return Err(DomainError::BelowSaturationAsymptote(temperature));
    }
    // 17.27 T overflows before the ratio does for |T| near f64::MAX.
    let es = 611.0 * ((17.27 * temperature) / (237.3 + temperature)).exp() * 1e-3;
    if !es.is_finite() {
        return Err(DomainError::SaturationOverflow(temperature));
    }
    Ok(es)
}

/// Actual vapour pressure of air at `air_temperature` and `relative_humidity` (%).
pub fn actual_vapor_pressure(air_temperature: f64, relative_humidity: f64) -> Result<f64, DomainError> {
    let relative_humidity = ensure_finite("relative humidity", relative_humidity)?;
    if !(0.0..=100.0).contains(&relative_humidity) {
        return Err(DomainError::HumidityOutOfRange(relative_humidity));
    }
    Ok(0.01 * relative_humidity * saturation_vapor_pressure(air_temperature)?)
}

/// Slope of the saturation vapour pressure curve at `air_temperature`, kPa/K.
pub fn slope_of_saturation_curve(air_temperature: f64) -> Result<f64, DomainError> {
    let es = saturation_vapor_pressure(air_temperature)?;
    Ok(4098.0 * es / (237.3 + air_temperature).powi(2))
}

/// Latent heat of vaporisation at `water_temperature`, kJ/kg.
///
/// Fails where the linear fit crosses zero, since every caller divides by it.
pub fn latent_heat_of_vaporization(water_temperature: f64) -> Result<f64, DomainError> {
    let water_temperature = ensure_finite("water temperature", water_temperature)?;
    let latent_heat = 2500.0 - 2.36 * water_temperature;
    if latent_heat == 0.0 {
        return Err(DomainError::ZeroLatentHeat);
    }
    Ok(latent_heat)
}

/// Psychrometric constant for the given latent heat (kJ/kg), kPa/K.
///
/// Pressure and specific heat are fixed at [`ATMOSPHERIC_PRESSURE`] and
/// [`SPECIFIC_HEAT_AIR`].
pub fn psychrometric_constant(latent_heat: f64) -> Result<f64, DomainError> {
    let latent_heat = ensure_finite("latent heat", latent_heat)?;
    if latent_heat == 0.0 {
        return Err(DomainError::ZeroLatentHeat);
    }
    Ok(SPECIFIC_HEAT_AIR * ATMOSPHERIC_PRESSURE / (MOLECULAR_WEIGHT_RATIO * latent_heat) / 1e3)
}

/// The vapour pressure terms every model draws from, for one observation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct PsychrometricState {
    /// es at the water surface temperature (kPa)
    pub saturation_at_water: f64,
    /// es at the air temperature (kPa)
    pub saturation_at_air: f64,
    /// ea of the air (kPa)
    pub actual_vapor_pressure: f64,
    /// Δ at the air temperature (kPa/K)
    pub slope: f64,
    /// λ at the water surface temperature (kJ/kg)
    pub latent_heat: f64,
    /// γ (kPa/K)
    pub psychrometric_constant: f64,
}

impl PsychrometricState {
    pub fn new(
        water_temperature: f64,
        air_temperature: f64,
        relative_humidity: f64,
    ) -> Result<Self, DomainError> {
        let saturation_at_water = saturation_vapor_pressure(water_temperature)?;
        let saturation_at_air = saturation_vapor_pressure(air_temperature)?;
        let actual_vapor_pressure = actual_vapor_pressure(air_temperature, relative_humidity)?;
        let slope = slope_of_saturation_curve(air_temperature)?;
        let latent_heat = latent_heat_of_vaporization(water_temperature)?;
        let psychrometric_constant = psychrometric_constant(latent_heat)?;
        Ok(PsychrometricState {
            saturation_at_water,
            saturation_at_air,
            actual_vapor_pressure,
            slope,
            latent_heat,
            psychrometric_constant,
        })
    }
}

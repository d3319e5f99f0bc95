use crate::error::{ensure_finite, DomainError};
use serde::{Deserialize, Serialize};

/// One snapshot of the meteorological forcing over a water surface.
///
/// Used both for a single dashboard panel and for one row of a diurnal
/// table. Temperatures are in °C, wind speed in m/s, relative humidity in
/// percent and net radiation in W/m² (negative at night).
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct MeteorologicalObservation {
    pub wind_speed: f64,
    pub air_temperature: f64,
    pub water_temperature: f64,
    pub relative_humidity: f64,
    pub net_radiation: f64,
}

impl MeteorologicalObservation {
    /// Check the invariants every evaluator relies on.
    ///
    /// All fields must be finite, humidity must lie in [0, 100] and wind
    /// speed must not be negative. Temperature limits belong to the
    /// psychrometric functions and are checked there.
    pub fn validate(&self) -> Result<(), DomainError> {
        let wind_speed = ensure_finite("wind speed", self.wind_speed)?;
        ensure_finite("air temperature", self.air_temperature)?;
        ensure_finite("water temperature", self.water_temperature)?;
        let relative_humidity = ensure_finite("relative humidity", self.relative_humidity)?;
        ensure_finite("net radiation", self.net_radiation)?;

        if !(0.0..=100.0).contains(&relative_humidity) {
            return Err(DomainError::HumidityOutOfRange(relative_humidity));
        }
        if wind_speed < 0.0 {
            return Err(DomainError::NegativeWindSpeed(wind_speed));
        }
        Ok(())
    }
}

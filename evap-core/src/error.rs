use thiserror::Error;

/// A formula precondition that did not hold.
///
/// Every evaluator checks its inputs before touching a formula, so a caller
/// either gets finite numbers back or one of these naming what failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{quantity} must be a finite number, got {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("relative humidity must lie in [0, 100] %, got {0}")]
    HumidityOutOfRange(f64),

    #[error("wind speed must not be negative, got {0} m/s")]
    NegativeWindSpeed(f64),

    #[error("temperature {0} °C is at or below the -237.3 °C asymptote of the saturation curve")]
    BelowSaturationAsymptote(f64),

    #[error("saturation vapour pressure is not finite at {0} °C, the Tetens ratio overflows")]
    SaturationOverflow(f64),

    #[error("latent heat of vaporisation is zero, fluxes cannot be converted to evaporation")]
    ZeroLatentHeat,

    #[error("measurement height z must be positive, got {0} m")]
    NonPositiveMeasurementHeight(f64),

    #[error("roughness height z0 must be positive, got {0} m")]
    NonPositiveRoughnessHeight(f64),

    #[error("measurement height and roughness height are equal ({0} m), ln(z/z0) is zero")]
    EqualHeights(f64),

    #[error("roughness height z0 = {z0} m must lie below measurement height z = {z} m")]
    RoughnessAboveMeasurement { z: f64, z0: f64 },

    #[error("{name} must be a finite, non-negative coefficient, got {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("slope plus psychrometric constant is zero, combined weighting undefined")]
    DegenerateWeighting,

    #[error("diurnal series needs at least one row")]
    EmptySeries,

    #[error("time goes backwards at row {index}: {time} h follows {previous} h")]
    TimeNotMonotonic { index: usize, previous: f64, time: f64 },

    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Attach a diurnal row index to an error raised while evaluating that row.
    pub fn at_row(self, index: usize) -> Self {
        DomainError::Row {
            index,
            source: Box::new(self),
        }
    }
}

/// Reject NaN and infinities under the given quantity name.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite { quantity, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_wrapper_keeps_source() {
        let err = DomainError::HumidityOutOfRange(120.0).at_row(3);
        match &err {
            DomainError::Row { index, source } => {
                assert_eq!(*index, 3);
                assert_eq!(**source, DomainError::HumidityOutOfRange(120.0));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(err.to_string().starts_with("row 3:"));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("x", 1.5), Ok(1.5));
        assert!(matches!(
            ensure_finite("x", f64::NAN),
            Err(DomainError::NonFinite { quantity: "x", .. })
        ));
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}

//! Vertical vapour and heat transfer coefficients.
//!
//! Both coefficients come from a logarithmic wind profile over the water,
//! `k² ρa (...) / ln(z/z0)²`, with the physical constants already folded into
//! the numerators below. A panel may instead take them as measured values.

use crate::error::{ensure_finite, DomainError};
use serde::{Deserialize, Serialize};

/// `0.622 k² ρa / (Pa ρw)` with k = 0.4, ρa = 1.15, Pa = 101.3, ρw = 998 (kPa⁻¹).
pub const VAPOR_TRANSFER_NUMERATOR: f64 = 1.132e-6;

/// `k² ca ρa` with k = 0.4, ca = 1005, ρa = 1.15 (J °C m⁻³).
pub const HEAT_TRANSFER_NUMERATOR: f64 = 184.92;

/// Scale at which Kv is entered and displayed on the dashboard.
pub const KV_DISPLAY_SCALE: f64 = 1e-10;

/// Where the anemometer sits and how rough the surface under it is.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct SiteGeometry {
    /// Measurement height z (m)
    pub measurement_height: f64,
    /// Surface roughness height z0 (m)
    pub roughness_height: f64,
}

impl SiteGeometry {
    pub fn new(measurement_height: f64, roughness_height: f64) -> Self {
        SiteGeometry {
            measurement_height,
            roughness_height,
        }
    }

    /// `ln(z/z0)²`, the shared denominator of both derived coefficients.
    ///
    /// Requires `0 < z0 < z`; equal heights would divide by zero.
    pub fn log_profile_squared(&self) -> Result<f64, DomainError> {
        let z = ensure_finite("measurement height", self.measurement_height)?;
        let z0 = ensure_finite("roughness height", self.roughness_height)?;
        if z <= 0.0 {
            return Err(DomainError::NonPositiveMeasurementHeight(z));
        }
        if z0 <= 0.0 {
            return Err(DomainError::NonPositiveRoughnessHeight(z0));
        }
        if z == z0 {
            return Err(DomainError::EqualHeights(z));
        }
        if z0 > z {
            return Err(DomainError::RoughnessAboveMeasurement { z, z0 });
        }
        let log_ratio = (z / z0).ln();
        if log_ratio == 0.0 {
            return Err(DomainError::EqualHeights(z));
        }
        Ok(log_ratio.powi(2))
    }
}

/// A transfer coefficient that can be read from a log wind profile.
pub trait TransferCoefficient: Copy {
    /// Name used in error messages.
    const NAME: &'static str;

    fn from_log_profile(log_profile_squared: f64) -> Self;

    fn value(self) -> f64;
}

/// Vertical vapour transfer coefficient Kv (kPa⁻¹).
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Serialize, Deserialize)]
pub struct VaporTransfer(pub f64);

impl VaporTransfer {
    /// Kv from the dashboard's `× 10⁻¹⁰` entry.
    pub fn from_scaled(scaled: f64) -> Self {
        VaporTransfer(scaled * KV_DISPLAY_SCALE)
    }

    /// Kv expressed in units of 10⁻¹⁰ kPa⁻¹.
    pub fn scaled(self) -> f64 {
        self.0 / KV_DISPLAY_SCALE
    }
}

impl TransferCoefficient for VaporTransfer {
    const NAME: &'static str = "Kv";

    fn from_log_profile(log_profile_squared: f64) -> Self {
        VaporTransfer(VAPOR_TRANSFER_NUMERATOR / log_profile_squared)
    }

    fn value(self) -> f64 {
        self.0
    }
}

/// Vertical heat transfer coefficient Kh (J °C m⁻³).
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Serialize, Deserialize)]
pub struct HeatTransfer(pub f64);

impl TransferCoefficient for HeatTransfer {
    const NAME: &'static str = "Kh";

    fn from_log_profile(log_profile_squared: f64) -> Self {
        HeatTransfer(HEAT_TRANSFER_NUMERATOR / log_profile_squared)
    }

    fn value(self) -> f64 {
        self.0
    }
}

/// Both coefficients for one evaluation pass.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct TransferCoefficients {
    pub kv: VaporTransfer,
    pub kh: HeatTransfer,
}

impl TransferCoefficients {
    pub fn new(kv: VaporTransfer, kh: HeatTransfer) -> Self {
        TransferCoefficients { kv, kh }
    }

    /// Reject negative or non-finite coefficients.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_coefficient(self.kv)?;
        check_coefficient(self.kh)?;
        Ok(())
    }
}

/// Derive Kv and Kh for a site from its log wind profile.
pub fn derive_transfer_coefficients(geometry: &SiteGeometry) -> Result<TransferCoefficients, DomainError> {
    let log_profile_squared = geometry.log_profile_squared()?;
    Ok(TransferCoefficients {
        kv: VaporTransfer::from_log_profile(log_profile_squared),
        kh: HeatTransfer::from_log_profile(log_profile_squared),
    })
}

/// How a panel obtains one of its transfer coefficients.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CoefficientSource<C> {
    /// Entered directly.
    Direct(C),
    /// Calculated from measurement and roughness heights.
    Derived(SiteGeometry),
}

impl<C: TransferCoefficient> CoefficientSource<C> {
    pub fn resolve(&self) -> Result<C, DomainError> {
        match self {
            CoefficientSource::Direct(coefficient) => check_coefficient(*coefficient),
            CoefficientSource::Derived(geometry) => {
                let log_profile_squared = geometry.log_profile_squared()?;
                Ok(C::from_log_profile(log_profile_squared))
            }
        }
    }
}

pub(crate) fn check_coefficient<C: TransferCoefficient>(coefficient: C) -> Result<C, DomainError> {
    let value = coefficient.value();
    if value.is_finite() && value >= 0.0 {
        Ok(coefficient)
    } else {
        Err(DomainError::InvalidCoefficient {
            name: C::NAME,
            value,
        })
    }
}

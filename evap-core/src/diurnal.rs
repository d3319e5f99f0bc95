//! Evaporation through a day from a table of forcings.
//!
//! One site geometry applies to every row. Each pass is computed from
//! scratch; nothing is kept between evaluations.

use crate::coefficients::{derive_transfer_coefficients, SiteGeometry, TransferCoefficients};
use crate::error::{ensure_finite, DomainError};
use crate::evaluation::{compute_single_point, EvaporationResult};
use crate::models::Model;
use crate::observation::MeteorologicalObservation;
use log::debug;
use serde::{Deserialize, Serialize};

/// One row of a diurnal table: an hour of the day and its forcing.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DiurnalRow {
    /// Hours since the start of the day
    pub time: f64,
    pub observation: MeteorologicalObservation,
}

/// Non-empty rows with non-decreasing time. Repeated times are allowed.
#[derive(Debug, PartialEq, Clone)]
pub struct DiurnalSeries {
    rows: Vec<DiurnalRow>,
}

impl DiurnalSeries {
    pub fn new(rows: Vec<DiurnalRow>) -> Result<Self, DomainError> {
        if rows.is_empty() {
            return Err(DomainError::EmptySeries);
        }
        let mut previous = f64::NEG_INFINITY;
        for (index, row) in rows.iter().enumerate() {
            let time = ensure_finite("time", row.time).map_err(|e| e.at_row(index))?;
            if time < previous {
                return Err(DomainError::TimeNotMonotonic {
                    index,
                    previous,
                    time,
                });
            }
            previous = time;
        }
        Ok(DiurnalSeries { rows })
    }

    pub fn rows(&self) -> &[DiurnalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-row results plus the vapour pressure columns, aligned with the input.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DiurnalEvaluation {
    pub coefficients: TransferCoefficients,
    pub times: Vec<f64>,
    pub per_row: Vec<EvaporationResult>,
    /// es at the water surface temperature per row (kPa)
    pub es_tw: Vec<f64>,
    /// es at the air temperature per row (kPa)
    pub es_ta: Vec<f64>,
    /// ea of the air per row (kPa)
    pub ea_ta: Vec<f64>,
}

impl DiurnalEvaluation {
    pub fn len(&self) -> usize {
        self.per_row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_row.is_empty()
    }

    /// Rates of one model, in row order.
    pub fn series(&self, model: Model) -> Vec<f64> {
        self.per_row.iter().map(|r| r.rate(model)).collect()
    }

    /// `(time, rate)` pairs of one model, in row order.
    pub fn points(&self, model: Model) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .zip(self.per_row.iter())
            .map(|(t, r)| (*t, r.rate(model)))
            .collect()
    }
}

/// Apply all three models to every row using coefficients derived from `geometry`.
pub fn compute_diurnal_series(
    series: &DiurnalSeries,
    geometry: &SiteGeometry,
) -> Result<DiurnalEvaluation, DomainError> {
    let coefficients = derive_transfer_coefficients(geometry)?;
    debug!(
        "diurnal pass over {} rows with Kv={:e} Kh={:.4}",
        series.len(),
        coefficients.kv.0,
        coefficients.kh.0
    );

    let per_row = series
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            compute_single_point(&row.observation, &coefficients).map_err(|e| e.at_row(index))
        })
        .collect::<Result<Vec<EvaporationResult>, _>>()?;

    Ok(DiurnalEvaluation {
        coefficients,
        times: series.rows().iter().map(|r| r.time).collect(),
        es_tw: per_row.iter().map(|r| r.saturation_at_water).collect(),
        es_ta: per_row.iter().map(|r| r.saturation_at_air).collect(),
        ea_ta: per_row.iter().map(|r| r.actual_vapor_pressure).collect(),
        per_row,
    })
}

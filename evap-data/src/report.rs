//! The diurnal result table.

use crate::table::TableError;
use csv::WriterBuilder;
use evap_core::diurnal::DiurnalEvaluation;
use serde::Serialize;
use std::io::Write;

/// One output row, aligned with the forcing row of the same index.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Time h")]
    pub time: f64,
    #[serde(rename = "es(Tw) kPa")]
    pub es_tw: f64,
    #[serde(rename = "es(Ta) kPa")]
    pub es_ta: f64,
    #[serde(rename = "ea kPa")]
    pub ea_ta: f64,
    #[serde(rename = "Ea mm d-1")]
    pub ea: f64,
    #[serde(rename = "Eb mm d-1")]
    pub eb: f64,
    #[serde(rename = "Ec mm d-1")]
    pub ec: f64,
}

pub const RESULT_COLUMNS: [&str; 7] = [
    "Time h",
    "es(Tw) kPa",
    "es(Ta) kPa",
    "ea kPa",
    "Ea mm d-1",
    "Eb mm d-1",
    "Ec mm d-1",
];

/// One row per evaluated time step; stops at the shortest column.
pub fn result_rows(evaluation: &DiurnalEvaluation) -> Vec<ResultRow> {
    evaluation
        .times
        .iter()
        .zip(&evaluation.per_row)
        .zip(&evaluation.es_tw)
        .zip(&evaluation.es_ta)
        .zip(&evaluation.ea_ta)
        .map(|((((time, result), es_tw), es_ta), ea_ta)| ResultRow {
            time: *time,
            es_tw: *es_tw,
            es_ta: *es_ta,
            ea_ta: *ea_ta,
            ea: result.ea,
            eb: result.eb,
            ec: result.ec,
        })
        .collect()
}

pub fn write_result_csv<W: Write>(rows: &[ResultRow], writer: W) -> Result<(), TableError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

//! Data handling for diurnal evaporation.
//!
//! This crate owns the editable forcing table and turns evaluated series
//! into forms suitable for tables and charting.

pub mod chart;
pub mod report;
pub mod table;

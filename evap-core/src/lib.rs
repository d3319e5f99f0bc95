pub mod coefficients;
pub mod diurnal;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod observation;
pub mod panel;
pub mod psychrometrics;

//! Diurnal table evaluation and the default forcing table.

use crate::config::GeometryConfig;
use anyhow::Context;
use evap_core::diurnal::{compute_diurnal_series, DiurnalEvaluation};
use evap_data::chart::ChartSpec;
use evap_data::report::{result_rows, write_result_csv, ResultRow, RESULT_COLUMNS};
use evap_data::table::ForcingTable;
use evap_utils::format::{format_fixed, format_kv};
use log::info;
use std::fs::File;
use std::io::BufWriter;

const COLUMN_WIDTH: usize = 12;

/// Plain-text rendering of the result table, one line per row.
pub fn render_result_table(rows: &[ResultRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        RESULT_COLUMNS
            .iter()
            .map(|c| format!("{:>width$}", c, width = COLUMN_WIDTH))
            .collect::<Vec<_>>()
            .join(""),
    );
    for row in rows {
        let cells = [
            format_fixed(row.time, 1),
            format_fixed(row.es_tw, 4),
            format_fixed(row.es_ta, 4),
            format_fixed(row.ea_ta, 4),
            format_fixed(row.ea, 3),
            format_fixed(row.eb, 3),
            format_fixed(row.ec, 3),
        ];
        lines.push(
            cells
                .iter()
                .map(|c| format!("{:>width$}", c, width = COLUMN_WIDTH))
                .collect::<Vec<_>>()
                .join(""),
        );
    }
    lines.join("\n")
}

fn render_coefficients(evaluation: &DiurnalEvaluation) -> String {
    format!(
        "Kv = {} [kPa^-1]\nKh = {} [J °C m^-3]",
        format_kv(evaluation.coefficients.kv.0),
        format_fixed(evaluation.coefficients.kh.0, 2)
    )
}

/// Evaluate a forcing table (the default profile when no input is given),
/// print the results and optionally write the result CSV and chart JSON.
pub fn run_diurnal(
    input: Option<&str>,
    geometry: &GeometryConfig,
    output: Option<&str>,
    chart: Option<&str>,
) -> anyhow::Result<()> {
    let table = match input {
        Some(path) => ForcingTable::from_path(path)
            .with_context(|| format!("failed to read forcing table {}", path))?,
        None => {
            info!("No forcing table given, using the default daily profile");
            ForcingTable::default_profile()?
        }
    };

    let series = table.to_series()?;
    let evaluation = compute_diurnal_series(&series, &geometry.site())?;
    let rows = result_rows(&evaluation);

    println!("{}", render_result_table(&rows));
    println!();
    println!("{}", render_coefficients(&evaluation));

    if let Some(path) = output {
        let file = File::create(path).with_context(|| format!("unable to create {}", path))?;
        write_result_csv(&rows, BufWriter::new(file))?;
        info!("Wrote {} result rows to {}", rows.len(), path);
    }

    if let Some(path) = chart {
        let json = ChartSpec::diurnal(&evaluation).to_json()?;
        std::fs::write(path, json).with_context(|| format!("unable to write {}", path))?;
        info!("Wrote chart series to {}", path);
    }

    Ok(())
}

/// Write the default forcing table, to a file or stdout, as a starting point for editing.
pub fn run_default_table(output: Option<&str>) -> anyhow::Result<()> {
    let table = ForcingTable::default_profile()?;
    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("unable to create {}", path))?;
            table.write_csv(BufWriter::new(file))?;
            info!("Wrote {} forcing rows to {}", table.len(), path);
        }
        None => table.write_csv(std::io::stdout().lock())?,
    }
    Ok(())
}

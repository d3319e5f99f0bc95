//! Line chart payload for the diurnal page.
//!
//! The renderer is external; it receives one JSON document holding the
//! axis labels and one coloured series per model.

use evap_core::diurnal::DiurnalEvaluation;
use evap_core::models::Model;
use serde::Serialize;

pub const CHART_TITLE: &str = "Diurnal Evaporation";
pub const X_AXIS_LABEL: &str = "Time [hr]";
pub const Y_AXIS_LABEL: &str = "Evaporation rate [mm d-1]";

#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct ChartPoint {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub series: Vec<ChartSeries>,
}

/// Line colour of a model: blue, red and black.
pub fn model_color(model: Model) -> &'static str {
    match model {
        Model::Aerodynamic => "#0000ff",
        Model::EnergyBalance => "#ff0000",
        Model::Combined => "#000000",
    }
}

/// Legend entry, e.g. "Ea: Aerodynamic model".
pub fn model_label(model: Model) -> String {
    format!("{}: {}", model.symbol(), model.name())
}

impl ChartSpec {
    pub fn diurnal(evaluation: &DiurnalEvaluation) -> Self {
        let series = Model::ALL
            .iter()
            .map(|model| ChartSeries {
                label: model_label(*model),
                color: model_color(*model).to_string(),
                points: evaluation
                    .points(*model)
                    .into_iter()
                    .map(|(time, value)| ChartPoint { time, value })
                    .collect(),
            })
            .collect();
        ChartSpec {
            title: CHART_TITLE.to_string(),
            x_axis_label: X_AXIS_LABEL.to_string(),
            y_axis_label: Y_AXIS_LABEL.to_string(),
            series,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ForcingTable;
    use evap_core::coefficients::SiteGeometry;
    use evap_core::diurnal::compute_diurnal_series;

    fn spec() -> (DiurnalEvaluation, ChartSpec) {
        let series = ForcingTable::default_profile().unwrap().to_series().unwrap();
        let evaluation = compute_diurnal_series(&series, &SiteGeometry::new(2.0, 0.003)).unwrap();
        let spec = ChartSpec::diurnal(&evaluation);
        (evaluation, spec)
    }

    #[test]
    fn test_one_series_per_model() {
        let (evaluation, spec) = spec();
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[0].label, "Ea: Aerodynamic model");
        assert_eq!(spec.series[1].color, "#ff0000");
        assert_eq!(spec.series[2].points.len(), 7);
        assert_eq!(spec.series[2].points[3].time, 12.0);
        assert_eq!(spec.series[2].points[3].value, evaluation.per_row[3].ec);
    }

    #[test]
    fn test_json_layout() {
        let (_, spec) = spec();
        let json = spec.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Diurnal Evaporation");
        assert_eq!(value["xAxisLabel"], "Time [hr]");
        assert_eq!(value["series"][1]["label"], "Eb: Energy balance model");
        assert_eq!(value["series"][0]["points"][0]["time"], 0.0);
    }
}

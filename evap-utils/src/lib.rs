//! Shared utility functions for evaporation front ends.

/// Number formatting for readouts and tables
pub mod format {
    /// Format Kv (kPa⁻¹) the way the dashboard shows it, e.g. "266E-10".
    pub fn format_kv(kv: f64) -> String {
        format!("{:.0}E-10", (kv * 1e10).round())
    }

    /// Format an evaporation rate as "<value> [mm/day]" with two decimals.
    pub fn format_rate(symbol: &str, rate: f64) -> String {
        format!("{} = {} [mm/day]", symbol, format_fixed(rate, 2))
    }

    /// Format a value with a fixed number of decimals, avoiding "-0.00".
    pub fn format_fixed(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.*}", decimals, value);
        if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        }
    }

}

/// Slider ranges of the dashboard, for flagging unusual inputs
pub mod ranges {
    /// An inclusive range a dashboard input is expected to lie in.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct InputRange {
        pub name: &'static str,
        pub min: f64,
        pub max: f64,
    }

    impl InputRange {
        pub fn contains(&self, value: f64) -> bool {
            value >= self.min && value <= self.max
        }
    }

    pub const WIND_SPEED: InputRange = InputRange { name: "wind speed", min: 0.0, max: 10.0 };
    pub const TEMPERATURE: InputRange = InputRange { name: "temperature", min: 0.0, max: 45.0 };
    pub const RELATIVE_HUMIDITY: InputRange = InputRange { name: "relative humidity", min: 0.0, max: 100.0 };
    pub const NET_RADIATION: InputRange = InputRange { name: "net radiation", min: -200.0, max: 1000.0 };
    pub const KV_SCALED: InputRange = InputRange { name: "Kv x 1e10", min: 1.0, max: 5000.0 };
    pub const KH: InputRange = InputRange { name: "Kh", min: 0.01, max: 50.0 };
    pub const MEASUREMENT_HEIGHT: InputRange = InputRange { name: "measurement height", min: 0.0, max: 10.0 };
    pub const ROUGHNESS_HEIGHT: InputRange = InputRange { name: "roughness height", min: 0.0, max: 1.0 };

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_contains_is_inclusive() {
            assert!(TEMPERATURE.contains(0.0));
            assert!(TEMPERATURE.contains(45.0));
            assert!(!TEMPERATURE.contains(45.1));
            assert!(NET_RADIATION.contains(-200.0));
            assert!(!WIND_SPEED.contains(-0.5));
        }
    }
}

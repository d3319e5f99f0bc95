//! Panel inputs, from command-line flags or a dashboard TOML file.
//!
//! The same structs back both: flags default to the dashboard's initial
//! slider values, and so does every key missing from the file.

use anyhow::Context;
use clap::{Args, ValueEnum};
use evap_core::coefficients::{CoefficientSource, HeatTransfer, SiteGeometry, VaporTransfer};
use evap_core::panel::{defaults, AerodynamicPanel, CombinedPanel, Dashboard, EnergyBalancePanel};
use evap_utils::ranges::{self, InputRange};
use log::{info, warn};
use serde::Deserialize;
use std::path::Path;

/// How a panel gets its transfer coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientMode {
    /// Use the entered value
    #[default]
    Input,
    /// Calculate from measurement and roughness heights
    Calculate,
}

fn default_wind_speed() -> f64 {
    defaults::WIND_SPEED
}
fn default_water_temperature() -> f64 {
    defaults::WATER_TEMPERATURE
}
fn default_air_temperature() -> f64 {
    defaults::AIR_TEMPERATURE
}
fn default_relative_humidity() -> f64 {
    defaults::RELATIVE_HUMIDITY
}
fn default_net_radiation() -> f64 {
    defaults::NET_RADIATION
}
fn default_kv_scaled() -> f64 {
    defaults::KV_SCALED
}
fn default_kh() -> f64 {
    defaults::KH
}
fn default_measurement_height() -> f64 {
    defaults::MEASUREMENT_HEIGHT
}
fn default_roughness_height() -> f64 {
    defaults::ROUGHNESS_HEIGHT
}

/// Measurement and roughness heights, used when a coefficient is calculated.
#[derive(Debug, Clone, Copy, PartialEq, Args, Deserialize)]
pub struct GeometryConfig {
    /// Measurement height z [m]
    #[arg(long = "z", default_value_t = defaults::MEASUREMENT_HEIGHT)]
    #[serde(default = "default_measurement_height")]
    pub measurement_height: f64,

    /// Surface roughness height z0 [m]
    #[arg(long = "z0", default_value_t = defaults::ROUGHNESS_HEIGHT)]
    #[serde(default = "default_roughness_height")]
    pub roughness_height: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        GeometryConfig {
            measurement_height: defaults::MEASUREMENT_HEIGHT,
            roughness_height: defaults::ROUGHNESS_HEIGHT,
        }
    }
}

impl GeometryConfig {
    pub fn site(&self) -> SiteGeometry {
        SiteGeometry::new(self.measurement_height, self.roughness_height)
    }

    fn check_ranges(&self, panel: &str) {
        check_range(panel, ranges::MEASUREMENT_HEIGHT, self.measurement_height);
        check_range(panel, ranges::ROUGHNESS_HEIGHT, self.roughness_height);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Args, Deserialize)]
pub struct AerodynamicConfig {
    /// Wind speed v [m/s]
    #[arg(long, default_value_t = defaults::WIND_SPEED)]
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,

    /// Water surface temperature Tw [°C]
    #[arg(long, default_value_t = defaults::WATER_TEMPERATURE, allow_hyphen_values = true)]
    #[serde(default = "default_water_temperature")]
    pub water_temperature: f64,

    /// Air temperature Ta [°C]
    #[arg(long, default_value_t = defaults::AIR_TEMPERATURE, allow_hyphen_values = true)]
    #[serde(default = "default_air_temperature")]
    pub air_temperature: f64,

    /// Relative humidity RH [%]
    #[arg(long, default_value_t = defaults::RELATIVE_HUMIDITY)]
    #[serde(default = "default_relative_humidity")]
    pub relative_humidity: f64,

    /// Enter Kv or calculate it from z and z0
    #[arg(long, value_enum, default_value_t = CoefficientMode::Input)]
    #[serde(default)]
    pub kv_mode: CoefficientMode,

    /// Vapour transfer coefficient Kv in units of 1e-10 kPa^-1
    #[arg(long = "kv", default_value_t = defaults::KV_SCALED)]
    #[serde(default = "default_kv_scaled")]
    pub kv_scaled: f64,

    #[command(flatten)]
    #[serde(flatten)]
    pub geometry: GeometryConfig,
}

impl Default for AerodynamicConfig {
    fn default() -> Self {
        AerodynamicConfig {
            wind_speed: defaults::WIND_SPEED,
            water_temperature: defaults::WATER_TEMPERATURE,
            air_temperature: defaults::AIR_TEMPERATURE,
            relative_humidity: defaults::RELATIVE_HUMIDITY,
            kv_mode: CoefficientMode::Input,
            kv_scaled: defaults::KV_SCALED,
            geometry: GeometryConfig::default(),
        }
    }
}

impl AerodynamicConfig {
    pub fn panel(&self) -> AerodynamicPanel {
        self.check_ranges();
        AerodynamicPanel {
            wind_speed: self.wind_speed,
            water_temperature: self.water_temperature,
            air_temperature: self.air_temperature,
            relative_humidity: self.relative_humidity,
            kv: vapor_source(self.kv_mode, self.kv_scaled, &self.geometry),
        }
    }

    fn check_ranges(&self) {
        let panel = "aerodynamic";
        check_range(panel, ranges::WIND_SPEED, self.wind_speed);
        check_range(panel, ranges::TEMPERATURE, self.water_temperature);
        check_range(panel, ranges::TEMPERATURE, self.air_temperature);
        check_range(panel, ranges::RELATIVE_HUMIDITY, self.relative_humidity);
        match self.kv_mode {
            CoefficientMode::Input => check_range(panel, ranges::KV_SCALED, self.kv_scaled),
            CoefficientMode::Calculate => self.geometry.check_ranges(panel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Args, Deserialize)]
pub struct EnergyBalanceConfig {
    /// Net radiation Rn [W/m2]
    #[arg(long, default_value_t = defaults::NET_RADIATION, allow_hyphen_values = true)]
    #[serde(default = "default_net_radiation")]
    pub net_radiation: f64,

    /// Wind speed v [m/s]
    #[arg(long, default_value_t = defaults::WIND_SPEED)]
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,

    /// Water surface temperature Tw [°C]
    #[arg(long, default_value_t = defaults::WATER_TEMPERATURE, allow_hyphen_values = true)]
    #[serde(default = "default_water_temperature")]
    pub water_temperature: f64,

    /// Air temperature Ta [°C]
    #[arg(long, default_value_t = defaults::AIR_TEMPERATURE, allow_hyphen_values = true)]
    #[serde(default = "default_air_temperature")]
    pub air_temperature: f64,

    /// Enter Kh or calculate it from z and z0
    #[arg(long, value_enum, default_value_t = CoefficientMode::Input)]
    #[serde(default)]
    pub kh_mode: CoefficientMode,

    /// Heat transfer coefficient Kh [J °C m^-3]
    #[arg(long, default_value_t = defaults::KH)]
    #[serde(default = "default_kh")]
    pub kh: f64,

    #[command(flatten)]
    #[serde(flatten)]
    pub geometry: GeometryConfig,
}

impl Default for EnergyBalanceConfig {
    fn default() -> Self {
        EnergyBalanceConfig {
            net_radiation: defaults::NET_RADIATION,
            wind_speed: defaults::WIND_SPEED,
            water_temperature: defaults::WATER_TEMPERATURE,
            air_temperature: defaults::AIR_TEMPERATURE,
            kh_mode: CoefficientMode::Input,
            kh: defaults::KH,
            geometry: GeometryConfig::default(),
        }
    }
}

impl EnergyBalanceConfig {
    pub fn panel(&self) -> EnergyBalancePanel {
        self.check_ranges();
        let kh = match self.kh_mode {
            CoefficientMode::Input => CoefficientSource::Direct(HeatTransfer(self.kh)),
            CoefficientMode::Calculate => CoefficientSource::Derived(self.geometry.site()),
        };
        EnergyBalancePanel {
            net_radiation: self.net_radiation,
            wind_speed: self.wind_speed,
            water_temperature: self.water_temperature,
            air_temperature: self.air_temperature,
            kh,
        }
    }

    fn check_ranges(&self) {
        let panel = "energy balance";
        check_range(panel, ranges::NET_RADIATION, self.net_radiation);
        check_range(panel, ranges::WIND_SPEED, self.wind_speed);
        check_range(panel, ranges::TEMPERATURE, self.water_temperature);
        check_range(panel, ranges::TEMPERATURE, self.air_temperature);
        match self.kh_mode {
            CoefficientMode::Input => check_range(panel, ranges::KH, self.kh),
            CoefficientMode::Calculate => self.geometry.check_ranges(panel),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Args, Deserialize)]
pub struct CombinedConfig {
    /// Net radiation Rn [W/m2]
    #[arg(long, default_value_t = defaults::NET_RADIATION, allow_hyphen_values = true)]
    #[serde(default = "default_net_radiation")]
    pub net_radiation: f64,

    /// Wind speed v [m/s]
    #[arg(long, default_value_t = defaults::WIND_SPEED)]
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,

    /// Water surface temperature Tw [°C]
    #[arg(long, default_value_t = defaults::WATER_TEMPERATURE, allow_hyphen_values = true)]
    #[serde(default = "default_water_temperature")]
    pub water_temperature: f64,

    /// Air temperature Ta [°C]
    #[arg(long, default_value_t = defaults::AIR_TEMPERATURE, allow_hyphen_values = true)]
    #[serde(default = "default_air_temperature")]
    pub air_temperature: f64,

    /// Relative humidity RH [%]
    #[arg(long, default_value_t = defaults::RELATIVE_HUMIDITY)]
    #[serde(default = "default_relative_humidity")]
    pub relative_humidity: f64,

    /// Enter Kv or calculate it from z and z0
    #[arg(long, value_enum, default_value_t = CoefficientMode::Input)]
    #[serde(default)]
    pub kv_mode: CoefficientMode,

    /// Vapour transfer coefficient Kv in units of 1e-10 kPa^-1
    #[arg(long = "kv", default_value_t = defaults::KV_SCALED)]
    #[serde(default = "default_kv_scaled")]
    pub kv_scaled: f64,

    #[command(flatten)]
    #[serde(flatten)]
    pub geometry: GeometryConfig,
}

impl Default for CombinedConfig {
    fn default() -> Self {
        CombinedConfig {
            net_radiation: defaults::NET_RADIATION,
            wind_speed: defaults::WIND_SPEED,
            water_temperature: defaults::WATER_TEMPERATURE,
            air_temperature: defaults::AIR_TEMPERATURE,
            relative_humidity: defaults::RELATIVE_HUMIDITY,
            kv_mode: CoefficientMode::Input,
            kv_scaled: defaults::KV_SCALED,
            geometry: GeometryConfig::default(),
        }
    }
}

impl CombinedConfig {
    pub fn panel(&self) -> CombinedPanel {
        self.check_ranges();
        CombinedPanel {
            net_radiation: self.net_radiation,
            wind_speed: self.wind_speed,
            water_temperature: self.water_temperature,
            air_temperature: self.air_temperature,
            relative_humidity: self.relative_humidity,
            kv: vapor_source(self.kv_mode, self.kv_scaled, &self.geometry),
        }
    }

    fn check_ranges(&self) {
        let panel = "combined";
        check_range(panel, ranges::NET_RADIATION, self.net_radiation);
        check_range(panel, ranges::WIND_SPEED, self.wind_speed);
        check_range(panel, ranges::TEMPERATURE, self.water_temperature);
        check_range(panel, ranges::TEMPERATURE, self.air_temperature);
        check_range(panel, ranges::RELATIVE_HUMIDITY, self.relative_humidity);
        match self.kv_mode {
            CoefficientMode::Input => check_range(panel, ranges::KV_SCALED, self.kv_scaled),
            CoefficientMode::Calculate => self.geometry.check_ranges(panel),
        }
    }
}

/// A whole dashboard snapshot. Each table is optional in the file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub aerodynamic: AerodynamicConfig,
    pub energy_balance: EnergyBalanceConfig,
    pub combined: CombinedConfig,
}

impl DashboardConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: DashboardConfig = toml::from_str(content).context("invalid dashboard configuration")?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read dashboard configuration {}", path.display()))?;
        let config = Self::from_toml(&content)?;
        info!("Loaded dashboard configuration from {}", path.display());
        Ok(config)
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            aerodynamic: self.aerodynamic.panel(),
            energy_balance: self.energy_balance.panel(),
            combined: self.combined.panel(),
        }
    }
}

fn vapor_source(mode: CoefficientMode, kv_scaled: f64, geometry: &GeometryConfig) -> CoefficientSource<VaporTransfer> {
    match mode {
        CoefficientMode::Input => CoefficientSource::Direct(VaporTransfer::from_scaled(kv_scaled)),
        CoefficientMode::Calculate => CoefficientSource::Derived(geometry.site()),
    }
}

fn check_range(panel: &str, range: InputRange, value: f64) {
    if !range.contains(value) {
        warn!(
            "{} panel: {} = {} lies outside the dashboard range [{}, {}]",
            panel, range.name, value, range.min, range.max
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.dashboard(), Dashboard::default());
    }

    #[test]
    fn test_partial_sections() {
        let content = r#"
[aerodynamic]
wind_speed = 5.0
kv_mode = "calculate"
measurement_height = 3.0

[energy_balance]
net_radiation = -120.5
kh = 6.0
"#;
        let config = DashboardConfig::from_toml(content).unwrap();
        assert_eq!(config.aerodynamic.wind_speed, 5.0);
        assert_eq!(config.aerodynamic.kv_mode, CoefficientMode::Calculate);
        assert_eq!(config.aerodynamic.geometry.measurement_height, 3.0);
        assert_eq!(config.aerodynamic.geometry.roughness_height, defaults::ROUGHNESS_HEIGHT);
        assert_eq!(config.aerodynamic.relative_humidity, defaults::RELATIVE_HUMIDITY);
        assert_eq!(config.energy_balance.net_radiation, -120.5);
        assert_eq!(config.combined, CombinedConfig::default());

        let dashboard = config.dashboard();
        assert_eq!(
            dashboard.aerodynamic.kv,
            CoefficientSource::Derived(SiteGeometry::new(3.0, defaults::ROUGHNESS_HEIGHT))
        );
        assert_eq!(dashboard.energy_balance.kh, CoefficientSource::Direct(HeatTransfer(6.0)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("evap-dashboard-{}.toml", std::process::id()));
        std::fs::write(&path, "[combined]\nrelative_humidity = 55.0\nkv_scaled = 300.0\n").unwrap();
        let config = DashboardConfig::load(&path);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();
        assert_eq!(config.combined.relative_humidity, 55.0);
        assert_eq!(config.combined.kv_scaled, 300.0);
        assert_eq!(config.aerodynamic, AerodynamicConfig::default());

        assert!(DashboardConfig::load(&path).is_err());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let content = "[combined]\nkv_mode = \"guess\"\n";
        assert!(DashboardConfig::from_toml(content).is_err());
    }

    #[test]
    fn test_scaled_kv_is_unscaled() {
        let config = AerodynamicConfig {
            kv_scaled: 500.0,
            ..AerodynamicConfig::default()
        };
        match config.panel().kv {
            CoefficientSource::Direct(kv) => assert!((kv.0 - 500e-10).abs() < 1e-20),
            other => panic!("unexpected source {:?}", other),
        }
    }
}

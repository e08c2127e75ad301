//! Configuration System
//!
//! Handles loading dashboard configuration from TOML. Every field has a
//! default, so an empty file (or no file at all) yields the standard
//! dashboard: 4 charts, a 90-day selection window and the built-in sensor
//! bounds and palette.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::chart::{ChartColor, ChartConfigBuilder, Palette, ZoomMode};
use crate::sensors::{SensorBounds, SensorType};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub dashboard: LayoutConfig,

    #[serde(default)]
    pub sensors: BTreeMap<SensorType, SensorBounds>,

    #[serde(default = "default_palette")]
    pub palette: Vec<ChartColor>,

    #[serde(default)]
    pub chart: ChartRenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Slot count and date window
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_max_charts")]
    pub max_charts: usize,

    #[serde(default = "default_max_range_days")]
    pub max_range_days: u64,

    #[serde(default = "default_range_days")]
    pub default_range_days: u64,
}

fn default_max_charts() -> usize {
    4
}

fn default_max_range_days() -> u64 {
    90
}

fn default_range_days() -> u64 {
    10
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_charts: default_max_charts(),
            max_range_days: default_max_range_days(),
            default_range_days: default_range_days(),
        }
    }
}

fn default_palette() -> Vec<ChartColor> {
    Palette::default().colors().to_vec()
}

/// Rendering parameters shared by every chart
#[derive(Debug, Clone, Deserialize)]
pub struct ChartRenderConfig {
    #[serde(default = "default_tension")]
    pub tension: f64,

    #[serde(default = "default_wheel_speed")]
    pub wheel_speed: f64,

    #[serde(default = "default_min_range")]
    pub min_range: f64,

    /// Drag to pan
    #[serde(default = "default_enabled")]
    pub pan: bool,

    #[serde(default = "default_enabled")]
    pub wheel_zoom: bool,

    #[serde(default = "default_enabled")]
    pub pinch_zoom: bool,

    /// Axes affected by zoom and pan: "x", "y" or "xy"
    #[serde(default)]
    pub zoom_mode: ZoomMode,
}

fn default_enabled() -> bool {
    true
}

fn default_tension() -> f64 {
    crate::chart::config::DEFAULT_TENSION
}

fn default_wheel_speed() -> f64 {
    crate::chart::config::DEFAULT_WHEEL_SPEED
}

fn default_min_range() -> f64 {
    crate::chart::config::DEFAULT_MIN_RANGE
}

impl Default for ChartRenderConfig {
    fn default() -> Self {
        Self {
            tension: default_tension(),
            wheel_speed: default_wheel_speed(),
            min_range: default_min_range(),
            pan: true,
            wheel_zoom: true,
            pinch_zoom: true,
            zoom_mode: ZoomMode::Xy,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dashboard: LayoutConfig::default(),
            sensors: BTreeMap::new(),
            palette: default_palette(),
            chart: ChartRenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: DashboardConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the dashboard cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.max_charts == 0 {
            return Err(ConfigError::Invalid("max_charts must be at least 1".to_string()));
        }
        if self.dashboard.max_range_days == 0 {
            return Err(ConfigError::Invalid(
                "max_range_days must be at least 1".to_string(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".to_string()));
        }
        if let Some(color) = self.palette.iter().find(|c| !c.is_valid_hex()) {
            return Err(ConfigError::Invalid(format!(
                "palette color {} has invalid hex {:?}",
                color.name, color.hex
            )));
        }
        for (sensor, bounds) in &self.sensors {
            bounds
                .validate(*sensor)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if !(self.chart.min_range > 0.0) {
            return Err(ConfigError::Invalid("chart.min_range must be positive".to_string()));
        }
        if !(self.chart.wheel_speed > 0.0 && self.chart.wheel_speed < 1.0) {
            return Err(ConfigError::Invalid(
                "chart.wheel_speed must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Bounds for `sensor`, configured or default
    pub fn bounds(&self, sensor: SensorType) -> SensorBounds {
        self.sensors
            .get(&sensor)
            .copied()
            .unwrap_or_else(|| sensor.default_bounds())
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.palette.clone())
    }

    /// Chart configuration builder with these rendering parameters
    pub fn chart_builder(&self) -> ChartConfigBuilder {
        ChartConfigBuilder {
            tension: self.chart.tension,
            wheel_speed: self.chart.wheel_speed,
            min_range: self.chart.min_range,
            pan: self.chart.pan,
            wheel_zoom: self.chart.wheel_zoom,
            pinch_zoom: self.chart.pinch_zoom,
            zoom_mode: self.chart.zoom_mode,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Sensor Dashboard Configuration

[dashboard]
# Maximum number of charts shown side by side
max_charts = 4

# Latest selectable end date, in days after the chosen start date
max_range_days = 90

# Initial range: this many days before today through today
default_range_days = 10

# Generated values are drawn from [min, max)
[sensors.temperature]
min = 0.0
max = 20.0

[sensors.humidity]
min = 0.0
max = 100.0

[sensors.light]
min = 0.0
max = 100.0

[chart]
# Line curve tension
tension = 0.1

# Zoom step per mouse wheel event
wheel_speed = 0.01

# Smallest zoom window, in axis units
min_range = 1.0

# Chart interaction
pan = true
wheel_zoom = true
pinch_zoom = true
# Axes affected by zoom and pan: "x", "y" or "xy"
zoom_mode = "xy"

[[palette]]
name = "Orange"
hex = "#FF9800"

[[palette]]
name = "Green"
hex = "#4CAF50"

[[palette]]
name = "Blue"
hex = "#2196F3"

[[palette]]
name = "Purple"
hex = "#9C27B0"

[[palette]]
name = "Red"
hex = "#F44336"

[[palette]]
name = "Cyan"
hex = "#00BCD4"

[[palette]]
name = "Pink"
hex = "#E91E63"

[[palette]]
name = "Teal"
hex = "#009688"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config.dashboard.max_charts, 4);
        assert_eq!(config.dashboard.max_range_days, 90);
        assert_eq!(config.dashboard.default_range_days, 10);
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.bounds(SensorType::Temperature), SensorBounds::new(0.0, 20.0));
    }

    #[test]
    fn test_generated_config_round_trips_defaults() {
        let config = DashboardConfig::from_toml_str(&generate_default_config()).unwrap();
        let defaults = DashboardConfig::default();

        assert_eq!(config.palette, defaults.palette);
        for sensor in SensorType::all() {
            assert_eq!(config.bounds(*sensor), defaults.bounds(*sensor));
        }
        assert_eq!(config.chart_builder(), defaults.chart_builder());
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [dashboard]
            max_charts = 2

            [sensors.light]
            min = 100.0
            max = 1000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.max_charts, 2);
        assert_eq!(config.dashboard.max_range_days, 90);
        assert_eq!(config.bounds(SensorType::Light), SensorBounds::new(100.0, 1000.0));
        assert_eq!(config.bounds(SensorType::Humidity), SensorBounds::new(0.0, 100.0));
    }

    #[test]
    fn test_chart_interaction_override() {
        let config = DashboardConfig::from_toml_str(
            "[chart]\npan = false\npinch_zoom = false\nzoom_mode = \"x\"\n",
        )
        .unwrap();
        let builder = config.chart_builder();

        assert!(!builder.pan);
        assert!(builder.wheel_zoom);
        assert!(!builder.pinch_zoom);
        assert_eq!(builder.zoom_mode, ZoomMode::X);

        let bad_mode = DashboardConfig::from_toml_str("[chart]\nzoom_mode = \"z\"\n");
        assert!(matches!(bad_mode, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_charts = DashboardConfig::from_toml_str("[dashboard]\nmax_charts = 0\n");
        assert!(matches!(zero_charts, Err(ConfigError::Invalid(_))));

        let bad_bounds =
            DashboardConfig::from_toml_str("[sensors.humidity]\nmin = 50.0\nmax = 10.0\n");
        assert!(matches!(bad_bounds, Err(ConfigError::Invalid(_))));

        let overflowing_width =
            DashboardConfig::from_toml_str("[sensors.light]\nmin = -1e308\nmax = 1e308\n");
        assert!(matches!(overflowing_width, Err(ConfigError::Invalid(_))));

        let bad_hex =
            DashboardConfig::from_toml_str("[[palette]]\nname = \"Ink\"\nhex = \"black\"\n");
        assert!(matches!(bad_hex, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_sensor_is_parse_error() {
        let result = DashboardConfig::from_toml_str("[sensors.pressure]\nmin = 0.0\nmax = 1.0\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\nmax_range_days = 30").unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.dashboard.max_range_days, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DashboardConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

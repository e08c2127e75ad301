//! Chart Configuration Builder
//!
//! Projects generated sensor series and a chart selection into a renderable
//! configuration: x labels, one dataset per selected sensor, and the zoom/pan
//! limits the viewport is clamped to. The serialized form follows the
//! Chart.js configuration layout.

use serde::{Deserialize, Serialize};

use super::types::{ChartSelection, ChartType};
use crate::error::{DashboardError, DashboardResult};
use crate::sensors::{SensorData, SensorType};

/// Curve tension of line datasets
pub const DEFAULT_TENSION: f64 = 0.1;

/// Zoom step per wheel event
pub const DEFAULT_WHEEL_SPEED: f64 = 0.01;

/// Smallest window the viewport may zoom into, in axis units
pub const DEFAULT_MIN_RANGE: f64 = 1.0;

/// Date format of x-axis labels
pub const LABEL_DATE_FORMAT: &str = "%m/%d/%Y";

/// Renderable chart configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfiguration {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Labels and datasets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One plotted sensor series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    #[serde(skip)]
    pub sensor: SensorType,
    pub data: Vec<f64>,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub background_color: String,
    pub border_color: String,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub zoom: ZoomOptions,
}

/// Zoom and pan behavior
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomOptions {
    pub limits: ZoomLimits,
    pub pan: PanOptions,
    pub zoom: ZoomBehavior,
}

/// Bounds the viewport may never leave
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomLimits {
    pub x: AxisLimits,
    pub y: AxisLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
    pub min_range: f64,
}

impl AxisLimits {
    pub fn new(min: f64, max: f64, min_range: f64) -> Self {
        Self { min, max, min_range }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomBehavior {
    pub wheel: WheelOptions,
    pub pinch: PinchOptions,
    pub mode: ZoomMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelOptions {
    pub enabled: bool,
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PinchOptions {
    pub enabled: bool,
}

/// Axes affected by zoom and pan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomMode {
    X,
    Y,
    #[default]
    Xy,
}

impl ZoomMode {
    pub fn affects_x(&self) -> bool {
        matches!(self, ZoomMode::X | ZoomMode::Xy)
    }

    pub fn affects_y(&self) -> bool {
        matches!(self, ZoomMode::Y | ZoomMode::Xy)
    }
}

impl ZoomOptions {
    /// Wheel zoom speed, or `None` when wheel zoom is off
    pub fn wheel_speed(&self) -> Option<f64> {
        self.zoom.wheel.enabled.then_some(self.zoom.wheel.speed)
    }

    pub fn pan_enabled(&self) -> bool {
        self.pan.enabled
    }

    pub fn pinch_enabled(&self) -> bool {
        self.zoom.pinch.enabled
    }

    pub fn mode(&self) -> ZoomMode {
        self.zoom.mode
    }
}

impl ChartConfiguration {
    /// Number of points along the x axis
    pub fn point_count(&self) -> usize {
        self.data.labels.len()
    }

    pub fn limits(&self) -> &ZoomLimits {
        &self.options.plugins.zoom.limits
    }

    /// Zoom and pan behavior
    pub fn zoom_options(&self) -> &ZoomOptions {
        &self.options.plugins.zoom
    }

    /// Apply a color to the color-related options only
    pub fn set_color(&mut self, hex: &str) {
        self.options.background_color = hex.to_string();
        self.options.border_color = hex.to_string();
    }

    /// Serialize to a Chart.js-shaped JSON document
    pub fn to_json(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds chart configurations with fixed rendering parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfigBuilder {
    pub tension: f64,
    pub wheel_speed: f64,
    pub min_range: f64,
    pub pan: bool,
    pub wheel_zoom: bool,
    pub pinch_zoom: bool,
    pub zoom_mode: ZoomMode,
}

impl Default for ChartConfigBuilder {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            wheel_speed: DEFAULT_WHEEL_SPEED,
            min_range: DEFAULT_MIN_RANGE,
            pan: true,
            wheel_zoom: true,
            pinch_zoom: true,
            zoom_mode: ZoomMode::Xy,
        }
    }
}

impl ChartConfigBuilder {
    /// Build the configuration for `selection` over `data`
    ///
    /// Fails with [`DashboardError::EmptySelection`] when no sensor is
    /// selected: the y-axis maximum has no defined value in that case.
    pub fn build(
        &self,
        data: &SensorData,
        selection: &ChartSelection,
    ) -> DashboardResult<ChartConfiguration> {
        if selection.sensors.is_empty() {
            return Err(DashboardError::EmptySelection);
        }

        let labels = data
            .dates
            .iter()
            .map(|date| date.format(LABEL_DATE_FORMAT).to_string())
            .collect();

        let datasets: Vec<Dataset> = selection
            .sensors
            .iter()
            .map(|sensor| Dataset {
                label: sensor.to_string(),
                sensor: *sensor,
                data: data.series(*sensor).to_vec(),
                tension: self.tension,
            })
            .collect();

        let max_y = max_value(&datasets);
        let limits = ZoomLimits {
            x: AxisLimits::new(0.0, data.dates.len() as f64, self.min_range),
            y: AxisLimits::new(0.0, max_y, self.min_range),
        };

        tracing::debug!(
            "Built {} chart config: {} datasets, {} points, y max {}",
            selection.chart_type,
            datasets.len(),
            data.dates.len(),
            max_y
        );

        Ok(ChartConfiguration {
            chart_type: selection.chart_type,
            data: ChartData { labels, datasets },
            options: ChartOptions {
                background_color: selection.color.hex.clone(),
                border_color: selection.color.hex.clone(),
                plugins: Plugins {
                    zoom: ZoomOptions {
                        limits,
                        pan: PanOptions { enabled: self.pan },
                        zoom: ZoomBehavior {
                            wheel: WheelOptions {
                                enabled: self.wheel_zoom,
                                speed: self.wheel_speed,
                            },
                            pinch: PinchOptions {
                                enabled: self.pinch_zoom,
                            },
                            mode: self.zoom_mode,
                        },
                    },
                },
            },
        })
    }
}

/// Build a configuration with the default rendering parameters
pub fn build_chart_config(
    data: &SensorData,
    selection: &ChartSelection,
) -> DashboardResult<ChartConfiguration> {
    ChartConfigBuilder::default().build(data, selection)
}

/// Largest value across all datasets; 0 when every dataset is empty
fn max_value(datasets: &[Dataset]) -> f64 {
    datasets
        .iter()
        .flat_map(|d| d.data.iter().copied())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::types::ChartColor;
    use crate::sensors::{DateRange, SensorDataGenerator};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed_data() -> SensorData {
        let mut series = BTreeMap::new();
        series.insert(SensorType::Temperature, vec![3.0, 17.0, 9.0]);
        series.insert(SensorType::Humidity, vec![40.0, 85.0, 12.0]);
        series.insert(SensorType::Light, vec![0.0, 5.0, 99.0]);
        SensorData {
            dates: vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 3)],
            series,
        }
    }

    fn selection(sensors: &[SensorType]) -> ChartSelection {
        ChartSelection {
            sensors: sensors.to_vec(),
            ..ChartSelection::default()
        }
    }

    #[test]
    fn test_datasets_follow_selection() {
        let data = fixed_data();
        let config = build_chart_config(
            &data,
            &selection(&[SensorType::Light, SensorType::Temperature]),
        )
        .unwrap();

        assert_eq!(config.data.datasets.len(), 2);
        assert_eq!(config.data.datasets[0].label, "light");
        assert_eq!(config.data.datasets[0].data, vec![0.0, 5.0, 99.0]);
        assert_eq!(config.data.datasets[1].label, "temperature");
        assert_eq!(config.data.datasets[1].tension, 0.1);
    }

    #[test]
    fn test_labels_from_dates() {
        let config =
            build_chart_config(&fixed_data(), &selection(&[SensorType::Humidity])).unwrap();
        assert_eq!(config.data.labels, vec!["03/01/2024", "03/02/2024", "03/03/2024"]);
    }

    #[test]
    fn test_zoom_limits() {
        let config = build_chart_config(
            &fixed_data(),
            &selection(&[SensorType::Temperature, SensorType::Humidity]),
        )
        .unwrap();

        let limits = config.limits();
        assert_eq!(limits.x, AxisLimits::new(0.0, 3.0, 1.0));
        assert_eq!(limits.y, AxisLimits::new(0.0, 85.0, 1.0));
    }

    #[test]
    fn test_y_limit_ignores_unselected_sensors() {
        let config =
            build_chart_config(&fixed_data(), &selection(&[SensorType::Temperature])).unwrap();
        assert_eq!(config.limits().y.max, 17.0);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let result = build_chart_config(&fixed_data(), &selection(&[]));
        assert!(matches!(result, Err(DashboardError::EmptySelection)));
    }

    #[test]
    fn test_empty_range_has_zero_limits() {
        let mut generator = SensorDataGenerator::seeded(5);
        let data = generator.generate(&DateRange::new(date(2024, 3, 5), date(2024, 3, 1)));
        let config = build_chart_config(&data, &selection(&[SensorType::Light])).unwrap();

        assert_eq!(config.point_count(), 0);
        assert_eq!(config.limits().x.max, 0.0);
        assert_eq!(config.limits().y.max, 0.0);
    }

    #[test]
    fn test_color_applied_to_options() {
        let mut sel = selection(&[SensorType::Light]);
        sel.color = ChartColor::new("Blue", "#2196F3");
        sel.chart_type = ChartType::Bar;

        let mut config = build_chart_config(&fixed_data(), &sel).unwrap();
        assert_eq!(config.chart_type, ChartType::Bar);
        assert_eq!(config.options.background_color, "#2196F3");
        assert_eq!(config.options.border_color, "#2196F3");

        let datasets = config.data.clone();
        config.set_color("#F44336");
        assert_eq!(config.options.border_color, "#F44336");
        assert_eq!(config.data, datasets);
    }

    #[test]
    fn test_json_shape() {
        let config =
            build_chart_config(&fixed_data(), &selection(&[SensorType::Humidity])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["datasets"][0]["label"], "humidity");
        assert_eq!(json["options"]["backgroundColor"], "#FF9800");
        assert_eq!(json["options"]["plugins"]["zoom"]["limits"]["y"]["max"], 85.0);
        assert_eq!(json["options"]["plugins"]["zoom"]["limits"]["x"]["minRange"], 1.0);
        assert_eq!(json["options"]["plugins"]["zoom"]["pan"]["enabled"], true);
        assert_eq!(json["options"]["plugins"]["zoom"]["zoom"]["wheel"]["speed"], 0.01);
        assert_eq!(json["options"]["plugins"]["zoom"]["zoom"]["mode"], "xy");
        assert!(json["data"]["datasets"][0].get("sensor").is_none());
    }

    #[test]
    fn test_interaction_flags_follow_builder() {
        let builder = ChartConfigBuilder {
            pan: false,
            wheel_zoom: false,
            zoom_mode: ZoomMode::X,
            ..ChartConfigBuilder::default()
        };
        let config = builder
            .build(&fixed_data(), &selection(&[SensorType::Light]))
            .unwrap();
        let zoom = config.zoom_options();

        assert!(!zoom.pan_enabled());
        assert_eq!(zoom.wheel_speed(), None);
        assert!(zoom.pinch_enabled());
        assert_eq!(zoom.mode(), ZoomMode::X);

        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(json["options"]["plugins"]["zoom"]["zoom"]["mode"], "x");
        assert_eq!(json["options"]["plugins"]["zoom"]["pan"]["enabled"], false);

        let defaults = build_chart_config(&fixed_data(), &selection(&[SensorType::Light])).unwrap();
        assert_eq!(defaults.zoom_options().wheel_speed(), Some(DEFAULT_WHEEL_SPEED));
    }
}

//! Chart selection types
//!
//! Chart kinds, the color palette and the per-chart selection a user makes
//! through the chart's selectors.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{DashboardError, DashboardResult};
use crate::sensors::SensorType;

/// How a chart draws its datasets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Scatter,
}

impl ChartType {
    /// Get all chart types in selector order
    pub fn all() -> &'static [ChartType] {
        &[ChartType::Line, ChartType::Bar, ChartType::Scatter]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Scatter => "scatter",
        }
    }

    /// Human-readable selector label
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Bar => "Bar",
            ChartType::Scatter => "Scatter",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::UnknownChartType(s.to_string()))
    }
}

/// A named palette color
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChartColor {
    pub name: String,
    /// CSS hex color, e.g. `#FF9800`
    pub hex: String,
}

impl ChartColor {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    /// Check the hex form is `#RRGGBB`
    pub fn is_valid_hex(&self) -> bool {
        let digits = match self.hex.strip_prefix('#') {
            Some(d) => d,
            None => return false,
        };
        digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Ordered set of colors a chart can be drawn in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Palette(Vec<ChartColor>);

impl Default for Palette {
    fn default() -> Self {
        Self(vec![
            ChartColor::new("Orange", "#FF9800"),
            ChartColor::new("Green", "#4CAF50"),
            ChartColor::new("Blue", "#2196F3"),
            ChartColor::new("Purple", "#9C27B0"),
            ChartColor::new("Red", "#F44336"),
            ChartColor::new("Cyan", "#00BCD4"),
            ChartColor::new("Pink", "#E91E63"),
            ChartColor::new("Teal", "#009688"),
        ])
    }
}

impl Palette {
    pub fn new(colors: Vec<ChartColor>) -> Self {
        Self(colors)
    }

    pub fn colors(&self) -> &[ChartColor] {
        &self.0
    }

    /// Default color of new charts
    pub fn first(&self) -> Option<&ChartColor> {
        self.0.first()
    }

    /// Find a color by hex value or name (case-insensitive)
    pub fn find(&self, key: &str) -> DashboardResult<ChartColor> {
        let key = key.trim();
        self.0
            .iter()
            .find(|c| c.hex.eq_ignore_ascii_case(key) || c.name.eq_ignore_ascii_case(key))
            .cloned()
            .ok_or_else(|| DashboardError::UnknownColor(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-chart selection state
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSelection {
    /// Sensors plotted, in selection order
    pub sensors: Vec<SensorType>,
    pub chart_type: ChartType,
    pub color: ChartColor,
}

impl ChartSelection {
    /// Default selection: first sensor, first chart type, first palette color
    pub fn with_palette(palette: &Palette) -> Self {
        let color = palette
            .first()
            .cloned()
            .unwrap_or_else(|| ChartColor::new("Orange", "#FF9800"));
        Self {
            sensors: vec![SensorType::all()[0]],
            chart_type: ChartType::all()[0],
            color,
        }
    }
}

impl Default for ChartSelection {
    fn default() -> Self {
        Self::with_palette(&Palette::default())
    }
}

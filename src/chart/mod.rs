//! Chart Configuration
//!
//! - **types**: Chart kinds, palette colors and per-chart selections
//! - **config**: Assembly of renderable configurations from sensor series
//! - **viewport**: Zoom/pan window clamped to configuration limits
//!
//! # Architecture
//!
//! ```text
//!   SensorData + ChartSelection → ChartConfigBuilder → ChartConfiguration
//!                                                          │
//!                                    ZoomLimits → Viewport ┘
//! ```

pub mod config;
pub mod types;
pub mod viewport;

pub use config::{
    build_chart_config, AxisLimits, ChartConfigBuilder, ChartConfiguration, ChartData,
    ChartOptions, Dataset, ZoomLimits, ZoomMode, ZoomOptions,
};
pub use types::{ChartColor, ChartSelection, ChartType, Palette};
pub use viewport::{pinch_factor, wheel_factor, AxisWindow, Viewport};

//! # Sensor Dashboard
//!
//! State and chart logic for a browser dashboard that plots synthetic sensor
//! data: pick a date range, show up to four charts side by side, and choose
//! each chart's sensors, chart type and color.
//!
//! ## Modules
//!
//! - [`sensors`]: Sensor kinds, date ranges and the synthetic data generator
//! - [`chart`]: Chart configuration assembly and zoom/pan viewport
//! - [`dashboard`]: Dashboard and per-chart controllers
//! - [`subscription`]: Single-threaded publish/subscribe with scoped teardown
//! - [`config`]: TOML configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use sensor_dashboard::{ChartController, DashboardConfig, DashboardController, SensorType};
//!
//! let config = DashboardConfig::default();
//! let mut dashboard = DashboardController::new(&config, SmallRng::seed_from_u64(1))?;
//!
//! // The first chart slot exists from the start
//! let first = dashboard.slots()[0].clone();
//! let mut chart = ChartController::with_config(first, &config);
//! chart.set_sensors(&[SensorType::Temperature, SensorType::Light], &dashboard.data())?;
//!
//! // Follow date-range changes
//! let _subscription = dashboard.subscribe(|event| println!("{:?}", event));
//! dashboard.set_start(dashboard.today() - chrono::Days::new(30));
//! chart.on_data_regenerated(&dashboard.data())?;
//!
//! assert_eq!(chart.current().unwrap().config.point_count(), 31);
//! # Ok::<(), sensor_dashboard::DashboardError>(())
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod sensors;
pub mod subscription;

// Re-export top-level types for convenience
pub use sensors::{DateRange, SensorBounds, SensorData, SensorDataGenerator, SensorType};

pub use chart::{
    build_chart_config, ChartColor, ChartConfigBuilder, ChartConfiguration, ChartSelection,
    ChartType, Palette, Viewport, ZoomLimits,
};

pub use dashboard::{
    ChartController, ChartRender, ChartSlotId, DashboardController, DashboardEvent, RenderCommand,
};

pub use config::{ConfigError, DashboardConfig};
pub use error::{DashboardError, DashboardResult};
pub use subscription::{EventHub, Subscription};

//! Dashboard State
//!
//! - **controller**: Shared date range, sensor data and chart slots
//! - **chart_controller**: Per-chart selection and render lifecycle
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::SmallRng, SeedableRng};
//! use sensor_dashboard::config::DashboardConfig;
//! use sensor_dashboard::dashboard::{ChartController, DashboardController};
//!
//! let config = DashboardConfig::default();
//! let mut dashboard = DashboardController::new(&config, SmallRng::seed_from_u64(7))?;
//!
//! let id = dashboard.add_slot().expect("room for a second chart");
//! let mut chart = ChartController::with_config(id, &config);
//! chart.render(&dashboard.data())?;
//!
//! assert_eq!(chart.current().unwrap().config.data.datasets.len(), 1);
//! # Ok::<(), sensor_dashboard::DashboardError>(())
//! ```

pub mod chart_controller;
pub mod controller;

pub use chart_controller::{ChartController, ChartRender, RenderCommand};
pub use controller::{max_end_date, ChartSlotId, DashboardController, DashboardEvent};

//! Synthetic Sensor Data
//!
//! - **types**: Sensor kinds, bounds, date ranges and generated series
//! - **generator**: Pseudo-random series generation for a date range
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sensor_dashboard::sensors::{DateRange, SensorDataGenerator, SensorType};
//!
//! let mut generator = SensorDataGenerator::seeded(42);
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//! );
//!
//! let data = generator.generate(&range);
//! assert_eq!(data.series(SensorType::Humidity).len(), 10);
//! ```

pub mod generator;
pub mod types;

pub use generator::SensorDataGenerator;
pub use types::{DateRange, SensorBounds, SensorData, SensorType};

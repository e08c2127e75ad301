//! Dashboard error types
//!
//! Defines all errors that can occur while building charts and updating
//! dashboard state.

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::ConfigError;
use crate::sensors::SensorType;

/// Errors that can occur in the dashboard layer
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A chart configuration was requested with no sensors selected
    #[error("No sensors selected: a chart needs at least one sensor")]
    EmptySelection,

    /// End date lies past the selectable window
    #[error("End date {end} is after the latest selectable date {max}")]
    EndDateOutOfBounds { end: NaiveDate, max: NaiveDate },

    /// Selector value does not name a sensor
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    /// Selector value does not name a chart type
    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    /// Selector value is not a palette color
    #[error("Unknown color: {0}")]
    UnknownColor(String),

    /// Sensor bounds do not form a non-empty `[min, max)` interval
    #[error("Invalid bounds for {sensor}: min {min} must be less than max {max}")]
    InvalidBounds { sensor: SensorType, min: f64, max: f64 },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Serialization of a chart configuration failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DashboardError::UnknownSensor("pressure".to_string());
        assert_eq!(err.to_string(), "Unknown sensor: pressure");

        let err = DashboardError::EndDateOutOfBounds {
            end: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            max: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "End date 2024-05-01 is after the latest selectable date 2024-04-30"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let config_err = ConfigError::Invalid("max_charts must be at least 1".to_string());
        let err: DashboardError = config_err.into();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}

//! Core data types for synthetic sensor data
//!
//! This module defines the fundamental types used throughout the dashboard:
//! - `SensorType`: The fixed set of measured quantities
//! - `SensorBounds`: Half-open value bounds per sensor
//! - `DateRange`: An inclusive span of calendar days
//! - `SensorData`: Date-aligned series for every sensor

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::DashboardError;

/// Kind of measured quantity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    /// Air temperature
    Temperature,
    /// Relative humidity
    Humidity,
    /// Ambient light level
    Light,
}

impl SensorType {
    /// Get all sensor types in display order
    pub fn all() -> &'static [SensorType] {
        &[SensorType::Temperature, SensorType::Humidity, SensorType::Light]
    }

    /// Lowercase name used for labels and selector values
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Humidity => "humidity",
            SensorType::Light => "light",
        }
    }

    /// Default generation bounds for this sensor
    pub fn default_bounds(&self) -> SensorBounds {
        match self {
            SensorType::Temperature => SensorBounds::new(0.0, 20.0),
            SensorType::Humidity => SensorBounds::new(0.0, 100.0),
            SensorType::Light => SensorBounds::new(0.0, 100.0),
        }
    }
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorType::all()
            .iter()
            .copied()
            .find(|sensor| sensor.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashboardError::UnknownSensor(s.to_string()))
    }
}

/// Value bounds for generated readings, `[min, max)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SensorBounds {
    pub min: f64,
    pub max: f64,
}

impl SensorBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in `[min, max)`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    /// Check that the bounds describe a non-empty interval with a finite width
    pub fn validate(&self, sensor: SensorType) -> Result<(), DashboardError> {
        let width = self.max - self.min;
        if self.min.is_finite() && self.max.is_finite() && width.is_finite() && width > 0.0 {
            Ok(())
        } else {
            Err(DashboardError::InvalidBounds {
                sensor,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Inclusive span of calendar days
///
/// `start <= end` is the usable form. An inverted range can still be
/// represented (a date picker may momentarily produce one) and simply
/// contains no days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range covering the `days` days before `today` through `today`
    pub fn last_days(today: NaiveDate, days: u64) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Whether `start <= end`
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Number of days in the range, both ends included (0 when inverted)
    pub fn day_count(&self) -> usize {
        if !self.is_ordered() {
            return 0;
        }
        (self.end - self.start).num_days() as usize + 1
    }

    /// Iterate the days of the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start.format("%b %d, %Y"), self.end.format("%b %d, %Y"))
    }
}

/// Generated series for every sensor, aligned to one shared list of dates
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SensorData {
    /// Days covered, ascending
    pub dates: Vec<NaiveDate>,
    /// One value per date for each sensor
    pub series: BTreeMap<SensorType, Vec<f64>>,
}

impl SensorData {
    /// Series for one sensor (empty if never generated)
    pub fn series(&self, sensor: SensorType) -> &[f64] {
        self.series.get(&sensor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

//! Synthetic sensor data generator
//!
//! Stands in for a real data source: every call produces a fresh, date-indexed
//! series per sensor with values drawn uniformly from the sensor's bounds.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use super::types::{DateRange, SensorBounds, SensorData, SensorType};
use crate::error::DashboardResult;

/// Produces pseudo-random sensor series for a date range
#[derive(Debug, Clone)]
pub struct SensorDataGenerator<R = SmallRng> {
    bounds: BTreeMap<SensorType, SensorBounds>,
    rng: R,
}

impl SensorDataGenerator<SmallRng> {
    /// Create a generator with default bounds, seeded from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SensorDataGenerator<R> {
    /// Create a generator with the default bounds of every sensor
    pub fn new(rng: R) -> Self {
        let bounds = SensorType::all()
            .iter()
            .map(|sensor| (*sensor, sensor.default_bounds()))
            .collect();
        Self { bounds, rng }
    }

    /// Create a generator with custom bounds
    ///
    /// Sensors missing from `bounds` keep their defaults.
    pub fn with_bounds(
        rng: R,
        bounds: impl IntoIterator<Item = (SensorType, SensorBounds)>,
    ) -> DashboardResult<Self> {
        let mut generator = Self::new(rng);
        for (sensor, sensor_bounds) in bounds {
            sensor_bounds.validate(sensor)?;
            generator.bounds.insert(sensor, sensor_bounds);
        }
        Ok(generator)
    }

    /// Bounds used for `sensor`
    pub fn bounds(&self, sensor: SensorType) -> SensorBounds {
        self.bounds
            .get(&sensor)
            .copied()
            .unwrap_or_else(|| sensor.default_bounds())
    }

    /// Generate one series per sensor covering `range`
    ///
    /// Never fails: an inverted range yields empty dates and empty series.
    pub fn generate(&mut self, range: &DateRange) -> SensorData {
        let dates: Vec<_> = range.days().collect();
        let count = dates.len();

        let mut series = BTreeMap::new();
        for sensor in SensorType::all() {
            let bounds = self.bounds(*sensor);
            series.insert(*sensor, self.random_series(bounds, count));
        }

        tracing::debug!("Generated {} days of sensor data for {}", count, range);

        SensorData { dates, series }
    }

    /// Whole-unit values uniformly drawn from `[min, max)`
    fn random_series(&mut self, bounds: SensorBounds, count: usize) -> Vec<f64> {
        (0..count)
            .map(|_| {
                let raw: f64 = self.rng.random_range(bounds.min..bounds.max);
                raw.floor().max(bounds.min)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_series_length_matches_days() {
        let mut generator = SensorDataGenerator::seeded(7);
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let data = generator.generate(&range);

        assert_eq!(data.dates.len(), 31);
        for sensor in SensorType::all() {
            assert_eq!(data.series(*sensor).len(), 31);
        }
    }

    #[test]
    fn test_values_within_bounds() {
        let mut generator = SensorDataGenerator::seeded(42);
        let range = DateRange::new(date(2023, 1, 1), date(2023, 12, 31));
        let data = generator.generate(&range);

        for sensor in SensorType::all() {
            let bounds = sensor.default_bounds();
            for value in data.series(*sensor) {
                assert!(bounds.contains(*value), "{} out of bounds for {}", value, sensor);
                assert_eq!(value.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_dates_ascending_and_inclusive() {
        let mut generator = SensorDataGenerator::seeded(1);
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1));
        let data = generator.generate(&range);

        assert_eq!(
            data.dates,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_inverted_range_yields_empty_series() {
        let mut generator = SensorDataGenerator::seeded(3);
        let range = DateRange::new(date(2024, 3, 10), date(2024, 3, 1));
        let data = generator.generate(&range);

        assert!(data.is_empty());
        for sensor in SensorType::all() {
            assert!(data.series(*sensor).is_empty());
        }
    }

    #[test]
    fn test_custom_bounds() {
        let mut generator = SensorDataGenerator::with_bounds(
            SmallRng::seed_from_u64(9),
            [(SensorType::Temperature, SensorBounds::new(-10.0, -5.0))],
        )
        .unwrap();

        let range = DateRange::new(date(2024, 1, 1), date(2024, 3, 1));
        let data = generator.generate(&range);

        assert!(data
            .series(SensorType::Temperature)
            .iter()
            .all(|v| (-10.0..-5.0).contains(v)));
        assert_eq!(generator.bounds(SensorType::Humidity), SensorBounds::new(0.0, 100.0));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let result = SensorDataGenerator::with_bounds(
            SmallRng::seed_from_u64(0),
            [(SensorType::Light, SensorBounds::new(10.0, 10.0))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_each_call_regenerates() {
        let mut generator = SensorDataGenerator::seeded(11);
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 29));
        let first = generator.generate(&range);
        let second = generator.generate(&range);

        assert_eq!(first.dates, second.dates);
        assert_ne!(first.series, second.series);
    }
}

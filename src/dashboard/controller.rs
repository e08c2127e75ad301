//! Dashboard Controller
//!
//! Owns the shared date range, the generated sensor data and the list of
//! active chart slots. Every state change is published on an [`EventHub`] so
//! views can follow along without holding a borrow on the controller.

use chrono::{Days, Local, NaiveDate};
use rand::rngs::SmallRng;
use rand::Rng;
use std::rc::Rc;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::sensors::{DateRange, SensorData, SensorDataGenerator};
use crate::subscription::{EventHub, Subscription};

/// Identifier of one chart slot, `chart-N`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartSlotId(String);

impl ChartSlotId {
    pub fn new(n: u64) -> Self {
        Self(format!("chart-{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChartSlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// State changes published by the dashboard
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Date range or its selectable end bound changed
    RangeChanged { range: DateRange, max_end: NaiveDate },
    /// Sensor series were regenerated for the current range
    DataRegenerated(Rc<SensorData>),
    /// A chart slot was appended
    SlotAdded(ChartSlotId),
    /// The slot at `index` was removed
    SlotRemoved { index: usize, id: ChartSlotId },
}

/// Latest end date selectable for `start`: `min(start + max_days, today)`
pub fn max_end_date(start: NaiveDate, today: NaiveDate, max_days: u64) -> NaiveDate {
    start
        .checked_add_days(Days::new(max_days))
        .map_or(today, |limit| limit.min(today))
}

/// Dashboard state: date range, sensor data and chart slots
#[derive(Debug)]
pub struct DashboardController<R = SmallRng> {
    max_charts: usize,
    max_range_days: u64,
    today: NaiveDate,
    range: DateRange,
    max_end: NaiveDate,
    generator: SensorDataGenerator<R>,
    data: Rc<SensorData>,
    slots: Vec<ChartSlotId>,
    slot_counter: u64,
    events: EventHub<DashboardEvent>,
}

impl<R: Rng> DashboardController<R> {
    /// Create a dashboard for the current local date
    pub fn new(config: &DashboardConfig, rng: R) -> DashboardResult<Self> {
        Self::with_today(config, Local::now().date_naive(), rng)
    }

    /// Create a dashboard with an explicit "today"
    ///
    /// Starts with the default range (`default_range_days` before `today`
    /// through `today`), data generated for it, and exactly one slot.
    pub fn with_today(config: &DashboardConfig, today: NaiveDate, rng: R) -> DashboardResult<Self> {
        config.validate()?;

        let bounds = crate::sensors::SensorType::all()
            .iter()
            .map(|sensor| (*sensor, config.bounds(*sensor)));
        let mut generator = SensorDataGenerator::with_bounds(rng, bounds)?;

        let range = DateRange::last_days(today, config.dashboard.default_range_days);
        let max_end = max_end_date(range.start, today, config.dashboard.max_range_days);
        let data = Rc::new(generator.generate(&range));

        tracing::info!("Dashboard initialized for {} ({} days)", range, data.len());

        Ok(Self {
            max_charts: config.dashboard.max_charts,
            max_range_days: config.dashboard.max_range_days,
            today,
            range,
            max_end,
            generator,
            data,
            slots: vec![ChartSlotId::new(1)],
            slot_counter: 1,
            events: EventHub::new(),
        })
    }

    /// Register for state changes
    pub fn subscribe(&self, listener: impl Fn(&DashboardEvent) + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Latest selectable end date for the current start
    pub fn max_end_date(&self) -> NaiveDate {
        self.max_end
    }

    /// Current sensor data, shared with views
    pub fn data(&self) -> Rc<SensorData> {
        Rc::clone(&self.data)
    }

    pub fn slots(&self) -> &[ChartSlotId] {
        &self.slots
    }

    pub fn max_charts(&self) -> usize {
        self.max_charts
    }

    /// Whether another slot fits
    pub fn can_add_slot(&self) -> bool {
        self.slots.len() < self.max_charts
    }

    /// Append a slot; `None` when already at the maximum
    pub fn add_slot(&mut self) -> Option<ChartSlotId> {
        if !self.can_add_slot() {
            tracing::warn!("Chart limit of {} reached, not adding a slot", self.max_charts);
            return None;
        }

        self.slot_counter += 1;
        let id = ChartSlotId::new(self.slot_counter);
        self.slots.push(id.clone());

        tracing::info!("Added {} ({} of {})", id, self.slots.len(), self.max_charts);
        self.events.publish(&DashboardEvent::SlotAdded(id.clone()));
        Some(id)
    }

    /// Remove the slot at `index`; `None` when out of range
    ///
    /// Removing the last remaining slot is allowed and leaves zero slots.
    pub fn remove_slot(&mut self, index: usize) -> Option<ChartSlotId> {
        if index >= self.slots.len() {
            tracing::warn!("No chart slot at position {}", index);
            return None;
        }

        let id = self.slots.remove(index);
        tracing::info!("Removed {} ({} remaining)", id, self.slots.len());
        self.events.publish(&DashboardEvent::SlotRemoved {
            index,
            id: id.clone(),
        });
        Some(id)
    }

    /// Remove a slot by identifier
    pub fn remove_slot_by_id(&mut self, id: &ChartSlotId) -> Option<ChartSlotId> {
        let index = self.slots.iter().position(|slot| slot == id)?;
        self.remove_slot(index)
    }

    /// Change the start date
    ///
    /// Recomputes the selectable end bound; an end date now past the bound is
    /// pulled back to it. Data is regenerated for the resulting range.
    pub fn set_start(&mut self, start: NaiveDate) {
        let max_end = max_end_date(start, self.today, self.max_range_days);
        let end = self.range.end.min(max_end);
        self.apply_range(DateRange::new(start, end), max_end);
    }

    /// Change the end date; must not be past the selectable bound
    pub fn set_end(&mut self, end: NaiveDate) -> DashboardResult<()> {
        self.set_range(DateRange::new(self.range.start, end))
    }

    /// Replace the whole range and regenerate all sensor series
    ///
    /// An inverted range is accepted and produces empty series.
    pub fn set_range(&mut self, range: DateRange) -> DashboardResult<()> {
        let max_end = max_end_date(range.start, self.today, self.max_range_days);
        if range.end > max_end {
            tracing::warn!("Rejected end date {}: latest selectable is {}", range.end, max_end);
            return Err(DashboardError::EndDateOutOfBounds {
                end: range.end,
                max: max_end,
            });
        }

        self.apply_range(range, max_end);
        Ok(())
    }

    /// Move "today" forward (e.g. a dashboard left open past midnight)
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.max_end = max_end_date(self.range.start, today, self.max_range_days);
        self.events.publish(&DashboardEvent::RangeChanged {
            range: self.range,
            max_end: self.max_end,
        });
    }

    fn apply_range(&mut self, range: DateRange, max_end: NaiveDate) {
        if !range.is_ordered() {
            tracing::warn!("Date range {} is inverted; series will be empty", range);
        }

        self.range = range;
        self.max_end = max_end;
        self.data = Rc::new(self.generator.generate(&range));

        self.events.publish(&DashboardEvent::RangeChanged { range, max_end });
        self.events
            .publish(&DashboardEvent::DataRegenerated(Rc::clone(&self.data)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{SensorBounds, SensorType};
    use rand::SeedableRng;
    use std::cell::RefCell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller(today: NaiveDate) -> DashboardController {
        DashboardController::with_today(
            &DashboardConfig::default(),
            today,
            SmallRng::seed_from_u64(42),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let dashboard = controller(date(2024, 6, 15));

        assert_eq!(dashboard.range(), DateRange::new(date(2024, 6, 5), date(2024, 6, 15)));
        assert_eq!(dashboard.max_end_date(), date(2024, 6, 15));
        assert_eq!(dashboard.slots(), &[ChartSlotId::new(1)]);
        assert_eq!(dashboard.data().len(), 11);
    }

    #[test]
    fn test_add_slot_up_to_max() {
        let mut dashboard = controller(date(2024, 6, 15));

        assert_eq!(dashboard.add_slot(), Some(ChartSlotId::new(2)));
        assert_eq!(dashboard.add_slot(), Some(ChartSlotId::new(3)));
        assert_eq!(dashboard.add_slot(), Some(ChartSlotId::new(4)));
        assert!(!dashboard.can_add_slot());

        assert_eq!(dashboard.add_slot(), None);
        assert_eq!(dashboard.slots().len(), 4);
    }

    #[test]
    fn test_remove_last_slot_leaves_none() {
        let mut dashboard = controller(date(2024, 6, 15));

        assert_eq!(dashboard.remove_slot(0), Some(ChartSlotId::new(1)));
        assert!(dashboard.slots().is_empty());
        assert_eq!(dashboard.remove_slot(0), None);
    }

    #[test]
    fn test_slot_ids_are_not_reused() {
        let mut dashboard = controller(date(2024, 6, 15));
        dashboard.add_slot();
        dashboard.remove_slot(1);

        assert_eq!(dashboard.add_slot(), Some(ChartSlotId::new(3)));
        assert_eq!(
            dashboard.slots(),
            &[ChartSlotId::new(1), ChartSlotId::new(3)]
        );
    }

    #[test]
    fn test_remove_by_position() {
        let mut dashboard = controller(date(2024, 6, 15));
        dashboard.add_slot();
        dashboard.add_slot();

        assert_eq!(dashboard.remove_slot(1), Some(ChartSlotId::new(2)));
        assert_eq!(
            dashboard.slots(),
            &[ChartSlotId::new(1), ChartSlotId::new(3)]
        );
        assert_eq!(dashboard.remove_slot_by_id(&ChartSlotId::new(3)), Some(ChartSlotId::new(3)));
        assert_eq!(dashboard.remove_slot_by_id(&ChartSlotId::new(3)), None);
    }

    #[test]
    fn test_max_end_date() {
        let today = date(2024, 6, 15);
        assert_eq!(max_end_date(date(2024, 1, 1), today, 90), date(2024, 3, 31));
        assert_eq!(max_end_date(date(2024, 5, 1), today, 90), today);
    }

    #[test]
    fn test_set_start_constrains_end() {
        let mut dashboard = controller(date(2024, 6, 15));
        dashboard.set_start(date(2024, 1, 1));

        assert_eq!(dashboard.max_end_date(), date(2024, 3, 31));
        assert_eq!(dashboard.range(), DateRange::new(date(2024, 1, 1), date(2024, 3, 31)));
        assert_eq!(dashboard.data().len(), 91);
    }

    #[test]
    fn test_set_range_regenerates() {
        let mut dashboard = controller(date(2024, 6, 15));
        let before = dashboard.data();

        dashboard
            .set_range(DateRange::new(date(2024, 6, 1), date(2024, 6, 3)))
            .unwrap();

        let after = dashboard.data();
        assert_eq!(after.len(), 3);
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_set_range_rejects_end_past_bound() {
        let mut dashboard = controller(date(2024, 6, 15));
        let original = dashboard.range();

        let err = dashboard
            .set_range(DateRange::new(date(2024, 6, 1), date(2024, 6, 16)))
            .unwrap_err();
        assert!(matches!(err, DashboardError::EndDateOutOfBounds { .. }));
        assert_eq!(dashboard.range(), original);

        assert!(dashboard.set_end(date(2024, 6, 16)).is_err());
    }

    #[test]
    fn test_inverted_range_yields_empty_data() {
        let mut dashboard = controller(date(2024, 6, 15));
        dashboard
            .set_range(DateRange::new(date(2024, 6, 10), date(2024, 6, 1)))
            .unwrap();

        assert!(dashboard.data().is_empty());
    }

    #[test]
    fn test_events_published() {
        let mut dashboard = controller(date(2024, 6, 15));
        let events = Rc::new(RefCell::new(Vec::new()));

        let events_clone = events.clone();
        let sub = dashboard.subscribe(move |event| {
            let name = match event {
                DashboardEvent::RangeChanged { .. } => "range",
                DashboardEvent::DataRegenerated(_) => "data",
                DashboardEvent::SlotAdded(_) => "added",
                DashboardEvent::SlotRemoved { .. } => "removed",
            };
            events_clone.borrow_mut().push(name);
        });

        dashboard.add_slot();
        dashboard.set_start(date(2024, 6, 1));
        dashboard.remove_slot(0);
        drop(sub);
        dashboard.add_slot();

        assert_eq!(*events.borrow(), vec!["added", "range", "data", "removed"]);
    }

    #[test]
    fn test_set_today_moves_bound() {
        let mut dashboard = controller(date(2024, 6, 15));
        dashboard.set_today(date(2024, 6, 20));

        assert_eq!(dashboard.max_end_date(), date(2024, 6, 20));
        assert!(dashboard.set_end(date(2024, 6, 20)).is_ok());
    }

    #[test]
    fn test_custom_max_charts() {
        let mut config = DashboardConfig::default();
        config.dashboard.max_charts = 2;
        let mut dashboard =
            DashboardController::with_today(&config, date(2024, 6, 15), SmallRng::seed_from_u64(1))
                .unwrap();

        assert!(dashboard.add_slot().is_some());
        assert!(dashboard.add_slot().is_none());
    }

    #[test]
    fn test_rejects_bounds_too_wide_to_sample() {
        let mut config = DashboardConfig::default();
        config
            .sensors
            .insert(SensorType::Light, SensorBounds::new(-1e308, 1e308));

        let result =
            DashboardController::with_today(&config, date(2024, 6, 15), SmallRng::seed_from_u64(1));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}

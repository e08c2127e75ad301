//! Global Application State
//!
//! Wraps the dashboard controller and mirrors its events into Leptos signals.
//! Views only read the signals; they never borrow the controller while it is
//! publishing.

use chrono::NaiveDate;
use leptos::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

use sensor_dashboard::{
    ChartSlotId, DashboardConfig, DashboardController, DashboardEvent, DateRange, SensorData,
};

/// Configuration compiled into the bundle
const EMBEDDED_CONFIG: &str = include_str!("../../dashboard.toml");

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Dashboard configuration
    pub config: Rc<DashboardConfig>,
    /// Owner of range, data and slots
    pub dashboard: Rc<RefCell<DashboardController>>,
    /// Selected date range
    pub range: RwSignal<DateRange>,
    /// Latest selectable end date
    pub max_end: RwSignal<NaiveDate>,
    /// Generated sensor data for the range
    pub data: RwSignal<Rc<SensorData>>,
    /// Active chart slots, in display order
    pub slots: RwSignal<Vec<ChartSlotId>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Load the embedded configuration, falling back to defaults
fn load_config() -> DashboardConfig {
    match DashboardConfig::from_toml_str(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            let message = format!("Invalid dashboard.toml, using defaults: {}", e);
            web_sys::console::error_1(&message.into());
            DashboardConfig::default()
        }
    }
}

/// Seed for the synthetic data generator
fn entropy_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 32)
}

/// Provide global state to the component tree
///
/// The controller subscription lives as long as the calling scope and is
/// released in its cleanup.
pub fn provide_global_state() {
    let config = load_config();
    crate::logging::init(&config.logging.level);

    let rng = SmallRng::seed_from_u64(entropy_seed());
    let controller = match DashboardController::new(&config, rng) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Dashboard setup failed, using defaults: {}", e);
            let rng = SmallRng::seed_from_u64(entropy_seed());
            DashboardController::new(&DashboardConfig::default(), rng)
                .expect("default dashboard configuration is valid")
        }
    };

    let state = GlobalState {
        config: Rc::new(config),
        range: create_rw_signal(controller.range()),
        max_end: create_rw_signal(controller.max_end_date()),
        data: create_rw_signal(controller.data()),
        slots: create_rw_signal(controller.slots().to_vec()),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
        dashboard: Rc::new(RefCell::new(controller)),
    };

    let subscription = state.dashboard.borrow().subscribe({
        let range = state.range;
        let max_end = state.max_end;
        let data = state.data;
        let slots = state.slots;
        move |event| match event {
            DashboardEvent::RangeChanged {
                range: new_range,
                max_end: new_max,
            } => {
                range.set(*new_range);
                max_end.set(*new_max);
            }
            DashboardEvent::DataRegenerated(new_data) => {
                data.set(Rc::clone(new_data));
            }
            DashboardEvent::SlotAdded(id) => {
                slots.update(|s| s.push(id.clone()));
            }
            DashboardEvent::SlotRemoved { index, .. } => {
                slots.update(|s| {
                    if *index < s.len() {
                        s.remove(*index);
                    }
                });
            }
        }
    });

    on_cleanup(move || {
        drop(subscription);
        tracing::debug!("Dashboard subscription released");
    });

    provide_context(state);
}

impl GlobalState {
    /// Whether another chart fits
    pub fn can_add_chart(&self) -> bool {
        self.slots.get().len() < self.config.dashboard.max_charts
    }

    /// Append a chart slot (no-op at the maximum)
    pub fn add_chart(&self) {
        let added = self.dashboard.borrow_mut().add_slot();
        match added {
            Some(id) => self.show_success(&format!("Added {}", id)),
            None => self.show_error(&format!(
                "At most {} charts can be shown",
                self.config.dashboard.max_charts
            )),
        }
    }

    /// Remove the chart slot at `index`
    pub fn remove_chart(&self, index: usize) {
        self.dashboard.borrow_mut().remove_slot(index);
    }

    /// Remove a chart slot by identifier
    pub fn remove_chart_by_id(&self, id: &ChartSlotId) {
        let index = self.slots.get_untracked().iter().position(|slot| slot == id);
        if let Some(index) = index {
            self.remove_chart(index);
        }
    }

    /// Change the start date (regenerates all series)
    pub fn set_start(&self, start: NaiveDate) {
        self.dashboard.borrow_mut().set_start(start);
    }

    /// Change the end date (regenerates all series)
    pub fn set_end(&self, end: NaiveDate) {
        let result = self.dashboard.borrow_mut().set_end(end);
        if let Err(e) = result {
            self.show_error(&e.to_string());
            // Re-sync the input with the unchanged range
            self.range.set(self.range.get_untracked());
        }
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        }).forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        }).forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = DashboardConfig::from_toml_str(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.dashboard.max_charts, 4);
        assert_eq!(config.dashboard.max_range_days, 90);
    }
}

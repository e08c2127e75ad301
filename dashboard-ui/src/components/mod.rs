//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod date_range;
pub mod nav;
pub mod toast;

pub use chart::Chart;
pub use date_range::DateRangePicker;
pub use nav::Nav;
pub use toast::Toast;

//! State Management
//!
//! Global application state backed by the dashboard controller.

pub mod global;

pub use global::{provide_global_state, GlobalState};

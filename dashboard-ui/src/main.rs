//! Sensor Dashboard UI
//!
//! Browser dashboard for synthetic sensor data, built with Leptos (WASM).
//!
//! # Features
//!
//! - Shared date range with a rolling upper bound
//! - Up to four charts side by side
//! - Per-chart sensors, chart type and color
//! - Wheel zoom and drag pan on every chart
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All data is generated in the browser by the
//! `sensor-dashboard` crate; there is no backend.

use leptos::*;

mod app;
mod components;
mod logging;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}

//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, Toast};
use crate::pages::Dashboard;
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with range summary
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Footer component showing the range bound and chart count
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let range = state.range;
    let max_end = state.max_end;
    let slots = state.slots;
    let max_range_days = state.config.dashboard.max_range_days;

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-gray-400">
                <div>
                    {move || {
                        let range = range.get();
                        if range.is_ordered() {
                            format!("{} days of readings", range.day_count())
                        } else {
                            "Start date is after end date".to_string()
                        }
                    }}
                </div>

                <div>
                    {move || format!(
                        "Latest end date: {} (max {} days)",
                        max_end.get().format("%m/%d/%Y"),
                        max_range_days
                    )}
                </div>

                <div>{move || format!("{} chart(s)", slots.get().len())}</div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}

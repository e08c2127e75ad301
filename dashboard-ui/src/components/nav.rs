//! Navigation Component
//!
//! Header bar with the dashboard brand and current range.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let range = state.range;

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"📈"</span>
                        <span class="text-xl font-bold text-white">"Sensor Dashboard"</span>
                    </A>

                    <span class="text-sm text-gray-400">{move || range.get().to_string()}</span>
                </div>
            </div>
        </nav>
    }
}

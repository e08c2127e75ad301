//! Dashboard Page
//!
//! Shared date range on top, chart slots side by side below.

use leptos::*;

use crate::components::{Chart, DateRangePicker};
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let slots = state.slots;
    let max_charts = state.config.dashboard.max_charts;

    let can_add = {
        let state = state.clone();
        move || state.can_add_chart()
    };
    let on_add = {
        let state = state.clone();
        move |_| state.add_chart()
    };

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">
                        {format!("Compare synthetic sensor readings across up to {} charts", max_charts)}
                    </p>
                </div>

                <DateRangePicker />
            </div>

            <div class="flex items-center justify-between">
                <h2 class="text-lg font-semibold">
                    {move || format!("Charts ({}/{})", slots.get().len(), max_charts)}
                </h2>
                <button
                    on:click=on_add
                    disabled=move || !can_add()
                    class="px-4 py-2 rounded-lg text-sm font-medium bg-blue-600 hover:bg-blue-700 \
                           disabled:bg-gray-700 disabled:text-gray-500 disabled:cursor-not-allowed transition-colors"
                >
                    "Add chart"
                </button>
            </div>

            {move || {
                if slots.get().is_empty() {
                    view! {
                        <div class="bg-gray-800 rounded-xl p-12 text-center text-gray-400">
                            "No charts. Add one to start plotting."
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            <div class="grid md:grid-cols-2 gap-6">
                <For
                    each=move || slots.get()
                    key=|id| id.clone()
                    children=|id| view! { <Chart id=id /> }
                />
            </div>
        </div>
    }
}

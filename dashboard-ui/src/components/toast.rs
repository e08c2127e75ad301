//! Toast Notification Component
//!
//! Shows success messages and refused dashboard actions. Click to dismiss.

use leptos::*;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let success = state.success;
    let error = state.error;

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || {
                success.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Success signal=success />
                })
            }}

            {move || {
                error.get().map(|msg| view! {
                    <ToastMessage message=msg variant=ToastVariant::Error signal=error />
                })
            }}
        </div>
    }
}

#[derive(Clone, Copy)]
enum ToastVariant {
    Success,
    Error,
}

#[component]
fn ToastMessage(
    #[prop(into)]
    message: String,
    variant: ToastVariant,
    /// Cleared when the toast is clicked
    signal: RwSignal<Option<String>>,
) -> impl IntoView {
    let (icon, bg_class) = match variant {
        ToastVariant::Success => ("✓", "bg-green-600"),
        ToastVariant::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div
            on:click=move |_| signal.set(None)
            class=format!(
                "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg cursor-pointer",
                bg_class
            )
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}

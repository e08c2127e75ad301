//! Date Range Component
//!
//! Start and end date inputs shared by every chart.

use chrono::NaiveDate;
use leptos::*;

use crate::state::global::GlobalState;

/// Format used by `<input type="date">`
const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT).ok()
}

/// Date range picker
#[component]
pub fn DateRangePicker() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let range = state.range;
    let max_end = state.max_end;
    let today = state.dashboard.borrow().today();

    let on_start = {
        let state = state.clone();
        move |ev: web_sys::Event| {
            match parse_input_date(&event_target_value(&ev)) {
                Some(start) => state.set_start(start),
                None => state.show_error("Start date is not a valid date"),
            }
        }
    };

    let on_end = {
        let state = state.clone();
        move |ev: web_sys::Event| {
            match parse_input_date(&event_target_value(&ev)) {
                Some(end) => state.set_end(end),
                None => state.show_error("End date is not a valid date"),
            }
        }
    };

    let input_class = "bg-gray-700 text-gray-200 rounded-lg px-3 py-2 text-sm \
                       focus:outline-none focus:ring-2 focus:ring-blue-500";

    view! {
        <div class="flex flex-wrap items-end gap-4">
            <label class="flex flex-col text-sm text-gray-400">
                <span class="mb-1">"Start"</span>
                <input
                    type="date"
                    class=input_class
                    max=today.format(INPUT_DATE_FORMAT).to_string()
                    prop:value=move || range.get().start.format(INPUT_DATE_FORMAT).to_string()
                    on:change=on_start
                />
            </label>

            <label class="flex flex-col text-sm text-gray-400">
                <span class="mb-1">"End"</span>
                <input
                    type="date"
                    class=input_class
                    min=move || range.get().start.format(INPUT_DATE_FORMAT).to_string()
                    max=move || max_end.get().format(INPUT_DATE_FORMAT).to_string()
                    prop:value=move || range.get().end.format(INPUT_DATE_FORMAT).to_string()
                    on:change=on_end
                />
            </label>

            <span class="text-sm text-gray-400 pb-2">
                {move || format!("{} days", range.get().day_count())}
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_date() {
        assert_eq!(
            parse_input_date("2024-08-31"),
            NaiveDate::from_ymd_opt(2024, 8, 31)
        );
        assert_eq!(parse_input_date("08/31/2024"), None);
        assert_eq!(parse_input_date(""), None);
    }
}

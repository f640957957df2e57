//! Dashboard Page
//!
//! The main view: date navigation, the add-activity form, the day's log,
//! the year heatmap, and the per-habit charts.

use chrono::Duration;
use leptos::*;

use crate::components::{ActivityForm, ActivityLog, ChartPanel, Heatmap, ListSkeleton};
use crate::state::app::AppState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let current_date = state.current_date;
    let loading = state.loading;

    // Initial refresh cycle on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        state_for_effect.refresh_all();
    });

    // Date navigation re-fetches only the log for the new date
    let state_for_prev = state.clone();
    let prev_day = move |_| {
        current_date.update(|d| *d = *d - Duration::days(1));
        state_for_prev.refresh_log();
    };
    let state_for_next = state;
    let next_day = move |_| {
        current_date.update(|d| *d = *d + Duration::days(1));
        state_for_next.refresh_log();
    };

    view! {
        <div class="space-y-8">
            // Page header with date navigation
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Daily Log"</h1>
                    <p class="text-gray-400 mt-1">"Track what you spent your time on"</p>
                </div>

                <div class="flex items-center space-x-3">
                    <button
                        on:click=prev_day
                        class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                    >
                        "‹"
                    </button>
                    <span class="font-medium w-28 text-center">
                        {move || current_date.get().to_string()}
                    </span>
                    <button
                        on:click=next_day
                        class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                    >
                        "›"
                    </button>
                </div>
            </div>

            // Add activity
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Log Activity"</h2>
                <ActivityForm />
            </section>

            // The day's activities
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Activities"</h2>
                {move || {
                    if loading.get() {
                        view! { <ListSkeleton count=3 /> }.into_view()
                    } else {
                        view! { <ActivityLog /> }.into_view()
                    }
                }}
            </section>

            // Year heatmap
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Past Year"</h2>
                <Heatmap />
            </section>

            // Per-habit charts
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Habit Trends"</h2>
                <ChartPanel />
            </section>
        </div>
    }
}

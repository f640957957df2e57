//! Activity Form Component
//!
//! Form for logging a new activity.

use leptos::*;

use crate::api;
use crate::state::app::AppState;

/// Add-activity form component.
///
/// Leaving the habit selector on its fallback option submits no habit id
/// and lets the server classify the activity from its description.
#[component]
pub fn ActivityForm() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let habits = state.habits;

    let (habit_id, set_habit_id) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());
    let (hours, set_hours) = create_signal(String::new());
    let (date, set_date) = create_signal(state.current_date.get_untracked().to_string());
    let (submitting, set_submitting) = create_signal(false);

    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let hours_value = match hours.get().parse::<f64>() {
            Ok(h) if h >= 0.0 => h,
            _ => {
                state_for_submit.show_error("Hours must be a non-negative number");
                return;
            }
        };
        let Ok(date_value) = date.get().parse::<chrono::NaiveDate>() else {
            state_for_submit.show_error("Invalid date");
            return;
        };

        let request = api::NewActivity {
            habit_id: habit_id.get().parse().ok(),
            description: description.get(),
            hours: hours_value,
            date: date_value,
        };

        set_submitting.set(true);

        let state = state_for_submit.clone();
        spawn_local(async move {
            match api::add_activity(&request).await {
                Ok(()) => {
                    state.show_success("Activity added");
                    set_description.set(String::new());
                    set_hours.set(String::new());
                    state.refresh_all();
                }
                Err(e) => state.show_error(&format!("Failed to add activity: {}", e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="flex flex-wrap items-end gap-3">
            // Habit selector
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Habit"</label>
                <select
                    on:change=move |ev| set_habit_id.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    <option value="">"✨ Auto-classify"</option>
                    {move || {
                        habits
                            .get()
                            .into_iter()
                            .map(|h| view! {
                                <option value=h.id.to_string()>
                                    {format!("{} {}", h.emoji, h.name)}
                                </option>
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            // Description
            <div class="flex-1 min-w-[12rem]">
                <label class="block text-sm text-gray-400 mb-2">"Description"</label>
                <input
                    type="text"
                    placeholder="What did you do?"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                    required
                />
            </div>

            // Hours
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Hours"</label>
                <input
                    type="number"
                    step="0.1"
                    min="0"
                    prop:value=move || hours.get()
                    on:input=move |ev| set_hours.set(event_target_value(&ev))
                    class="w-24 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                    required
                />
            </div>

            // Date
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Date"</label>
                <input
                    type="date"
                    prop:value=move || date.get()
                    on:input=move |ev| set_date.set(event_target_value(&ev))
                    class="bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                    required
                />
            </div>

            // Submit
            <button
                type="submit"
                disabled=move || submitting.get()
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg font-semibold transition-colors"
            >
                {move || if submitting.get() { "Saving..." } else { "Log Activity" }}
            </button>
        </form>
    }
}

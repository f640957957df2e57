//! Activity Log Component
//!
//! The displayed date's activities grouped by habit, with inline edit
//! forms and confirmed deletes.

use leptos::*;

use crate::api;
use crate::state::app::{Activity, AppState};

/// Group activities by habit name, preserving first-seen group order and
/// within-group input order.
pub fn group_activities_by_habit(activities: &[Activity]) -> Vec<(String, Vec<Activity>)> {
    let mut groups: Vec<(String, Vec<Activity>)> = Vec::new();

    for activity in activities {
        match groups
            .iter_mut()
            .find(|(name, _)| name == &activity.habit_name)
        {
            Some((_, group)) => group.push(activity.clone()),
            None => groups.push((activity.habit_name.clone(), vec![activity.clone()])),
        }
    }

    groups
}

/// Activity log component
#[component]
pub fn ActivityLog() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let activities = state.activities;

    view! {
        <table class="w-full text-left">
            <tbody>
                {move || {
                    let activities = activities.get();
                    if activities.is_empty() {
                        view! {
                            <tr>
                                <td class="text-gray-400 py-4">
                                    "No activities logged for this date."
                                </td>
                            </tr>
                        }
                        .into_view()
                    } else {
                        group_activities_by_habit(&activities)
                            .into_iter()
                            .map(|(habit, group)| view! {
                                <tr class="activity-group">
                                    <td colspan="4" class="pt-4 pb-1">
                                        <strong><em>{habit}</em></strong>
                                    </td>
                                </tr>
                                {group
                                    .into_iter()
                                    .map(|activity| view! { <ActivityRow activity=activity /> })
                                    .collect_view()}
                            })
                            .collect_view()
                            .into_view()
                    }
                }}
            </tbody>
        </table>
    }
}

/// One activity row with its initially hidden inline edit form
#[component]
fn ActivityRow(activity: Activity) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let habits = state.habits;

    let (editing, set_editing) = create_signal(false);
    let (habit_id, set_habit_id) = create_signal(activity.habit_id.to_string());
    let (description, set_description) = create_signal(activity.description.clone());
    let (hours, set_hours) = create_signal(activity.hours.to_string());

    let activity_id = activity.id;
    let current_habit = activity.habit_id;

    let state_for_update = state.clone();
    let on_update = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Ok(habit_id) = habit_id.get().parse::<i64>() else {
            state_for_update.show_error("Select a habit");
            return;
        };
        let Ok(hours) = hours.get().parse::<f64>() else {
            state_for_update.show_error("Hours must be a number");
            return;
        };
        let description = description.get();

        let state = state_for_update.clone();
        spawn_local(async move {
            match api::update_activity(activity_id, habit_id, &description, hours).await {
                Ok(()) => {
                    state.show_success("Activity updated");
                    set_editing.set(false);
                    state.refresh_log();
                }
                Err(e) => state.show_error(&format!("Failed to update activity: {}", e)),
            }
        });
    };

    let state_for_delete = state.clone();
    let on_delete = move |_| {
        // No request is issued unless the user confirms
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message("Are you sure you want to delete this activity?")
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let state = state_for_delete.clone();
        spawn_local(async move {
            match api::delete_activity(activity_id).await {
                Ok(()) => {
                    state.show_success("Activity deleted");
                    state.refresh_all();
                }
                Err(e) => state.show_error(&format!("Failed to delete activity: {}", e)),
            }
        });
    };

    view! {
        <tr>
            <td class="py-1 pr-3">{activity.emoji.clone()}</td>
            <td class="py-1 pr-3">{activity.description.clone()}</td>
            <td class="py-1 pr-3">{activity.hours}</td>
            <td class="py-1">
                <button
                    on:click=move |_| set_editing.set(true)
                    class="px-2 py-1 bg-gray-700 hover:bg-gray-600 rounded text-sm transition-colors"
                >
                    "Edit"
                </button>
                <button
                    on:click=on_delete
                    class="px-2 py-1 ml-2 bg-gray-700 hover:bg-red-700 rounded text-sm transition-colors"
                >
                    "Delete"
                </button>

                <form
                    on:submit=on_update
                    class="mt-2 space-x-2"
                    style=move || if editing.get() { "display: block;" } else { "display: none;" }
                >
                    <select
                        on:change=move |ev| set_habit_id.set(event_target_value(&ev))
                        class="bg-gray-700 rounded px-2 py-1 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                        required
                    >
                        {move || {
                            habits
                                .get()
                                .into_iter()
                                .map(|h| {
                                    let is_current = h.id == current_habit;
                                    view! {
                                        <option value=h.id.to_string() selected=is_current>
                                            {format!("{} {}", h.emoji, h.name)}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <input
                        type="text"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                        class="bg-gray-700 rounded px-2 py-1 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                        required
                    />
                    <input
                        type="number"
                        step="0.1"
                        min="0"
                        prop:value=move || hours.get()
                        on:input=move |ev| set_hours.set(event_target_value(&ev))
                        class="bg-gray-700 rounded px-2 py-1 text-sm w-20
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                        required
                    />
                    <button
                        type="submit"
                        class="px-2 py-1 bg-primary-600 hover:bg-primary-700 rounded text-sm transition-colors"
                    >
                        "Save"
                    </button>
                    <button
                        type="button"
                        on:click=move |_| set_editing.set(false)
                        class="px-2 py-1 bg-gray-700 hover:bg-gray-600 rounded text-sm transition-colors"
                    >
                        "Cancel"
                    </button>
                </form>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn activity(id: i64, habit_name: &str) -> Activity {
        Activity {
            id,
            habit_id: 1,
            habit_name: habit_name.to_string(),
            description: format!("activity {}", id),
            hours: 1.0,
            emoji: "📚".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        }
    }

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let activities = vec![activity(1, "Read"), activity(2, "Run"), activity(3, "Read")];
        let groups = group_activities_by_habit(&activities);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Read");
        assert_eq!(groups[1].0, "Run");

        // Within-group input order is preserved
        assert_eq!(groups[0].1[0].id, 1);
        assert_eq!(groups[0].1[1].id, 3);
        assert_eq!(groups[1].1[0].id, 2);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_activities_by_habit(&[]).is_empty());
    }
}

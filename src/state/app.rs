//! Application State
//!
//! Reactive state management using Leptos signals, plus the domain types
//! shared by the API client and the components.

use chrono::NaiveDate;
use leptos::*;
use std::collections::HashMap;

use crate::api;

/// Application state provided to all components.
///
/// Everything here is re-fetched and rebuilt on each refresh cycle except
/// the currently displayed log date and the habit reference list.
#[derive(Clone)]
pub struct AppState {
    /// Date whose activity log is currently displayed
    pub current_date: RwSignal<NaiveDate>,
    /// Habit reference list embedded in the page markup, parsed once at load
    pub habits: RwSignal<Vec<Habit>>,
    /// Activities for the displayed date
    pub activities: RwSignal<Vec<Activity>>,
    /// Per-day aggregates feeding the heatmap
    pub grid_data: RwSignal<Vec<DayRecord>>,
    /// Chart series keyed by habit name
    pub habit_data: RwSignal<HashMap<String, HabitSeries>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// A user-defined habit, loaded once per page view
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub emoji: String,
}

/// One logged unit of time spent on a habit
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub habit_id: i64,
    pub habit_name: String,
    pub description: String,
    pub hours: f64,
    pub emoji: String,
    pub date: NaiveDate,
}

/// Server-aggregated totals for one calendar day.
///
/// Days without any logged activity are absent from the server response;
/// the grid builder synthesizes zero-hour cells for them.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub summary: Vec<String>,
}

impl DayRecord {
    /// Every summary entry must be a well-formed `"habit: hours"` pair.
    /// Malformed records are rejected whole at the fetch boundary; nothing
    /// downstream attempts partial parsing.
    pub fn validate(&self) -> Result<(), String> {
        for entry in &self.summary {
            if parse_summary_entry(entry).is_none() {
                return Err(format!(
                    "malformed summary entry {:?} for {}",
                    entry, self.date
                ));
            }
        }
        Ok(())
    }
}

/// Split a `"habit: hours"` summary entry. The server appends an `h` unit
/// suffix to the hours figure; a bare number is accepted as well.
pub fn parse_summary_entry(entry: &str) -> Option<(&str, f64)> {
    let (habit, hours) = entry.split_once(": ")?;
    let hours: f64 = hours.trim().trim_end_matches('h').parse().ok()?;
    Some((habit, hours))
}

/// Chart series for one habit: dates and hours are parallel arrays
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct HabitSeries {
    pub habit_id: i64,
    pub habit_name: String,
    pub dates: Vec<NaiveDate>,
    pub hours: Vec<f64>,
    pub total_hours: f64,
}

/// Parse the habit reference list from its embedded JSON form
pub fn parse_habits(json: &str) -> Result<Vec<Habit>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read the habit list embedded in the page markup (`#habits-data`).
///
/// A missing island or malformed JSON degrades to an empty list; the forms
/// keep a visible fallback option in that case.
pub fn load_embedded_habits() -> Vec<Habit> {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("habits-data"))
        .and_then(|el| el.text_content());

    let Some(text) = text else {
        web_sys::console::error_1(&"habits-data island missing from page markup".into());
        return Vec::new();
    };

    match parse_habits(&text) {
        Ok(habits) => habits,
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse embedded habits: {}", e).into());
            Vec::new()
        }
    }
}

/// Provide application state to the component tree
pub fn provide_app_state() {
    let state = AppState {
        current_date: create_rw_signal(chrono::Local::now().date_naive()),
        habits: create_rw_signal(load_embedded_habits()),
        activities: create_rw_signal(Vec::new()),
        grid_data: create_rw_signal(Vec::new()),
        habit_data: create_rw_signal(HashMap::new()),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl AppState {
    /// Full refresh cycle: the grid and chart fetches are scheduled as
    /// concurrent tasks, then the activity-log fetch for the current date
    /// is issued. Completions are unordered; each region re-renders on its
    /// own as data arrives.
    pub fn refresh_all(&self) {
        let state = self.clone();
        spawn_local(async move {
            match api::fetch_grid_data().await {
                Ok(records) => state.grid_data.set(records),
                Err(e) => state.show_error(&e),
            }
        });

        let state = self.clone();
        spawn_local(async move {
            match api::fetch_habit_data().await {
                Ok(series) => state.habit_data.set(series),
                Err(e) => state.show_error(&e),
            }
        });

        self.refresh_log();
    }

    /// Re-fetch the activity log for the currently displayed date
    pub fn refresh_log(&self) {
        self.loading.set(true);

        let state = self.clone();
        spawn_local(async move {
            let date = state.current_date.get_untracked();
            match api::fetch_activities(date).await {
                Ok(activities) => state.activities.set(activities),
                Err(e) => state.show_error(&e),
            }
            state.loading.set(false);
        });
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_habits() {
        let habits = parse_habits(
            r#"[{"id": 1, "name": "Read", "emoji": "📚"}, {"id": 2, "name": "Run", "emoji": "🏃"}]"#,
        )
        .unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "Read");
        assert_eq!(habits[1].id, 2);
    }

    #[test]
    fn test_parse_habits_malformed() {
        assert!(parse_habits("not json").is_err());
        assert!(parse_habits(r#"[{"id": "one"}]"#).is_err());
    }

    #[test]
    fn test_parse_summary_entry() {
        assert_eq!(parse_summary_entry("Read: 1.5"), Some(("Read", 1.5)));
        assert_eq!(parse_summary_entry("Read: 1.5h"), Some(("Read", 1.5)));
        assert_eq!(parse_summary_entry("Deep Work: 2h"), Some(("Deep Work", 2.0)));
    }

    #[test]
    fn test_parse_summary_entry_malformed() {
        assert_eq!(parse_summary_entry("Read 1.5"), None);
        assert_eq!(parse_summary_entry("Read: lots"), None);
    }

    #[test]
    fn test_day_record_validation() {
        let good = DayRecord {
            date: date(2026, 3, 1),
            hours: 3.5,
            summary: vec!["Read: 1.5h".to_string(), "Run: 2h".to_string()],
        };
        assert!(good.validate().is_ok());

        let bad = DayRecord {
            date: date(2026, 3, 1),
            hours: 1.0,
            summary: vec!["Read 1.5".to_string()],
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_day_record_json_shape() {
        let record: DayRecord =
            serde_json::from_str(r#"{"date": "2026-03-01", "hours": 2.0, "summary": ["Read: 2.0h"]}"#)
                .unwrap();
        assert_eq!(record.date, date(2026, 3, 1));
        assert_eq!(record.summary.len(), 1);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn missing_habits_island_degrades_to_empty() {
        // The test page carries no #habits-data island
        assert!(load_embedded_habits().is_empty());
    }
}

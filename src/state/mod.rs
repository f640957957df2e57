//! State Management
//!
//! Global application state and domain types.

pub mod app;

pub use app::{provide_app_state, Activity, AppState, DayRecord, Habit, HabitSeries};

//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod activity_form;
pub mod activity_log;
pub mod chart;
pub mod heatmap;
pub mod loading;
pub mod nav;
pub mod toast;

pub use activity_form::ActivityForm;
pub use activity_log::ActivityLog;
pub use chart::ChartPanel;
pub use heatmap::Heatmap;
pub use loading::{ListSkeleton, Loading};
pub use nav::Nav;
pub use toast::Toast;

//! HabitGrid Dashboard
//!
//! Browser-side view layer for a personal habit tracker, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Daily activity log with inline editing and date navigation
//! - Year-long activity heatmap with month/day axis labels
//! - Per-habit bar charts
//! - Ad-hoc admin query console
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the habit server over same-origin HTTP/JSON;
//! the habit reference list is embedded in the page markup and parsed once
//! at load.

use leptos::*;

mod api;
mod app;
mod components;
mod grid;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}

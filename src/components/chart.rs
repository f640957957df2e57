//! Chart Components
//!
//! Per-habit bar charts on HTML5 Canvas, with chart instances owned by an
//! explicit registry: installing a replacement chart for a habit disposes
//! the prior instance first.

use leptos::*;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::components::loading::Loading;
use crate::state::app::{AppState, HabitSeries};

/// Bar colors
const BAR_FILL: &str = "rgba(75, 192, 192, 0.2)";
const BAR_BORDER: &str = "rgba(75, 192, 192, 1)";

/// A live chart bound to a drawing surface. Disposal releases the surface.
pub trait ChartInstance {
    fn dispose(&mut self);
}

/// Owns at most one live chart per habit id.
pub struct ChartRegistry<C: ChartInstance> {
    charts: HashMap<i64, C>,
}

impl<C: ChartInstance> ChartRegistry<C> {
    pub fn new() -> Self {
        Self {
            charts: HashMap::new(),
        }
    }

    /// Install a chart for a habit, disposing the prior instance if one is
    /// live. The old instance is disposed exactly once, before the new one
    /// is stored.
    pub fn install(&mut self, habit_id: i64, chart: C) {
        if let Some(mut old) = self.charts.remove(&habit_id) {
            old.dispose();
        }
        self.charts.insert(habit_id, chart);
    }

    /// Dispose every live chart (panel teardown)
    pub fn clear(&mut self) {
        for (_, mut chart) in self.charts.drain() {
            chart.dispose();
        }
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl<C: ChartInstance> Default for ChartRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Canvas-backed bar chart
pub struct CanvasChart {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasChart {
    /// Bind to a canvas and draw the series. Returns `None` with a console
    /// diagnostic when the 2d context is unavailable.
    pub fn new(canvas: &HtmlCanvasElement, series: &HabitSeries) -> Option<Self> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    web_sys::console::error_1(
                        &format!("unexpected context type for habit {} chart", series.habit_id)
                            .into(),
                    );
                    return None;
                }
            },
            _ => {
                web_sys::console::error_1(
                    &format!("no 2d context for habit {} chart", series.habit_id).into(),
                );
                return None;
            }
        };

        let chart = Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        };
        draw_bar_chart(&chart.ctx, chart.width, chart.height, series);
        Some(chart)
    }
}

impl ChartInstance for CanvasChart {
    fn dispose(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }
}

/// Tabbed panel showing one bar chart per habit
#[component]
pub fn ChartPanel() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let loading = state.loading;

    let registry = store_value(ChartRegistry::<CanvasChart>::new());
    on_cleanup(move || registry.update_value(|r| r.clear()));

    let series_list = create_memo(move |_| {
        let mut list: Vec<HabitSeries> = state.habit_data.get().into_values().collect();
        list.sort_by_key(|s| s.habit_id);
        list
    });

    let (selected, set_selected) = create_signal(None::<i64>);
    let active_id = create_memo(move |_| {
        selected
            .get()
            .or_else(|| series_list.get().first().map(|s| s.habit_id))
    });

    view! {
        <div>
            // Tab bar
            <div class="flex flex-wrap gap-2 mb-4">
                {move || {
                    series_list
                        .get()
                        .into_iter()
                        .map(|s| {
                            let id = s.habit_id;
                            view! {
                                <button
                                    on:click=move |_| set_selected.set(Some(id))
                                    class=move || {
                                        let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                                        if active_id.get() == Some(id) {
                                            format!("{} bg-primary-600 text-white", base)
                                        } else {
                                            format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                                        }
                                    }
                                >
                                    {s.habit_name.clone()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>

            // One chart per habit; inactive tabs stay mounted, just hidden
            {move || {
                let list = series_list.get();
                if list.is_empty() {
                    if loading.get() {
                        view! { <Loading /> }.into_view()
                    } else {
                        view! { <p class="text-gray-400">"No habit data yet."</p> }.into_view()
                    }
                } else {
                    list.into_iter()
                        .map(|series| {
                            let id = series.habit_id;
                            view! {
                                <div style=move || {
                                    if active_id.get() == Some(id) {
                                        "display: block;"
                                    } else {
                                        "display: none;"
                                    }
                                }>
                                    <HabitChart series=series registry=registry />
                                </div>
                            }
                        })
                        .collect_view()
                        .into_view()
                }
            }}
        </div>
    }
}

/// One habit's chart: total-hours readout above the canvas
#[component]
fn HabitChart(
    series: HabitSeries,
    registry: StoredValue<ChartRegistry<CanvasChart>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    let habit_id = series.habit_id;
    let total = series.total_hours;

    // Draw once the canvas is mounted; the registry disposes any chart a
    // previous render installed for this habit.
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            if let Some(chart) = CanvasChart::new(&canvas, &series) {
                registry.update_value(|r| r.install(habit_id, chart));
            }
        }
    });

    view! {
        <div>
            <div class="text-sm text-gray-400 mb-2">
                "Total: "
                <span class="font-semibold text-white">{format!("{:.1} hours", total)}</span>
            </div>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full rounded-lg"
            />
        </div>
    }
}

/// Draw the bar chart on canvas
fn draw_bar_chart(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    series: &HabitSeries,
) {
    // Margins
    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if series.hours.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data yet", width / 2.0 - 40.0, height / 2.0);
        return;
    }

    // Y axis starts at zero; pad the top 10%
    let max_hours = series.hours.iter().fold(0.0_f64, |a, &b| a.max(b));
    let y_max = if max_hours > 0.0 { max_hours * 1.1 } else { 1.0 };

    // Horizontal grid lines and y-axis labels
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;

        ctx.set_stroke_style(&"#374151".into()); // gray-700
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    // Bars
    let slot = chart_width / series.hours.len() as f64;
    let bar_width = slot * 0.8;

    for (i, &hours) in series.hours.iter().enumerate() {
        let x = margin_left + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (hours / y_max) * chart_height;
        let y = margin_top + chart_height - bar_height;

        ctx.set_fill_style(&BAR_FILL.into());
        ctx.fill_rect(x, y, bar_width, bar_height);
        ctx.set_stroke_style(&BAR_BORDER.into());
        ctx.stroke_rect(x, y, bar_width, bar_height);
    }

    // X-axis date labels, at most 6 evenly spaced
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let label_count = series.dates.len().min(6);
    let step = (series.dates.len() / label_count.max(1)).max(1);
    for (i, date) in series.dates.iter().enumerate().step_by(step) {
        let x = margin_left + i as f64 * slot + slot / 2.0 - 15.0;
        let _ = ctx.fill_text(&date.format("%m/%d").to_string(), x, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockChart {
        disposals: Rc<Cell<usize>>,
    }

    impl MockChart {
        fn new(disposals: &Rc<Cell<usize>>) -> Self {
            Self {
                disposals: Rc::clone(disposals),
            }
        }
    }

    impl ChartInstance for MockChart {
        fn dispose(&mut self) {
            self.disposals.set(self.disposals.get() + 1);
        }
    }

    #[test]
    fn test_reinstall_disposes_prior_instance_exactly_once() {
        let disposals = Rc::new(Cell::new(0));
        let mut registry = ChartRegistry::new();

        registry.install(1, MockChart::new(&disposals));
        assert_eq!(disposals.get(), 0);

        registry.install(1, MockChart::new(&disposals));
        assert_eq!(disposals.get(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_habits_do_not_dispose_each_other() {
        let disposals = Rc::new(Cell::new(0));
        let mut registry = ChartRegistry::new();

        registry.install(1, MockChart::new(&disposals));
        registry.install(2, MockChart::new(&disposals));

        assert_eq!(disposals.get(), 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_disposes_everything() {
        let disposals = Rc::new(Cell::new(0));
        let mut registry = ChartRegistry::new();

        registry.install(1, MockChart::new(&disposals));
        registry.install(2, MockChart::new(&disposals));
        registry.clear();

        assert_eq!(disposals.get(), 2);
        assert!(registry.is_empty());
    }
}

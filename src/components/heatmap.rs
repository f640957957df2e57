//! Heatmap Component
//!
//! Renders the 53-week activity grid with month and day-of-week axis
//! labels, hover tooltips, and the total-active-days counter.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::grid::{build_grid, intensity, GridCell, DAYS_PER_WEEK, MONTH_LABEL_SPAN};
use crate::state::app::{parse_summary_entry, AppState};

/// Fixed tooltip width in pixels; horizontal positioning clamps against it
const TOOLTIP_WIDTH: f64 = 220.0;

/// Gap between the hovered cell's bottom edge and the tooltip
const TOOLTIP_OFFSET_Y: f64 = 5.0;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Tooltip contents and placement for the currently hovered cell
#[derive(Clone, Default)]
struct TooltipState {
    visible: bool,
    left: f64,
    top: f64,
    date: String,
    total: f64,
    habits: Vec<(String, f64)>,
}

/// Activity heatmap component
#[component]
pub fn Heatmap() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState not found");
    let grid_ref = create_node_ref::<html::Div>();
    let (tooltip, set_tooltip) = create_signal(TooltipState::default());

    let grid = create_memo(move |_| {
        let today = chrono::Local::now().date_naive();
        build_grid(state.grid_data.get(), today)
    });

    view! {
        <div class="heatmap">
            // Month labels, aligned to the week columns below
            <div class="heatmap-months">
                {move || {
                    grid.get()
                        .months
                        .into_iter()
                        .map(|label| view! {
                            <span
                                class="heatmap-month"
                                style=format!(
                                    "grid-column: {} / span {};",
                                    label.week + 1,
                                    MONTH_LABEL_SPAN
                                )
                            >
                                {label.name}
                            </span>
                        })
                        .collect_view()
                }}
            </div>

            <div class="heatmap-body">
                // Day-of-week axis
                <div class="heatmap-days">
                    {DAY_LABELS
                        .into_iter()
                        .map(|day| view! { <span class="heatmap-day">{day}</span> })
                        .collect_view()}
                </div>

                // 53 week columns of 7 cells each, plus the tooltip overlay
                <div class="heatmap-grid" node_ref=grid_ref>
                    {move || {
                        grid.get()
                            .cells
                            .chunks(DAYS_PER_WEEK)
                            .map(|week| {
                                let cells = week.to_vec();
                                view! {
                                    <div class="heatmap-week">
                                        {cells
                                            .into_iter()
                                            .map(|cell| cell_view(cell, grid_ref, set_tooltip))
                                            .collect_view()}
                                    </div>
                                }
                            })
                            .collect_view()
                    }}

                    <div
                        class="heatmap-tooltip"
                        style=move || {
                            let t = tooltip.get();
                            format!(
                                "display: {}; left: {}px; top: {}px;",
                                if t.visible { "block" } else { "none" },
                                t.left,
                                t.top
                            )
                        }
                    >
                        <strong>{move || tooltip.get().date}</strong>
                        <div class="mb-2">
                            {move || format!("Total Hours: {:.1}", tooltip.get().total)}
                        </div>
                        {move || {
                            tooltip
                                .get()
                                .habits
                                .into_iter()
                                .map(|(habit, hours)| view! {
                                    <div>{format!("{}: {:.1} hours", habit, hours)}</div>
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>

            <div class="text-sm text-gray-400 mt-3">
                "Total active days: "
                <span class="font-semibold text-white">
                    {move || grid.get().active_days()}
                </span>
            </div>
        </div>
    }
}

/// One day cell. Future cells render inert; past cells get hover handlers
/// bound at construction.
fn cell_view(
    cell: GridCell,
    grid_ref: NodeRef<html::Div>,
    set_tooltip: WriteSignal<TooltipState>,
) -> View {
    if cell.is_future {
        return view! { <div class="heatmap-cell heatmap-cell-future"></div> }.into_view();
    }

    let style = if cell.hours > 0.0 {
        format!("background-color: rgba(0, 128, 0, {});", intensity(cell.hours))
    } else {
        String::new()
    };

    let on_mouseover = move |ev: web_sys::MouseEvent| {
        let Some(grid_el) = grid_ref.get_untracked() else {
            web_sys::console::error_1(&"heatmap grid container not mounted".into());
            return;
        };
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };

        let cell_rect = target.get_bounding_client_rect();
        let grid_rect = grid_el.get_bounding_client_rect();
        let (left, top) = tooltip_position(
            cell_rect.left(),
            cell_rect.bottom(),
            grid_rect.left(),
            grid_rect.top(),
            grid_rect.width(),
            grid_el.scroll_left() as f64,
            grid_el.scroll_top() as f64,
        );

        set_tooltip.set(TooltipState {
            visible: true,
            left,
            top,
            date: cell.date.to_string(),
            total: cell.hours,
            habits: habit_totals(&cell.summary),
        });
    };
    let on_mouseout = move |_| set_tooltip.update(|t| t.visible = false);

    view! {
        <div
            class="heatmap-cell"
            style=style
            on:mouseover=on_mouseover
            on:mouseout=on_mouseout
        ></div>
    }
    .into_view()
}

/// Tooltip placement relative to the grid container: a fixed offset below
/// the hovered cell, clamped so the tooltip never crosses the container's
/// right edge.
fn tooltip_position(
    cell_left: f64,
    cell_bottom: f64,
    grid_left: f64,
    grid_top: f64,
    grid_width: f64,
    scroll_left: f64,
    scroll_top: f64,
) -> (f64, f64) {
    let mut left = cell_left - grid_left + scroll_left;
    let top = cell_bottom - grid_top + scroll_top + TOOLTIP_OFFSET_Y;

    if left + TOOLTIP_WIDTH > grid_width {
        left = grid_width - TOOLTIP_WIDTH - 5.0;
    }

    (left, top)
}

/// Sum a cell's summary entries per habit, preserving first-seen order.
/// Entries were validated when the grid data was fetched.
fn habit_totals(summary: &[String]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for (habit, hours) in summary.iter().filter_map(|e| parse_summary_entry(e)) {
        match totals.iter_mut().find(|(name, _)| name.as_str() == habit) {
            Some((_, total)) => *total += hours,
            None => totals.push((habit.to_string(), hours)),
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_below_cell() {
        // Cell at viewport (40, bottom 60) inside a grid at (10, 20)
        let (left, top) = tooltip_position(40.0, 60.0, 10.0, 20.0, 800.0, 0.0, 0.0);
        assert_eq!(left, 30.0);
        assert_eq!(top, 40.0 + TOOLTIP_OFFSET_Y);
    }

    #[test]
    fn test_tooltip_clamped_at_right_edge() {
        let (left, _) = tooltip_position(790.0, 60.0, 0.0, 0.0, 800.0, 0.0, 0.0);
        assert_eq!(left, 800.0 - TOOLTIP_WIDTH - 5.0);
        assert!(left + TOOLTIP_WIDTH <= 800.0);
    }

    #[test]
    fn test_tooltip_accounts_for_scroll() {
        let (left, top) = tooltip_position(40.0, 60.0, 10.0, 20.0, 800.0, 100.0, 0.0);
        assert_eq!(left, 130.0);
        assert_eq!(top, 45.0);
    }

    #[test]
    fn test_habit_totals_sums_in_first_seen_order() {
        let summary = vec![
            "Read: 1.5".to_string(),
            "Run: 2".to_string(),
            "Read: 0.5".to_string(),
        ];

        assert_eq!(
            habit_totals(&summary),
            vec![("Read".to_string(), 2.0), ("Run".to_string(), 2.0)]
        );
    }

    #[test]
    fn test_habit_totals_with_unit_suffix() {
        let summary = vec!["Read: 1.5h".to_string(), "Run: 2.0h".to_string()];

        assert_eq!(
            habit_totals(&summary),
            vec![("Read".to_string(), 1.5), ("Run".to_string(), 2.0)]
        );
    }
}

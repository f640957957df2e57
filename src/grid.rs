//! Heatmap Grid Builder
//!
//! Pure construction of the year heatmap: sparse per-day aggregates are
//! bucketed into a dense 53-week by 7-day grid anchored at the earliest
//! record, with month-boundary markers for the axis labels. Rendering is
//! left to `components::heatmap`.

use chrono::{Datelike, Duration, NaiveDate};

use crate::state::app::DayRecord;

/// Number of week columns in the grid
pub const GRID_WEEKS: usize = 53;

/// Days per week column
pub const DAYS_PER_WEEK: usize = 7;

/// Hours at which a cell reaches full color saturation
pub const FULL_INTENSITY_HOURS: f64 = 5.0;

/// Display width of one month label, in grid columns
pub const MONTH_LABEL_SPAN: usize = 4;

/// One day's cell in the heatmap
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub hours: f64,
    pub summary: Vec<String>,
    /// Cells dated after "today" are masked: zero hours, not interactive
    pub is_future: bool,
}

/// A month label anchored at the week column where the month begins
#[derive(Clone, Debug, PartialEq)]
pub struct MonthLabel {
    pub week: usize,
    pub name: &'static str,
}

/// Dense week-aligned grid: `GRID_WEEKS * DAYS_PER_WEEK` cells in
/// week-major, day-minor order, plus the month labels for the top axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityGrid {
    pub cells: Vec<GridCell>,
    pub months: Vec<MonthLabel>,
}

impl ActivityGrid {
    /// Cell at `(week, day)` with `week < 53`, `day < 7`
    pub fn cell(&self, week: usize, day: usize) -> &GridCell {
        &self.cells[week * DAYS_PER_WEEK + day]
    }

    /// Count of non-future days with logged activity
    pub fn active_days(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.is_future && c.hours > 0.0)
            .count()
    }
}

/// Color intensity for a cell: linear in hours, saturating at
/// [`FULL_INTENSITY_HOURS`].
pub fn intensity(hours: f64) -> f64 {
    (hours / FULL_INTENSITY_HOURS).clamp(0.0, 1.0)
}

/// English month abbreviation for the axis labels
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "Unknown",
    }
}

/// Build the dense grid from sparse day records.
///
/// The grid is anchored at the earliest record's date; cell `(week, day)`
/// holds `anchor + week*7 + day` days. Days absent from the input become
/// zero-hour cells, and cells dated after `today` are future-masked even
/// when a record matches. With no records at all the grid anchors at
/// `today - 364` days, giving an all-zero year ending at today.
pub fn build_grid(mut records: Vec<DayRecord>, today: NaiveDate) -> ActivityGrid {
    records.sort_by_key(|r| r.date);

    let anchor = records
        .first()
        .map(|r| r.date)
        .unwrap_or_else(|| today - Duration::days(364));

    let mut cells = Vec::with_capacity(GRID_WEEKS * DAYS_PER_WEEK);
    let mut months = Vec::new();
    let mut next = records.into_iter().peekable();
    let mut prev_month: Option<u32> = None;

    for week in 0..GRID_WEEKS {
        for day in 0..DAYS_PER_WEEK {
            let date = anchor + Duration::days((week * DAYS_PER_WEEK + day) as i64);

            if prev_month.is_some_and(|m| m != date.month()) {
                months.push(MonthLabel {
                    week,
                    name: month_name(date.month()),
                });
            }
            prev_month = Some(date.month());

            // Skip records the cursor has already passed (duplicate dates)
            // so a stray record can never wedge the fill loop.
            while next.peek().is_some_and(|r| r.date < date) {
                next.next();
            }
            let matched = if next.peek().is_some_and(|r| r.date == date) {
                next.next()
            } else {
                None
            };

            let cell = if date > today {
                GridCell {
                    date,
                    hours: 0.0,
                    summary: Vec::new(),
                    is_future: true,
                }
            } else if let Some(record) = matched {
                GridCell {
                    date,
                    hours: record.hours,
                    summary: record.summary,
                    is_future: false,
                }
            } else {
                GridCell {
                    date,
                    hours: 0.0,
                    summary: Vec::new(),
                    is_future: false,
                }
            };

            cells.push(cell);
        }
    }

    ActivityGrid { cells, months }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(on: NaiveDate, hours: f64) -> DayRecord {
        DayRecord {
            date: on,
            hours,
            summary: vec![format!("Read: {:.1}h", hours)],
        }
    }

    #[test]
    fn test_grid_dimensions_and_contiguous_dates() {
        let anchor = date(2025, 1, 6);
        let grid = build_grid(vec![record(anchor, 2.0)], date(2026, 6, 1));

        assert_eq!(grid.cells.len(), GRID_WEEKS * DAYS_PER_WEEK);
        for (i, cell) in grid.cells.iter().enumerate() {
            assert_eq!(cell.date, anchor + Duration::days(i as i64));
        }
        assert_eq!(grid.cell(0, 0).date, anchor);
        assert_eq!(grid.cell(1, 0).date, anchor + Duration::days(7));
        assert_eq!(grid.cell(52, 6).date, anchor + Duration::days(370));
    }

    #[test]
    fn test_records_bucketed_and_gaps_synthesized() {
        let anchor = date(2025, 3, 10);
        let grid = build_grid(
            vec![record(anchor, 1.0), record(anchor + Duration::days(4), 3.0)],
            date(2026, 6, 1),
        );

        assert_eq!(grid.cell(0, 0).hours, 1.0);
        assert_eq!(grid.cell(0, 4).hours, 3.0);
        // The days in between exist with zero hours
        assert_eq!(grid.cell(0, 2).hours, 0.0);
        assert!(!grid.cell(0, 2).is_future);
        assert!(grid.cell(0, 2).summary.is_empty());
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let grid = build_grid(
            vec![record(date(2025, 5, 3), 2.0), record(date(2025, 5, 1), 1.0)],
            date(2026, 6, 1),
        );

        assert_eq!(grid.cell(0, 0).date, date(2025, 5, 1));
        assert_eq!(grid.cell(0, 0).hours, 1.0);
        assert_eq!(grid.cell(0, 2).hours, 2.0);
    }

    #[test]
    fn test_future_cells_masked_even_with_matching_record() {
        let today = date(2025, 8, 10);
        let grid = build_grid(
            vec![
                record(today - Duration::days(1), 2.0),
                record(today + Duration::days(3), 4.0),
            ],
            today,
        );

        // Day 0 = yesterday, day 1 = today, days 2.. are future
        assert!(!grid.cell(0, 1).is_future);
        let future = grid.cell(0, 4);
        assert_eq!(future.date, today + Duration::days(3));
        assert!(future.is_future);
        assert_eq!(future.hours, 0.0);
        assert!(future.summary.is_empty());
    }

    #[test]
    fn test_empty_records_anchor_fallback() {
        let today = date(2026, 8, 7);
        let grid = build_grid(Vec::new(), today);

        assert_eq!(grid.cell(0, 0).date, today - Duration::days(364));
        assert_eq!(grid.cells.len(), GRID_WEEKS * DAYS_PER_WEEK);
        assert_eq!(grid.active_days(), 0);
        // The 365th cell is today; the remaining six are future-masked
        assert!(!grid.cells[364].is_future);
        assert!(grid.cells[365].is_future);
        assert!(grid.cells[370].is_future);
    }

    #[test]
    fn test_duplicate_dates_do_not_wedge_the_cursor() {
        let anchor = date(2025, 2, 1);
        let grid = build_grid(
            vec![
                record(anchor, 1.0),
                record(anchor, 9.0),
                record(anchor + Duration::days(2), 2.0),
            ],
            date(2026, 6, 1),
        );

        assert_eq!(grid.cell(0, 0).hours, 1.0);
        assert_eq!(grid.cell(0, 2).hours, 2.0);
    }

    #[test]
    fn test_month_labels_at_transitions() {
        // 2024-01-01 anchors a grid spanning 371 days into early 2025
        let grid = build_grid(vec![record(date(2024, 1, 1), 1.0)], date(2026, 6, 1));

        // Feb 1 is day 31 -> week 4; Mar 1 is day 60 -> week 8
        assert_eq!(grid.months[0], MonthLabel { week: 4, name: "Feb" });
        assert_eq!(grid.months[1], MonthLabel { week: 8, name: "Mar" });

        // Eleven transitions in 2024, plus Jan 2025 within the 371 days
        assert_eq!(grid.months.len(), 12);
        assert_eq!(grid.months[11].name, "Jan");
        assert_eq!(grid.months[11].week, 366 / 7);

        // No label for the anchor month itself
        assert!(grid.months.iter().all(|m| m.week > 0));
    }

    #[test]
    fn test_intensity_scale() {
        assert_eq!(intensity(2.5), 0.5);
        assert_eq!(intensity(5.0), 1.0);
        assert_eq!(intensity(7.0), 1.0);
        assert_eq!(intensity(0.0), 0.0);
    }

    #[test]
    fn test_active_days_counts_only_logged_past_days() {
        let today = date(2025, 8, 10);
        let grid = build_grid(
            vec![
                record(today - Duration::days(2), 2.0),
                record(today - Duration::days(1), 0.0),
                record(today + Duration::days(1), 3.0),
            ],
            today,
        );

        // Only the first record has hours and is in the past
        assert_eq!(grid.active_days(), 1);
    }
}

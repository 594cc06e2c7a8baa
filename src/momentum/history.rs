//! Historical weekly momentum series
//!
//! A 13-point sparkline (12 weeks back through the current week), each
//! point scored as `min(signals in that 7-day window x 8, 100)`. This is
//! a deliberate cheap approximation, not the live composite formula.

use chrono::{DateTime, Duration, Utc};

use crate::models::{ThemeSignal, WeeklyMomentumPoint};

/// Number of weekly points in the series.
pub const HISTORY_WEEKS: i64 = 13;

/// Score contributed per signal within a weekly window.
const POINTS_PER_SIGNAL: f64 = 8.0;

/// Build the weekly series for one theme's signals, oldest week first.
pub fn weekly_momentum_series(
    signals: &[&ThemeSignal],
    as_of: DateTime<Utc>,
) -> Vec<WeeklyMomentumPoint> {
    let mut series = Vec::with_capacity(HISTORY_WEEKS as usize);

    for weeks_back in (0..HISTORY_WEEKS).rev() {
        let window_end = as_of - Duration::days(weeks_back * 7);
        let window_start = window_end - Duration::days(7);

        let count = signals
            .iter()
            .filter(|ts| ts.created_at > window_start && ts.created_at <= window_end)
            .count();

        series.push(WeeklyMomentumPoint {
            week_start: window_start.date_naive(),
            score: (count as f64 * POINTS_PER_SIGNAL).min(100.0),
        });
    }

    series
}

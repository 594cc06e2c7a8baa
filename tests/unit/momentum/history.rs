//! Unit tests for the weekly momentum series

use chrono::{DateTime, Duration, TimeZone, Utc};
use themetrix::models::{SignalRecord, ThemeSignal};
use themetrix::momentum::weekly_momentum_series;

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

fn signal(days_ago: i64) -> ThemeSignal {
    let created_at = as_of() - Duration::days(days_ago);
    ThemeSignal {
        theme_id: 1,
        relevance_score: 0.5,
        created_at,
        signal: SignalRecord {
            source: "FT".to_string(),
            signal_type: None,
            countries: Vec::new(),
            deal_size: None,
            published_at: created_at,
        },
    }
}

#[test]
fn empty_signals_give_thirteen_zero_points() {
    let series = weekly_momentum_series(&[], as_of());
    assert_eq!(series.len(), 13);
    assert!(series.iter().all(|p| p.score == 0.0));
}

#[test]
fn series_is_oldest_first() {
    let series = weekly_momentum_series(&[], as_of());
    for pair in series.windows(2) {
        assert!(pair[0].week_start < pair[1].week_start);
    }
    // Current week's window starts seven days before as_of.
    assert_eq!(
        series[12].week_start,
        (as_of() - Duration::days(7)).date_naive()
    );
}

#[test]
fn recent_signals_land_in_the_newest_bucket() {
    let signals = vec![signal(2), signal(3), signal(4)];
    let refs: Vec<&ThemeSignal> = signals.iter().collect();

    let series = weekly_momentum_series(&refs, as_of());
    assert_eq!(series[12].score, 24.0);
    assert!(series[..12].iter().all(|p| p.score == 0.0));
}

#[test]
fn old_signals_land_in_their_week() {
    // 80 days back falls in the window 77-84 days ago, second point.
    let signals = vec![signal(80)];
    let refs: Vec<&ThemeSignal> = signals.iter().collect();

    let series = weekly_momentum_series(&refs, as_of());
    assert_eq!(series[1].score, 8.0);
    assert_eq!(series[12].score, 0.0);
}

#[test]
fn weekly_score_caps_at_one_hundred() {
    // 15 signals in the current week would be 120 uncapped.
    let signals: Vec<ThemeSignal> = (0..15).map(|_| signal(1)).collect();
    let refs: Vec<&ThemeSignal> = signals.iter().collect();

    let series = weekly_momentum_series(&refs, as_of());
    assert_eq!(series[12].score, 100.0);
}

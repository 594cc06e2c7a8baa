//! Theme momentum calculation
//!
//! A single synchronous pass over already-fetched collections. The clock
//! is injected as `as_of` so identical inputs always produce identical
//! output.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::models::{MomentumSnapshot, ScoreUpdate, Theme, ThemeSignal, TrendDirection};
use crate::momentum::deal_value::parse_deal_value;
use crate::momentum::history::weekly_momentum_series;
use crate::momentum::normalize;
use crate::momentum::weights::MomentumWeights;

/// Signal types that count as deal activity.
const DEAL_SIGNAL_TYPES: [&str; 2] = ["Deal", "Funding"];

/// Acceleration above which a theme is accelerating, below the negation
/// of which it is decelerating.
const TREND_THRESHOLD: f64 = 0.2;

/// Computes per-theme momentum snapshots from the 90-day signal window.
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// Compute one snapshot per theme, sorted descending by momentum
    /// score. Signals and score updates referencing themes outside the
    /// supplied list are ignored.
    pub fn calculate(
        themes: &[Theme],
        signals: &[ThemeSignal],
        score_updates: &[ScoreUpdate],
        as_of: DateTime<Utc>,
    ) -> Vec<MomentumSnapshot> {
        let mut signals_by_theme: HashMap<i64, Vec<&ThemeSignal>> = HashMap::new();
        for signal in signals {
            signals_by_theme
                .entry(signal.theme_id)
                .or_default()
                .push(signal);
        }

        let mut updates_by_theme: HashMap<i64, Vec<&ScoreUpdate>> = HashMap::new();
        for update in score_updates {
            updates_by_theme
                .entry(update.theme_id)
                .or_default()
                .push(update);
        }

        let mut snapshots: Vec<MomentumSnapshot> = themes
            .iter()
            .map(|theme| {
                let theme_signals = signals_by_theme
                    .get(&theme.id)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[]);
                let theme_updates = updates_by_theme
                    .get(&theme.id)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[]);
                Self::snapshot_for_theme(theme, theme_signals, theme_updates, as_of)
            })
            .collect();

        snapshots.sort_by(|a, b| b.momentum_score.total_cmp(&a.momentum_score));
        snapshots
    }

    fn snapshot_for_theme(
        theme: &Theme,
        signals: &[&ThemeSignal],
        updates: &[&ScoreUpdate],
        as_of: DateTime<Utc>,
    ) -> MomentumSnapshot {
        let signals_7d = signals_within(signals, as_of, 7);
        let signals_30d = signals_within(signals, as_of, 30);
        let signals_90d = signals_within(signals, as_of, 90);

        let velocity_7d = signals_7d.len() as f64 / 7.0;
        let velocity_30d = signals_30d.len() as f64 / 30.0;
        let velocity_90d = signals_90d.len() as f64 / 90.0;
        let acceleration = velocity_7d - velocity_30d;

        let deal_signals: Vec<&ThemeSignal> = signals_30d
            .iter()
            .copied()
            .filter(|ts| {
                ts.signal
                    .signal_type
                    .as_deref()
                    .is_some_and(|t| DEAL_SIGNAL_TYPES.contains(&t))
            })
            .collect();
        let deal_count = deal_signals.len();
        let total_deal_value: f64 = deal_signals
            .iter()
            .map(|ts| {
                ts.signal
                    .deal_size
                    .as_deref()
                    .map(parse_deal_value)
                    .unwrap_or(0.0)
            })
            .sum::<f64>()
            .round();

        let countries: HashSet<&str> = signals_30d
            .iter()
            .flat_map(|ts| ts.signal.countries.iter().map(String::as_str))
            .collect();
        let sources: HashSet<&str> = signals_30d
            .iter()
            .map(|ts| ts.signal.source.as_str())
            .collect();

        let score_change = score_change_over_window(updates);

        let momentum_score = normalize::normalize_velocity(velocity_30d)
            * MomentumWeights::VELOCITY
            + normalize::normalize_acceleration(acceleration) * MomentumWeights::ACCELERATION
            + normalize::normalize_score_change(score_change) * MomentumWeights::SCORE_CHANGE
            + normalize::normalize_deal_count(deal_count) * MomentumWeights::DEAL_ACTIVITY
            + normalize::normalize_country_count(countries.len()) * MomentumWeights::GEOGRAPHY
            + normalize::normalize_source_count(sources.len()) * MomentumWeights::SOURCES;

        let trend_direction = if acceleration > TREND_THRESHOLD {
            TrendDirection::Accelerating
        } else if acceleration < -TREND_THRESHOLD {
            TrendDirection::Decelerating
        } else {
            TrendDirection::Steady
        };

        MomentumSnapshot {
            theme_id: theme.id,
            theme_name: theme.name.clone(),
            pillar: theme.pillar.clone(),
            sector: theme.sector.clone(),
            momentum_score: round1(momentum_score),
            signal_velocity_7d: round1(velocity_7d),
            signal_velocity_30d: round1(velocity_30d),
            signal_velocity_90d: round1(velocity_90d),
            signal_acceleration: round2(acceleration),
            deal_count: deal_count as u32,
            total_deal_value,
            country_count: countries.len() as u32,
            source_count: sources.len() as u32,
            score_change,
            trend_direction,
            historical_momentum: weekly_momentum_series(signals, as_of),
        }
    }
}

/// Signals whose join row is at most `days` old at `as_of`.
fn signals_within<'a>(
    signals: &[&'a ThemeSignal],
    as_of: DateTime<Utc>,
    days: i64,
) -> Vec<&'a ThemeSignal> {
    let cutoff = as_of - Duration::days(days);
    signals
        .iter()
        .copied()
        .filter(|ts| ts.created_at >= cutoff)
        .collect()
}

/// Last minus first update value when at least two updates exist within
/// the window, else zero.
fn score_change_over_window(updates: &[&ScoreUpdate]) -> f64 {
    if updates.len() < 2 {
        return 0.0;
    }
    let mut ordered: Vec<&ScoreUpdate> = updates.iter().copied().collect();
    ordered.sort_by_key(|u| u.updated_at);
    ordered[ordered.len() - 1].value - ordered[0].value
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Momentum snapshot models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Categorical trend direction derived from signal acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Accelerating,
    Steady,
    Decelerating,
}

/// Requested highlight window for the momentum endpoint. Only selects
/// which precomputed velocity consumers emphasize; the calculator always
/// computes all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "90d")]
    Days90,
}

impl TimeRange {
    /// Parse a query value, defaulting to the 30-day window on absent or
    /// unrecognized input.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("7d") => TimeRange::Days7,
            Some("90d") => TimeRange::Days90,
            _ => TimeRange::Days30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Days7 => "7d",
            TimeRange::Days30 => "30d",
            TimeRange::Days90 => "90d",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Days30
    }
}

/// One point of the 13-week sparkline series, labelled by window start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyMomentumPoint {
    pub week_start: NaiveDate,
    pub score: f64,
}

/// Computed momentum metrics for one theme. Recomputed from the full
/// 90-day signal window on every call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    pub theme_id: i64,
    pub theme_name: String,
    pub pillar: String,
    pub sector: String,
    pub momentum_score: f64,
    pub signal_velocity_7d: f64,
    pub signal_velocity_30d: f64,
    pub signal_velocity_90d: f64,
    pub signal_acceleration: f64,
    pub deal_count: u32,
    pub total_deal_value: f64,
    pub country_count: u32,
    pub source_count: u32,
    pub score_change: f64,
    pub trend_direction: TrendDirection,
    pub historical_momentum: Vec<WeeklyMomentumPoint>,
}

//! Market-intelligence signal models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A processed market-intelligence event as produced by the external
/// ingestion pipeline. Append-only from this service's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub countries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_size: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// A theme-signal join row carrying relevance and the join creation time.
/// Momentum windows are measured against `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSignal {
    pub theme_id: i64,
    pub relevance_score: f64,
    pub created_at: DateTime<Utc>,
    pub signal: SignalRecord,
}

/// A score update within the trend window, feeding `score_change`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub theme_id: i64,
    pub value: f64,
    pub updated_at: DateTime<Utc>,
}

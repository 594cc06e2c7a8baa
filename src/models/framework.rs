//! Scoring framework data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scoring category grouping weighted criteria.
///
/// `weight` is percentage-like (interpreted as weight/100 during
/// aggregation). Criteria are kept in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub weight: f64,
    pub display_order: i32,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
}

/// A single criterion within a category.
///
/// Criterion weights are points and are not required to sum to 100 within
/// a category; the aggregator normalizes by the weight-sum of criteria
/// that actually carry a score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub weight: f64,
    pub display_order: i32,
}

/// Confidence rating attached to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "High" => Some(Confidence::High),
            "Medium" => Some(Confidence::Medium),
            "Low" => Some(Confidence::Low),
            _ => None,
        }
    }
}

/// One score for a (theme, criterion) pair. Upserted, never versioned.
///
/// `value` is on a 1-5 scale; `None` means "not yet scored". Zero is a
/// legitimate value and is included in aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub theme_id: i64,
    pub criteria_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_source: Option<String>,
}

/// Aggregated result for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThemeScore {
    pub overall_score: f64,
    pub overall_confidence: Confidence,
}

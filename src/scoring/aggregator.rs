//! Weighted multi-criteria score aggregation

use std::collections::HashMap;

use crate::models::{Category, Score, ThemeScore};
use crate::scoring::categories::is_scoring_category;
use crate::scoring::confidence::ConfidenceTally;

/// Collapses per-criterion scores into one overall score and confidence
/// for a theme.
pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Aggregate one theme's scores against the full framework.
    ///
    /// Category weights normalize relative contribution; the result stays
    /// on the 1-5 scale. Categories with no scored criteria are fully
    /// excluded (neither numerator nor denominator). Scores referencing
    /// criteria outside the supplied framework are ignored. Never fails:
    /// total absence of data degrades to `{0, Medium}`.
    pub fn aggregate(categories: &[Category], scores: &[Score]) -> ThemeScore {
        let by_criterion: HashMap<i64, &Score> =
            scores.iter().map(|s| (s.criteria_id, s)).collect();

        let mut total_weighted_score = 0.0;
        let mut total_weight = 0.0;
        let mut tally = ConfidenceTally::new();

        for category in categories {
            if !is_scoring_category(&category.code) {
                continue;
            }

            let mut category_score = 0.0;
            let mut category_weight_sum = 0.0;

            for criterion in &category.criteria {
                let Some(score) = by_criterion.get(&criterion.id) else {
                    continue;
                };
                // Null value means "not yet scored"; zero is a real value.
                let Some(value) = score.value else {
                    continue;
                };

                category_score += value * criterion.weight;
                category_weight_sum += criterion.weight;

                if let Some(confidence) = score.confidence {
                    tally.record(confidence);
                }
            }

            if category_weight_sum > 0.0 {
                let normalized = category_score / category_weight_sum;
                total_weighted_score += normalized * (category.weight / 100.0);
                total_weight += category.weight / 100.0;
            }
        }

        let overall_score = if total_weight > 0.0 {
            round2(total_weighted_score / total_weight)
        } else {
            0.0
        };

        ThemeScore {
            overall_score,
            overall_confidence: tally.classify(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

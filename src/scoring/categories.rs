//! Scoring allow-list definitions

/// Category codes that count toward the overall numeric score.
///
/// Categories outside this list are qualitative-only and are excluded
/// from aggregation even when their criteria carry scores.
pub const SCORING_CATEGORY_CODES: [&str; 4] = ["A", "B", "C", "D"];

/// Whether a category participates in quantitative scoring.
pub fn is_scoring_category(code: &str) -> bool {
    SCORING_CATEGORY_CODES.contains(&code)
}

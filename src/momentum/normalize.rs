//! Sub-metric normalization to the 0-100 momentum range

/// Clamp a value to [min, max].
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Normalize 30-day velocity (signals/day). 10 signals/day saturates.
pub fn normalize_velocity(velocity_30d: f64) -> f64 {
    (velocity_30d * 10.0).min(100.0)
}

/// Normalize acceleration (signals/day delta). Zero maps to the 50
/// midpoint; +/-1 signal/day saturates either end.
pub fn normalize_acceleration(acceleration: f64) -> f64 {
    clamp((acceleration + 1.0) * 50.0, 0.0, 100.0)
}

/// Normalize 30-day score change on the 1-5 scale. Zero maps to the 50
/// midpoint; a full +/-5 swing saturates.
pub fn normalize_score_change(score_change: f64) -> f64 {
    clamp((score_change + 5.0) * 10.0, 0.0, 100.0)
}

/// Normalize 30-day deal count. Ten deals saturate.
pub fn normalize_deal_count(deal_count: usize) -> f64 {
    (deal_count as f64 * 10.0).min(100.0)
}

/// Normalize geographic spread. Ten countries saturate.
pub fn normalize_country_count(country_count: usize) -> f64 {
    (country_count as f64 * 10.0).min(100.0)
}

/// Normalize source diversity. Twenty distinct sources saturate.
pub fn normalize_source_count(source_count: usize) -> f64 {
    (source_count as f64 * 5.0).min(100.0)
}

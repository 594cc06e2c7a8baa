//! Composite momentum weight definitions

/// Weights for the six normalized sub-metrics of the composite momentum
/// score. They sum to 1.00 exactly.
pub struct MomentumWeights;

impl MomentumWeights {
    pub const VELOCITY: f64 = 0.30;
    pub const ACCELERATION: f64 = 0.25;
    pub const SCORE_CHANGE: f64 = 0.20;
    pub const DEAL_ACTIVITY: f64 = 0.15;
    pub const GEOGRAPHY: f64 = 0.05;
    pub const SOURCES: f64 = 0.05;

    /// Verify weights sum to 1.0
    pub fn verify() -> bool {
        (Self::VELOCITY
            + Self::ACCELERATION
            + Self::SCORE_CHANGE
            + Self::DEAL_ACTIVITY
            + Self::GEOGRAPHY
            + Self::SOURCES
            - 1.0)
            .abs()
            < 0.001
    }
}

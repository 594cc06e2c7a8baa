//! Confidence tallying and classification

use crate::models::Confidence;

/// Share of High ratings at or above which overall confidence is High.
pub const HIGH_SHARE_THRESHOLD: f64 = 0.6;
/// Share of Low ratings at or above which overall confidence is Low.
pub const LOW_SHARE_THRESHOLD: f64 = 0.4;

/// Running tally of confidence labels across present scores.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfidenceTally {
    high: usize,
    medium: usize,
    low: usize,
}

impl ConfidenceTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, confidence: Confidence) {
        match confidence {
            Confidence::High => self.high += 1,
            Confidence::Medium => self.medium += 1,
            Confidence::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Classify the tally. The High check runs first; with no labels at
    /// all the default is Medium.
    pub fn classify(&self) -> Confidence {
        let total = self.total();
        if total == 0 {
            return Confidence::Medium;
        }
        let total = total as f64;
        if self.high as f64 / total >= HIGH_SHARE_THRESHOLD {
            Confidence::High
        } else if self.low as f64 / total >= LOW_SHARE_THRESHOLD {
            Confidence::Low
        } else {
            Confidence::Medium
        }
    }
}

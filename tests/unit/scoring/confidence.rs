//! Unit tests for confidence tallying and classification

use chrono::Utc;
use themetrix::models::{Category, Confidence, Criterion, Score};
use themetrix::scoring::{ConfidenceTally, ScoreAggregator};

fn tally_of(labels: &[Confidence]) -> ConfidenceTally {
    let mut tally = ConfidenceTally::new();
    for label in labels {
        tally.record(*label);
    }
    tally
}

#[test]
fn empty_tally_defaults_to_medium() {
    assert_eq!(ConfidenceTally::new().classify(), Confidence::Medium);
}

#[test]
fn all_high_classifies_high() {
    let tally = tally_of(&[Confidence::High, Confidence::High, Confidence::High]);
    assert_eq!(tally.classify(), Confidence::High);
}

#[test]
fn all_low_classifies_low() {
    let tally = tally_of(&[Confidence::Low, Confidence::Low]);
    assert_eq!(tally.classify(), Confidence::Low);
}

#[test]
fn high_share_boundary_inclusive() {
    // 3 of 5 = 0.6 exactly
    let tally = tally_of(&[
        Confidence::High,
        Confidence::High,
        Confidence::High,
        Confidence::Medium,
        Confidence::Low,
    ]);
    assert_eq!(tally.classify(), Confidence::High);
}

#[test]
fn low_share_boundary_inclusive() {
    // 2 of 5 = 0.4 exactly, high share below 0.6
    let tally = tally_of(&[
        Confidence::Low,
        Confidence::Low,
        Confidence::High,
        Confidence::Medium,
        Confidence::Medium,
    ]);
    assert_eq!(tally.classify(), Confidence::Low);
}

#[test]
fn high_check_runs_before_low() {
    // 3 high of 5 (0.6) and 2 low of 5 (0.4): both thresholds met, High wins.
    let tally = tally_of(&[
        Confidence::High,
        Confidence::High,
        Confidence::High,
        Confidence::Low,
        Confidence::Low,
    ]);
    assert_eq!(tally.classify(), Confidence::High);
}

#[test]
fn mixed_below_thresholds_is_medium() {
    let tally = tally_of(&[
        Confidence::High,
        Confidence::Medium,
        Confidence::Medium,
        Confidence::Low,
    ]);
    assert_eq!(tally.classify(), Confidence::Medium);
}

#[test]
fn aggregator_tallies_only_present_scores() {
    let categories = vec![Category {
        id: 1,
        code: "A".to_string(),
        name: "Category A".to_string(),
        weight: 40.0,
        display_order: 1,
        criteria: vec![
            Criterion {
                id: 1,
                category_id: 1,
                name: "Criterion 1".to_string(),
                weight: 50.0,
                display_order: 1,
            },
            Criterion {
                id: 2,
                category_id: 1,
                name: "Criterion 2".to_string(),
                weight: 50.0,
                display_order: 2,
            },
        ],
    }];
    let scores = vec![
        Score {
            theme_id: 1,
            criteria_id: 1,
            value: Some(4.0),
            confidence: Some(Confidence::High),
            notes: None,
            updated_at: Utc::now(),
            update_source: None,
        },
        // Unscored row: its Low label must not count.
        Score {
            theme_id: 1,
            criteria_id: 2,
            value: None,
            confidence: Some(Confidence::Low),
            notes: None,
            updated_at: Utc::now(),
            update_source: None,
        },
    ];

    let result = ScoreAggregator::aggregate(&categories, &scores);
    assert_eq!(result.overall_confidence, Confidence::High);
}

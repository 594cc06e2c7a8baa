//! Read-through cache for scoring framework reference data
//!
//! Categories and criteria change rarely; the HTTP layer keeps a fetched
//! copy keyed by its fetch instant and refreshes it when stale instead of
//! holding ambient mutable state inside the aggregator.

use std::time::{Duration, Instant};

use crate::models::Category;

/// How long a fetched framework stays fresh.
pub const FRAMEWORK_CACHE_TTL: Duration = Duration::from_secs(300);

/// A framework snapshot with its fetch instant.
#[derive(Debug, Clone)]
pub struct FrameworkCache {
    categories: Vec<Category>,
    fetched_at: Instant,
}

impl FrameworkCache {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            fetched_at: Instant::now(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

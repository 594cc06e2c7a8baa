//! Weighted score aggregation.

pub mod aggregator;
pub mod cache;
pub mod categories;
pub mod confidence;

pub use aggregator::*;
pub use cache::*;
pub use categories::*;
pub use confidence::*;

//! Theme entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An investable market segment under evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub name: String,
    pub pillar: String,
    pub sector: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

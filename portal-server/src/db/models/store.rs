//! Store model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single merchant outlet, addressed externally by `store_code`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Store {
    pub id: i64,
    pub merchant_id: i64,
    pub store_code: String,
    pub name: String,
    pub city: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

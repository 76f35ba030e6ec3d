//! Delivery OTP model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One OTP row per order. Created with the order, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderOtp {
    pub order_id: i64,
    pub code: String,
    pub attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

//! OTP Repository
//!
//! Reads the OTP row and persists outcomes decided by `orders::otp`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::OrderOtp;

#[derive(Clone)]
pub struct OtpRepository {
    pool: PgPool,
}

impl OtpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_order(&self, order_id: i64) -> RepoResult<Option<OrderOtp>> {
        let otp = sqlx::query_as::<_, OrderOtp>(
            "SELECT order_id, code, attempts, locked_until, verified_at, created_at
             FROM order_food_otps WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(otp)
    }

    /// Successful validation: stamp verified_at, reset the attempt counter
    pub async fn mark_verified(&self, order_id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        sqlx::query(
            "UPDATE order_food_otps
             SET verified_at = $2, attempts = 0, locked_until = NULL
             WHERE order_id = $1",
        )
        .bind(order_id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Failed validation: bump the counter, optionally set the lock
    pub async fn record_failure(
        &self,
        order_id: i64,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        sqlx::query(
            "UPDATE order_food_otps
             SET attempts = $2, locked_until = COALESCE($3, locked_until)
             WHERE order_id = $1",
        )
        .bind(order_id)
        .bind(attempts)
        .bind(locked_until)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

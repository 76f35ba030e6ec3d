//! Verification Repository
//!
//! Append-only attempt log backing the daily verification limit.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepoResult;

#[derive(Clone)]
pub struct VerificationRepository {
    pool: PgPool,
}

impl VerificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attempts made by a merchant in `[start, end)`
    pub async fn count_attempts_between(
        &self,
        merchant_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM payout_verification_attempts
             WHERE merchant_id = $1 AND created_at >= $2 AND created_at < $3",
        )
        .bind(merchant_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Record an attempt (counted against the daily limit either way)
    pub async fn record_attempt(
        &self,
        merchant_id: i64,
        method: &str,
        target: &str,
        provider_ref: Option<&str>,
        success: bool,
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO payout_verification_attempts
                 (merchant_id, method, target, provider_ref, success)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(merchant_id)
        .bind(method)
        .bind(target)
        .bind(provider_ref)
        .bind(success)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

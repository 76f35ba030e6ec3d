//! Wallet Repository
//!
//! 余额变动全部走数据库函数（幂等键、余额检查都在函数里），
//! 这里只传参数、解释返回值。

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{RepoError, RepoResult};
use crate::db::models::{LedgerEntry, Wallet};

#[derive(Clone)]
pub struct WalletRepository {
    pool: PgPool,
}

impl WalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the merchant's wallet id, creating the wallet on first use
    pub async fn get_or_create(&self, merchant_id: i64) -> RepoResult<i64> {
        let wallet_id: i64 = sqlx::query_scalar("SELECT get_or_create_merchant_wallet($1)")
            .bind(merchant_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(wallet_id)
    }

    /// Credit the wallet. Returns false when the idempotency key was
    /// already used (replay, nothing changed).
    pub async fn credit(
        &self,
        wallet_id: i64,
        amount: Decimal,
        category: &str,
        idempotency_key: &str,
        note: Option<&str>,
    ) -> RepoResult<bool> {
        let applied: bool =
            sqlx::query_scalar("SELECT merchant_wallet_credit($1, $2, $3, $4, $5)")
                .bind(wallet_id)
                .bind(amount)
                .bind(category)
                .bind(idempotency_key)
                .bind(note)
                .fetch_one(&self.pool)
                .await?;
        Ok(applied)
    }

    /// Debit the wallet. Same replay contract as `credit`; fails with a
    /// validation error when the balance does not cover the amount.
    pub async fn debit(
        &self,
        wallet_id: i64,
        amount: Decimal,
        category: &str,
        idempotency_key: &str,
        note: Option<&str>,
    ) -> RepoResult<bool> {
        let applied: Result<bool, sqlx::Error> =
            sqlx::query_scalar("SELECT merchant_wallet_debit($1, $2, $3, $4, $5)")
                .bind(wallet_id)
                .bind(amount)
                .bind(category)
                .bind(idempotency_key)
                .bind(note)
                .fetch_one(&self.pool)
                .await;

        match applied {
            Ok(applied) => Ok(applied),
            Err(e) if e.to_string().contains("INSUFFICIENT_FUNDS") => Err(RepoError::Validation(
                "Insufficient wallet balance".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_merchant(&self, merchant_id: i64) -> RepoResult<Option<Wallet>> {
        let wallet = sqlx::query_as::<_, Wallet>(
            "SELECT id, merchant_id, balance, updated_at
             FROM merchant_wallet WHERE merchant_id = $1",
        )
        .bind(merchant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(wallet)
    }

    /// Ledger entries, newest first
    pub async fn ledger(
        &self,
        wallet_id: i64,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            "SELECT id, wallet_id, entry_type, amount, category, idempotency_key,
                    note, balance_after, created_at
             FROM merchant_wallet_ledger WHERE wallet_id = $1
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(wallet_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

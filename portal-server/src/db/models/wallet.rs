//! Wallet and ledger models
//!
//! Balance 只通过数据库函数变动，应用层只读。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Merchant wallet row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wallet {
    pub id: i64,
    pub merchant_id: i64,
    pub balance: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Append-only ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub wallet_id: i64,
    pub entry_type: String,
    pub amount: Decimal,
    pub category: String,
    pub idempotency_key: String,
    pub note: Option<String>,
    pub balance_after: Decimal,
    pub created_at: DateTime<Utc>,
}

//! Food order model
//!
//! 订单由下单系统创建；本服务只推进状态机并盖时间戳。
//! `status` 以原始字符串存储（历史数据可能是旧别名 `NEW`），
//! 解析归一化在 domain 层完成。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Food order row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodOrder {
    pub id: i64,
    pub store_id: i64,
    pub customer_name: Option<String>,
    pub status: String,
    pub total_amount: Decimal,
    /// 商家应得收益，定价系统在下单时计算好
    pub merchant_earning: Decimal,
    pub placed_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub preparing_at: Option<DateTime<Utc>>,
    pub ready_at: Option<DateTime<Utc>>,
    pub out_for_delivery_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub rto_at: Option<DateTime<Utc>>,
}

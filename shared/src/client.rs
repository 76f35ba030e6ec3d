//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication between the
//! portal server and merchant-facing clients.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::order::OrderStatus;

// =============================================================================
// Order API DTOs
// =============================================================================

/// Request body for a status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Result of an applied status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub order_id: i64,
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub changed_at: DateTime<Utc>,
}

/// Order summary for merchant-facing views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: i64,
    pub store_id: i64,
    pub customer_name: Option<String>,
    pub status: String,
    pub total_amount: Decimal,
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

// =============================================================================
// OTP API DTOs
// =============================================================================

/// Request body for delivery OTP validation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OtpValidateRequest {
    #[validate(length(min = 4, max = 8, message = "OTP must be 4-8 characters"))]
    pub otp: String,
}

/// Successful OTP validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpValidateResponse {
    pub order_id: i64,
    pub verified_at: DateTime<Utc>,
}

// =============================================================================
// Store API DTOs
// =============================================================================

/// Store summary for the owning merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreView {
    pub id: i64,
    pub store_code: String,
    pub name: String,
    pub city: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Wallet API DTOs
// =============================================================================

/// Wallet balance view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletView {
    pub wallet_id: i64,
    pub balance: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// One ledger entry (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryView {
    pub id: i64,
    pub entry_type: String,
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
    pub balance_after: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Request body for a payout withdrawal
///
/// `reference` 由客户端提供以支持安全重试；缺省时服务端生成。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WithdrawRequest {
    pub amount: Decimal,
    #[validate(length(min = 1, max = 64, message = "reference must be 1-64 characters"))]
    pub reference: Option<String>,
}

/// Result of a payout withdrawal request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawResponse {
    /// false 表示同一 reference 之前已经受理过（幂等重放）
    pub applied: bool,
    pub reference: String,
}

// =============================================================================
// Payout Verification DTOs
// =============================================================================

/// Bank account verification request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BankVerificationRequest {
    #[validate(length(min = 6, max = 24, message = "account_number must be 6-24 characters"))]
    pub account_number: String,
    #[validate(length(equal = 11, message = "ifsc must be exactly 11 characters"))]
    pub ifsc: String,
    #[validate(length(min = 1, max = 100, message = "holder_name must be 1-100 characters"))]
    pub holder_name: String,
}

/// UPI VPA verification request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpiVerificationRequest {
    #[validate(length(min = 3, max = 100, message = "vpa must be 3-100 characters"))]
    pub vpa: String,
}

/// Verification dispatch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub status: String,
    pub provider_ref: Option<String>,
    /// 今日剩余尝试次数（本次已计入）
    pub attempts_remaining_today: i64,
}

// =============================================================================
// Webhook DTOs
// =============================================================================

/// Webhook acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

//! 支付网关对接
//!
//! - [`webhook`] - Webhook 签名校验与事件信封
//! - [`client`] - 打款账户验证的网关客户端

pub mod client;
pub mod webhook;

pub use client::{FundAccountValidationRequest, RazorpayClient};
pub use webhook::{WebhookEvent, sign_payload, verify_webhook_signature};

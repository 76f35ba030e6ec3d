//! Webhook signature verification and event envelope
//!
//! 网关对整个请求体做 hex HMAC-SHA256，放在 `X-Razorpay-Signature` 头。
//! 校验必须在反序列化之前、对原始字节进行。

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of `body` under `secret`
///
/// 测试和本地联调用来生成合法签名。
pub fn sign_payload(secret: &str, body: &[u8]) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        // HMAC accepts keys of any length; this branch is unreachable
        return String::new();
    };
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time verification of a hex signature over the raw body
pub fn verify_webhook_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(expected) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Webhook event envelope
///
/// Payload 结构随事件类型变化，这里保留原始 JSON，按需提取。
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

/// Fields extracted from a `payment.captured` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPayment {
    pub payment_id: String,
    /// Amount in the gateway's smallest unit (paise)
    pub amount_paise: i64,
    /// `notes.merchant_id`, set by us when the payment was created
    pub merchant_id: Option<i64>,
}

impl CapturedPayment {
    /// Gateway amount (paise) as rupees
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.amount_paise, 2)
    }

    /// Deterministic idempotency key for crediting this payment
    pub fn idempotency_key(&self) -> String {
        format!("razorpay_payment_{}", self.payment_id)
    }
}

/// Extract the payment entity from a `payment.captured` payload
pub fn extract_captured_payment(payload: &Value) -> Option<CapturedPayment> {
    let entity = payload.get("payment")?.get("entity")?;
    let payment_id = entity.get("id")?.as_str()?.to_string();
    let amount_paise = entity.get("amount")?.as_i64()?;

    // notes.merchant_id may arrive as a string or a number
    let merchant_id = entity
        .get("notes")
        .and_then(|n| n.get("merchant_id"))
        .and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });

    Some(CapturedPayment {
        payment_id,
        amount_paise,
        merchant_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "whsec_test_4711";

    #[test]
    fn test_signature_roundtrip() {
        let body = br#"{"event":"payment.captured"}"#;
        let signature = sign_payload(SECRET, body);
        assert!(verify_webhook_signature(SECRET, body, &signature));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let body = br#"{"event":"payment.captured"}"#;
        let signature = sign_payload(SECRET, body);
        assert!(!verify_webhook_signature(
            SECRET,
            br#"{"event":"payment.failed"}"#,
            &signature
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let body = b"payload";
        let signature = sign_payload(SECRET, body);
        assert!(!verify_webhook_signature("other_secret", body, &signature));
    }

    #[test]
    fn test_malformed_signature_rejected() {
        assert!(!verify_webhook_signature(SECRET, b"payload", "not-hex"));
        assert!(!verify_webhook_signature(SECRET, b"payload", ""));
        assert!(!verify_webhook_signature(SECRET, b"payload", "deadbeef"));
    }

    #[test]
    fn test_extract_captured_payment() {
        let payload = json!({
            "payment": {
                "entity": {
                    "id": "pay_29QQoUBi66xm2f",
                    "amount": 54_900,
                    "currency": "INR",
                    "notes": { "merchant_id": "17" }
                }
            }
        });

        let payment = extract_captured_payment(&payload).unwrap();
        assert_eq!(payment.payment_id, "pay_29QQoUBi66xm2f");
        assert_eq!(payment.amount(), Decimal::new(54_900, 2));
        assert_eq!(payment.merchant_id, Some(17));
        assert_eq!(
            payment.idempotency_key(),
            "razorpay_payment_pay_29QQoUBi66xm2f"
        );
    }

    #[test]
    fn test_extract_handles_numeric_merchant_id_and_missing_notes() {
        let payload = json!({
            "payment": { "entity": { "id": "pay_1", "amount": 100, "notes": { "merchant_id": 3 } } }
        });
        assert_eq!(
            extract_captured_payment(&payload).unwrap().merchant_id,
            Some(3)
        );

        let payload = json!({
            "payment": { "entity": { "id": "pay_2", "amount": 100 } }
        });
        assert_eq!(extract_captured_payment(&payload).unwrap().merchant_id, None);

        assert!(extract_captured_payment(&json!({})).is_none());
    }
}

//! Razorpay API client
//!
//! 只封装本服务用到的一小块：打款账户验证（penny drop / VPA 校验）。
//! 验证结论由网关给出，这里不做任何判断。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::RazorpayConfig;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway rejected the request ({status}): {body}")]
    Provider { status: u16, body: String },
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        AppError::upstream(e.to_string())
    }
}

/// Fund account validation request (bank account or VPA)
#[derive(Debug, Clone, Serialize)]
pub struct FundAccountValidationRequest {
    pub account_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccountDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpa: Option<VpaDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BankAccountDetails {
    pub name: String,
    pub ifsc: String,
    pub account_number: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VpaDetails {
    pub address: String,
}

impl FundAccountValidationRequest {
    pub fn bank(name: String, ifsc: String, account_number: String) -> Self {
        Self {
            account_type: "bank_account".to_string(),
            bank_account: Some(BankAccountDetails {
                name,
                ifsc,
                account_number,
            }),
            vpa: None,
        }
    }

    pub fn upi(address: String) -> Self {
        Self {
            account_type: "vpa".to_string(),
            bank_account: None,
            vpa: Some(VpaDetails { address }),
        }
    }
}

/// Gateway response for a dispatched validation
#[derive(Debug, Clone, Deserialize)]
pub struct FundAccountValidation {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Thin HTTP client for the payment gateway
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(config: &RazorpayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        }
    }

    /// Dispatch a fund account validation to the gateway
    pub async fn validate_fund_account(
        &self,
        request: &FundAccountValidationRequest,
    ) -> Result<FundAccountValidation, PaymentError> {
        let url = format!("{}/fund_accounts/validations", self.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_request_shape() {
        let req = FundAccountValidationRequest::bank(
            "Asha Kirana Stores".into(),
            "HDFC0000123".into(),
            "50100212345678".into(),
        );
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["account_type"], "bank_account");
        assert_eq!(json["bank_account"]["ifsc"], "HDFC0000123");
        assert!(json.get("vpa").is_none());
    }

    #[test]
    fn test_upi_request_shape() {
        let req = FundAccountValidationRequest::upi("asha@okbank".into());
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["account_type"], "vpa");
        assert_eq!(json["vpa"]["address"], "asha@okbank");
        assert!(json.get("bank_account").is_none());
    }
}

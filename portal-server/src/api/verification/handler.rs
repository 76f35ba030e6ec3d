//! Payout Verification API Handlers

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use shared::client::{BankVerificationRequest, UpiVerificationRequest, VerificationResponse};
use validator::Validate;

use crate::auth::CurrentMerchant;
use crate::core::ServerState;
use crate::db::repository::VerificationRepository;
use crate::payments::FundAccountValidationRequest;
use crate::payments::client::FundAccountValidation;
use crate::security_log;
use crate::utils::time::utc_day_bounds;
use crate::utils::{AppError, AppResult};

/// Verification attempts allowed per merchant per UTC calendar day
pub const MAX_DAILY_ATTEMPTS: i64 = 3;

/// Check the daily budget; returns attempts already used today
async fn check_daily_limit(
    repo: &VerificationRepository,
    merchant: &CurrentMerchant,
) -> AppResult<i64> {
    let (start, end) = utc_day_bounds(Utc::now());
    let used = repo
        .count_attempts_between(merchant.id, start, end)
        .await?;

    if used >= MAX_DAILY_ATTEMPTS {
        security_log!(
            "WARN",
            "verification_limit_hit",
            merchant_id = merchant.id,
            used = used
        );
        return Err(AppError::rate_limited(format!(
            "Daily verification limit reached ({MAX_DAILY_ATTEMPTS} per day)"
        )));
    }

    Ok(used)
}

/// Record the attempt and shape the response
async fn finish_attempt(
    repo: &VerificationRepository,
    merchant: &CurrentMerchant,
    method: &str,
    target: &str,
    used_before: i64,
    dispatch: Result<FundAccountValidation, crate::payments::client::PaymentError>,
) -> AppResult<Json<VerificationResponse>> {
    let attempts_remaining_today = MAX_DAILY_ATTEMPTS - used_before - 1;

    match dispatch {
        Ok(validation) => {
            repo.record_attempt(merchant.id, method, target, Some(&validation.id), true)
                .await?;
            Ok(Json(VerificationResponse {
                status: validation.status.unwrap_or_else(|| "created".to_string()),
                provider_ref: Some(validation.id),
                attempts_remaining_today,
            }))
        }
        Err(e) => {
            // 失败的尝试同样计入当日限额
            repo.record_attempt(merchant.id, method, target, None, false)
                .await?;
            Err(e.into())
        }
    }
}

/// Mask an account number down to its last four digits
fn mask_account(account_number: &str) -> String {
    let chars: Vec<char> = account_number.chars().collect();
    let visible = chars.len().saturating_sub(4);
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { *c })
        .collect()
}

/// Dispatch a bank account (penny-drop) verification
pub async fn verify_bank(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Json(payload): Json<BankVerificationRequest>,
) -> AppResult<Json<VerificationResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = VerificationRepository::new(state.get_db());
    let used = check_daily_limit(&repo, &merchant).await?;

    let target = mask_account(&payload.account_number);
    let request = FundAccountValidationRequest::bank(
        payload.holder_name.clone(),
        payload.ifsc.to_uppercase(),
        payload.account_number.clone(),
    );

    let dispatch = state.razorpay.validate_fund_account(&request).await;
    finish_attempt(&repo, &merchant, "BANK", &target, used, dispatch).await
}

/// Dispatch a UPI VPA verification
pub async fn verify_upi(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Json(payload): Json<UpiVerificationRequest>,
) -> AppResult<Json<VerificationResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if !payload.vpa.contains('@') {
        return Err(AppError::validation(
            "vpa must look like handle@provider".to_string(),
        ));
    }

    let repo = VerificationRepository::new(state.get_db());
    let used = check_daily_limit(&repo, &merchant).await?;

    let request = FundAccountValidationRequest::upi(payload.vpa.clone());

    let dispatch = state.razorpay.validate_fund_account(&request).await;
    finish_attempt(&repo, &merchant, "UPI", &payload.vpa, used, dispatch).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_account_keeps_last_four() {
        assert_eq!(mask_account("50100212345678"), "**********5678");
        assert_eq!(mask_account("1234"), "1234");
        assert_eq!(mask_account("123"), "123");
    }
}

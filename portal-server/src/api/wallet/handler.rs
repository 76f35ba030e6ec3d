//! Wallet API Handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::client::{LedgerEntryView, WalletView, WithdrawRequest, WithdrawResponse};
use uuid::Uuid;
use validator::Validate;

use crate::api::convert;
use crate::auth::CurrentMerchant;
use crate::core::ServerState;
use crate::db::repository::WalletRepository;
use crate::utils::validation::{MAX_REFERENCE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Ledger category for merchant-initiated withdrawals
const PAYOUT_CATEGORY: &str = "payout_request";

/// Query params for the ledger listing
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Wallet balance of the authenticated merchant
pub async fn get_wallet(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
) -> AppResult<Json<WalletView>> {
    let repo = WalletRepository::new(state.get_db());
    repo.get_or_create(merchant.id).await?;

    let wallet = repo
        .find_by_merchant(merchant.id)
        .await?
        .ok_or_else(|| AppError::internal("Wallet missing after creation".to_string()))?;
    Ok(Json(convert::wallet_view(wallet)))
}

/// Ledger entries, newest first
pub async fn ledger(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Query(query): Query<LedgerQuery>,
) -> AppResult<Json<Vec<LedgerEntryView>>> {
    let repo = WalletRepository::new(state.get_db());
    let wallet_id = repo.get_or_create(merchant.id).await?;

    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let entries = repo.ledger(wallet_id, limit, offset).await?;
    Ok(Json(
        entries
            .into_iter()
            .map(convert::ledger_entry_view)
            .collect(),
    ))
}

/// Request a payout withdrawal
///
/// `reference` 作为幂等键的一部分：同一 reference 重放时
/// `applied = false`，余额不会重复扣减。
pub async fn withdraw(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Json(payload): Json<WithdrawRequest>,
) -> AppResult<Json<WithdrawResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if payload.amount <= Decimal::ZERO {
        return Err(AppError::validation(
            "amount must be greater than zero".to_string(),
        ));
    }

    let reference = payload
        .reference
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    validate_required_text(&reference, "reference", MAX_REFERENCE_LEN)?;

    let repo = WalletRepository::new(state.get_db());
    let wallet_id = repo.get_or_create(merchant.id).await?;

    let idempotency_key = format!("{PAYOUT_CATEGORY}_{reference}");
    let applied = repo
        .debit(
            wallet_id,
            payload.amount,
            PAYOUT_CATEGORY,
            &idempotency_key,
            Some("Payout withdrawal request"),
        )
        .await?;

    tracing::info!(
        merchant_id = merchant.id,
        amount = %payload.amount,
        reference = %reference,
        applied,
        "Payout withdrawal requested"
    );

    Ok(Json(WithdrawResponse { applied, reference }))
}

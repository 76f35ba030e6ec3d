//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use shared::client::{
    OrderView, OtpValidateRequest, OtpValidateResponse, StatusUpdateRequest, TransitionResponse,
};
use validator::Validate;

use crate::api::convert;
use crate::api::stores::resolve_owned_store;
use crate::auth::CurrentMerchant;
use crate::core::ServerState;
use crate::db::models::FoodOrder;
use crate::db::repository::{OrderRepository, OtpRepository};
use crate::orders::lifecycle::OrderLifecycle;
use crate::orders::otp::{self, OtpOutcome};
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub status: Option<String>,
}

fn default_limit() -> i64 {
    50
}

async fn load_order(
    state: &ServerState,
    order_id: i64,
    store_id: i64,
) -> AppResult<FoodOrder> {
    OrderRepository::new(state.get_db())
        .find_for_store(order_id, store_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
}

/// List orders of a store (paginated)
pub async fn list(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Path(store_code): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderView>>> {
    let store = resolve_owned_store(&state, &merchant, &store_code).await?;

    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let orders = OrderRepository::new(state.get_db())
        .list_for_store(store.id, query.status.as_deref(), limit, offset)
        .await?;
    Ok(Json(orders.into_iter().map(convert::order_view).collect()))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Path((store_code, order_id)): Path<(String, i64)>,
) -> AppResult<Json<OrderView>> {
    let store = resolve_owned_store(&state, &merchant, &store_code).await?;
    let order = load_order(&state, order_id, store.id).await?;
    Ok(Json(convert::order_view(order)))
}

/// Apply a status transition
///
/// 只有转换表允许的 (当前, 目标) 对会落库；首次进入 DELIVERED 时
/// 由 lifecycle 触发钱包入账。
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Path((store_code, order_id)): Path<(String, i64)>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<TransitionResponse>> {
    let store = resolve_owned_store(&state, &merchant, &store_code).await?;
    let order = load_order(&state, order_id, store.id).await?;

    let applied = OrderLifecycle::new(state.get_db())
        .transition(&store, &order, payload.status)
        .await?;

    Ok(Json(TransitionResponse {
        order_id,
        from: applied.from,
        to: applied.to,
        changed_at: Utc::now(),
    }))
}

/// Validate the delivery OTP for an order
pub async fn validate_otp(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Path((store_code, order_id)): Path<(String, i64)>,
    Json(payload): Json<OtpValidateRequest>,
) -> AppResult<Json<OtpValidateResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let store = resolve_owned_store(&state, &merchant, &store_code).await?;
    let order = load_order(&state, order_id, store.id).await?;

    let repo = OtpRepository::new(state.get_db());
    let row = repo
        .find_by_order(order.id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No OTP issued for order {order_id}")))?;

    let now = Utc::now();
    match otp::evaluate(&row, &payload.otp, now) {
        OtpOutcome::Verified => {
            repo.mark_verified(order.id, now).await?;
            tracing::info!(order_id = order.id, "Delivery OTP verified");
            Ok(Json(OtpValidateResponse {
                order_id: order.id,
                verified_at: now,
            }))
        }
        OtpOutcome::AlreadyVerified => Err(AppError::conflict(
            "OTP has already been verified for this order".to_string(),
        )),
        OtpOutcome::Locked { until } => {
            security_log!(
                "WARN",
                "otp_locked_attempt",
                order_id = order.id,
                locked_until = until.to_rfc3339()
            );
            Err(AppError::rate_limited(format!(
                "Too many failed attempts, locked until {}",
                until.to_rfc3339()
            )))
        }
        OtpOutcome::Mismatch {
            attempts,
            locked_until,
        } => {
            repo.record_failure(order.id, attempts, locked_until).await?;
            if locked_until.is_some() {
                security_log!("WARN", "otp_lock_engaged", order_id = order.id);
            }
            let remaining = (otp::MAX_OTP_ATTEMPTS - attempts).max(0);
            Err(AppError::invalid(format!(
                "Incorrect OTP, {remaining} attempts remaining"
            )))
        }
    }
}

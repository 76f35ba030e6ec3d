//! Store API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::client::StoreView;

use crate::api::convert;
use crate::auth::CurrentMerchant;
use crate::core::ServerState;
use crate::db::models::Store;
use crate::db::repository::StoreRepository;
use crate::utils::validation::{MAX_STORE_CODE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Resolve a store by public code and enforce ownership.
///
/// 所有 store 级接口共用：未知 code 404，别家的店 403。
pub(crate) async fn resolve_owned_store(
    state: &ServerState,
    merchant: &CurrentMerchant,
    store_code: &str,
) -> AppResult<Store> {
    validate_required_text(store_code, "store_code", MAX_STORE_CODE_LEN)?;

    let store = StoreRepository::new(state.get_db())
        .find_by_code(store_code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Store {store_code} not found")))?;

    if store.merchant_id != merchant.id {
        tracing::warn!(
            store_code = %store_code,
            merchant_id = merchant.id,
            owner_id = store.merchant_id,
            "Store ownership mismatch"
        );
        return Err(AppError::forbidden(
            "Store belongs to a different merchant".to_string(),
        ));
    }

    Ok(store)
}

/// List stores of the authenticated merchant
pub async fn list(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
) -> AppResult<Json<Vec<StoreView>>> {
    let stores = StoreRepository::new(state.get_db())
        .list_for_merchant(merchant.id)
        .await?;
    Ok(Json(stores.into_iter().map(convert::store_view).collect()))
}

/// Get one store by public code
pub async fn get_by_code(
    State(state): State<ServerState>,
    Extension(merchant): Extension<CurrentMerchant>,
    Path(store_code): Path<String>,
) -> AppResult<Json<StoreView>> {
    let store = resolve_owned_store(&state, &merchant, &store_code).await?;
    Ok(Json(convert::store_view(store)))
}

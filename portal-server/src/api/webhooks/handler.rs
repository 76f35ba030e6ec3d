//! Webhook API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use shared::client::WebhookAck;

use crate::core::ServerState;
use crate::db::repository::WalletRepository;
use crate::payments::webhook::{
    CapturedPayment, WebhookEvent, extract_captured_payment, verify_webhook_signature,
};
use crate::security_log;
use crate::utils::{AppError, AppResult};

const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// Ledger category for gateway-settled payments
const GATEWAY_CATEGORY: &str = "gateway_payment";

/// Razorpay webhook endpoint
///
/// 签名校验必须发生在反序列化之前、对原始字节进行。
/// 未知事件类型一律 200 确认，避免网关无谓重试。
pub async fn razorpay(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            security_log!("WARN", "webhook_missing_signature", header = SIGNATURE_HEADER);
            AppError::unauthorized()
        })?;

    if !verify_webhook_signature(&state.config.razorpay.webhook_secret, &body, signature) {
        security_log!("WARN", "webhook_bad_signature", body_len = body.len());
        return Err(AppError::unauthorized());
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Malformed webhook body: {e}")))?;

    match event.event.as_str() {
        "payment.captured" => {
            let payment = extract_captured_payment(&event.payload).ok_or_else(|| {
                AppError::validation(
                    "payment.captured payload missing payment entity".to_string(),
                )
            })?;

            // 签名合法的事件一律确认：入账失败只记日志，幂等键保证
            // 网关重投不会重复入账。
            if let Err(e) = credit_captured_payment(&state, &payment).await {
                tracing::error!(
                    payment_id = %payment.payment_id,
                    error = %e,
                    "Failed to credit captured payment"
                );
            }
        }
        other => {
            tracing::info!(event = %other, "Ignoring unhandled webhook event");
        }
    }

    Ok(Json(WebhookAck { received: true }))
}

/// Credit the merchant wallet for a captured gateway payment
async fn credit_captured_payment(
    state: &ServerState,
    payment: &CapturedPayment,
) -> AppResult<()> {
    let Some(merchant_id) = payment.merchant_id else {
        // 没有商家标注的支付不属于门户钱包，确认即可
        tracing::warn!(
            payment_id = %payment.payment_id,
            "Captured payment has no merchant_id note, skipping credit"
        );
        return Ok(());
    };

    let note = format!("Gateway payment {}", payment.payment_id);
    let repo = WalletRepository::new(state.get_db());
    let wallet_id = repo.get_or_create(merchant_id).await?;
    let applied = repo
        .credit(
            wallet_id,
            payment.amount(),
            GATEWAY_CATEGORY,
            &payment.idempotency_key(),
            Some(note.as_str()),
        )
        .await?;

    if applied {
        tracing::info!(
            payment_id = %payment.payment_id,
            merchant_id,
            amount = %payment.amount(),
            "Gateway payment credited"
        );
    } else {
        tracing::info!(
            payment_id = %payment.payment_id,
            "Gateway payment already credited, skipping"
        );
    }

    Ok(())
}

//! 认证中间件
//!
//! 为 JWT 认证提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentMerchant, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 认证中间件 - 要求商家登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentMerchant`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/health` (探活)
/// - `/api/webhooks/*` (网关回调，用 HMAC 签名认证)
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route = path == "/api/health" || path.starts_with("/api/webhooks/");
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(AppError::invalid_token)?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let merchant = CurrentMerchant::try_from(claims)
                .map_err(|_| AppError::invalid_token())?;
            req.extensions_mut().insert(merchant);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`AppResponse`] - API 响应结构
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E3xxx | 认证令牌错误 | E3001 未登录 |
//! | E2xxx | 权限错误 | E2001 无权限 |
//! | E0xxx | 业务错误 | E0003 资源不存在 |
//! | E8xxx | 上游服务错误 | E8001 支付网关失败 |
//! | E9xxx | 系统错误 | E9002 数据库错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API 统一响应结构
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// 错误码 (E0000 表示成功)
    pub code: String,
    /// 消息
    pub message: String,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== 权限错误 (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    // ========== 上游服务错误 (502) ==========
    #[error("Upstream service error: {0}")]
    Upstream(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001", "Please login first"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003", "Token expired"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "E3002", "Invalid token"),

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.as_str()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),

            // Invalid request (400)
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.as_str()),

            // Rate limited (429)
            AppError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, "E0007", msg.as_str()),

            // Upstream errors (502)
            AppError::Upstream(msg) => {
                error!(target: "upstream", error = %msg, "Upstream service error");
                (StatusCode::BAD_GATEWAY, "E8001", "Upstream service error")
            }

            // Database errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let e: AppError = RepoError::NotFound("Order 7 not found".into()).into();
        assert!(matches!(e, AppError::NotFound(_)));

        let e: AppError = RepoError::Duplicate("key taken".into()).into();
        assert!(matches!(e, AppError::Conflict(_)));

        let e: AppError = RepoError::Database("boom".into()).into();
        assert!(matches!(e, AppError::Database(_)));
    }
}

//! JWT 令牌服务
//!
//! 身份平台签发商家令牌，本服务只校验不签发。
//! `generate_token` 保留给测试和本地联调生成令牌。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节，与身份平台共享)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated key", e);
                    generate_printable_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "tiffin-identity".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "merchant-portal".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 商家 ID (Subject)
    pub sub: String,
    /// 商家登录邮箱
    pub email: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (开发环境)
fn generate_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut key = String::new();

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "TiffinPortalDevelopmentSecureKey2025!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.as_bytes()[idx] as char);
    }

    key
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable is not set".to_string(),
        )),
    }
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为商家生成新令牌 (测试/联调)
    pub fn generate_token(&self, merchant_id: i64, email: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: merchant_id.to_string(),
            email: email.to_string(),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前商家上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求扩展。
#[derive(Debug, Clone)]
pub struct CurrentMerchant {
    /// 商家 ID
    pub id: i64,
    /// 登录邮箱
    pub email: String,
}

impl TryFrom<Claims> for CurrentMerchant {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse()
            .map_err(|_| JwtError::InvalidToken(format!("Non-numeric subject: {}", claims.sub)))?;

        Ok(Self {
            id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-key-of-sufficient-length".to_string(),
            expiration_minutes: 60,
            issuer: "tiffin-identity".to_string(),
            audience: "merchant-portal".to_string(),
        })
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = test_service();

        let token = service
            .generate_token(17, "asha@example.com")
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "17");
        assert_eq!(claims.email, "asha@example.com");
        assert_eq!(claims.iss, "tiffin-identity");
    }

    #[test]
    fn test_current_merchant_from_claims() {
        let service = test_service();
        let token = service.generate_token(42, "dev@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();

        let merchant = CurrentMerchant::try_from(claims).unwrap();
        assert_eq!(merchant.id, 42);
        assert_eq!(merchant.email, "dev@example.com");
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            email: "x@example.com".to_string(),
            token_type: "access".to_string(),
            exp: 0,
            iat: 0,
            iss: String::new(),
            aud: String::new(),
        };
        assert!(CurrentMerchant::try_from(claims).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service();
        let token = service.generate_token(17, "asha@example.com").unwrap();

        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-key-of-sufficient-length!".to_string(),
            ..service.config.clone()
        });

        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }
}

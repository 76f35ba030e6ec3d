//! 认证模块
//!
//! JWT 验证与请求上下文。令牌由身份平台签发，本服务只校验。

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentMerchant, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;

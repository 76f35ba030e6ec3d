//! 服务器配置

use crate::auth::JwtConfig;

/// 服务器配置 - 商家门户的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_URL | postgres://localhost/tiffin_portal | PostgreSQL 连接串 |
/// | DATABASE_MAX_CONNECTIONS | 10 | 连接池大小 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志文件目录 (不设置则只打 stdout) |
/// | RAZORPAY_KEY_ID | - | 网关 API key |
/// | RAZORPAY_KEY_SECRET | - | 网关 API secret |
/// | RAZORPAY_WEBHOOK_SECRET | - | Webhook 签名密钥 |
/// | RAZORPAY_BASE_URL | https://api.razorpay.com/v1 | 网关地址 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=postgres://portal@db/tiffin HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// PostgreSQL 连接串
    pub database_url: String,
    /// 连接池大小
    pub database_max_connections: u32,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 支付网关配置
    pub razorpay: RazorpayConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

/// 支付网关配置
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    /// Webhook 签名密钥 (HMAC-SHA256)
    pub webhook_secret: String,
    pub base_url: String,
}

impl RazorpayConfig {
    fn from_env() -> Self {
        Self {
            key_id: std::env::var("RAZORPAY_KEY_ID").unwrap_or_default(),
            key_secret: std::env::var("RAZORPAY_KEY_SECRET").unwrap_or_default(),
            webhook_secret: std::env::var("RAZORPAY_WEBHOOK_SECRET").unwrap_or_default(),
            base_url: std::env::var("RAZORPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".into()),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/tiffin_portal".into()),
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            jwt: JwtConfig::default(),
            razorpay: RazorpayConfig::from_env(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(database_url: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 设置进程环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在不算错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok();
    crate::utils::logger::init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

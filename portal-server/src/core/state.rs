//! 服务器状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::payments::RazorpayClient;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是整个服务的核心数据结构，使用 Arc/池句柄实现浅拷贝，
/// 克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | PgPool | PostgreSQL 连接池 |
/// | jwt_service | Arc<JwtService> | JWT 校验服务 |
/// | razorpay | RazorpayClient | 支付网关客户端 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// PostgreSQL 连接池
    pub db: PgPool,
    /// JWT 校验服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 支付网关客户端
    pub razorpay: RazorpayClient,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据库连接池 + migration
    /// 2. JWT 服务
    /// 3. 支付网关客户端
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new(&config.database_url, config.database_max_connections)
            .await?;

        Ok(Self {
            config: config.clone(),
            db: db_service.pool,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            razorpay: RazorpayClient::new(&config.razorpay),
        })
    }

    /// 惰性连接的状态 (测试场景，不跑 migration)
    pub fn connect_lazy(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::connect_lazy(&config.database_url)?;

        Ok(Self {
            config: config.clone(),
            db: db_service.pool,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            razorpay: RazorpayClient::new(&config.razorpay),
        })
    }

    /// 获取数据库连接池
    pub fn get_db(&self) -> PgPool {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 打印启动横幅内容 (日志)
    pub fn print_started_banner_content(&self) {
        tracing::info!(
            "╔══════════════════════════════════════════════════════════╗"
        );
        tracing::info!(
            "║              TIFFIN MERCHANT PORTAL - READY              ║"
        );
        tracing::info!(
            "╚══════════════════════════════════════════════════════════╝"
        );
        tracing::info!("  Environment : {}", self.config.environment);
        tracing::info!("  HTTP Server : http://0.0.0.0:{}", self.config.http_port);
        tracing::info!(
            "════════════════════════════════════════════════════════════"
        );
    }
}

//! Tiffin Merchant Portal - 外卖平台商家门户服务
//!
//! # 架构概述
//!
//! 本服务是商家门户的 HTTP API 层，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 状态机转换 + 送达入账
//! - **配送 OTP** (`orders::otp`): 校验策略与尝试锁定
//! - **钱包** (`api::wallet`): 余额/流水只读投影，变动走数据库函数
//! - **打款账户验证** (`api::verification`): 每日限额 + 网关分发
//! - **支付回调** (`payments`): HMAC 签名校验
//! - **认证** (`auth`): 商家 JWT 校验（签发在身份平台）
//!
//! # 模块结构
//!
//! ```text
//! portal-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 校验、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 连接池、模型、仓储
//! ├── orders/        # 订单领域逻辑
//! ├── payments/      # 支付网关对接
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod payments;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentMerchant, JwtService};
pub use core::{Config, Server, ServerState, setup_environment};
pub use orders::{OrderLifecycle, OtpOutcome};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
  ______________________
 /_  __/  _/ ____/ ____/  _/ | / /
  / /  / // /_  / /_   / //  |/ /
 / / _/ // __/ / __/ _/ // /|  /
/_/ /___/_/   /_/   /___/_/ |_/
    merchant portal
    "#
    );
}

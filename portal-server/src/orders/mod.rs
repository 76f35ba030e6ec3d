//! 订单领域逻辑
//!
//! - [`lifecycle`] - 状态转换的执行与送达入账
//! - [`otp`] - 配送 OTP 校验策略（纯函数，可单测）

pub mod lifecycle;
pub mod otp;

pub use lifecycle::{LifecycleError, OrderLifecycle, TransitionApplied};
pub use otp::{MAX_OTP_ATTEMPTS, OTP_LOCK_MINUTES, OtpOutcome};

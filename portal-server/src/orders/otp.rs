//! Delivery OTP validation policy
//!
//! 纯函数：对 (OTP 行, 当前时间, 提交的码) 求值，返回要执行的结果。
//! 数据库写入由调用方按结果执行，策略本身零 IO。

use chrono::{DateTime, Duration, Utc};

use crate::db::models::OrderOtp;

/// Failed attempts before the OTP locks
pub const MAX_OTP_ATTEMPTS: i32 = 5;

/// How long the OTP stays locked once the attempt limit is hit (minutes)
pub const OTP_LOCK_MINUTES: i64 = 15;

/// Decision for one validation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpOutcome {
    /// 校验通过：写 verified_at，计数清零
    Verified,
    /// 已经验证过，不允许重复校验（即使码正确）
    AlreadyVerified,
    /// 锁定中，本次尝试不计数
    Locked { until: DateTime<Utc> },
    /// 码不匹配：计数 +1，达到阈值时附带新的锁定时间
    Mismatch {
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    },
}

impl OtpOutcome {
    /// Attempts left before the lock kicks in (only meaningful for Mismatch)
    pub fn attempts_remaining(&self) -> i32 {
        match self {
            OtpOutcome::Mismatch { attempts, .. } => (MAX_OTP_ATTEMPTS - attempts).max(0),
            _ => 0,
        }
    }
}

/// Evaluate one validation attempt against the stored OTP row
pub fn evaluate(row: &OrderOtp, submitted: &str, now: DateTime<Utc>) -> OtpOutcome {
    if row.verified_at.is_some() {
        return OtpOutcome::AlreadyVerified;
    }

    if let Some(until) = row.locked_until
        && until > now
    {
        return OtpOutcome::Locked { until };
    }

    if row.code == submitted {
        return OtpOutcome::Verified;
    }

    let attempts = row.attempts + 1;
    let locked_until = if attempts >= MAX_OTP_ATTEMPTS {
        Some(now + Duration::minutes(OTP_LOCK_MINUTES))
    } else {
        None
    };

    OtpOutcome::Mismatch {
        attempts,
        locked_until,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn otp_row(attempts: i32) -> OrderOtp {
        OrderOtp {
            order_id: 1,
            code: "4711".to_string(),
            attempts,
            locked_until: None,
            verified_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_correct_code_verifies() {
        assert_eq!(evaluate(&otp_row(0), "4711", at()), OtpOutcome::Verified);
    }

    #[test]
    fn test_correct_code_verifies_after_expired_lock() {
        let mut row = otp_row(5);
        row.locked_until = Some(at() - Duration::seconds(1));
        assert_eq!(evaluate(&row, "4711", at()), OtpOutcome::Verified);
    }

    #[test]
    fn test_mismatch_increments_attempts() {
        let outcome = evaluate(&otp_row(0), "0000", at());
        assert_eq!(
            outcome,
            OtpOutcome::Mismatch {
                attempts: 1,
                locked_until: None,
            }
        );
        assert_eq!(outcome.attempts_remaining(), 4);
    }

    #[test]
    fn test_fifth_failure_locks_for_fifteen_minutes() {
        let outcome = evaluate(&otp_row(4), "0000", at());
        assert_eq!(
            outcome,
            OtpOutcome::Mismatch {
                attempts: 5,
                locked_until: Some(at() + Duration::minutes(15)),
            }
        );
        assert_eq!(outcome.attempts_remaining(), 0);
    }

    #[test]
    fn test_locked_rejects_even_correct_code() {
        let until = at() + Duration::minutes(10);
        let mut row = otp_row(5);
        row.locked_until = Some(until);

        assert_eq!(evaluate(&row, "4711", at()), OtpOutcome::Locked { until });
        assert_eq!(evaluate(&row, "0000", at()), OtpOutcome::Locked { until });
    }

    #[test]
    fn test_verified_otp_can_never_be_revalidated() {
        let mut row = otp_row(0);
        row.verified_at = Some(at() - Duration::hours(1));

        assert_eq!(evaluate(&row, "4711", at()), OtpOutcome::AlreadyVerified);
        assert_eq!(evaluate(&row, "0000", at()), OtpOutcome::AlreadyVerified);
    }
}

//! 时间工具函数 — 尝试窗口计算
//!
//! 支付账户验证的每日限额按 UTC 日历日计数，
//! repository 层只接收计算好的边界。

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

/// 当前 UTC 日历日的边界 `[00:00, 次日 00:00)`
///
/// 调用方使用 `>= start AND < end` 语义。
pub fn utc_day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day_start = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
    (day_start, day_start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_bounds_cover_full_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap();
        let (start, end) = utc_day_bounds(now);

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap());
        assert!(start <= now && now < end);
    }

    #[test]
    fn test_midnight_belongs_to_new_day() {
        let midnight = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let (start, end) = utc_day_bounds(midnight);

        assert_eq!(start, midnight);
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_rollover() {
        let now = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap();
        let (_, end) = utc_day_bounds(now);
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }
}

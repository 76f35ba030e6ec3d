//! 订单状态机
//!
//! 外卖订单的生命周期：状态枚举、静态转换表、时间戳列映射。
//! 服务端和客户端共享同一份转换表，避免两边各自维护。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Order Status
// ============================================================================

/// 外卖订单状态
///
/// 线格式使用 SCREAMING_SNAKE_CASE。历史数据中的 `NEW` 是
/// `CREATED` 的旧别名，反序列化时归一化处理。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 已下单，等待商家接单
    #[serde(alias = "NEW")]
    Created,
    /// 商家已接单
    Accepted,
    /// 备餐中
    Preparing,
    /// 备餐完成，等待骑手取餐
    ReadyForPickup,
    /// 配送中
    OutForDelivery,
    /// 已送达（终态）
    Delivered,
    /// 已取消（终态）
    Cancelled,
    /// 配送失败退回（终态）
    Rto,
}

/// Status string did not match any known status
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown order status: {0}")]
pub struct StatusParseError(pub String);

impl OrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Created,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::ReadyForPickup,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Rto,
    ];

    /// 当前状态允许转换到的目标状态集合
    ///
    /// 终态（DELIVERED / CANCELLED / RTO）返回空切片。
    pub fn allowed_next(self) -> &'static [OrderStatus] {
        use OrderStatus::*;
        match self {
            Created => &[Accepted, Cancelled],
            Accepted => &[Preparing, Cancelled],
            Preparing => &[ReadyForPickup, Cancelled, Rto],
            ReadyForPickup => &[OutForDelivery, Cancelled, Rto],
            OutForDelivery => &[Delivered, Rto],
            Delivered | Cancelled | Rto => &[],
        }
    }

    /// 是否允许转换到 `to`
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        self.allowed_next().contains(&to)
    }

    /// 是否终态
    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    /// 转入该状态时要盖章的时间戳列
    ///
    /// `CREATED` 由下单系统写入 `placed_at`，不经过状态转换接口。
    pub fn timestamp_column(self) -> Option<&'static str> {
        use OrderStatus::*;
        match self {
            Created => None,
            Accepted => Some("accepted_at"),
            Preparing => Some("preparing_at"),
            ReadyForPickup => Some("ready_at"),
            OutForDelivery => Some("out_for_delivery_at"),
            Delivered => Some("delivered_at"),
            Cancelled => Some("cancelled_at"),
            Rto => Some("rto_at"),
        }
    }

    /// 线格式名称
    pub fn as_str(self) -> &'static str {
        use OrderStatus::*;
        match self {
            Created => "CREATED",
            Accepted => "ACCEPTED",
            Preparing => "PREPARING",
            ReadyForPickup => "READY_FOR_PICKUP",
            OutForDelivery => "OUT_FOR_DELIVERY",
            Delivered => "DELIVERED",
            Cancelled => "CANCELLED",
            Rto => "RTO",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    /// 解析存储的状态字符串，归一化旧别名 `NEW` → `CREATED`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use OrderStatus::*;
        match s {
            "CREATED" | "NEW" => Ok(Created),
            "ACCEPTED" => Ok(Accepted),
            "PREPARING" => Ok(Preparing),
            "READY_FOR_PICKUP" => Ok(ReadyForPickup),
            "OUT_FOR_DELIVERY" => Ok(OutForDelivery),
            "DELIVERED" => Ok(Delivered),
            "CANCELLED" => Ok(Cancelled),
            "RTO" => Ok(Rto),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table_exact() {
        use OrderStatus::*;
        assert_eq!(Created.allowed_next(), &[Accepted, Cancelled]);
        assert_eq!(Accepted.allowed_next(), &[Preparing, Cancelled]);
        assert_eq!(Preparing.allowed_next(), &[ReadyForPickup, Cancelled, Rto]);
        assert_eq!(
            ReadyForPickup.allowed_next(),
            &[OutForDelivery, Cancelled, Rto]
        );
        assert_eq!(OutForDelivery.allowed_next(), &[Delivered, Rto]);
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_transitions() {
        use OrderStatus::*;
        for terminal in [Delivered, Cancelled, Rto] {
            assert!(terminal.is_terminal());
            for target in OrderStatus::ALL {
                assert!(
                    !terminal.can_transition_to(target),
                    "{terminal} must not transition to {target}"
                );
            }
        }
    }

    #[test]
    fn test_disallowed_pairs_rejected() {
        use OrderStatus::*;
        // Skipping intermediate states is never allowed
        assert!(!Created.can_transition_to(Delivered));
        assert!(!Created.can_transition_to(Preparing));
        assert!(!Accepted.can_transition_to(ReadyForPickup));
        assert!(!Preparing.can_transition_to(Delivered));
        assert!(!ReadyForPickup.can_transition_to(Delivered));
        // Going backwards is never allowed
        assert!(!Preparing.can_transition_to(Accepted));
        assert!(!OutForDelivery.can_transition_to(ReadyForPickup));
        // RTO is only reachable once food is being prepared
        assert!(!Created.can_transition_to(Rto));
        assert!(!Accepted.can_transition_to(Rto));
    }

    #[test]
    fn test_legacy_alias_normalized() {
        assert_eq!("NEW".parse::<OrderStatus>(), Ok(OrderStatus::Created));
        assert_eq!("CREATED".parse::<OrderStatus>(), Ok(OrderStatus::Created));

        let from_json: OrderStatus = serde_json::from_str(r#""NEW""#).unwrap();
        assert_eq!(from_json, OrderStatus::Created);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("REFUNDED".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_wire_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);

            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_every_non_initial_status_has_timestamp_column() {
        for status in OrderStatus::ALL {
            if status == OrderStatus::Created {
                assert_eq!(status.timestamp_column(), None);
            } else {
                assert!(status.timestamp_column().is_some());
            }
        }
    }
}

//! Order lifecycle execution
//!
//! 转换表校验 → 守卫式 UPDATE → 首次送达时钱包入账。
//!
//! 入账失败只记日志，不回滚已落库的状态变更；幂等键保证重试/重放
//! 不会重复入账。

use chrono::Utc;
use shared::order::OrderStatus;
use sqlx::PgPool;
use thiserror::Error;

use crate::db::models::{FoodOrder, Store};
use crate::db::repository::{OrderRepository, RepoError, WalletRepository};
use crate::utils::AppError;

/// Ledger category for delivery earnings
pub const EARNING_CATEGORY: &str = "order_earning";

/// Deterministic idempotency key for an order's delivery credit
pub fn earning_idempotency_key(order_id: i64) -> String {
    format!("order_earning_{order_id}")
}

/// Outcome of a successfully applied transition
#[derive(Debug, Clone)]
pub struct TransitionApplied {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// 存量数据状态非法，无法安全推进
    #[error("Order {order_id} has an unrecognized status: {status}")]
    CorruptStatus { order_id: i64, status: String },

    /// 守卫式 UPDATE 落空：状态已被并发修改
    #[error("Order {0} was modified concurrently")]
    ConcurrentModification(i64),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::InvalidTransition { .. } => AppError::invalid(e.to_string()),
            LifecycleError::CorruptStatus { .. } => AppError::internal(e.to_string()),
            LifecycleError::ConcurrentModification(_) => AppError::conflict(e.to_string()),
            LifecycleError::Repo(repo) => repo.into(),
        }
    }
}

/// Drives orders through the status machine
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    wallets: WalletRepository,
}

impl OrderLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            wallets: WalletRepository::new(pool),
        }
    }

    /// Apply `requested` to an already-loaded, ownership-checked order.
    pub async fn transition(
        &self,
        store: &Store,
        order: &FoodOrder,
        requested: OrderStatus,
    ) -> Result<TransitionApplied, LifecycleError> {
        let current: OrderStatus =
            order
                .status
                .parse()
                .map_err(|_| LifecycleError::CorruptStatus {
                    order_id: order.id,
                    status: order.status.clone(),
                })?;

        if !current.can_transition_to(requested) {
            return Err(LifecycleError::InvalidTransition {
                from: current,
                to: requested,
            });
        }

        let applied = self
            .orders
            .apply_transition(order.id, store.id, &order.status, requested)
            .await?;
        if !applied {
            return Err(LifecycleError::ConcurrentModification(order.id));
        }

        tracing::info!(
            order_id = order.id,
            store_id = store.id,
            from = %current,
            to = %requested,
            "Order status updated"
        );

        if requested == OrderStatus::Delivered {
            self.credit_delivery_earning(store, order).await;
        }

        Ok(TransitionApplied {
            from: current,
            to: requested,
        })
    }

    /// Credit the merchant wallet for a delivered order.
    ///
    /// 状态已经落库，这里失败只告警，留给对账流程兜底。
    async fn credit_delivery_earning(&self, store: &Store, order: &FoodOrder) {
        let key = earning_idempotency_key(order.id);
        let note = format!("Earning for order #{}", order.id);

        let result = async {
            let wallet_id = self.wallets.get_or_create(store.merchant_id).await?;
            self.wallets
                .credit(
                    wallet_id,
                    order.merchant_earning,
                    EARNING_CATEGORY,
                    &key,
                    Some(note.as_str()),
                )
                .await
        }
        .await;

        match result {
            Ok(true) => {
                tracing::info!(
                    order_id = order.id,
                    merchant_id = store.merchant_id,
                    amount = %order.merchant_earning,
                    "Delivery earning credited"
                );
            }
            Ok(false) => {
                tracing::info!(
                    order_id = order.id,
                    idempotency_key = %key,
                    "Delivery earning already credited, skipping"
                );
            }
            Err(e) => {
                tracing::error!(
                    order_id = order.id,
                    merchant_id = store.merchant_id,
                    error = %e,
                    at = %Utc::now(),
                    "Wallet credit failed after status update"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earning_key_is_deterministic() {
        assert_eq!(earning_idempotency_key(42), "order_earning_42");
        assert_eq!(earning_idempotency_key(42), earning_idempotency_key(42));
    }

    #[test]
    fn test_invalid_transition_message_names_both_states() {
        let e = LifecycleError::InvalidTransition {
            from: OrderStatus::Preparing,
            to: OrderStatus::Delivered,
        };
        assert_eq!(
            e.to_string(),
            "Invalid transition from PREPARING to DELIVERED"
        );
    }

    #[test]
    fn test_lifecycle_errors_map_to_app_errors() {
        let e: AppError = LifecycleError::InvalidTransition {
            from: OrderStatus::OutForDelivery,
            to: OrderStatus::Accepted,
        }
        .into();
        assert!(matches!(e, AppError::Invalid(_)));

        let e: AppError = LifecycleError::ConcurrentModification(9).into();
        assert!(matches!(e, AppError::Conflict(_)));
    }
}

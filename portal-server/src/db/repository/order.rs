//! Order Repository
//!
//! 状态列只通过 `apply_transition` 变更：UPDATE 带上当前状态守卫，
//! 并发修改时不盲写。

use shared::order::OrderStatus;
use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::FoodOrder;

const ORDER_COLUMNS: &str = "id, store_id, customer_name, status, total_amount, \
     merchant_earning, placed_at, accepted_at, preparing_at, ready_at, \
     out_for_delivery_at, delivered_at, cancelled_at, rto_at";

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load an order scoped to a store
    pub async fn find_for_store(
        &self,
        order_id: i64,
        store_id: i64,
    ) -> RepoResult<Option<FoodOrder>> {
        let order = sqlx::query_as::<_, FoodOrder>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders_food WHERE id = $1 AND store_id = $2"
        ))
        .bind(order_id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    /// Paginated orders of a store, optionally filtered by raw status
    pub async fn list_for_store(
        &self,
        store_id: i64,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<FoodOrder>> {
        let orders = match status {
            Some(s) => {
                sqlx::query_as::<_, FoodOrder>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders_food
                     WHERE store_id = $1 AND status = $2
                     ORDER BY placed_at DESC LIMIT $3 OFFSET $4"
                ))
                .bind(store_id)
                .bind(s)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, FoodOrder>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders_food
                     WHERE store_id = $1
                     ORDER BY placed_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(store_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(orders)
    }

    /// Persist a validated transition and stamp its timestamp column.
    ///
    /// The UPDATE is guarded by the raw stored status (`expected_current`,
    /// which may still be a legacy alias), so a concurrent transition makes
    /// this a no-op. Returns whether the row was updated.
    pub async fn apply_transition(
        &self,
        order_id: i64,
        store_id: i64,
        expected_current: &str,
        to: OrderStatus,
    ) -> RepoResult<bool> {
        // timestamp_column() values are compile-time constants, safe to splice
        let sql = match to.timestamp_column() {
            Some(column) => format!(
                "UPDATE orders_food SET status = $1, {column} = now()
                 WHERE id = $2 AND store_id = $3 AND status = $4"
            ),
            None => "UPDATE orders_food SET status = $1
                 WHERE id = $2 AND store_id = $3 AND status = $4"
                .to_string(),
        };

        let result = sqlx::query(&sql)
            .bind(to.as_str())
            .bind(order_id)
            .bind(store_id)
            .bind(expected_current)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

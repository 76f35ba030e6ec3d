//! Store Repository

use sqlx::PgPool;

use super::RepoResult;
use crate::db::models::Store;

#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a store by its public code
    pub async fn find_by_code(&self, store_code: &str) -> RepoResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, merchant_id, store_code, name, city, is_active, created_at
             FROM merchant_stores WHERE store_code = $1",
        )
        .bind(store_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(store)
    }

    /// All stores owned by a merchant, newest first
    pub async fn list_for_merchant(&self, merchant_id: i64) -> RepoResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT id, merchant_id, store_code, name, city, is_active, created_at
             FROM merchant_stores WHERE merchant_id = $1
             ORDER BY created_at DESC",
        )
        .bind(merchant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stores)
    }
}

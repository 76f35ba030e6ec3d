//! Database Module
//!
//! Handles the PostgreSQL connection pool and migrations

pub mod models;
pub mod repository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::utils::AppError;

/// Database service — owns a PostgreSQL connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: PgPool,
}

impl DbService {
    /// Create a new database service and apply pending migrations
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(max_connections, "Database connection established");

        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Lazy pool that connects on first use
    ///
    /// 测试和工具场景使用；不跑 migration。
    pub fn connect_lazy(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPool::connect_lazy(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?;
        Ok(Self { pool })
    }
}

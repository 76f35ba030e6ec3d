//! Repository Module
//!
//! Provides table access for PostgreSQL, one repository per table.

pub mod order;
pub mod otp;
pub mod store;
pub mod verification;
pub mod wallet;

pub use order::OrderRepository;
pub use otp::OtpRepository;
pub use store::StoreRepository;
pub use verification::VerificationRepository;
pub use wallet::WalletRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

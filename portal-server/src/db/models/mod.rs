//! Database row models
//!
//! One module per table. Wire-facing views live in `shared::client`;
//! conversions are in `api::convert`.

pub mod order;
pub mod otp;
pub mod store;
pub mod wallet;

pub use order::FoodOrder;
pub use otp::OrderOtp;
pub use store::Store;
pub use wallet::{LedgerEntry, Wallet};

//! Row model → wire view conversions

use shared::client::{LedgerEntryView, OrderView, StoreView, WalletView};

use crate::db::models::{FoodOrder, LedgerEntry, Store, Wallet};

pub fn store_view(store: Store) -> StoreView {
    StoreView {
        id: store.id,
        store_code: store.store_code,
        name: store.name,
        city: store.city,
        is_active: store.is_active,
        created_at: store.created_at,
    }
}

pub fn order_view(order: FoodOrder) -> OrderView {
    OrderView {
        id: order.id,
        store_id: order.store_id,
        customer_name: order.customer_name,
        status: order.status,
        total_amount: order.total_amount,
        merchant_earning: order.merchant_earning,
        placed_at: order.placed_at,
        accepted_at: order.accepted_at,
        preparing_at: order.preparing_at,
        ready_at: order.ready_at,
        out_for_delivery_at: order.out_for_delivery_at,
        delivered_at: order.delivered_at,
        cancelled_at: order.cancelled_at,
        rto_at: order.rto_at,
    }
}

pub fn wallet_view(wallet: Wallet) -> WalletView {
    WalletView {
        wallet_id: wallet.id,
        balance: wallet.balance,
        updated_at: wallet.updated_at,
    }
}

pub fn ledger_entry_view(entry: LedgerEntry) -> LedgerEntryView {
    LedgerEntryView {
        id: entry.id,
        entry_type: entry.entry_type,
        amount: entry.amount,
        category: entry.category,
        note: entry.note,
        balance_after: entry.balance_after,
        created_at: entry.created_at,
    }
}

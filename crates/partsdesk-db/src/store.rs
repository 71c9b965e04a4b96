//! # Store Abstraction
//!
//! One trait over everything the services persist, with two backends:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Arc<dyn Store>                                 │
//! │                                                                         │
//! │        ┌──────────────────────┐        ┌──────────────────────┐        │
//! │        │  Database (SQLite)   │        │     MemoryStore      │        │
//! │        │  pool.rs + repos     │        │     memory.rs        │        │
//! │        └──────────┬───────────┘        └──────────┬───────────┘        │
//! │                   │ begin()                       │ begin()            │
//! │                   ▼                               ▼                    │
//! │        ┌──────────────────────┐        ┌──────────────────────┐        │
//! │        │  SqliteLedgerTx      │        │  MemoryLedgerTx      │        │
//! │        │  sqlx Transaction    │        │  lock + snapshot     │        │
//! │        └──────────────────────┘        └──────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transactional Contract
//! A [`LedgerTx`] sees its own writes. Nothing it writes is visible to
//! anyone else until [`LedgerTx::commit`]; dropping it without committing
//! discards every write.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;

use partsdesk_core::{
    Credential, Item, ItemDraft, ItemId, Money, NewPurchase, NewSale, Purchase, Sale, Shipment,
    ShipmentDraft,
};
use partsdesk_core::FinancialSummary;

use crate::error::DbResult;

/// What the ledger needs to know about an item mid-transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct StockSnapshot {
    pub cost: Money,
    pub quantity: i64,
}

/// Persistent state behind the services.
///
/// Lists come back in display order: items by id ascending, sales,
/// purchases and shipments newest first (id descending on equal dates).
///
/// Period arguments are date-text prefixes (`YYYY-MM-DD` or `YYYY-MM`).
#[async_trait]
pub trait Store: Send + Sync + 'static {
    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    async fn list_items(&self) -> DbResult<Vec<Item>>;

    /// Items with `quantity <= min_stock`.
    async fn list_low_stock(&self) -> DbResult<Vec<Item>>;

    async fn get_item(&self, id: ItemId) -> DbResult<Item>;

    async fn insert_item(&self, draft: &ItemDraft) -> DbResult<ItemId>;

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> DbResult<()>;

    async fn delete_item(&self, id: ItemId) -> DbResult<()>;

    // -------------------------------------------------------------------------
    // Ledger
    // -------------------------------------------------------------------------

    /// Opens a transactional scope for recording a sale or purchase.
    async fn begin(&self) -> DbResult<Box<dyn LedgerTx>>;

    async fn list_sales(&self) -> DbResult<Vec<Sale>>;

    async fn list_purchases(&self) -> DbResult<Vec<Purchase>>;

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Dashboard sums over all time, the `day` prefix and the `month`
    /// prefix, taken from a single consistent read. Empty periods are zero.
    async fn financial_summary(&self, day: &str, month: &str) -> DbResult<FinancialSummary>;

    /// Sale totals grouped by `YYYY-MM`, for months at or after `since_month`.
    async fn monthly_sales(&self, since_month: &str) -> DbResult<HashMap<String, Money>>;

    // -------------------------------------------------------------------------
    // Shipments
    // -------------------------------------------------------------------------

    async fn list_shipments(&self) -> DbResult<Vec<Shipment>>;

    async fn insert_shipment(&self, draft: &ShipmentDraft, at: NaiveDateTime) -> DbResult<i64>;

    /// Replaces every editable field; the creation date is kept.
    async fn update_shipment(&self, id: i64, draft: &ShipmentDraft) -> DbResult<()>;

    async fn delete_shipment(&self, id: i64) -> DbResult<()>;

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------

    async fn find_credential(&self, username: &str) -> DbResult<Option<Credential>>;

    /// Inserts `credential` unless its username exists. Returns true if inserted.
    async fn ensure_credential(&self, credential: &Credential) -> DbResult<bool>;

    async fn set_password(&self, username: &str, password: &str) -> DbResult<()>;

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    async fn health_check(&self) -> bool;

    async fn close(&self);
}

/// A transactional scope for one ledger recording.
#[async_trait]
pub trait LedgerTx: Send {
    /// Current cost and quantity of an item, or `None` if it doesn't exist.
    async fn item_snapshot(&mut self, id: ItemId) -> DbResult<Option<StockSnapshot>>;

    async fn insert_sale(&mut self, sale: &NewSale) -> DbResult<i64>;

    async fn insert_purchase(&mut self, purchase: &NewPurchase) -> DbResult<i64>;

    /// Adds `delta` (may be negative) to an item's quantity.
    async fn adjust_quantity(&mut self, id: ItemId, delta: i64) -> DbResult<()>;

    /// Makes every write visible. Calling it twice is an error.
    async fn commit(&mut self) -> DbResult<()>;
}

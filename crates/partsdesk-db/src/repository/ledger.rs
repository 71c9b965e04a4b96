//! # Ledger Repository
//!
//! Sale and purchase history, plus the SQLite side of a ledger recording.
//!
//! ## Transaction Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   SqliteLedgerTx                                        │
//! │                                                                         │
//! │  pool.begin_with(..)      → BEGIN IMMEDIATE (write lock up front)      │
//! │  item_snapshot(id)        → SELECT cost_cents, quantity                │
//! │  insert_sale(..)          → INSERT INTO sales (items as JSON text)     │
//! │  adjust_quantity(id, -q)  → UPDATE items SET quantity = quantity + ?   │
//! │  commit()                 → COMMIT                                     │
//! │                                                                         │
//! │  Dropped before commit()  → sqlx rolls the transaction back            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A deferred `BEGIN` would take a read lock at the first SELECT and then
//! fail with `SQLITE_BUSY` when another connection committed first, since
//! WAL mode cannot upgrade a stale read snapshot. `BEGIN IMMEDIATE` takes the
//! write lock before the first read, so concurrent recordings queue on the
//! pool's busy timeout instead.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::date_text;
use crate::store::{LedgerTx, StockSnapshot};
use partsdesk_core::{ItemId, LineItem, Money, NewPurchase, NewSale, PaymentMethod, Purchase, Sale};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    date: NaiveDateTime,
    total: Money,
    payment_method: PaymentMethod,
    items: String,
    profit: Money,
}

impl TryFrom<SaleRow> for Sale {
    type Error = DbError;

    fn try_from(row: SaleRow) -> DbResult<Self> {
        Ok(Sale {
            id: row.id,
            date: row.date,
            total: row.total,
            payment_method: row.payment_method,
            items: serde_json::from_str::<Vec<LineItem>>(&row.items)?,
            profit: row.profit,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: i64,
    date: NaiveDateTime,
    total: Money,
    items: String,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = DbError;

    fn try_from(row: PurchaseRow) -> DbResult<Self> {
        Ok(Purchase {
            id: row.id,
            date: row.date,
            total: row.total,
            items: serde_json::from_str::<Vec<LineItem>>(&row.items)?,
        })
    }
}

// =============================================================================
// History
// =============================================================================

/// Repository for sale/purchase history.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Opens a ledger transaction holding the database write lock.
    pub async fn begin(&self) -> DbResult<SqliteLedgerTx> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Ledger transaction started");
        Ok(SqliteLedgerTx { tx: Some(tx) })
    }

    /// Lists every sale, newest first.
    pub async fn list_sales(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, date, total_cents AS total, payment_method,
                   items, profit_cents AS profit
            FROM sales
            ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed sales");
        rows.into_iter().map(Sale::try_from).collect()
    }

    /// Lists every purchase, newest first.
    pub async fn list_purchases(&self) -> DbResult<Vec<Purchase>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, date, total_cents AS total, items
            FROM purchases
            ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed purchases");
        rows.into_iter().map(Purchase::try_from).collect()
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One ledger recording on SQLite. Rolls back on drop unless committed.
#[derive(Debug)]
pub struct SqliteLedgerTx {
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteLedgerTx {
    fn conn(&mut self) -> DbResult<&mut SqliteConnection> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| DbError::TransactionFailed("transaction already committed".to_string()))
    }
}

#[async_trait]
impl LedgerTx for SqliteLedgerTx {
    async fn item_snapshot(&mut self, id: ItemId) -> DbResult<Option<StockSnapshot>> {
        let snapshot = sqlx::query_as::<_, StockSnapshot>(
            "SELECT cost_cents AS cost, quantity FROM items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.conn()?)
        .await?;

        Ok(snapshot)
    }

    async fn insert_sale(&mut self, sale: &NewSale) -> DbResult<i64> {
        let items = serde_json::to_string(&sale.items)?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (date, total_cents, payment_method, items, profit_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(date_text(&sale.date))
        .bind(sale.total)
        .bind(sale.payment_method)
        .bind(items)
        .bind(sale.profit)
        .execute(self.conn()?)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, lines = sale.items.len(), "Inserted sale row");
        Ok(id)
    }

    async fn insert_purchase(&mut self, purchase: &NewPurchase) -> DbResult<i64> {
        let items = serde_json::to_string(&purchase.items)?;

        let result = sqlx::query(
            r#"
            INSERT INTO purchases (date, total_cents, items)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(date_text(&purchase.date))
        .bind(purchase.total)
        .bind(items)
        .execute(self.conn()?)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, lines = purchase.items.len(), "Inserted purchase row");
        Ok(id)
    }

    async fn adjust_quantity(&mut self, id: ItemId, delta: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE items SET quantity = quantity + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(self.conn()?)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| DbError::TransactionFailed("transaction already committed".to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!("Ledger transaction committed");
        Ok(())
    }
}

//! # Item Repository
//!
//! Database operations for the parts catalog.
//!
//! Money columns are stored as `*_cents` and aliased back to the
//! [`Item`] field names so `FromRow` can map them.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use partsdesk_core::{Item, ItemDraft, ItemId};

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists every item, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, quantity,
                   price_cents AS price, cost_cents AS cost, min_stock
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Lists items at or below their reorder threshold.
    pub async fn list_low_stock(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, quantity,
                   price_cents AS price, cost_cents AS cost, min_stock
            FROM items
            WHERE quantity <= min_stock
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed low-stock items");
        Ok(items)
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: ItemId) -> DbResult<Item> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, quantity,
                   price_cents AS price, cost_cents AS cost, min_stock
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Inserts a new item and returns its id.
    pub async fn insert(&self, draft: &ItemDraft) -> DbResult<ItemId> {
        debug!(name = %draft.name, "Inserting item");

        let result = sqlx::query(
            r#"
            INSERT INTO items (name, quantity, price_cents, cost_cents, min_stock)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(draft.name.trim())
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(draft.cost)
        .bind(draft.min_stock)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replaces every editable field of an item.
    pub async fn update(&self, id: ItemId, draft: &ItemDraft) -> DbResult<()> {
        debug!(id, name = %draft.name, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                quantity = ?3,
                price_cents = ?4,
                cost_cents = ?5,
                min_stock = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(draft.name.trim())
        .bind(draft.quantity)
        .bind(draft.price)
        .bind(draft.cost)
        .bind(draft.min_stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Deletes an item. Historical line items keep pointing at the old id.
    pub async fn delete(&self, id: ItemId) -> DbResult<()> {
        debug!(id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Counts items (used by the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

//! # Shipment Repository
//!
//! Database operations for brokerage shipments. The stored `total_cents`
//! is always written from [`ShipmentDraft::total`].

use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::date_text;
use partsdesk_core::{Shipment, ShipmentDraft};

/// Repository for shipment database operations.
#[derive(Debug, Clone)]
pub struct ShipmentRepository {
    pool: SqlitePool,
}

impl ShipmentRepository {
    /// Creates a new ShipmentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShipmentRepository { pool }
    }

    /// Lists every shipment, newest first.
    pub async fn list(&self) -> DbResult<Vec<Shipment>> {
        let shipments = sqlx::query_as::<_, Shipment>(
            r#"
            SELECT id, date, person_name, region, item_description,
                   item_price_cents AS item_price,
                   my_fee_cents AS my_fee,
                   total_cents AS total,
                   status
            FROM shipments
            ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = shipments.len(), "Listed shipments");
        Ok(shipments)
    }

    /// Inserts a shipment dated `at` and returns its id.
    pub async fn insert(&self, draft: &ShipmentDraft, at: NaiveDateTime) -> DbResult<i64> {
        debug!(person = %draft.person_name, region = %draft.region, "Inserting shipment");

        let result = sqlx::query(
            r#"
            INSERT INTO shipments (
                date, person_name, region, item_description,
                item_price_cents, my_fee_cents, total_cents, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(date_text(&at))
        .bind(draft.person_name.trim())
        .bind(draft.region.trim())
        .bind(draft.item_description.trim())
        .bind(draft.item_price)
        .bind(draft.my_fee)
        .bind(draft.total())
        .bind(draft.status)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replaces every editable field; `date` is left alone.
    pub async fn update(&self, id: i64, draft: &ShipmentDraft) -> DbResult<()> {
        debug!(id, status = ?draft.status, "Updating shipment");

        let result = sqlx::query(
            r#"
            UPDATE shipments SET
                person_name = ?2,
                region = ?3,
                item_description = ?4,
                item_price_cents = ?5,
                my_fee_cents = ?6,
                total_cents = ?7,
                status = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(draft.person_name.trim())
        .bind(draft.region.trim())
        .bind(draft.item_description.trim())
        .bind(draft.item_price)
        .bind(draft.my_fee)
        .bind(draft.total())
        .bind(draft.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Shipment", id));
        }

        Ok(())
    }

    /// Deletes a shipment.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting shipment");

        let result = sqlx::query("DELETE FROM shipments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Shipment", id));
        }

        Ok(())
    }
}

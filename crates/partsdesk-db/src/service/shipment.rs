//! Shipment tracker: the brokerage side business, unrelated to inventory.

use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::info;

use crate::service::{whole_seconds, ServiceResult};
use crate::store::Store;
use partsdesk_core::validation::validate_shipment_draft;
use partsdesk_core::{Shipment, ShipmentDraft};

#[derive(Clone)]
pub struct ShipmentTracker {
    store: Arc<dyn Store>,
}

impl ShipmentTracker {
    pub fn new(store: Arc<dyn Store>) -> Self {
        ShipmentTracker { store }
    }

    /// Every shipment, newest first.
    pub async fn list(&self) -> ServiceResult<Vec<Shipment>> {
        Ok(self.store.list_shipments().await?)
    }

    /// Creates a shipment dated `at`. The total is `item_price + my_fee`.
    pub async fn create(&self, draft: &ShipmentDraft, at: NaiveDateTime) -> ServiceResult<i64> {
        validate_shipment_draft(draft)?;
        let id = self.store.insert_shipment(draft, whole_seconds(at)).await?;

        info!(id, total = %draft.total(), "Shipment created");
        Ok(id)
    }

    pub async fn update(&self, id: i64, draft: &ShipmentDraft) -> ServiceResult<()> {
        validate_shipment_draft(draft)?;
        self.store.update_shipment(id, draft).await?;

        info!(id, status = ?draft.status, "Shipment updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.store.delete_shipment(id).await?;

        info!(id, "Shipment deleted");
        Ok(())
    }
}

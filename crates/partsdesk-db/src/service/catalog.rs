//! Item catalog: create, edit, delete, look up.

use std::sync::Arc;
use tracing::info;

use crate::service::ServiceResult;
use crate::store::Store;
use partsdesk_core::validation::validate_item_draft;
use partsdesk_core::{Item, ItemDraft, ItemId};

#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn Store>,
}

impl Catalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Catalog { store }
    }

    /// All items, ordered by id.
    pub async fn list(&self) -> ServiceResult<Vec<Item>> {
        Ok(self.store.list_items().await?)
    }

    /// Items with `quantity <= min_stock`, ordered by id.
    pub async fn low_stock(&self) -> ServiceResult<Vec<Item>> {
        Ok(self.store.list_low_stock().await?)
    }

    pub async fn get(&self, id: ItemId) -> ServiceResult<Item> {
        Ok(self.store.get_item(id).await?)
    }

    pub async fn create(&self, draft: &ItemDraft) -> ServiceResult<ItemId> {
        validate_item_draft(draft)?;
        let id = self.store.insert_item(draft).await?;

        info!(id, name = %draft.name, "Item created");
        Ok(id)
    }

    pub async fn update(&self, id: ItemId, draft: &ItemDraft) -> ServiceResult<()> {
        validate_item_draft(draft)?;
        self.store.update_item(id, draft).await?;

        info!(id, "Item updated");
        Ok(())
    }

    /// Removes the item. Past sales and purchases that mention it are kept.
    pub async fn delete(&self, id: ItemId) -> ServiceResult<()> {
        self.store.delete_item(id).await?;

        info!(id, "Item deleted");
        Ok(())
    }
}

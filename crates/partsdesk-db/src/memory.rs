//! # In-Memory Store
//!
//! A [`Store`] that keeps everything in process memory. Used for tests and
//! for running the server without a database file (`PARTSDESK_STORE=memory`).
//!
//! ## Transactions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  begin()   → lock the state (tokio Mutex, owned guard)                 │
//! │              start an undo log (row counts, id counters)               │
//! │  writes    → applied directly; first touch of an item logs its qty     │
//! │  commit()  → forget the undo log, release the lock                     │
//! │  drop      → no commit? replay the undo log, release the lock          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transactions are serialized: a second `begin()` (or any read) waits
//! until the open transaction finishes.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

#[cfg(test)]
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::{DbError, DbResult};
use crate::store::{LedgerTx, StockSnapshot, Store};
use partsdesk_core::types::timestamp;
use partsdesk_core::{
    Credential, Item, ItemDraft, ItemId, Money, NewPurchase, NewSale, Purchase, Sale, Shipment,
    ShipmentDraft,
};
use partsdesk_core::FinancialSummary;

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, Default)]
struct MemoryState {
    items: BTreeMap<ItemId, Item>,
    sales: Vec<Sale>,
    purchases: Vec<Purchase>,
    shipments: BTreeMap<i64, Shipment>,
    credentials: BTreeMap<String, String>,
    next_item_id: i64,
    next_sale_id: i64,
    next_purchase_id: i64,
    next_shipment_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// An empty prefix matches every date.
fn in_period(date: &NaiveDateTime, prefix: &str) -> bool {
    date.format(timestamp::FORMAT).to_string().starts_with(prefix)
}

/// Same failure SQLite reports when an integer SUM or UPDATE overflows.
fn overflow() -> DbError {
    DbError::QueryFailed("integer overflow".to_string())
}

fn checked_total(mut values: impl Iterator<Item = Money>) -> DbResult<Money> {
    values
        .try_fold(Money::zero(), |acc, value| acc.checked_add(value))
        .ok_or_else(overflow)
}

fn newest_first(a: (&NaiveDateTime, i64), b: (&NaiveDateTime, i64)) -> std::cmp::Ordering {
    b.0.cmp(a.0).then(b.1.cmp(&a.1))
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,

    /// Item id whose quantity adjustment fails (0 = none).
    #[cfg(test)]
    fail_adjust: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `adjust_quantity` on `id` fail, to exercise rollback.
    #[cfg(test)]
    pub(crate) fn fail_adjustments_for(&self, id: ItemId) {
        self.fail_adjust.store(id, Ordering::SeqCst);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_items(&self) -> DbResult<Vec<Item>> {
        let state = self.state.lock().await;
        Ok(state.items.values().cloned().collect())
    }

    async fn list_low_stock(&self) -> DbResult<Vec<Item>> {
        let state = self.state.lock().await;
        Ok(state
            .items
            .values()
            .filter(|item| item.is_low_stock())
            .cloned()
            .collect())
    }

    async fn get_item(&self, id: ItemId) -> DbResult<Item> {
        let state = self.state.lock().await;
        state
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    async fn insert_item(&self, draft: &ItemDraft) -> DbResult<ItemId> {
        let mut state = self.state.lock().await;
        let id = next_id(&mut state.next_item_id);

        state.items.insert(
            id,
            Item {
                id,
                name: draft.name.trim().to_string(),
                quantity: draft.quantity,
                price: draft.price,
                cost: draft.cost,
                min_stock: draft.min_stock,
            },
        );

        debug!(id, "Inserted item (memory)");
        Ok(id)
    }

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> DbResult<()> {
        let mut state = self.state.lock().await;
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Item", id))?;

        item.name = draft.name.trim().to_string();
        item.quantity = draft.quantity;
        item.price = draft.price;
        item.cost = draft.cost;
        item.min_stock = draft.min_stock;
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Item", id))
    }

    async fn begin(&self) -> DbResult<Box<dyn LedgerTx>> {
        let guard = self.state.clone().lock_owned().await;
        let undo = UndoLog::capture(&guard);

        Ok(Box::new(MemoryLedgerTx {
            state: guard,
            undo: Some(undo),
            #[cfg(test)]
            fail_adjust: self.fail_adjust.load(Ordering::SeqCst),
        }))
    }

    async fn list_sales(&self) -> DbResult<Vec<Sale>> {
        let state = self.state.lock().await;
        let mut sales = state.sales.clone();
        sales.sort_by(|a, b| newest_first((&a.date, a.id), (&b.date, b.id)));
        Ok(sales)
    }

    async fn list_purchases(&self) -> DbResult<Vec<Purchase>> {
        let state = self.state.lock().await;
        let mut purchases = state.purchases.clone();
        purchases.sort_by(|a, b| newest_first((&a.date, a.id), (&b.date, b.id)));
        Ok(purchases)
    }

    async fn financial_summary(&self, day: &str, month: &str) -> DbResult<FinancialSummary> {
        let state = self.state.lock().await;
        let sales = |prefix: &str, value: fn(&Sale) -> Money| {
            checked_total(
                state
                    .sales
                    .iter()
                    .filter(|sale| in_period(&sale.date, prefix))
                    .map(value),
            )
        };
        let purchases = |prefix: &str| {
            checked_total(
                state
                    .purchases
                    .iter()
                    .filter(|purchase| in_period(&purchase.date, prefix))
                    .map(|purchase| purchase.total),
            )
        };

        Ok(FinancialSummary {
            total_sales: sales("", |sale| sale.total)?,
            total_profit: sales("", |sale| sale.profit)?,
            total_purchases: purchases("")?,
            today_sales: sales(day, |sale| sale.total)?,
            today_profit: sales(day, |sale| sale.profit)?,
            today_purchases: purchases(day)?,
            month_sales: sales(month, |sale| sale.total)?,
            month_profit: sales(month, |sale| sale.profit)?,
        })
    }

    async fn monthly_sales(&self, since_month: &str) -> DbResult<HashMap<String, Money>> {
        let state = self.state.lock().await;
        let mut totals: HashMap<String, Money> = HashMap::new();

        for sale in &state.sales {
            let month = sale.date.format("%Y-%m").to_string();
            if month.as_str() >= since_month {
                let total = totals.entry(month).or_default();
                *total = total.checked_add(sale.total).ok_or_else(overflow)?;
            }
        }

        Ok(totals)
    }

    async fn list_shipments(&self) -> DbResult<Vec<Shipment>> {
        let state = self.state.lock().await;
        let mut shipments: Vec<Shipment> = state.shipments.values().cloned().collect();
        shipments.sort_by(|a, b| newest_first((&a.date, a.id), (&b.date, b.id)));
        Ok(shipments)
    }

    async fn insert_shipment(&self, draft: &ShipmentDraft, at: NaiveDateTime) -> DbResult<i64> {
        let mut state = self.state.lock().await;
        let id = next_id(&mut state.next_shipment_id);

        state.shipments.insert(
            id,
            Shipment {
                id,
                date: at,
                person_name: draft.person_name.trim().to_string(),
                region: draft.region.trim().to_string(),
                item_description: draft.item_description.trim().to_string(),
                item_price: draft.item_price,
                my_fee: draft.my_fee,
                total: draft.total(),
                status: draft.status,
            },
        );

        Ok(id)
    }

    async fn update_shipment(&self, id: i64, draft: &ShipmentDraft) -> DbResult<()> {
        let mut state = self.state.lock().await;
        let shipment = state
            .shipments
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Shipment", id))?;

        shipment.person_name = draft.person_name.trim().to_string();
        shipment.region = draft.region.trim().to_string();
        shipment.item_description = draft.item_description.trim().to_string();
        shipment.item_price = draft.item_price;
        shipment.my_fee = draft.my_fee;
        shipment.total = draft.total();
        shipment.status = draft.status;
        Ok(())
    }

    async fn delete_shipment(&self, id: i64) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state
            .shipments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Shipment", id))
    }

    async fn find_credential(&self, username: &str) -> DbResult<Option<Credential>> {
        let state = self.state.lock().await;
        Ok(state
            .credentials
            .get(username)
            .map(|password| Credential::new(username, password.as_str())))
    }

    async fn ensure_credential(&self, credential: &Credential) -> DbResult<bool> {
        let mut state = self.state.lock().await;
        if state.credentials.contains_key(&credential.username) {
            return Ok(false);
        }

        state
            .credentials
            .insert(credential.username.clone(), credential.password.clone());
        Ok(true)
    }

    async fn set_password(&self, username: &str, password: &str) -> DbResult<()> {
        let mut state = self.state.lock().await;
        let stored = state
            .credentials
            .get_mut(username)
            .ok_or_else(|| DbError::not_found("User", username))?;

        *stored = password.to_string();
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn close(&self) {
        debug!("Memory store closed (no-op)");
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// What a rollback needs to put back. Ledger writes only append rows,
/// bump id counters and change item quantities.
#[derive(Debug)]
struct UndoLog {
    /// Quantity before the first adjustment, per touched item.
    quantities: BTreeMap<ItemId, i64>,
    sales_len: usize,
    purchases_len: usize,
    next_sale_id: i64,
    next_purchase_id: i64,
}

impl UndoLog {
    fn capture(state: &MemoryState) -> Self {
        UndoLog {
            quantities: BTreeMap::new(),
            sales_len: state.sales.len(),
            purchases_len: state.purchases.len(),
            next_sale_id: state.next_sale_id,
            next_purchase_id: state.next_purchase_id,
        }
    }

    fn restore(self, state: &mut MemoryState) {
        for (id, quantity) in self.quantities {
            if let Some(item) = state.items.get_mut(&id) {
                item.quantity = quantity;
            }
        }
        state.sales.truncate(self.sales_len);
        state.purchases.truncate(self.purchases_len);
        state.next_sale_id = self.next_sale_id;
        state.next_purchase_id = self.next_purchase_id;
    }
}

/// Holds the store lock for its whole lifetime.
struct MemoryLedgerTx {
    state: OwnedMutexGuard<MemoryState>,
    /// `Some` until committed; replayed on drop.
    undo: Option<UndoLog>,
    #[cfg(test)]
    fail_adjust: ItemId,
}

impl MemoryLedgerTx {
    fn ensure_open(&self) -> DbResult<()> {
        if self.undo.is_none() {
            return Err(DbError::TransactionFailed(
                "transaction already committed".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    fn injected_failure(&self, id: ItemId) -> DbResult<()> {
        if self.fail_adjust == id {
            return Err(DbError::QueryFailed(format!("injected failure on item {id}")));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn injected_failure(&self, _id: ItemId) -> DbResult<()> {
        Ok(())
    }
}

#[async_trait]
impl LedgerTx for MemoryLedgerTx {
    async fn item_snapshot(&mut self, id: ItemId) -> DbResult<Option<StockSnapshot>> {
        self.ensure_open()?;
        Ok(self.state.items.get(&id).map(|item| StockSnapshot {
            cost: item.cost,
            quantity: item.quantity,
        }))
    }

    async fn insert_sale(&mut self, sale: &NewSale) -> DbResult<i64> {
        self.ensure_open()?;
        let id = next_id(&mut self.state.next_sale_id);
        self.state.sales.push(sale.clone().with_id(id));
        Ok(id)
    }

    async fn insert_purchase(&mut self, purchase: &NewPurchase) -> DbResult<i64> {
        self.ensure_open()?;
        let id = next_id(&mut self.state.next_purchase_id);
        self.state.purchases.push(purchase.clone().with_id(id));
        Ok(id)
    }

    async fn adjust_quantity(&mut self, id: ItemId, delta: i64) -> DbResult<()> {
        self.ensure_open()?;
        self.injected_failure(id)?;

        let item = self
            .state
            .items
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found("Item", id))?;
        let quantity = item.quantity.checked_add(delta).ok_or_else(overflow)?;

        if let Some(undo) = self.undo.as_mut() {
            undo.quantities.entry(id).or_insert(item.quantity);
        }
        item.quantity = quantity;
        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        self.ensure_open()?;
        self.undo = None;
        Ok(())
    }
}

impl Drop for MemoryLedgerTx {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            debug!(touched = undo.quantities.len(), "Rolling back memory transaction");
            undo.restore(&mut self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use partsdesk_core::{LineItem, PaymentMethod};

    fn draft(name: &str, quantity: i64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            quantity,
            price: Money::from_units(80),
            cost: Money::from_units(50),
            min_stock: 2,
        }
    }

    fn sale_on(day: u32) -> NewSale {
        NewSale {
            date: NaiveDate::from_ymd_opt(2026, 10, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            total: Money::from_units(80),
            payment_method: PaymentMethod::Cash,
            items: vec![LineItem {
                item_id: 1,
                quantity: 1,
                price: Money::from_units(80),
            }],
            profit: Money::from_units(30),
        }
    }

    #[tokio::test]
    async fn test_ids_are_monotonic_and_not_reused() {
        let store = MemoryStore::new();
        let a = store.insert_item(&draft("A", 1)).await.unwrap();
        store.delete_item(a).await.unwrap();
        let b = store.insert_item(&draft("B", 1)).await.unwrap();

        assert!(b > a);
        assert!(store.get_item(a).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_drop_replays_undo_log() {
        let store = MemoryStore::new();
        store.insert_item(&draft("Brake pad", 10)).await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_sale(&sale_on(19)).await.unwrap();
            tx.adjust_quantity(1, -4).await.unwrap();
        }

        assert!(store.list_sales().await.unwrap().is_empty());
        assert_eq!(store.get_item(1).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_rollback_keeps_earlier_commits_and_reuses_ids() {
        let store = MemoryStore::new();
        store.insert_item(&draft("Brake pad", 10)).await.unwrap();
        store.insert_item(&draft("Oil filter", 5)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.insert_sale(&sale_on(18)).await.unwrap();
        tx.adjust_quantity(1, -1).await.unwrap();
        tx.commit().await.unwrap();
        drop(tx);

        {
            let mut tx = store.begin().await.unwrap();
            tx.insert_sale(&sale_on(19)).await.unwrap();
            tx.insert_purchase(&NewPurchase {
                date: sale_on(19).date,
                total: Money::from_units(50),
                items: vec![],
            })
            .await
            .unwrap();
            tx.adjust_quantity(1, -3).await.unwrap();
            tx.adjust_quantity(1, -3).await.unwrap();
            tx.adjust_quantity(2, 7).await.unwrap();
        }

        assert_eq!(store.get_item(1).await.unwrap().quantity, 9);
        assert_eq!(store.get_item(2).await.unwrap().quantity, 5);
        assert!(store.list_purchases().await.unwrap().is_empty());

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.insert_sale(&sale_on(20)).await.unwrap(), 2);
        tx.commit().await.unwrap();
        drop(tx);

        let ids: Vec<i64> = store.list_sales().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_quantity_overflow_is_an_error() {
        let store = MemoryStore::new();
        store.insert_item(&draft("Brake pad", i64::MAX - 1)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            tx.adjust_quantity(1, 2).await,
            Err(DbError::QueryFailed(_))
        ));
        tx.adjust_quantity(1, 1).await.unwrap();
        drop(tx);

        assert_eq!(store.get_item(1).await.unwrap().quantity, i64::MAX - 1);
    }

    #[tokio::test]
    async fn test_commit_keeps_writes_and_period_filters() {
        let store = MemoryStore::new();
        store.insert_item(&draft("Brake pad", 10)).await.unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.insert_sale(&sale_on(18)).await.unwrap();
        tx.insert_sale(&sale_on(19)).await.unwrap();
        tx.adjust_quantity(1, -2).await.unwrap();
        tx.commit().await.unwrap();
        assert!(tx.commit().await.is_err());
        drop(tx);

        let sales = store.list_sales().await.unwrap();
        assert_eq!(sales.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(store.get_item(1).await.unwrap().quantity, 8);

        let summary = store.financial_summary("2026-10-19", "2026-10").await.unwrap();
        assert_eq!(summary.today_sales, Money::from_units(80));
        assert_eq!(summary.today_profit, Money::from_units(30));
        assert_eq!(summary.month_sales, Money::from_units(160));
        assert_eq!(summary.total_profit, Money::from_units(60));
        assert_eq!(summary.total_purchases, Money::zero());

        let monthly = store.monthly_sales("2026-05").await.unwrap();
        assert_eq!(monthly.get("2026-10"), Some(&Money::from_units(160)));
    }

    #[tokio::test]
    async fn test_fault_hook_fails_adjustment() {
        let store = MemoryStore::new();
        store.insert_item(&draft("Brake pad", 10)).await.unwrap();
        store.fail_adjustments_for(1);

        let mut tx = store.begin().await.unwrap();
        assert!(matches!(
            tx.adjust_quantity(1, -1).await,
            Err(DbError::QueryFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_credentials() {
        let store = MemoryStore::new();
        assert!(store.ensure_credential(&Credential::new("admin", "123456")).await.unwrap());
        assert!(!store.ensure_credential(&Credential::new("admin", "x")).await.unwrap());

        store.set_password("admin", "s3cret").await.unwrap();
        let found = store.find_credential("admin").await.unwrap().unwrap();
        assert!(found.matches("admin", "s3cret"));
        assert!(store.set_password("ghost", "x").await.unwrap_err().is_not_found());
    }
}

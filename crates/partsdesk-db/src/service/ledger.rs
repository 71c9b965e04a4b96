//! # Ledger Engine
//!
//! Records sales and purchases. Each recording is one store transaction:
//! the row insert and every quantity change commit together or not at all.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::service::{whole_seconds, ServiceResult};
use crate::store::Store;
use partsdesk_core::ledger::{sale_profit, StockLedger};
use partsdesk_core::{
    CoreError, NewPurchase, NewSale, Purchase, PurchaseRequest, Sale, SaleRequest, StockPolicy,
    ValidationError,
};

#[derive(Clone)]
pub struct LedgerEngine {
    store: Arc<dyn Store>,
    policy: StockPolicy,
}

impl LedgerEngine {
    pub fn new(store: Arc<dyn Store>, policy: StockPolicy) -> Self {
        LedgerEngine { store, policy }
    }

    /// Records a sale dated `at` and returns its id.
    ///
    /// ## Steps (one transaction)
    /// 1. Read each line's item cost and quantity; unknown item → `ItemNotFound`
    /// 2. Check stock against the policy (strict only fails)
    /// 3. Profit = Σ (unit price − cost) × quantity
    /// 4. Insert the sale, decrement every item, commit
    pub async fn record_sale(&self, request: &SaleRequest, at: NaiveDateTime) -> ServiceResult<i64> {
        request.validate()?;

        let mut tx = self.store.begin().await?;
        let mut stock = StockLedger::new(self.policy);
        let mut costs = Vec::with_capacity(request.items.len());

        for line in &request.items {
            let snapshot = tx
                .item_snapshot(line.item_id)
                .await?
                .ok_or(CoreError::ItemNotFound(line.item_id))?;

            let projected = stock.reserve(line.item_id, snapshot.quantity, line.quantity)?;
            if projected < 0 {
                warn!(
                    item_id = line.item_id,
                    available = snapshot.quantity,
                    projected,
                    "Sale takes item below zero stock"
                );
            }

            costs.push(snapshot.cost);
        }

        let profit = sale_profit(request.items.iter().zip(costs))
            .ok_or_else(|| ValidationError::too_large("profit"))?;
        let sale = NewSale {
            date: whole_seconds(at),
            total: request.total,
            payment_method: request.payment_method,
            items: request.items.clone(),
            profit,
        };

        let id = tx.insert_sale(&sale).await?;
        for line in &request.items {
            tx.adjust_quantity(line.item_id, -line.quantity).await?;
        }
        tx.commit().await?;

        info!(
            id,
            total = %sale.total,
            profit = %sale.profit,
            lines = sale.items.len(),
            payment_method = ?sale.payment_method,
            "Sale recorded"
        );
        Ok(id)
    }

    /// Records a purchase (restock) dated `at` and returns its id.
    pub async fn record_purchase(&self, request: &PurchaseRequest, at: NaiveDateTime) -> ServiceResult<i64> {
        request.validate()?;

        let mut tx = self.store.begin().await?;

        let mut restocked: BTreeMap<i64, i64> = BTreeMap::new();
        for line in &request.items {
            let snapshot = tx
                .item_snapshot(line.item_id)
                .await?
                .ok_or(CoreError::ItemNotFound(line.item_id))?;

            let projected = restocked.entry(line.item_id).or_insert(snapshot.quantity);
            *projected = projected
                .checked_add(line.quantity)
                .ok_or_else(|| ValidationError::too_large("quantity"))?;
        }

        let purchase = NewPurchase {
            date: whole_seconds(at),
            total: request.total,
            items: request.items.clone(),
        };

        let id = tx.insert_purchase(&purchase).await?;
        for line in &request.items {
            tx.adjust_quantity(line.item_id, line.quantity).await?;
        }
        tx.commit().await?;

        info!(id, total = %purchase.total, lines = purchase.items.len(), "Purchase recorded");
        Ok(id)
    }

    /// Every sale, newest first.
    pub async fn sales(&self) -> ServiceResult<Vec<Sale>> {
        let sales = self.store.list_sales().await?;
        debug!(count = sales.len(), "Loaded sales history");
        Ok(sales)
    }

    /// Every purchase, newest first.
    pub async fn purchases(&self) -> ServiceResult<Vec<Purchase>> {
        let purchases = self.store.list_purchases().await?;
        debug!(count = purchases.len(), "Loaded purchase history");
        Ok(purchases)
    }
}

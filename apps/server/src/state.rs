//! # Application State
//!
//! One store handle, shared by every service, shared by every handler.
//!
//! ## Thread Safety
//! Services hold an `Arc<dyn Store>` and are cheap to clone. axum clones
//! `AppState` per request; nothing here needs a lock of its own.

use std::sync::Arc;

use partsdesk_core::StockPolicy;
use partsdesk_db::{
    Catalog, Credentials, FinancialAggregator, LedgerEngine, ShipmentTracker, Store,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub catalog: Catalog,
    pub ledger: LedgerEngine,
    pub aggregator: FinancialAggregator,
    pub shipments: ShipmentTracker,
    pub credentials: Credentials,
}

impl AppState {
    /// Wires every service to `store`.
    pub fn new(store: Arc<dyn Store>, policy: StockPolicy, admin_user: &str) -> Self {
        AppState {
            catalog: Catalog::new(store.clone()),
            ledger: LedgerEngine::new(store.clone(), policy),
            aggregator: FinancialAggregator::new(store.clone()),
            shipments: ShipmentTracker::new(store.clone()),
            credentials: Credentials::new(store.clone(), admin_user),
            store,
        }
    }
}

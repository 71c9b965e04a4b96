//! # partsdesk-db: Storage and Services for PartsDesk
//!
//! Everything that reads or writes shop state: the [`Store`] abstraction,
//! its SQLite and in-memory backends, and the services built on top.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PartsDesk Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/sales)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  partsdesk-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Services    │    │ Arc<dyn Store>│    │  Migrations  │  │   │
//! │  │   │  (service/)   │───►│  Database     │    │  (embedded)  │  │   │
//! │  │   │ LedgerEngine  │    │  MemoryStore  │    │ 001_init.sql │  │   │
//! │  │   │ Aggregator    │    └───────┬───────┘    └──────────────┘  │   │
//! │  │   └───────────────┘            │ repositories                  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./partsdesk.db                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` / `LedgerTx` traits
//! - [`pool`] - SQLite pool (`Database`, `DbConfig`), implements `Store`
//! - [`memory`] - In-memory `Store`
//! - [`repository`] - SQL per table
//! - [`migrations`] - Embedded database migrations
//! - [`service`] - Ledger engine, aggregator, catalog, shipments, credentials
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use partsdesk_db::{Database, DbConfig, LedgerEngine, Store};
//!
//! let db = Database::new(DbConfig::new("./partsdesk.db")).await?;
//! let store: Arc<dyn Store> = Arc::new(db);
//!
//! let ledger = LedgerEngine::new(store.clone(), StockPolicy::default());
//! let sale_id = ledger.record_sale(&request, now).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use store::{LedgerTx, StockSnapshot, Store};

pub use service::{
    Catalog, Credentials, FinancialAggregator, LedgerEngine, ServiceError, ServiceResult,
    ShipmentTracker,
};

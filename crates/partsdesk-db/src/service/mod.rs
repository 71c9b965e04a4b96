//! # Services
//!
//! The operations the HTTP layer calls. Each service holds an
//! `Arc<dyn Store>` and works the same on either backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LedgerEngine         record_sale, record_purchase, history            │
//! │  FinancialAggregator  summary, monthly_series                          │
//! │  Catalog              item CRUD, low stock                             │
//! │  ShipmentTracker      shipment CRUD                                    │
//! │  Credentials          login, change_password, seeding                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod aggregator;
pub mod catalog;
pub mod credentials;
pub mod error;
pub mod ledger;
pub mod shipment;

pub use aggregator::FinancialAggregator;
pub use catalog::Catalog;
pub use credentials::Credentials;
pub use error::{ServiceError, ServiceResult};
pub use ledger::LedgerEngine;
pub use shipment::ShipmentTracker;

use chrono::{NaiveDateTime, Timelike};

/// Stored dates have whole-second precision.
pub(crate) fn whole_seconds(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

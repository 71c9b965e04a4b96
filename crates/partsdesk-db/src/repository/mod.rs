//! # Repository Module
//!
//! SQLite repository implementations for PartsDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Service (Catalog, LedgerEngine, ...)                                  │
//! │       │                                                                 │
//! │       │  store.list_items()                                            │
//! │       ▼                                                                 │
//! │  Database (impl Store)                                                 │
//! │       │                                                                 │
//! │       │  db.items().list()                                             │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, draft)                                              │
//! │  └── update(&self, id, draft)                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Catalog CRUD
//! - [`LedgerRepository`](ledger::LedgerRepository) - Sale/purchase history + transactions
//! - [`ReportRepository`](report::ReportRepository) - Period sums
//! - [`ShipmentRepository`](shipment::ShipmentRepository) - Shipment CRUD
//! - [`CredentialRepository`](credential::CredentialRepository) - The login record

pub mod credential;
pub mod item;
pub mod ledger;
pub mod report;
pub mod shipment;

use chrono::NaiveDateTime;
use partsdesk_core::types::timestamp;

/// Text stored in every `date` column.
pub(crate) fn date_text(at: &NaiveDateTime) -> String {
    at.format(timestamp::FORMAT).to_string()
}

/// `LIKE` pattern for a period prefix.
pub(crate) fn period_pattern(prefix: &str) -> String {
    format!("{prefix}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_date_text_drops_fraction() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_milli_opt(9, 30, 0, 250)
            .unwrap();
        assert_eq!(date_text(&at), "2026-10-19 09:30:00");
    }

    #[test]
    fn test_period_pattern() {
        assert_eq!(period_pattern("2026-10"), "2026-10%");
        assert_eq!(period_pattern("2026-10-19"), "2026-10-19%");
    }
}

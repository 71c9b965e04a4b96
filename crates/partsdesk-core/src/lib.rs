//! # partsdesk-core: Pure Business Logic for PartsDesk
//!
//! Domain types and rules for a small auto-parts shop: the catalog, the
//! sale/purchase ledger, brokerage shipments and the dashboard figures.
//! Nothing in this crate touches the database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PartsDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Browser client (static HTML/JS)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apps/server (axum routes)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          partsdesk-db (Store, repositories, services)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ partsdesk-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   types • money • ledger • report • validation • error          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Sale, Purchase, Shipment, ...)
//! - [`money`] - Integer cents with a decimal wire format
//! - [`ledger`] - Sale/purchase requests, profit math, stock policy
//! - [`report`] - Period keys and dashboard report shapes
//! - [`validation`] - Request shape rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use partsdesk_core::ledger::line_profit;
//! use partsdesk_core::{LineItem, Money};
//!
//! // Cost 50, sold 3 @ 80
//! let line = LineItem { item_id: 1, quantity: 3, price: Money::from_units(80) };
//! let profit = line_profit(&line, Money::from_units(50)).unwrap();
//!
//! assert_eq!(profit.to_string(), "90.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{PurchaseRequest, SaleRequest, StockPolicy};
pub use money::Money;
pub use report::{FinancialSummary, MonthlySeries};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length (in characters) of names and other free-text fields.
pub const MAX_NAME_LEN: usize = 200;

/// Largest amount accepted for any single price, cost, fee or total
/// (one billion currency units).
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000);

/// Largest quantity accepted on a single sale or purchase line.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;

/// Largest absolute stock level or reorder threshold on an item.
pub const MAX_STOCK: i64 = 1_000_000_000_000;

/// Number of months in the dashboard sales chart.
pub const MONTHLY_WINDOW: usize = 6;

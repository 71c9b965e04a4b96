//! # Ledger Rules
//!
//! The pure half of sale/purchase recording: request shapes, profit math
//! and the stock policy. The store-facing half (one transaction per
//! recording) lives in `partsdesk-db`.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleRequest { items: [{id, quantity, price}], total, paymentMethod }  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate()                    ← shape only (THIS MODULE)              │
//! │       │                                                                 │
//! │       ▼  BEGIN                                                          │
//! │  for each line:                                                         │
//! │     read item cost + quantity   (store)                                 │
//! │     StockLedger::reserve()      ← policy check (THIS MODULE)           │
//! │     line_profit()               ← (price − cost) × quantity            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert sale row, decrement each item   (store)                        │
//! │       │                                                                 │
//! │       ▼  COMMIT (or nothing at all)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Profit Is a Snapshot
//! Profit uses the item's cost as read while the sale is being recorded.
//! Editing the cost later does not touch stored profit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ItemId, LineItem, PaymentMethod};
use crate::validation::{validate_amount, validate_lines, ValidationResult};

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRequest {
    pub items: Vec<LineItem>,
    /// Declared by the caller and stored as-is.
    #[ts(type = "number")]
    pub total: Money,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl SaleRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_lines(&self.items)?;
        validate_amount("total", self.total)
    }
}

/// Body of `POST /api/purchases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PurchaseRequest {
    pub items: Vec<LineItem>,
    #[ts(type = "number")]
    pub total: Money,
}

impl PurchaseRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_lines(&self.items)?;
        validate_amount("total", self.total)
    }
}

// =============================================================================
// Profit
// =============================================================================

/// Profit contributed by one line: `(unit price − cost) × quantity`.
///
/// ## Example
/// ```rust
/// use partsdesk_core::ledger::line_profit;
/// use partsdesk_core::{LineItem, Money};
///
/// let line = LineItem { item_id: 1, quantity: 3, price: Money::from_units(80) };
/// assert_eq!(line_profit(&line, Money::from_units(50)), Some(Money::from_units(90)));
/// ```
///
/// ## Returns
/// `None` if the result does not fit in [`Money`].
#[inline]
pub fn line_profit(line: &LineItem, cost: Money) -> Option<Money> {
    line.price.checked_sub(cost)?.checked_mul(line.quantity)
}

/// Sums [`line_profit`] over `(line, cost)` pairs; `None` on overflow.
pub fn sale_profit<'a, I>(lines: I) -> Option<Money>
where
    I: IntoIterator<Item = (&'a LineItem, Money)>,
{
    lines
        .into_iter()
        .try_fold(Money::zero(), |acc, (line, cost)| {
            acc.checked_add(line_profit(line, cost)?)
        })
}

// =============================================================================
// Stock Policy
// =============================================================================

/// What to do when a sale asks for more than is on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    /// Record the sale and let the quantity go negative.
    #[default]
    Permissive,
    /// Refuse the sale with [`CoreError::InsufficientStock`].
    Strict,
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockPolicy::Permissive => write!(f, "permissive"),
            StockPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(StockPolicy::Permissive),
            "strict" => Ok(StockPolicy::Strict),
            other => Err(format!("unknown stock policy: {other}")),
        }
    }
}

/// Tracks requested quantities per item across the lines of one sale.
///
/// Lines may repeat an item; the check is against the cumulative request.
#[derive(Debug)]
pub struct StockLedger {
    policy: StockPolicy,
    requested: BTreeMap<ItemId, i64>,
}

impl StockLedger {
    pub fn new(policy: StockPolicy) -> Self {
        StockLedger {
            policy,
            requested: BTreeMap::new(),
        }
    }

    /// Reserves `quantity` of an item that currently has `available` on hand.
    ///
    /// ## Returns
    /// The projected quantity after every reservation so far (may be
    /// negative under the permissive policy).
    pub fn reserve(&mut self, item_id: ItemId, available: i64, quantity: i64) -> CoreResult<i64> {
        let requested = self.requested.entry(item_id).or_insert(0);
        *requested = requested
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::too_large("quantity"))?;

        if self.policy == StockPolicy::Strict && *requested > available {
            return Err(CoreError::InsufficientStock {
                item_id,
                available,
                requested: *requested,
            });
        }

        available
            .checked_sub(*requested)
            .ok_or_else(|| ValidationError::too_large("quantity").into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

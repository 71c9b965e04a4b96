//! # Domain Types
//!
//! Core domain types used throughout PartsDesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Sale       │   │    Purchase     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id, date       │   │  id, date       │       │
//! │  │  quantity       │◄──│  items[]        │   │  items[] ──────►│ Item  │
//! │  │  price, cost    │   │  total, profit  │   │  total          │       │
//! │  │  min_stock      │   │  payment_method │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Shipment     │   │   Credential    │   (no link to inventory)    │
//! │  │  item_price     │   │  username       │                             │
//! │  │  my_fee, total  │   │  password       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Line Items
//! Sales and purchases keep their line items as a denormalized array
//! (item id, quantity, unit price). Deleting an item later leaves those
//! references dangling on purpose: totals never need the live item.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Item identifier (SQLite rowid).
pub type ItemId = i64;

// =============================================================================
// Item
// =============================================================================

/// A catalog part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Quantity on hand. Can go negative under the permissive stock policy.
    pub quantity: i64,

    /// Sell price per unit.
    #[ts(type = "number")]
    pub price: Money,

    /// Acquisition cost per unit (for profit).
    #[ts(type = "number")]
    pub cost: Money,

    /// Reorder threshold.
    pub min_stock: i64,
}

impl Item {
    /// An item is low on stock once its quantity drops to the threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

/// Fields accepted when creating or editing an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[ts(type = "number")]
    pub price: Money,
    #[serde(default)]
    #[ts(type = "number")]
    pub cost: Money,
    #[serde(default)]
    pub min_stock: i64,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentMethod {
    #[default]
    Cash,
    /// Bank transfer.
    Bank,
    /// Instant (mobile) payment.
    Instant,
}

// =============================================================================
// Line Items
// =============================================================================

/// One line of a sale or purchase.
///
/// Serialized as `{"id": 1, "quantity": 3, "price": 80}`, both on the wire
/// and inside the `items` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    pub quantity: i64,
    /// Unit price for this line.
    #[ts(type = "number")]
    pub price: Money,
}

impl LineItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale / Purchase
// =============================================================================

/// A recorded sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    #[serde(with = "timestamp")]
    #[ts(type = "string")]
    pub date: NaiveDateTime,
    /// Total as declared by the caller.
    #[ts(type = "number")]
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub items: Vec<LineItem>,
    /// Margin realized, computed from item costs at the time of sale.
    #[ts(type = "number")]
    pub profit: Money,
}

/// A recorded purchase (restock). Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Purchase {
    pub id: i64,
    #[serde(with = "timestamp")]
    #[ts(type = "string")]
    pub date: NaiveDateTime,
    #[ts(type = "number")]
    pub total: Money,
    pub items: Vec<LineItem>,
}

/// A sale ready to be inserted (id assigned by the store).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub date: NaiveDateTime,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub items: Vec<LineItem>,
    pub profit: Money,
}

impl NewSale {
    pub fn with_id(self, id: i64) -> Sale {
        Sale {
            id,
            date: self.date,
            total: self.total,
            payment_method: self.payment_method,
            items: self.items,
            profit: self.profit,
        }
    }
}

/// A purchase ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub date: NaiveDateTime,
    pub total: Money,
    pub items: Vec<LineItem>,
}

impl NewPurchase {
    pub fn with_id(self, id: i64) -> Purchase {
        Purchase {
            id,
            date: self.date,
            total: self.total,
            items: self.items,
        }
    }
}

// =============================================================================
// Shipment
// =============================================================================

/// Brokerage shipment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ShipmentStatus {
    #[default]
    Pending,
    Completed,
}

/// A forwarding job done for a customer: the item's price plus our fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Shipment {
    pub id: i64,
    #[serde(with = "timestamp")]
    #[ts(type = "string")]
    pub date: NaiveDateTime,
    pub person_name: String,
    pub region: String,
    pub item_description: String,
    #[ts(type = "number")]
    pub item_price: Money,
    #[ts(type = "number")]
    pub my_fee: Money,
    /// Always `item_price + my_fee`.
    #[ts(type = "number")]
    pub total: Money,
    pub status: ShipmentStatus,
}

/// Fields accepted when creating or editing a shipment.
///
/// A `total` sent by the client is not part of this type and is dropped
/// during deserialization; see [`ShipmentDraft::total`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShipmentDraft {
    pub person_name: String,
    pub region: String,
    pub item_description: String,
    #[serde(default)]
    #[ts(type = "number")]
    pub item_price: Money,
    #[serde(default)]
    #[ts(type = "number")]
    pub my_fee: Money,
    #[serde(default)]
    pub status: ShipmentStatus,
}

impl ShipmentDraft {
    /// Server-side total. Both parts are capped by
    /// [`validate_shipment_draft`](crate::validation::validate_shipment_draft),
    /// so the sum of a validated draft always fits.
    #[inline]
    pub fn total(&self) -> Money {
        self.item_price + self.my_fee
    }
}

// =============================================================================
// Credential
// =============================================================================

/// The single shared login.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact match on both fields.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

// =============================================================================
// Timestamp wire format
// =============================================================================

/// Transaction dates travel as `YYYY-MM-DD HH:MM:SS` (server local time),
/// the same text the report periods match against.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, FORMAT)
            .or_else(|_| text.parse::<NaiveDateTime>())
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        let mut item = Item {
            id: 1,
            name: "Brake pad".to_string(),
            quantity: 5,
            price: Money::from_units(80),
            cost: Money::from_units(50),
            min_stock: 5,
        };
        assert!(item.is_low_stock());

        item.quantity = 6;
        assert!(!item.is_low_stock());
    }

    #[test]
    fn test_item_draft_defaults() {
        let draft: ItemDraft =
            serde_json::from_str(r#"{"name":"Oil filter","quantity":4,"price":12.5}"#).unwrap();
        assert_eq!(draft.cost, Money::zero());
        assert_eq!(draft.min_stock, 0);
        assert_eq!(draft.price.cents(), 1250);
    }

    #[test]
    fn test_payment_method_default_and_wire_names() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(serde_json::to_string(&PaymentMethod::Instant).unwrap(), "\"instant\"");
        let bank: PaymentMethod = serde_json::from_str("\"bank\"").unwrap();
        assert_eq!(bank, PaymentMethod::Bank);
    }

    #[test]
    fn test_line_item_uses_id_on_the_wire() {
        let line: LineItem = serde_json::from_str(r#"{"id":7,"quantity":3,"price":80}"#).unwrap();
        assert_eq!(line.item_id, 7);
        assert_eq!(line.line_total(), Money::from_units(240));

        let json = serde_json::to_value(line).unwrap();
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn test_shipment_draft_ignores_client_total() {
        let draft: ShipmentDraft = serde_json::from_str(
            r#"{"personName":"Ali","region":"North","itemDescription":"Gearbox",
                "itemPrice":100,"myFee":20,"total":999}"#,
        )
        .unwrap();
        assert_eq!(draft.total(), Money::from_units(120));
        assert_eq!(draft.status, ShipmentStatus::Pending);
    }

    #[test]
    fn test_sale_date_wire_format() {
        let sale = Sale {
            id: 1,
            date: at(2026, 10, 19),
            total: Money::from_units(240),
            payment_method: PaymentMethod::Cash,
            items: vec![],
            profit: Money::from_units(90),
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["date"], "2026-10-19 09:30:00");
        assert_eq!(json["paymentMethod"], "cash");

        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, sale);
    }

    #[test]
    fn test_credential_exact_match() {
        let cred = Credential::new("admin", "123456");
        assert!(cred.matches("admin", "123456"));
        assert!(!cred.matches("admin", "123456 "));
        assert!(!cred.matches("Admin", "123456"));
    }
}

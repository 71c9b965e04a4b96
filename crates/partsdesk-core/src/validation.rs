//! # Validation Module
//!
//! Input validation for PartsDesk requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                   │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Shape rules (non-empty lines, positive quantities, ...)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Item existence, checked inside the ledger transaction             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock sufficiency is NOT checked here; that depends on live quantities
//! and the configured [`StockPolicy`](crate::ledger::StockPolicy).

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ItemDraft, LineItem, ShipmentDraft};
use crate::{MAX_AMOUNT, MAX_LINE_QUANTITY, MAX_NAME_LEN, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required free-text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use partsdesk_core::validation::validate_text;
///
/// assert!(validate_text("name", "Brake pad").is_ok());
/// assert!(validate_text("name", "   ").is_err());
/// ```
pub fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a new password (must not be empty).
pub fn validate_new_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("newPassword"));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is not negative and at most [`MAX_AMOUNT`].
/// Zero is allowed.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::negative(field));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::too_large(field));
    }
    Ok(())
}

/// Validates a line quantity (> 0, at most [`MAX_LINE_QUANTITY`]).
///
/// ## Example
/// ```rust
/// use partsdesk_core::validation::validate_quantity;
///
/// assert!(validate_quantity("quantity", 3).is_ok());
/// assert!(validate_quantity("quantity", 0).is_err());
/// assert!(validate_quantity("quantity", 10_000_000_000_000_000).is_err());
/// ```
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }
    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::too_large(field));
    }
    Ok(())
}

/// Validates a stock level or threshold. Negative values are allowed
/// (stock may be oversold); the magnitude is capped at [`MAX_STOCK`].
pub fn validate_stock_level(field: &str, level: i64) -> ValidationResult<()> {
    if level.unsigned_abs() > MAX_STOCK.unsigned_abs() {
        return Err(ValidationError::too_large(field));
    }
    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates an item create/edit request.
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<()> {
    validate_text("name", &draft.name)?;
    validate_amount("price", draft.price)?;
    validate_amount("cost", draft.cost)?;
    validate_stock_level("quantity", draft.quantity)?;
    validate_stock_level("minStock", draft.min_stock)?;
    Ok(())
}

/// Validates the line items of a sale or purchase.
///
/// ## Rules
/// - At least one line
/// - Each quantity in `1..=MAX_LINE_QUANTITY`
/// - Each unit price in `0..=MAX_AMOUNT`
///
/// Item existence is checked later, inside the ledger transaction.
pub fn validate_lines(lines: &[LineItem]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::required("items"));
    }

    for (index, line) in lines.iter().enumerate() {
        validate_quantity(&format!("items[{index}].quantity"), line.quantity)?;
        validate_amount(&format!("items[{index}].price"), line.price)?;
    }

    Ok(())
}

/// Validates a shipment create/edit request.
pub fn validate_shipment_draft(draft: &ShipmentDraft) -> ValidationResult<()> {
    validate_text("personName", &draft.person_name)?;
    validate_text("region", &draft.region)?;
    validate_text("itemDescription", &draft.item_description)?;
    validate_amount("itemPrice", draft.item_price)?;
    validate_amount("myFee", draft.my_fee)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShipmentStatus;

    fn line(item_id: i64, quantity: i64, price: i64) -> LineItem {
        LineItem {
            item_id,
            quantity,
            price: Money::from_units(price),
        }
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("name", "Spark plug").is_ok());
        assert!(validate_text("name", "").is_err());
        assert!(validate_text("name", &"A".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(validate_text("name", &"ب".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_validate_item_draft() {
        let mut draft = ItemDraft {
            name: "Clutch kit".to_string(),
            quantity: 2,
            price: Money::from_units(300),
            cost: Money::from_units(200),
            min_stock: 1,
        };
        assert!(validate_item_draft(&draft).is_ok());

        draft.cost = Money::from_cents(-1);
        assert!(matches!(
            validate_item_draft(&draft),
            Err(ValidationError::Negative { .. })
        ));

        draft.cost = Money::from_units(200);
        draft.quantity = -5;
        assert!(validate_item_draft(&draft).is_ok());

        draft.quantity = i64::MIN;
        assert!(matches!(
            validate_item_draft(&draft),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_amounts_and_quantities_are_capped() {
        assert!(validate_amount("total", MAX_AMOUNT).is_ok());
        assert!(matches!(
            validate_amount("total", Money::from_cents(i64::MAX)),
            Err(ValidationError::TooLarge { .. })
        ));

        assert!(validate_quantity("quantity", MAX_LINE_QUANTITY).is_ok());
        let err = validate_lines(&[line(1, 10_000_000_000_000_000, 80)]).unwrap_err();
        assert_eq!(err.to_string(), "items[0].quantity is too large");
    }

    #[test]
    fn test_validate_lines() {
        assert!(validate_lines(&[line(1, 3, 80)]).is_ok());
        assert!(validate_lines(&[line(1, 1, 0)]).is_ok());

        assert!(matches!(validate_lines(&[]), Err(ValidationError::Required { .. })));

        let err = validate_lines(&[line(1, 1, 10), line(2, 0, 10)]).unwrap_err();
        assert_eq!(err.to_string(), "items[1].quantity must be positive");

        assert!(validate_lines(&[line(1, 1, -5)]).is_err());
    }

    #[test]
    fn test_validate_shipment_draft() {
        let mut draft = ShipmentDraft {
            person_name: "Omar".to_string(),
            region: "Khartoum".to_string(),
            item_description: "Radiator".to_string(),
            item_price: Money::from_units(100),
            my_fee: Money::from_units(20),
            status: ShipmentStatus::Pending,
        };
        assert!(validate_shipment_draft(&draft).is_ok());

        draft.region = " ".to_string();
        assert!(validate_shipment_draft(&draft).is_err());

        draft.region = "Khartoum".to_string();
        draft.item_price = Money::from_units(900_000_000_000_000);
        assert!(matches!(
            validate_shipment_draft(&draft),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_new_password() {
        assert!(validate_new_password("s3cret").is_ok());
        assert!(validate_new_password("").is_err());
    }
}

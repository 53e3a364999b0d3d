//! # Validation Module
//!
//! Field rules for anything that enters the cart from outside: catalog
//! files, wire transition requests, shell arguments.
//!
//! ## Where Checks Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shell argument parsing   missing SKU, non-numeric quantity             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  this module              SKU shape, names, prices, quantities          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  reducer                  one line per SKU, quantity target must exist  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::error::{CoreError, CoreResult};
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LENGTH, MAX_PRICE_CENTS, MAX_SKU_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trimmed, non-empty, bounded text. Returns the trimmed slice.
fn bounded_text<'a>(field: &str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required {
            field: field.to_string(),
        })
    } else if value.chars().count() > max {
        Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        })
    } else {
        Ok(value)
    }
}

/// Validates a SKU.
///
/// ## Rules
/// - Not blank, at most 50 characters
/// - Letters, digits, `-` and `_` only
///
/// ## Example
/// ```rust
/// use widget_core::validation::validate_sku;
///
/// assert!(validate_sku("item0001").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("item 0001").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = bounded_text("sku", sku, MAX_SKU_LENGTH)?;

    match sku.chars().find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_'))) {
        Some(bad) => Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: format!("unexpected character {:?}", bad),
        }),
        None => Ok(()),
    }
}

/// Validates a product name: not blank, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    bounded_text("name", name, MAX_NAME_LENGTH).map(|_| ())
}

/// Validates a line quantity.
///
/// ## Rules
/// - At least 1; dropping to zero is a `Remove`
/// - At most `MAX_ITEM_QUANTITY` (999)
///
/// ```rust
/// use widget_core::validation::validate_quantity;
/// use widget_core::CoreError;
///
/// assert!(validate_quantity(999).is_ok());
/// assert!(matches!(
///     validate_quantity(1000),
///     Err(CoreError::QuantityTooLarge { max: 999, .. })
/// ));
/// ```
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        }
        .into());
    }
    if qty > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: qty,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Prices may be zero but never negative, and stay at or below
/// `MAX_PRICE_CENTS`.
///
/// ```rust
/// use widget_core::money::Money;
/// use widget_core::validation::validate_price;
///
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max: Money::from_cents(MAX_PRICE_CENTS).to_string(),
        });
    }
    Ok(())
}

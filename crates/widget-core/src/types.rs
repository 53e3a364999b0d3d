//! # Domain Types
//!
//! Core domain types used throughout Widget Shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Sku ─────────── primary key of catalog items and cart lines           │
//! │    │                                                                    │
//! │    ├── CatalogItem { sku, name, price }        (immutable, catalog)     │
//! │    │                                                                    │
//! │    └── CartLine    { sku, name, price, qty }   (owned by the cart)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_sku, ValidationResult};
use crate::SKU_SUFFIX_WIDTH;

// =============================================================================
// Sku
// =============================================================================

/// Stock Keeping Unit: the unique product identifier.
///
/// The trailing [`SKU_SUFFIX_WIDTH`] characters are expected to be digits
/// ("item0010"); they drive the cart's display order.
///
/// Serializes as a bare string. Deserializing goes through [`Sku::new`], so
/// a SKU read from JSON is trimmed and validated like any other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Sku(String);

impl Sku {
    /// Creates a validated SKU.
    ///
    /// ## Example
    /// ```rust
    /// use widget_core::Sku;
    ///
    /// assert!(Sku::new("item0001").is_ok());
    /// assert!(Sku::new("has space").is_err());
    /// ```
    pub fn new(sku: impl Into<String>) -> ValidationResult<Self> {
        let sku = sku.into();
        validate_sku(&sku)?;
        Ok(Sku(sku.trim().to_string()))
    }

    /// Wraps a SKU known to be valid (built-in catalog data).
    pub(crate) fn from_trusted(sku: &str) -> Self {
        Sku(sku.to_string())
    }

    /// Returns the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the trailing fixed-width numeric segment.
    ///
    /// Returns `None` when the SKU is shorter than the segment or the
    /// segment contains anything but ASCII digits. Callers must not treat a
    /// missing suffix as zero.
    ///
    /// ## Example
    /// ```rust
    /// use widget_core::Sku;
    ///
    /// assert_eq!(Sku::new("item0010").unwrap().numeric_suffix(), Some(10));
    /// assert_eq!(Sku::new("widget").unwrap().numeric_suffix(), None);
    /// ```
    pub fn numeric_suffix(&self) -> Option<u32> {
        let sku = self.0.as_str();
        let start = sku.len().checked_sub(SKU_SUFFIX_WIDTH)?;
        let tail = sku.get(start..)?;
        if !tail.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        tail.parse().ok()
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Sku {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Sku::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Lets keyed containers look lines up by `&str`.
impl Borrow<str> for Sku {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A product available for purchase.
///
/// JSON shape: `{ "sku": "item0001", "name": "Widget", "price": 9.99 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Stock Keeping Unit - business identifier.
    pub sku: Sku,

    /// Display name.
    pub name: String,

    /// Unit price, exchanged as a decimal number.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
}

impl CatalogItem {
    /// Creates a validated catalog item.
    pub fn new(sku: &str, name: &str, price: Money) -> ValidationResult<Self> {
        let item = CatalogItem {
            sku: Sku::new(sku)?,
            name: name.trim().to_string(),
            price,
        };
        item.validate()?;
        Ok(item)
    }

    /// Re-checks an item that arrived through deserialization.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_sku(self.sku.as_str())?;
        validate_product_name(&self.name)?;
        validate_price(self.price)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One row in the cart: a product snapshot and its requested quantity.
///
/// ## Invariants
/// - `qty >= 1`
/// - At most one line per `sku` (enforced by [`crate::CartState`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub sku: Sku,
    pub name: String,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,
    pub qty: i64,
}

impl CartLine {
    /// Creates a line for a product that was just added (qty 1).
    pub fn from_item(item: &CatalogItem) -> Self {
        CartLine {
            sku: item.sku.clone(),
            name: item.name.clone(),
            price: item.price,
            qty: 1,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_suffix() {
        let suffix = |s: &str| Sku::new(s).unwrap().numeric_suffix();

        assert_eq!(suffix("item0001"), Some(1));
        assert_eq!(suffix("item0010"), Some(10));
        assert_eq!(suffix("item9999"), Some(9999));
        assert_eq!(suffix("0042"), Some(42));
        assert_eq!(suffix("item12345"), Some(2345));
    }

    #[test]
    fn test_numeric_suffix_missing_is_not_zero() {
        let suffix = |s: &str| Sku::new(s).unwrap().numeric_suffix();

        assert_eq!(suffix("widget"), None);
        assert_eq!(suffix("item00a1"), None);
        assert_eq!(suffix("123"), None);
        assert_eq!(suffix("itemé001"), None);
    }

    #[test]
    fn test_sku_trims_and_validates() {
        assert_eq!(Sku::new(" item0001 ").unwrap().as_str(), "item0001");
        assert!(Sku::new("").is_err());
        assert!(Sku::new("item 0001").is_err());
    }

    #[test]
    fn test_sku_from_json_is_trimmed_and_validated() {
        let sku: Sku = serde_json::from_str(r#"" item0001 ""#).unwrap();
        assert_eq!(sku.as_str(), "item0001");

        let err = serde_json::from_str::<Sku>(r#""item 0001""#).unwrap_err();
        assert!(err.to_string().contains("sku has invalid format"));
        assert!(serde_json::from_str::<Sku>(r#""   ""#).is_err());
        assert!(serde_json::from_str::<Sku>("42").is_err());
    }

    #[test]
    fn test_catalog_item_json_shape() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"sku":"item0003","name":"Deluxe Widget","price":29.99}"#)
                .unwrap();
        assert_eq!(item.sku.as_str(), "item0003");
        assert_eq!(item.price.cents(), 2999);
        assert!(item.validate().is_ok());

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"sku":"item0003","name":"Deluxe Widget","price":29.99}"#);
    }

    #[test]
    fn test_catalog_item_rejects_negative_price() {
        assert!(CatalogItem::new("item0001", "Widget", Money::from_cents(-1)).is_err());
        assert!(CatalogItem::new("item0001", "", Money::from_cents(100)).is_err());
        assert!(CatalogItem::new("item0001", "Widget", Money::zero()).is_ok());
    }

    #[test]
    fn test_line_total() {
        let item = CatalogItem::new("item0001", "Widget", Money::from_cents(999)).unwrap();
        let mut line = CartLine::from_item(&item);
        assert_eq!(line.qty, 1);
        assert_eq!(line.line_total().cents(), 999);

        line.qty = 5;
        assert_eq!(line.line_total().cents(), 4995);
    }
}

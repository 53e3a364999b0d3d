//! # Product Catalog
//!
//! The ordered list of purchasable items for a session, plus the in-cart
//! membership query the product list uses.
//!
//! The catalog is immutable once built. The only change allowed is a
//! wholesale [`ProductCatalog::replace_all`] (e.g. after a reload), which
//! validates the whole new list before swapping it in.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::cart::CartState;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CatalogItem, Sku};

/// Ordered, SKU-unique list of catalog items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    items: Vec<CatalogItem>,
}

/// A catalog item annotated with cart membership, for product listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub in_cart: bool,
}

impl ProductCatalog {
    /// Builds a catalog, validating every item and SKU uniqueness.
    pub fn new(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.sku.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: item.sku.to_string(),
                }
                .into());
            }
        }

        Ok(ProductCatalog { items })
    }

    /// A catalog with no products. Every consumer must cope with this.
    pub fn empty() -> Self {
        ProductCatalog::default()
    }

    /// The built-in widget line-up.
    pub fn default_widgets() -> Self {
        let items = [
            ("item0001", "Widget", 999),
            ("item0002", "Premium Widget", 1999),
            ("item0003", "Deluxe Widget", 2999),
        ]
        .into_iter()
        .map(|(sku, name, cents)| CatalogItem {
            sku: Sku::from_trusted(sku),
            name: name.to_string(),
            price: Money::from_cents(cents),
        })
        .collect();

        ProductCatalog { items }
    }

    /// Replaces every item at once. On error the catalog is unchanged.
    pub fn replace_all(&mut self, items: Vec<CatalogItem>) -> CoreResult<()> {
        *self = ProductCatalog::new(items)?;
        Ok(())
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, sku: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.sku.as_str() == sku)
    }

    /// Like [`get`](Self::get) but fails with `ProductNotFound`.
    pub fn require(&self, sku: &str) -> CoreResult<&CatalogItem> {
        self.get(sku)
            .ok_or_else(|| CoreError::ProductNotFound(sku.to_string()))
    }

    /// Items in catalog order, each flagged with whether the cart holds it.
    pub fn entries(&self, cart: &CartState) -> Vec<CatalogEntry> {
        self.items
            .iter()
            .map(|item| CatalogEntry {
                item: item.clone(),
                in_cart: is_in_cart(cart, item.sku.as_str()),
            })
            .collect()
    }
}

/// Membership query: does the cart hold a line for this SKU?
pub fn is_in_cart(cart: &CartState, sku: &str) -> bool {
    cart.contains(sku)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Product Commands
//!
//! Product listing and lookup.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_products()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog items, in catalog order                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  each flagged in_cart = cart holds a line for its SKU                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<CatalogEntry> (empty catalog → empty list, never an error)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};
use widget_core::{CatalogEntry, CatalogItem};

use crate::error::ApiError;
use crate::state::{CartSession, CatalogState};

/// Lists every product with its in-cart flag.
pub fn list_products(catalog: &CatalogState, cart: &CartSession) -> Vec<CatalogEntry> {
    debug!(products = catalog.catalog().len(), "list_products command");
    catalog.catalog().entries(cart.store().state())
}

/// Looks up a single product by SKU.
///
/// ## Returns
/// * `Ok(CatalogItem)` - Product found
/// * `Err(ApiError)` - `NOT_FOUND` if the SKU is not in the catalog
pub fn get_product_by_sku(catalog: &CatalogState, sku: &str) -> Result<CatalogItem, ApiError> {
    debug!(sku = %sku, "get_product_by_sku command");

    Ok(catalog.catalog().require(sku)?.clone())
}

/// Re-reads the catalog from its source.
///
/// Lines already in the cart keep the name and price they were added with.
pub fn reload_catalog(catalog: &mut CatalogState) -> usize {
    let count = catalog.reload();
    info!(products = count, "Catalog reloaded");
    count
}

//! # widget-core: Pure Business Logic for Widget Shop
//!
//! This crate holds the cart state machine and everything derived from it,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Widget Shop Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (terminal shell)                   │   │
//! │  │      Product list ──► Cart view ──► Place order                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ widget-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   view    │  │   money   │  │   │
//! │  │   │ Products  │  │ Reducer   │  │  Totals   │  │   Money   │  │   │
//! │  │   │ In-cart?  │  │ CartStore │  │  Order    │  │  Decimal  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sku, CatalogItem, CartLine)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart state and the transition function
//! - [`store`] - CartStore, the owner of the authoritative cart state
//! - [`view`] - Derived values (totals, display order)
//! - [`catalog`] - Product catalog and the in-cart membership query
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use widget_core::{CartStore, ProductCatalog, Transition};
//!
//! let catalog = ProductCatalog::default_widgets();
//! let mut store = CartStore::new();
//!
//! let premium = catalog.require("item0002").unwrap().clone();
//! store.dispatch(Transition::Add(premium.clone())).unwrap();
//! store.dispatch(Transition::Add(premium)).unwrap();
//!
//! let view = store.view();
//! assert_eq!(view.total_items, 2);
//! assert_eq!(view.total_price.cents(), 3998);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartState, Transition, TransitionPayload, TransitionRequest};
pub use catalog::{CatalogEntry, ProductCatalog};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::CartStore;
pub use types::*;
pub use view::CartView;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Width of the numeric segment at the end of a SKU ("item0010" → 0010).
///
/// Display order sorts cart lines by this segment.
pub const SKU_SUFFIX_WIDTH: usize = 4;

/// Maximum length of a SKU.
pub const MAX_SKU_LENGTH: usize = 50;

/// Maximum length of a product name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum quantity on a single cart line.
///
/// Catches a slipped key (1000 instead of 10) and keeps the quantity picker
/// bounded.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of distinct lines in one cart.
pub const MAX_CART_LINES: usize = 100;

/// Highest accepted unit price, in cents ($1,000,000.00).
///
/// With the two limits above, the largest possible cart total is about
/// 10^13 cents, well inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

//! # State Module
//!
//! Manages application state for the shop.
//!
//! ## Why Multiple State Types?
//! Instead of a single struct containing everything, each concern has its
//! own state type. Commands declare exactly which ones they need:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigState    read-only after startup (currency, catalog path)        │
//! │  CatalogState   the product catalog and its source                      │
//! │  CartSession    the cart store and last order confirmation              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartSession, OrderConfirmation};
pub use catalog::{parse_catalog, read_catalog_file, CatalogLoadError, CatalogSource, CatalogState};
pub use config::{ConfigError, ConfigState, ENV_CATALOG_PATH, ENV_QTY_OPTIONS, ENV_STORE_NAME};

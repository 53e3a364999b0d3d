//! # Shop Commands Module
//!
//! Every operation the shell (or any other front end) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product listing, lookup, catalog reload
//! ├── cart.rs     ◄─── Cart manipulation and raw transition dispatch
//! └── order.rs    ◄─── Placing the order
//! ```
//!
//! ## State Injection
//! Each command borrows only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog and the cart (for in-cart flags)
//! fn list_products(catalog: &CatalogState, cart: &CartSession)
//!
//! // Needs the catalog to resolve the SKU, and config for quantity options
//! fn add_to_cart(catalog: &CatalogState, cart: &mut CartSession, config: &ConfigState, sku: &str)
//!
//! // Only needs the cart
//! fn place_order(cart: &mut CartSession)
//! ```
//!
//! Every command returns `Result<T, ApiError>`; on error the cart is
//! exactly as it was before the call.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{
    add_to_cart, dispatch_transition, get_cart, remove_from_cart, update_cart_item,
    CartLineResponse, CartResponse,
};
pub use order::place_order;
pub use product::{get_product_by_sku, list_products, reload_catalog};

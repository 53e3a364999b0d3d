//! # Order Commands
//!
//! Placing the order: snapshot the cart, submit it, show the thank-you
//! screen.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order()                                                          │
//! │       │                                                                 │
//! │       ├── cart empty? ──► EMPTY_CART, nothing changes                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderConfirmation { orderId, placedAt, lines, totals }                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Transition::Submit ──► cart back to its initial empty state            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartSession, OrderConfirmation};

/// Places the order for everything in the cart.
///
/// ## Returns
/// * `Ok(OrderConfirmation)` - the cart is now empty
/// * `Err(ApiError)` - `EMPTY_CART` if there is nothing to order
pub fn place_order(cart: &mut CartSession) -> Result<OrderConfirmation, ApiError> {
    debug!(lines = cart.store().state().len(), "place_order command");

    if cart.store().state().is_empty() {
        return Err(ApiError::empty_cart());
    }

    let confirmation = cart.submit()?;
    info!(
        order_id = %confirmation.order_id,
        total_items = confirmation.total_items,
        total_price = %confirmation.total_price,
        "Order placed"
    );

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_to_cart;
    use crate::error::ErrorCode;
    use crate::state::{CatalogState, ConfigState};

    #[test]
    fn test_place_order() {
        let config = ConfigState::default();
        let catalog = CatalogState::load(&config);
        let mut cart = CartSession::new();
        for sku in ["item0001", "item0002", "item0003", "item0002"] {
            add_to_cart(&catalog, &mut cart, &config, sku).unwrap();
        }

        let confirmation = place_order(&mut cart).unwrap();

        assert_eq!(confirmation.total_items, 4);
        assert_eq!(confirmation.total_price.cents(), 7996);
        assert_eq!(confirmation.lines.len(), 3);
        assert!(cart.store().state().is_empty());
        assert_eq!(cart.last_order().map(|o| o.order_id), Some(confirmation.order_id));
    }

    #[test]
    fn test_empty_cart_is_refused() {
        let mut cart = CartSession::new();
        let err = place_order(&mut cart).unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert!(cart.last_order().is_none());
    }

    #[test]
    fn test_order_ids_are_unique() {
        let config = ConfigState::default();
        let catalog = CatalogState::load(&config);
        let mut cart = CartSession::new();

        add_to_cart(&catalog, &mut cart, &config, "item0001").unwrap();
        let first = place_order(&mut cart).unwrap();
        add_to_cart(&catalog, &mut cart, &config, "item0001").unwrap();
        let second = place_order(&mut cart).unwrap();

        assert_ne!(first.order_id, second.order_id);
    }
}

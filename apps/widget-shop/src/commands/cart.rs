//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│  Thank   │                         │
//! │  │  Cart    │     │          │     │   You    │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │                        │                 │                              │
//! │                   add_to_cart       place_order                         │
//! │                   update_cart_item  (order.rs)                          │
//! │                   remove_from_cart       │                              │
//! │                        ▲                 │                              │
//! │                        └─────────────────┘                              │
//! │                         next add_to_cart                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use widget_core::{CartLine, Money, Sku, Transition, TransitionRequest};

use crate::error::ApiError;
use crate::state::{CartSession, CatalogState, ConfigState};

/// A cart line as rendered, with its subtotal and the top of its quantity
/// picker (the picker always starts at 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    #[serde(flatten)]
    pub line: CartLine,

    #[serde(with = "widget_core::money::decimal")]
    pub line_total: Money,

    pub max_quantity: i64,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Lines in display order
    pub lines: Vec<CartLineResponse>,
    pub total_items: i64,

    #[serde(with = "widget_core::money::decimal")]
    pub total_price: Money,

    /// The place-order control is only offered for a non-empty cart
    pub can_place_order: bool,
}

impl CartResponse {
    /// Builds the response from the session's current cart.
    pub fn build(cart: &CartSession, config: &ConfigState) -> Self {
        let view = cart.store().view();
        let lines = view
            .lines
            .into_iter()
            .map(|line| CartLineResponse {
                line_total: line.line_total(),
                max_quantity: *config.quantity_options(line.qty).end(),
                line,
            })
            .collect::<Vec<_>>();

        CartResponse {
            can_place_order: !lines.is_empty(),
            lines,
            total_items: view.total_items,
            total_price: view.total_price,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartSession, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::build(cart, config)
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Product not in cart: added as a new line with quantity 1
/// - Product already in cart: quantity increases by one, and the line takes
///   the catalog's current name and price
///
/// ## Returns
/// Updated cart, or `NOT_FOUND` if the SKU is not in the catalog
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &mut CartSession,
    config: &ConfigState,
    sku: &str,
) -> Result<CartResponse, ApiError> {
    debug!(sku = %sku, "add_to_cart command");

    let item = catalog.catalog().require(sku)?.clone();
    cart.dispatch(Transition::Add(item))?;

    Ok(CartResponse::build(cart, config))
}

/// Sets the quantity of a line already in the cart.
///
/// ## Behavior
/// - SKU not in the cart: `PRECONDITION_VIOLATION`
/// - Quantity below 1: `VALIDATION_ERROR` (use `remove_from_cart` instead)
/// - Quantity above 999: `VALIDATION_ERROR`
pub fn update_cart_item(
    cart: &mut CartSession,
    config: &ConfigState,
    sku: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(sku = %sku, quantity = %quantity, "update_cart_item command");

    let sku = Sku::new(sku).map_err(|e| ApiError::validation(e.to_string()))?;
    cart.dispatch(Transition::SetQuantity { sku, qty: quantity })?;

    Ok(CartResponse::build(cart, config))
}

/// Removes a line from the cart. Removing an absent SKU is not an error.
pub fn remove_from_cart(
    cart: &mut CartSession,
    config: &ConfigState,
    sku: &str,
) -> Result<CartResponse, ApiError> {
    debug!(sku = %sku, "remove_from_cart command");

    let sku = Sku::new(sku).map_err(|e| ApiError::validation(e.to_string()))?;
    cart.dispatch(Transition::Remove { sku })?;

    Ok(CartResponse::build(cart, config))
}

/// Applies a raw `{"type": ..., "payload": {...}}` transition request.
///
/// A `SUBMIT` sent this way clears the cart without producing an order
/// confirmation; use [`place_order`](super::place_order) for that.
pub fn dispatch_transition(
    cart: &mut CartSession,
    config: &ConfigState,
    raw: &str,
) -> Result<CartResponse, ApiError> {
    let request: TransitionRequest = serde_json::from_str(raw)?;
    debug!(kind = %request.kind, "dispatch_transition command");

    cart.dispatch_request(request)?;

    Ok(CartResponse::build(cart, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn fixtures() -> (CatalogState, CartSession, ConfigState) {
        let config = ConfigState::default();
        (CatalogState::load(&config), CartSession::new(), config)
    }

    #[test]
    fn test_add_and_view() {
        let (catalog, mut cart, config) = fixtures();

        add_to_cart(&catalog, &mut cart, &config, "item0003").unwrap();
        add_to_cart(&catalog, &mut cart, &config, "item0001").unwrap();
        let response = add_to_cart(&catalog, &mut cart, &config, "item0003").unwrap();

        let skus: Vec<&str> = response.lines.iter().map(|l| l.line.sku.as_str()).collect();
        assert_eq!(skus, vec!["item0001", "item0003"]);
        assert_eq!(response.lines[1].line.qty, 2);
        assert_eq!(response.lines[1].line_total.cents(), 5998);
        assert_eq!(response.total_items, 3);
        assert_eq!(response.total_price.cents(), 6997);
        assert!(response.can_place_order);
    }

    #[test]
    fn test_add_unknown_sku() {
        let (catalog, mut cart, config) = fixtures();
        let err = add_to_cart(&catalog, &mut cart, &config, "item0042").unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(cart.store().state().is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let (catalog, mut cart, config) = fixtures();
        add_to_cart(&catalog, &mut cart, &config, "item0002").unwrap();

        let response = update_cart_item(&mut cart, &config, "item0002", 5).unwrap();
        assert_eq!(response.total_items, 5);
        assert_eq!(response.total_price.cents(), 9995);
        assert_eq!(response.lines[0].max_quantity, 20);

        let err = update_cart_item(&mut cart, &config, "item0001", 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::PreconditionViolation);

        let err = update_cart_item(&mut cart, &config, "item0002", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(cart.store().total_items(), 5);
    }

    #[test]
    fn test_huge_quantity_is_rejected_without_touching_cart() {
        let (catalog, mut cart, config) = fixtures();
        add_to_cart(&catalog, &mut cart, &config, "item0001").unwrap();

        for qty in [1000, 1_000_000_000_000, i64::MAX] {
            let err = update_cart_item(&mut cart, &config, "item0001", qty).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
            assert!(err.message.contains("exceeds maximum allowed (999)"));
        }

        let response = update_cart_item(&mut cart, &config, "item0001", 999).unwrap();
        assert_eq!(response.lines[0].max_quantity, 999);
        assert_eq!(response.total_price.cents(), 999 * 999);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (catalog, mut cart, config) = fixtures();
        add_to_cart(&catalog, &mut cart, &config, "item0001").unwrap();

        let response = remove_from_cart(&mut cart, &config, "item0001").unwrap();
        assert!(response.lines.is_empty());
        assert!(!response.can_place_order);

        let response = remove_from_cart(&mut cart, &config, "item0001").unwrap();
        assert_eq!(response.total_items, 0);
    }

    #[test]
    fn test_dispatch_raw_requests() {
        let (_, mut cart, config) = fixtures();

        let response = dispatch_transition(
            &mut cart,
            &config,
            r#"{"type": "ADD", "payload": {"sku": "item0002", "name": "Premium Widget", "price": 19.99}}"#,
        )
        .unwrap();
        assert_eq!(response.total_price.cents(), 1999);

        let err = dispatch_transition(&mut cart, &config, r#"{"type": "REFUND"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownTransition);

        let err = dispatch_transition(&mut cart, &config, r#"{"type": "ADD"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);

        let err = dispatch_transition(&mut cart, &config, "not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let response = dispatch_transition(&mut cart, &config, r#"{"type": "SUBMIT"}"#).unwrap();
        assert_eq!(response.total_items, 0);
        assert!(cart.last_order().is_none());
    }

    #[test]
    fn test_response_json() {
        let (catalog, mut cart, config) = fixtures();
        let response = add_to_cart(&catalog, &mut cart, &config, "item0001").unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["lines"][0]["sku"], "item0001");
        assert_eq!(json["lines"][0]["lineTotal"], 9.99);
        assert_eq!(json["lines"][0]["maxQuantity"], 20);
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["totalPrice"], 9.99);
        assert_eq!(json["canPlaceOrder"], true);
    }
}

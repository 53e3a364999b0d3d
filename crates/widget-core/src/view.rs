//! # Derived Cart Views
//!
//! Values computed from a [`CartState`] on demand, never stored.
//!
//! ```text
//! totalItems   = Σ line.qty
//! totalPrice   = Σ line.qty × line.price          (raw Money, not formatted)
//! displayOrder = lines stably sorted by the SKU's numeric suffix
//! ```
//!
//! A SKU without a numeric suffix is never read as zero. Such lines sort
//! after every numbered line and keep their insertion order among
//! themselves.
//!
//! Re-adding a line or changing its quantity does not move it; ties keep
//! first-insertion order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartState;
use crate::money::Money;
use crate::types::CartLine;

/// Total quantity across all lines.
pub fn total_items(state: &CartState) -> i64 {
    state.lines().iter().map(|line| line.qty).sum()
}

/// Sum of `qty × price` across all lines.
pub fn total_price(state: &CartState) -> Money {
    state.lines().iter().map(|line| line.line_total()).sum()
}

/// Lines sorted for display.
///
/// Starts from insertion order and applies a stable sort, so lines with
/// equal suffixes keep the order in which they entered the cart.
pub fn display_order(state: &CartState) -> Vec<&CartLine> {
    let mut lines = state.lines();
    lines.sort_by_key(|line| match line.sku.numeric_suffix() {
        Some(suffix) => (false, suffix),
        None => (true, 0),
    });
    lines
}

/// Snapshot of everything a cart view renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartView {
    /// Lines in display order.
    pub lines: Vec<CartLine>,

    pub total_items: i64,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total_price: Money,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        CartView {
            lines: display_order(state).into_iter().cloned().collect(),
            total_items: total_items(state),
            total_price: total_price(state),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Transition;
    use crate::types::{CatalogItem, Sku};

    fn item(sku: &str, cents: i64) -> CatalogItem {
        CatalogItem::new(sku, &format!("Product {sku}"), Money::from_cents(cents)).unwrap()
    }

    fn apply_all(transitions: Vec<Transition>) -> CartState {
        transitions
            .into_iter()
            .fold(CartState::new(), |state, t| state.apply(t).unwrap())
    }

    fn skus(lines: &[&CartLine]) -> Vec<String> {
        lines.iter().map(|l| l.sku.to_string()).collect()
    }

    #[test]
    fn test_empty_cart_totals() {
        let state = CartState::new();
        assert_eq!(total_items(&state), 0);
        assert_eq!(total_price(&state), Money::zero());
        assert!(CartView::from(&state).is_empty());
    }

    #[test]
    fn test_double_add_premium_widget() {
        let premium = item("item0002", 1999);
        let state = apply_all(vec![
            Transition::Add(premium.clone()),
            Transition::Add(premium),
        ]);

        let view = CartView::from(&state);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].qty, 2);
        assert_eq!(view.total_items, 2);
        assert_eq!(view.total_price.cents(), 3998);
    }

    #[test]
    fn test_set_quantity_totals() {
        let deluxe = item("item0003", 2999);
        let state = apply_all(vec![
            Transition::Add(item("item0001", 999)),
            Transition::Add(deluxe.clone()),
            Transition::Add(deluxe),
            Transition::SetQuantity {
                sku: Sku::new("item0001").unwrap(),
                qty: 5,
            },
        ]);

        assert_eq!(total_items(&state), 7);
        assert_eq!(total_price(&state).cents(), 10993);
    }

    #[test]
    fn test_remove_last_line_zeroes_totals() {
        let widget = item("item0001", 999);
        let state = apply_all(vec![
            Transition::Add(widget.clone()),
            Transition::Add(widget.clone()),
            Transition::Add(widget),
            Transition::Remove {
                sku: Sku::new("item0001").unwrap(),
            },
        ]);

        assert_eq!(total_items(&state), 0);
        assert!(total_price(&state).is_zero());
    }

    #[test]
    fn test_totals_match_line_sums() {
        let catalog = [
            item("item0001", 999),
            item("item0002", 1999),
            item("item0003", 2999),
            item("item0010", 0),
        ];

        let mut state = CartState::new();
        for round in 0..20 {
            let picked = catalog[round % catalog.len()].clone();
            state = state.apply(Transition::Add(picked)).unwrap();

            let lines = state.lines();
            let qty_sum: i64 = lines.iter().map(|l| l.qty).sum();
            let price_sum: i64 = lines.iter().map(|l| l.qty * l.price.cents()).sum();
            assert_eq!(total_items(&state), qty_sum);
            assert_eq!(total_price(&state).cents(), price_sum);
        }
    }

    #[test]
    fn test_display_order_sorts_by_numeric_suffix() {
        let state = apply_all(vec![
            Transition::Add(item("item0010", 100)),
            Transition::Add(item("item0002", 100)),
            Transition::Add(item("item0001", 100)),
        ]);

        assert_eq!(
            skus(&display_order(&state)),
            vec!["item0001", "item0002", "item0010"]
        );
    }

    #[test]
    fn test_display_order_is_stable_for_equal_suffixes() {
        let state = apply_all(vec![
            Transition::Add(item("blue0007", 100)),
            Transition::Add(item("item0001", 100)),
            Transition::Add(item("red0007", 100)),
            Transition::Add(item("green0007", 100)),
        ]);

        assert_eq!(
            skus(&display_order(&state)),
            vec!["item0001", "blue0007", "red0007", "green0007"]
        );
    }

    #[test]
    fn test_display_order_ties_ignore_later_updates() {
        let state = apply_all(vec![
            Transition::Add(item("blue0007", 100)),
            Transition::Add(item("red0007", 100)),
            Transition::Add(item("blue0007", 150)),
            Transition::SetQuantity {
                sku: Sku::new("blue0007").unwrap(),
                qty: 4,
            },
        ]);

        assert_eq!(skus(&display_order(&state)), vec!["blue0007", "red0007"]);
    }

    #[test]
    fn test_largest_possible_cart_total_is_exact() {
        use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

        let mut state = CartState::new();
        for n in 0..MAX_CART_LINES {
            let sku = format!("item{:04}", n);
            state = state
                .apply(Transition::Add(item(&sku, MAX_PRICE_CENTS)))
                .unwrap()
                .apply(Transition::SetQuantity {
                    sku: Sku::new(sku).unwrap(),
                    qty: MAX_ITEM_QUANTITY,
                })
                .unwrap();
        }

        let lines = MAX_CART_LINES as i64;
        assert_eq!(total_items(&state), lines * MAX_ITEM_QUANTITY);
        assert_eq!(
            total_price(&state).cents(),
            lines * MAX_ITEM_QUANTITY * MAX_PRICE_CENTS
        );
    }

    #[test]
    fn test_display_order_puts_unnumbered_skus_last() {
        let state = apply_all(vec![
            Transition::Add(item("gizmo", 100)),
            Transition::Add(item("item0003", 100)),
            Transition::Add(item("gadget", 100)),
            Transition::Add(item("item0000", 100)),
        ]);

        assert_eq!(
            skus(&display_order(&state)),
            vec!["item0000", "item0003", "gizmo", "gadget"]
        );
    }

    #[test]
    fn test_view_serializes_camel_case_decimal_total() {
        let state = apply_all(vec![Transition::Add(item("item0001", 999))]);
        let json = serde_json::to_value(CartView::from(&state)).unwrap();

        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["totalPrice"], 9.99);
        assert_eq!(json["lines"][0]["sku"], "item0001");
    }
}

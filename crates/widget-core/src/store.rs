//! # Cart Store
//!
//! Owns the authoritative [`CartState`] and is the only place it changes.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller ── Transition ──► CartStore::dispatch                           │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                    state.apply(transition)                              │
//! │                          │            │                                 │
//! │                       Ok(next)      Err(e)                              │
//! │                          │            │                                 │
//! │              state = next        state untouched, error returned        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │              views recomputed from the new snapshot                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `dispatch` takes `&mut self`, so one transition always completes before
//! the next can start. No lock is involved.

use crate::cart::{CartState, Transition, TransitionRequest};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::CartLine;
use crate::view::{self, CartView};

/// Owner of the cart state.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    state: CartState,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Read-only access to the current snapshot.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Applies a transition. On error the current state is kept.
    pub fn dispatch(&mut self, transition: Transition) -> CoreResult<&CartState> {
        self.state = self.state.apply(transition)?;
        Ok(&self.state)
    }

    /// Parses and applies a wire request.
    pub fn dispatch_request(&mut self, request: TransitionRequest) -> CoreResult<&CartState> {
        self.dispatch(Transition::try_from(request)?)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.state.contains(sku)
    }

    pub fn total_items(&self) -> i64 {
        view::total_items(&self.state)
    }

    pub fn total_price(&self) -> Money {
        view::total_price(&self.state)
    }

    pub fn display_order(&self) -> Vec<&CartLine> {
        view::display_order(&self.state)
    }

    /// Full derived snapshot for rendering.
    pub fn view(&self) -> CartView {
        CartView::from(&self.state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{TransitionPayload, ADD, QUANTITY};
    use crate::error::CoreError;
    use crate::types::{CatalogItem, Sku};

    fn widget() -> CatalogItem {
        CatalogItem::new("item0001", "Widget", Money::from_cents(999)).unwrap()
    }

    #[test]
    fn test_dispatch_updates_state() {
        let mut store = CartStore::new();
        store.dispatch(Transition::Add(widget())).unwrap();
        store.dispatch(Transition::Add(widget())).unwrap();

        assert!(store.contains("item0001"));
        assert_eq!(store.total_items(), 2);
        assert_eq!(store.total_price().cents(), 1998);
    }

    #[test]
    fn test_failed_dispatch_keeps_state() {
        let mut store = CartStore::new();
        store.dispatch(Transition::Add(widget())).unwrap();
        let before = store.state().clone();

        let err = store
            .dispatch(Transition::SetQuantity {
                sku: Sku::new("item9999").unwrap(),
                qty: 4,
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::PreconditionViolation { .. }));
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_dispatch_request_errors_keep_state() {
        let mut store = CartStore::new();
        store.dispatch(Transition::Add(widget())).unwrap();
        let before = store.state().clone();

        assert!(store
            .dispatch_request(TransitionRequest::new(ADD, None))
            .is_err());
        assert!(store
            .dispatch_request(TransitionRequest::new("EMPTY", None))
            .is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_dispatch_request_quantity() {
        let mut store = CartStore::new();
        store.dispatch(Transition::Add(widget())).unwrap();

        let payload = TransitionPayload {
            sku: Some("item0001".to_string()),
            qty: Some(3),
            ..Default::default()
        };
        store
            .dispatch_request(TransitionRequest::new(QUANTITY, Some(payload)))
            .unwrap();

        assert_eq!(store.view().total_items, 3);
    }

    #[test]
    fn test_submit_empties_store() {
        let mut store = CartStore::new();
        store.dispatch(Transition::Add(widget())).unwrap();
        store.dispatch(Transition::Submit).unwrap();

        assert_eq!(store.state(), &CartState::new());
        assert!(store.display_order().is_empty());
        assert!(store.view().is_empty());
    }
}

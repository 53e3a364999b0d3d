//! # Cart Session
//!
//! Wraps the core [`CartStore`] with what the shell needs between commands:
//! the confirmation of the last order placed.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  Shell Action           Command                Transition               │
//! │  ────────────           ───────                ──────────               │
//! │                                                                         │
//! │  add <sku> ───────────► add_to_cart() ───────► Add(item)                │
//! │                                                                         │
//! │  qty <sku> <n> ───────► update_cart_item() ──► SetQuantity(sku, n)      │
//! │                                                                         │
//! │  remove <sku> ────────► remove_from_cart() ──► Remove(sku)              │
//! │                                                                         │
//! │  order ───────────────► place_order() ───────► Submit                   │
//! │                                                                         │
//! │  cart ────────────────► get_cart() ──────────► (read only)              │
//! │                                                                         │
//! │  NOTE: every write goes through CartSession::dispatch, which takes     │
//! │        &mut self; transitions never overlap.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use widget_core::{CartLine, CartState, CartStore, CoreResult, Money, Transition, TransitionRequest};

/// Record of a placed order, shown as the "thank you" screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,

    /// Lines in display order at the moment of submission.
    pub lines: Vec<CartLine>,
    pub total_items: i64,

    #[serde(with = "widget_core::money::decimal")]
    pub total_price: Money,
}

/// The shopper's cart plus the last order confirmation.
#[derive(Debug, Default)]
pub struct CartSession {
    store: CartStore,
    last_order: Option<OrderConfirmation>,
}

impl CartSession {
    /// Creates a session with an empty cart.
    pub fn new() -> Self {
        CartSession::default()
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Applies a transition to the cart.
    ///
    /// Any successful change other than `Submit` starts a new shopping trip,
    /// so the previous confirmation is dropped.
    pub fn dispatch(&mut self, transition: Transition) -> CoreResult<&CartState> {
        let submitting = matches!(transition, Transition::Submit);
        self.store.dispatch(transition)?;
        if !submitting {
            self.last_order = None;
        }
        Ok(self.store.state())
    }

    /// Applies a raw wire request.
    pub fn dispatch_request(&mut self, request: TransitionRequest) -> CoreResult<&CartState> {
        self.dispatch(Transition::try_from(request)?)
    }

    /// Submits the cart and stores the confirmation.
    pub fn submit(&mut self) -> CoreResult<OrderConfirmation> {
        let view = self.store.view();
        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            lines: view.lines,
            total_items: view.total_items,
            total_price: view.total_price,
        };

        self.dispatch(Transition::Submit)?;
        self.last_order = Some(confirmation.clone());
        Ok(confirmation)
    }

    pub fn last_order(&self) -> Option<&OrderConfirmation> {
        self.last_order.as_ref()
    }
}

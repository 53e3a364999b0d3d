//! # Cart State Machine
//!
//! The cart reducer: a pure function from `(CartState, Transition)` to the
//! next `CartState`.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Transition            Line present?        Result                      │
//! │  ──────────            ─────────────        ──────                      │
//! │                                                                         │
//! │  Add(item)             yes                  qty + 1 (name/price from    │
//! │                                             the item), at most 999      │
//! │                        no                   new line, qty 1             │
//! │                                                                         │
//! │  Remove(sku)           yes                  line deleted                │
//! │                        no                   unchanged (no-op)           │
//! │                                                                         │
//! │  SetQuantity(sku, n)   yes                  qty = n (1..=999)           │
//! │                        no                   PreconditionViolation       │
//! │                                                                         │
//! │  Submit                -                    empty cart                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Remove is lenient and SetQuantity is strict. Quantity controls only
//! exist on rendered lines, so an update for a missing line is a caller bug.
//!
//! ## Wire Shape
//! Presentation layers send `{ "type": "ADD", "payload": { ... } }`.
//! [`TransitionRequest`] is that shape; converting it into the closed
//! [`Transition`] enum is where missing payloads and unknown tags surface.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CatalogItem, Sku};
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

// =============================================================================
// Transition Tags
// =============================================================================

pub const ADD: &str = "ADD";
pub const REMOVE: &str = "REMOVE";
pub const QUANTITY: &str = "QUANTITY";
pub const SUBMIT: &str = "SUBMIT";

// =============================================================================
// Transition
// =============================================================================

/// A request to change the cart, carrying only what its variant needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Add one unit of a catalog item.
    Add(CatalogItem),

    /// Delete the line for a SKU, if any.
    Remove { sku: Sku },

    /// Replace the quantity of an existing line.
    SetQuantity { sku: Sku, qty: i64 },

    /// Order placed: empty the cart.
    Submit,
}

impl Transition {
    /// Returns the wire tag for this transition.
    pub const fn kind(&self) -> &'static str {
        match self {
            Transition::Add(_) => ADD,
            Transition::Remove { .. } => REMOVE,
            Transition::SetQuantity { .. } => QUANTITY,
            Transition::Submit => SUBMIT,
        }
    }
}

// =============================================================================
// Transition Request (wire shape)
// =============================================================================

/// Loosely typed transition as sent by a presentation layer.
///
/// ```json
/// { "type": "QUANTITY", "payload": { "sku": "item0001", "qty": 5 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<TransitionPayload>,
}

/// Payload of a [`TransitionRequest`]. Every field is optional on the wire;
/// each transition checks for the fields it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::money::decimal::option"
    )]
    pub price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
}

impl TransitionRequest {
    /// Creates a request with the given tag and payload.
    pub fn new(kind: impl Into<String>, payload: Option<TransitionPayload>) -> Self {
        TransitionRequest {
            kind: kind.into(),
            payload,
        }
    }
}

impl TryFrom<TransitionRequest> for Transition {
    type Error = CoreError;

    fn try_from(request: TransitionRequest) -> CoreResult<Self> {
        let TransitionRequest { kind, payload } = request;

        match kind.as_str() {
            ADD => {
                let payload = require(payload, ADD, "payload")?;
                let sku = require(payload.sku, ADD, "sku")?;
                let name = require(payload.name, ADD, "name")?;
                let price = require(payload.price, ADD, "price")?;
                Ok(Transition::Add(CatalogItem::new(&sku, &name, price)?))
            }
            REMOVE => {
                let payload = require(payload, REMOVE, "payload")?;
                let sku = require(payload.sku, REMOVE, "sku")?;
                Ok(Transition::Remove { sku: Sku::new(sku)? })
            }
            QUANTITY => {
                let payload = require(payload, QUANTITY, "payload")?;
                let sku = require(payload.sku, QUANTITY, "sku")?;
                let qty = require(payload.qty, QUANTITY, "qty")?;
                Ok(Transition::SetQuantity {
                    sku: Sku::new(sku)?,
                    qty,
                })
            }
            SUBMIT => Ok(Transition::Submit),
            _ => Err(CoreError::UnknownTransition(kind)),
        }
    }
}

fn require<T>(value: Option<T>, transition: &'static str, field: &'static str) -> CoreResult<T> {
    value.ok_or(CoreError::InvalidTransition { transition, field })
}

// =============================================================================
// Cart State
// =============================================================================

/// A line plus the order in which its SKU entered the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    seq: u64,
    line: CartLine,
}

/// Immutable snapshot of the cart.
///
/// ## Invariants
/// - Lines are keyed by SKU, so there is at most one line per SKU
/// - Every line has `qty >= 1`
/// - Every line has `1 <= qty <= MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_LINES` lines
/// - Replacing a line keeps its insertion position
///
/// Two snapshots are equal when they hold the same lines in the same
/// order; the internal sequence counter does not take part.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    lines: BTreeMap<Sku, Slot>,
    next_seq: u64,
}

impl PartialEq for CartState {
    fn eq(&self, other: &Self) -> bool {
        self.lines() == other.lines()
    }
}

impl Eq for CartState {}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line for a SKU.
    pub fn get(&self, sku: &str) -> Option<&CartLine> {
        self.lines.get(sku).map(|slot| &slot.line)
    }

    /// Membership query: is there a line for this SKU?
    pub fn contains(&self, sku: &str) -> bool {
        self.lines.contains_key(sku)
    }

    /// Lines in the order their SKUs were first added.
    pub fn lines(&self) -> Vec<&CartLine> {
        let mut slots: Vec<&Slot> = self.lines.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.line).collect()
    }

    /// Applies a transition, returning the next snapshot.
    ///
    /// `self` is never modified, so a failed transition leaves the caller's
    /// state exactly as it was.
    pub fn apply(&self, transition: Transition) -> CoreResult<CartState> {
        match transition {
            Transition::Add(item) => self.with_added(item),
            Transition::Remove { sku } => Ok(self.without(&sku)),
            Transition::SetQuantity { sku, qty } => self.with_quantity(&sku, qty),
            Transition::Submit => Ok(CartState::new()),
        }
    }

    /// Parses a wire request and applies it.
    pub fn reduce(&self, request: TransitionRequest) -> CoreResult<CartState> {
        self.apply(Transition::try_from(request)?)
    }

    fn with_added(&self, item: CatalogItem) -> CoreResult<CartState> {
        let mut next = self.clone();

        match next.lines.entry(item.sku.clone()) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                if slot.line.qty >= MAX_ITEM_QUANTITY {
                    return Err(CoreError::QuantityTooLarge {
                        requested: slot.line.qty.saturating_add(1),
                        max: MAX_ITEM_QUANTITY,
                    });
                }
                slot.line = CartLine {
                    qty: slot.line.qty + 1,
                    ..CartLine::from_item(&item)
                };
            }
            Entry::Vacant(entry) => {
                if self.lines.len() >= MAX_CART_LINES {
                    return Err(CoreError::CartTooLarge {
                        max: MAX_CART_LINES,
                    });
                }
                entry.insert(Slot {
                    seq: next.next_seq,
                    line: CartLine::from_item(&item),
                });
                next.next_seq += 1;
            }
        }

        Ok(next)
    }

    fn without(&self, sku: &Sku) -> CartState {
        if !self.contains(sku.as_str()) {
            return self.clone();
        }

        let mut next = self.clone();
        next.lines.remove(sku.as_str());
        next
    }

    fn with_quantity(&self, sku: &Sku, qty: i64) -> CoreResult<CartState> {
        if !self.contains(sku.as_str()) {
            return Err(CoreError::PreconditionViolation {
                sku: sku.to_string(),
            });
        }
        validate_quantity(qty)?;

        let mut next = self.clone();
        if let Some(slot) = next.lines.get_mut(sku.as_str()) {
            slot.line.qty = qty;
        }
        Ok(next)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

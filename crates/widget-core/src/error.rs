//! # Error Types
//!
//! Domain-specific error types for widget-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  widget-core errors (this file)                                        │
//! │  ├── CoreError        - Transition and catalog failures                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  widget-shop errors (app)                                              │
//! │  └── ApiError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Shell                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transition Errors
//! `InvalidTransition`, `PreconditionViolation` and `UnknownTransition` are
//! caller bugs, not user-facing conditions. They end the offending
//! operation and leave the cart untouched; nothing retries them.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A transition arrived without the payload (or payload field) it needs.
    ///
    /// ## When This Occurs
    /// - `{"type": "ADD"}` with no payload
    /// - `{"type": "QUANTITY", "payload": {"sku": "item0001"}}` (no qty)
    #[error("{field} missing in {transition} transition")]
    InvalidTransition {
        transition: &'static str,
        field: &'static str,
    },

    /// A quantity update targeted a line that is not in the cart.
    ///
    /// Quantity controls are bound to rendered lines, so this means the
    /// caller referenced a line that has already disappeared.
    #[error("Item {sku} must exist in the cart to update its quantity")]
    PreconditionViolation { sku: String },

    /// A line would hold more than `MAX_ITEM_QUANTITY` units.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Adding a new SKU would exceed `MAX_CART_LINES` lines.
    #[error("Cart cannot have more than {max} different items")]
    CartTooLarge { max: usize },

    /// The transition tag is not one the cart understands.
    #[error("Unidentified transition type: {0}")]
    UnknownTransition(String),

    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A field value that failed its rule.
///
/// Raised while building catalog items and decoding transition payloads,
/// before the reducer ever sees the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Prices: zero is fine, below zero is not.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Quantities: a line always holds at least one unit.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Prices above `MAX_PRICE_CENTS`.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: String },

    /// Malformed SKU characters or decimal amounts.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A second catalog item reusing a SKU.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

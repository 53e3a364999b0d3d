//! # API Error Type
//!
//! Unified error type for shop commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Widget Shop                            │
//! │                                                                         │
//! │  Shell                       Commands                                   │
//! │  ─────                       ────────                                   │
//! │                                                                         │
//! │  > qty item0009 3                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Transition Error? ─── CoreError::PreconditionViolation ──┐     │  │
//! │  │         │                                                  │     │  │
//! │  │         ▼                                                  ▼     │  │
//! │  │  Validation Error? ─── CoreError::Validation ──────── ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  error [PRECONDITION_VIOLATION]: Item item0009 must exist in the cart  │
//! │  to update its quantity                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are serializable so `dispatch` callers get the same
//! `{code, message}` shape as JSON.

use serde::Serialize;
use widget_core::CoreError;

/// Error returned from shop commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: item0042"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product is not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Transition payload missing or malformed
    InvalidTransition,

    /// Quantity update for a line not in the cart
    PreconditionViolation,

    /// Transition tag not recognised
    UnknownTransition,

    /// Order placed with nothing in the cart
    EmptyCart,

    /// The cart is full
    CartError,
}

impl ErrorCode {
    /// The serialized form, for text output.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidTransition => "INVALID_TRANSITION",
            ErrorCode::PreconditionViolation => "PRECONDITION_VIOLATION",
            ErrorCode::UnknownTransition => "UNKNOWN_TRANSITION",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::CartError => "CART_ERROR",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Refusal to place an order for an empty cart.
    pub fn empty_cart() -> Self {
        ApiError::new(ErrorCode::EmptyCart, "Cannot place an order: the cart is empty")
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotFound(sku) => ApiError::not_found("Product", &sku),
            CoreError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::InvalidTransition, message)
            }
            CoreError::PreconditionViolation { .. } => {
                ApiError::new(ErrorCode::PreconditionViolation, message)
            }
            CoreError::UnknownTransition(_) => {
                ApiError::new(ErrorCode::UnknownTransition, message)
            }
            CoreError::QuantityTooLarge { .. } => ApiError::validation(message),
            CoreError::CartTooLarge { .. } => ApiError::new(ErrorCode::CartError, message),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Malformed `dispatch` input never reaches the reducer.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::validation(format!("Malformed transition request: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use widget_core::ValidationError;

    #[test]
    fn test_core_error_codes() {
        let cases = [
            (
                CoreError::ProductNotFound("item0042".to_string()),
                ErrorCode::NotFound,
            ),
            (
                CoreError::InvalidTransition {
                    transition: "ADD",
                    field: "payload",
                },
                ErrorCode::InvalidTransition,
            ),
            (
                CoreError::PreconditionViolation {
                    sku: "item0009".to_string(),
                },
                ErrorCode::PreconditionViolation,
            ),
            (
                CoreError::UnknownTransition("REFUND".to_string()),
                ErrorCode::UnknownTransition,
            ),
            (
                CoreError::QuantityTooLarge {
                    requested: 1000,
                    max: 999,
                },
                ErrorCode::ValidationError,
            ),
            (CoreError::CartTooLarge { max: 100 }, ErrorCode::CartError),
            (
                CoreError::Validation(ValidationError::MustBePositive {
                    field: "qty".to_string(),
                }),
                ErrorCode::ValidationError,
            ),
        ];

        for (core, code) in cases {
            assert_eq!(ApiError::from(core).code, code);
        }
    }

    #[test]
    fn test_messages_pass_through() {
        let err = ApiError::from(CoreError::UnknownTransition("REFUND".to_string()));
        assert_eq!(err.message, "Unidentified transition type: REFUND");
        assert_eq!(
            err.to_string(),
            "[UNKNOWN_TRANSITION] Unidentified transition type: REFUND"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::empty_cart()).unwrap();
        assert_eq!(json["code"], "EMPTY_CART");
        assert!(json["message"].as_str().unwrap().contains("empty"));
    }
}

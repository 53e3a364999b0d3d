//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    5 × 9.99 + 2 × 29.99 = 109.92999999999999  ❌ WRONG!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    5 × 999 + 2 × 2999 = 10993 cents = $109.93                          │
//! │                                                                         │
//! │  On the wire, amounts are decimals ("9.99", 9.99). They are read into  │
//! │  a `rust_decimal::Decimal` and rescaled to cents exactly.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use widget_core::money::Money;
//!
//! let price = Money::from_cents(999);     // $9.99
//! let parsed: Money = "9.99".parse().unwrap();
//! assert_eq!(price, parsed);
//!
//! let line_total = price.multiply_quantity(5);
//! assert_eq!(line_total.cents(), 4995);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Minor units per major unit (cents per dollar).
const MINOR_PER_MAJOR: i64 = 100;

/// Decimal scale of a cent amount.
const CENT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// An amount in cents.
///
/// Negative prices are rejected by [`crate::validation::validate_price`]
/// before they reach a cart. Plain serde writes the cent count; fields that
/// travel as decimal numbers use [`decimal`].
///
/// ## Overflow
/// Cart bounds (`MAX_PRICE_CENTS`, `MAX_ITEM_QUANTITY`, `MAX_CART_LINES`)
/// keep every line total and cart total far inside `i64`. Arithmetic
/// saturates instead of panicking or wrapping, so a value outside those
/// bounds still cannot crash a render.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Unit price times quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Converts a decimal amount of major units into cents.
    ///
    /// Trailing zeros are ignored ("9.990" is 999 cents); any significant
    /// digit past the cent is an error, as is an amount beyond `i64` cents.
    pub fn from_decimal(amount: Decimal) -> Result<Self, ValidationError> {
        let mut amount = amount.normalize();
        if amount.scale() > CENT_SCALE {
            return Err(invalid_amount("at most 2 decimal places are allowed"));
        }
        amount.rescale(CENT_SCALE);

        i64::try_from(amount.mantissa())
            .map(Money)
            .map_err(|_| invalid_amount("amount is too large"))
    }

    /// The amount as a decimal of major units (`999` → `9.99`).
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, CENT_SCALE)
    }
}

fn invalid_amount(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$9.99`, for logs. User-facing text goes through the configured
/// currency formatter instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

/// Parses `"9.99"`, `"10"`, `"-5.50"`. Exponents and currency symbols are
/// rejected.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| invalid_amount(&e.to_string()))?;
        Money::from_decimal(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Decimal Serde
// =============================================================================

/// Serde adapter for prices that travel as decimal numbers (`9.99`).
///
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
///
/// Reads a JSON number or string through [`Decimal`]'s deserializer and
/// converts it with [`Money::from_decimal`]. Writes `Decimal::new(cents, 2)`
/// as a JSON number.
pub mod decimal {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&money.to_decimal(), serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::from_decimal(amount).map_err(D::Error::custom)
    }

    /// Same adapter for optional fields; pair it with `#[serde(default)]`.
    pub mod option {
        use rust_decimal::Decimal;
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::Money;

        pub fn serialize<S>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match money {
                Some(money) => super::serialize(money, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<Decimal>::deserialize(deserializer)?
                .map(Money::from_decimal)
                .transpose()
                .map_err(D::Error::custom)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

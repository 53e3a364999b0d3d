//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`WIDGET_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use widget_core::{Money, MAX_ITEM_QUANTITY};

/// Environment variable naming the store.
pub const ENV_STORE_NAME: &str = "WIDGET_STORE_NAME";

/// Environment variable pointing at a JSON catalog file.
pub const ENV_CATALOG_PATH: &str = "WIDGET_CATALOG_PATH";

/// Environment variable overriding the quantity picker floor.
pub const ENV_QTY_OPTIONS: &str = "WIDGET_QTY_OPTIONS";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in the shell banner)
    pub store_name: String,

    /// Currency code (ISO 4217); display only
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Where to read the catalog from; `None` means the built-in widgets
    pub catalog_path: Option<PathBuf>,

    /// Cart lines offer quantities `1..=max(floor, qty)`
    pub quantity_picker_floor: i64,
}

impl Default for ConfigState {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - Store: "Widget Shop"
    /// - Currency: USD ($)
    /// - Catalog: built-in widgets
    /// - Quantity picker: 1-20
    fn default() -> Self {
        ConfigState {
            store_name: "Widget Shop".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            catalog_path: None,
            quantity_picker_floor: 20,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `WIDGET_STORE_NAME`: Override store name
    /// - `WIDGET_CATALOG_PATH`: Load the catalog from a JSON file
    /// - `WIDGET_QTY_OPTIONS`: Quantity picker floor (integer, 1 to 999)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup(ENV_STORE_NAME) {
            let store_name = store_name.trim();
            if !store_name.is_empty() {
                config.store_name = store_name.to_string();
            }
        }

        if let Some(path) = lookup(ENV_CATALOG_PATH) {
            if !path.trim().is_empty() {
                config.catalog_path = Some(PathBuf::from(path.trim()));
            }
        }

        if let Some(floor) = lookup(ENV_QTY_OPTIONS) {
            config.quantity_picker_floor = floor
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|floor| (1..=MAX_ITEM_QUANTITY).contains(floor))
                .ok_or_else(|| ConfigError::InvalidValue(ENV_QTY_OPTIONS.to_string()))?;
        }

        Ok(config)
    }

    /// Formats money en-US style: `$1,234.56`.
    ///
    /// ## Example
    /// ```rust
    /// use widget_core::Money;
    /// use widget_shop_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "$1,234.56");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let digits = amount.dollars().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            grouped,
            amount.cents_part()
        )
    }

    /// Quantities a cart line may be set to, given its current quantity.
    ///
    /// `1..=max(floor, qty)`, never past `MAX_ITEM_QUANTITY`.
    pub fn quantity_options(&self, current_qty: i64) -> RangeInclusive<i64> {
        let max = self
            .quantity_picker_floor
            .max(current_qty)
            .min(MAX_ITEM_QUANTITY);
        1..=max
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

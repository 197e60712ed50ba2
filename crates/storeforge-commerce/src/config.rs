//! Cart configuration.

use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Storage key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Cart store configuration.
///
/// Every field has a default, so an empty `[cart]` table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the cart state is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Currency all line items are priced in.
    #[serde(default)]
    pub currency: Currency,

    /// Quantity cap for a single line item.
    #[serde(default = "default_max_quantity")]
    pub max_quantity_per_item: i64,

    /// Emit user-visible notifications for cart commands.
    #[serde(default = "default_true")]
    pub notifications: bool,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_max_quantity() -> i64 {
    MAX_QUANTITY_PER_ITEM
}

fn default_true() -> bool {
    true
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            currency: Currency::default(),
            max_quantity_per_item: default_max_quantity(),
            notifications: true,
        }
    }
}

impl CartConfig {
    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the per-item quantity cap.
    pub fn with_max_quantity(mut self, max: i64) -> Self {
        self.max_quantity_per_item = max;
        self
    }

    /// Enable or disable notifications.
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications = enabled;
        self
    }

    /// Reducer limits derived from this config.
    pub fn limits(&self) -> CartLimits {
        CartLimits {
            currency: self.currency,
            max_quantity_per_item: self.max_quantity_per_item.max(1),
        }
    }
}

/// The subset of configuration the pure reducer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLimits {
    /// Currency totals are computed in.
    pub currency: Currency,
    /// Quantity cap for a single line item (always at least 1).
    pub max_quantity_per_item: i64,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartConfig::default().limits()
    }
}

//! Cart state and its derived fields.

use std::collections::HashMap;

use crate::cart::LineItem;
use crate::config::CartLimits;
use crate::error::CommerceError;
use crate::ids::{ProductId, StoreKey};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The whole cart across every storefront in one profile.
///
/// `total` and `item_count` are derived from `items` and recomputed by every
/// constructor, so they can never go stale. The composite key
/// `(product_id, store_key)` is unique across `items`, and every quantity is
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCartState")]
pub struct CartState {
    items: Vec<LineItem>,
    total: Money,
    item_count: i64,
}

/// Wire shape accepted on deserialization, normalized into a [`CartState`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCartState {
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    total: Option<Money>,
}

impl From<RawCartState> for CartState {
    fn from(raw: RawCartState) -> Self {
        let currency = raw
            .total
            .map(|t| t.currency)
            .or_else(|| raw.items.first().map(|i| i.unit_price.currency))
            .unwrap_or_default();
        normalize(raw.items, currency, None)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::empty(Currency::default())
    }
}

impl CartState {
    /// An empty cart priced in `currency`.
    pub fn empty(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(currency),
            item_count: 0,
        }
    }

    /// Build a cart from arbitrary lines, enforcing every invariant.
    ///
    /// Lines with a non-positive quantity, a negative price or a foreign
    /// currency are dropped; duplicate keys are merged into the first
    /// occurrence; quantities are clamped to the per-item cap. Lines that
    /// would push `total` or `item_count` past `i64::MAX` are dropped too.
    pub fn from_items(items: Vec<LineItem>, limits: &CartLimits) -> Self {
        normalize(items, limits.currency, Some(limits.max_quantity_per_item))
    }

    /// Re-apply `limits` to an existing state (used after loading).
    pub fn normalized(self, limits: &CartLimits) -> Self {
        Self::from_items(self.items, limits)
    }

    /// Recompute derived fields for lines that already satisfy the key and
    /// quantity invariants.
    ///
    /// Fails with [`CommerceError::Overflow`] rather than store a total that
    /// is not the exact sum of its lines.
    pub(crate) fn try_from_normalized(
        items: Vec<LineItem>,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        let (total_cents, item_count) = checked_totals(&items).ok_or(CommerceError::Overflow)?;
        Ok(Self {
            items,
            total: Money::new(total_cents, currency),
            item_count,
        })
    }

    /// Every line, in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of `unit_price * quantity` over every line.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of quantities over every line.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Currency the cart is priced in.
    pub fn currency(&self) -> Currency {
        self.total.currency
    }

    /// Check if the cart holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by its composite key.
    pub fn find(&self, product_id: ProductId, store_key: &StoreKey) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(product_id, store_key))
    }

    /// Lines for one storefront, preserving relative order.
    pub fn items_for_store(&self, store_key: &str) -> Vec<&LineItem> {
        self.items
            .iter()
            .filter(|i| i.store_key.as_str() == store_key)
            .collect()
    }

    /// Sum of `unit_price * quantity` over one storefront's lines.
    pub fn total_for_store(&self, store_key: &str) -> Money {
        let cents = self
            .items_for_store(store_key)
            .into_iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.subtotal().amount_cents));
        Money::new(cents, self.currency())
    }

    /// Sum of quantities over one storefront's lines.
    pub fn item_count_for_store(&self, store_key: &str) -> i64 {
        self.items_for_store(store_key)
            .into_iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Distinct store keys, in the order they first appear.
    pub fn stores(&self) -> Vec<&StoreKey> {
        let mut seen: Vec<&StoreKey> = Vec::new();
        for item in &self.items {
            if !seen.contains(&&item.store_key) {
                seen.push(&item.store_key);
            }
        }
        seen
    }
}

/// `(total_cents, item_count)` over `items`, or `None` if either overflows.
fn checked_totals(items: &[LineItem]) -> Option<(i64, i64)> {
    items.iter().try_fold((0i64, 0i64), |(cents, count), item| {
        let subtotal = item.checked_subtotal()?.amount_cents;
        Some((cents.checked_add(subtotal)?, count.checked_add(item.quantity)?))
    })
}

/// Enforce the line-level invariants and derive the totals.
fn normalize(items: Vec<LineItem>, currency: Currency, max_quantity: Option<i64>) -> CartState {
    let mut out: Vec<LineItem> = Vec::with_capacity(items.len());
    let mut index: HashMap<(ProductId, StoreKey), usize> = HashMap::new();

    for item in items {
        if item.quantity <= 0 {
            continue;
        }
        if item.unit_price.currency != currency || item.unit_price.is_negative() {
            tracing::warn!(
                product_id = %item.product_id,
                store_key = %item.store_key,
                "dropping cart line with unusable price"
            );
            continue;
        }

        let key = (item.product_id, item.store_key.clone());
        match index.get(&key) {
            Some(&pos) => {
                if let Some(existing) = out.get_mut(pos) {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
            }
            None => {
                index.insert(key, out.len());
                out.push(item);
            }
        }
    }

    if let Some(max) = max_quantity {
        for item in &mut out {
            item.quantity = item.quantity.min(max);
        }
    }

    let (mut total_cents, mut item_count) = (0i64, 0i64);
    out.retain(|item| {
        let next = item
            .checked_subtotal()
            .and_then(|subtotal| total_cents.checked_add(subtotal.amount_cents))
            .zip(item_count.checked_add(item.quantity));
        match next {
            Some((cents, count)) => {
                total_cents = cents;
                item_count = count;
                true
            }
            None => {
                tracing::warn!(
                    product_id = %item.product_id,
                    store_key = %item.store_key,
                    "dropping cart line whose total overflows"
                );
                false
            }
        }
    });

    CartState {
        items: out,
        total: Money::new(total_cents, currency),
        item_count,
    }
}

//! Line item types.

use crate::ids::{ProductId, StoreKey};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product about to be added to a cart.
///
/// Built by the storefront from catalog data; the cart decides the quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Storefront this item belongs to.
    pub store_key: StoreKey,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Original price shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Money>,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Product slug for linking back to the product page.
    #[serde(default)]
    pub slug: String,
}

impl NewLineItem {
    /// Create a new item with the required fields.
    pub fn new(
        product_id: i64,
        store_key: impl Into<StoreKey>,
        name: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id: ProductId::new(product_id),
            store_key: store_key.into(),
            name: name.into(),
            unit_price,
            compare_at_price: None,
            image_url: None,
            slug: String::new(),
        }
    }

    /// Set the compare-at price.
    pub fn with_compare_at_price(mut self, price: Money) -> Self {
        self.compare_at_price = Some(price);
        self
    }

    /// Set the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Attach a quantity, producing a cart line.
    pub fn with_quantity(self, quantity: i64) -> LineItem {
        LineItem {
            product_id: self.product_id,
            store_key: self.store_key,
            name: self.name,
            unit_price: self.unit_price,
            compare_at_price: self.compare_at_price,
            image_url: self.image_url,
            slug: self.slug,
            quantity,
        }
    }
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Storefront this item belongs to.
    pub store_key: StoreKey,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Original price shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Money>,
    /// Product image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Product slug.
    #[serde(default)]
    pub slug: String,
    /// Quantity; always positive in a normalized cart.
    pub quantity: i64,
}

impl LineItem {
    /// Whether this line has the given composite key.
    pub fn matches(&self, product_id: ProductId, store_key: &StoreKey) -> bool {
        self.product_id == product_id && &self.store_key == store_key
    }

    /// Unit price times quantity, or `None` if it does not fit in an `i64`.
    pub fn checked_subtotal(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }

    /// Unit price times quantity.
    ///
    /// Exact for any line held by a [`CartState`](crate::cart::CartState);
    /// saturates for lines built by hand.
    pub fn subtotal(&self) -> Money {
        Money::new(
            self.unit_price.amount_cents.saturating_mul(self.quantity),
            self.unit_price.currency,
        )
    }

    /// Amount saved against the compare-at price, if it is higher.
    pub fn savings(&self) -> Option<Money> {
        let compare_at = self.compare_at_price?;
        let per_unit = compare_at.try_subtract(&self.unit_price)?;
        if per_unit.amount_cents <= 0 {
            return None;
        }
        per_unit.try_multiply(self.quantity)
    }
}

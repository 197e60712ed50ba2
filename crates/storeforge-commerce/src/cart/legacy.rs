//! Migration from the pre-envelope cart layout.
//!
//! Version 0 carts were stored bare, with float prices in major units and
//! `id` / `storeSlug` / `price` / `comparePrice` / `image` field names.

use serde::Deserialize;

use crate::cart::{CartState, LineItem};
use crate::config::CartLimits;
use crate::error::CommerceError;
use crate::ids::{ProductId, StoreKey};
use crate::money::Money;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCart {
    #[serde(default)]
    items: Vec<LegacyItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyItem {
    id: i64,
    store_slug: String,
    #[serde(default)]
    name: String,
    price: f64,
    #[serde(default)]
    compare_price: Option<f64>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    slug: String,
    quantity: i64,
}

/// Convert a version 0 document into a normalized [`CartState`].
pub fn migrate_legacy(
    value: serde_json::Value,
    limits: &CartLimits,
) -> Result<CartState, CommerceError> {
    let legacy: LegacyCart = serde_json::from_value(value)?;
    let currency = limits.currency;

    let items = legacy
        .items
        .into_iter()
        .map(|item| LineItem {
            product_id: ProductId::new(item.id),
            store_key: StoreKey::new(item.store_slug),
            name: item.name,
            unit_price: Money::from_decimal(item.price, currency),
            compare_at_price: item.compare_price.map(|p| Money::from_decimal(p, currency)),
            image_url: item.image.filter(|url| !url.is_empty()),
            slug: item.slug,
            quantity: item.quantity,
        })
        .collect();

    Ok(CartState::from_items(items, limits))
}

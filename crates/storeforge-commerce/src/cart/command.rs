//! Cart commands.

use crate::cart::NewLineItem;
use crate::ids::{ProductId, StoreKey};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartCommand {
    /// Add one unit of a product, inserting the line if needed.
    AddItem(NewLineItem),
    /// Drop a line. Missing lines are a no-op.
    RemoveItem {
        product_id: ProductId,
        store_key: StoreKey,
    },
    /// Set a line's quantity. Non-positive quantities remove the line;
    /// missing lines are a no-op.
    UpdateQuantity {
        product_id: ProductId,
        store_key: StoreKey,
        quantity: i64,
    },
    /// Drop every line for one storefront.
    ClearCart { store_key: StoreKey },
}

impl CartCommand {
    /// Build a remove command.
    pub fn remove(product_id: ProductId, store_key: impl Into<StoreKey>) -> Self {
        CartCommand::RemoveItem {
            product_id,
            store_key: store_key.into(),
        }
    }

    /// Build an update command.
    pub fn update_quantity(
        product_id: ProductId,
        store_key: impl Into<StoreKey>,
        quantity: i64,
    ) -> Self {
        CartCommand::UpdateQuantity {
            product_id,
            store_key: store_key.into(),
            quantity,
        }
    }

    /// Build a clear command.
    pub fn clear(store_key: impl Into<StoreKey>) -> Self {
        CartCommand::ClearCart {
            store_key: store_key.into(),
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartCommand::AddItem(_) => "add_item",
            CartCommand::RemoveItem { .. } => "remove_item",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::ClearCart { .. } => "clear_cart",
        }
    }

    /// The storefront this command touches.
    pub fn store_key(&self) -> &StoreKey {
        match self {
            CartCommand::AddItem(item) => &item.store_key,
            CartCommand::RemoveItem { store_key, .. }
            | CartCommand::UpdateQuantity { store_key, .. }
            | CartCommand::ClearCart { store_key } => store_key,
        }
    }

    /// The toast shown after this command runs, if any.
    ///
    /// A quantity update to a positive value is silent; one that removes the
    /// line reads like a removal.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            CartCommand::AddItem(item) => {
                Some(Notification::success(format!("{} added to cart!", item.name)))
            }
            CartCommand::RemoveItem { .. } => Some(Notification::success("Item removed from cart")),
            CartCommand::UpdateQuantity { quantity, .. } if *quantity <= 0 => {
                Some(Notification::success("Item removed from cart"))
            }
            CartCommand::UpdateQuantity { .. } => None,
            CartCommand::ClearCart { .. } => Some(Notification::success("Cart cleared")),
        }
    }
}

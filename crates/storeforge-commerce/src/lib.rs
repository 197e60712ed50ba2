//! Multi-storefront shopping cart for Storeforge.
//!
//! One cart pool is shared by every storefront a shopper visits in a
//! profile, partitioned by [`StoreKey`]:
//!
//! - **Cart**: line items, the derived-total [`CartState`], the closed
//!   [`CartCommand`] set and the pure [`reduce`] transition
//! - **Store**: [`CartStore`], which hydrates from a key-value backend and
//!   sequences reduce, persist, notify for every command
//! - **Notify**: fire-and-forget toasts
//! - **Checkout**: the order request built from one store's lines
//!
//! # Example
//!
//! ```rust
//! use storeforge_cache::MemoryStore;
//! use storeforge_commerce::prelude::*;
//!
//! let mut cart = CartStore::open(MemoryStore::new(), NoopNotifier, CartConfig::default());
//!
//! let shirt = NewLineItem::new(1, "s1", "Shirt", Money::new(2000, Currency::USD));
//! cart.add_item(shirt.clone());
//! cart.add_item(shirt);
//! assert_eq!(cart.total_for_store("s1").display(), "$40.00");
//!
//! cart.update_quantity(ProductId::new(1), "s1", 0);
//! assert_eq!(cart.item_count_for_store("s1"), 0);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod store;

pub use cart::{reduce, try_reduce, CartCommand, CartState, LineItem, NewLineItem};
pub use config::{CartConfig, CartLimits, MAX_QUANTITY_PER_ITEM};
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use store::{hydrate, CartStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{reduce, try_reduce, CartCommand, CartState, LineItem, NewLineItem};
    pub use crate::config::{CartConfig, CartLimits};
    pub use crate::store::CartStore;

    // Notifications
    pub use crate::notify::{
        NoopNotifier, Notification, NotificationLevel, Notifier, RecordingNotifier,
        TracingNotifier,
    };

    // Checkout
    pub use crate::checkout::{Address, OrderDraft, OrderItemRequest};
}

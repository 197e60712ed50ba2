//! The cart store: command and query interface over [`CartState`].
//!
//! A `CartStore` is constructed once at startup with an injected
//! [`KeyValueStore`] and [`Notifier`], hydrates itself from storage, and is
//! then handed to whatever renders the storefront. Every command runs three
//! explicit steps: compute the next state, persist it, notify.

use storeforge_cache::{Cache, KeyValueStore, Stored};

use crate::cart::{migrate_legacy, try_reduce, CartCommand, CartState, LineItem, NewLineItem};
use crate::checkout::OrderDraft;
use crate::config::CartConfig;
use crate::ids::{ProductId, StoreKey};
use crate::money::Money;
use crate::notify::{Notifier, TracingNotifier};

/// Authoritative in-memory cart for every storefront in one profile.
pub struct CartStore<S, N = TracingNotifier> {
    cache: Cache<S>,
    notifier: N,
    config: CartConfig,
    state: CartState,
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    /// Construct the store and hydrate it from `storage`.
    ///
    /// Missing, corrupt or unreadable data yields an empty cart; the failure
    /// is logged and never surfaced.
    pub fn open(storage: S, notifier: N, config: CartConfig) -> Self {
        let cache = Cache::new(storage);
        let state = hydrate(&cache, &config);
        tracing::debug!(
            storage_key = %config.storage_key,
            items = state.items().len(),
            "cart hydrated"
        );
        Self {
            cache,
            notifier,
            config,
            state,
        }
    }

    /// Run one command.
    ///
    /// A command the reducer refuses is logged and has no effects at all.
    pub fn dispatch(&mut self, command: CartCommand) {
        let next = match try_reduce(&self.state, &command, &self.config.limits()) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(
                    command = command.kind(),
                    store_key = %command.store_key(),
                    error = %e,
                    "ignoring cart command"
                );
                return;
            }
        };
        tracing::debug!(
            command = command.kind(),
            store_key = %command.store_key(),
            item_count = next.item_count(),
            "cart transition"
        );
        self.state = next;

        self.persist();

        if self.config.notifications {
            if let Some(notification) = command.notification() {
                self.notifier.notify(notification);
            }
        }
    }

    /// Add one unit of `item`.
    pub fn add_item(&mut self, item: NewLineItem) {
        self.dispatch(CartCommand::AddItem(item));
    }

    /// Remove a line. Missing lines are a no-op.
    pub fn remove_item(&mut self, product_id: ProductId, store_key: impl Into<StoreKey>) {
        self.dispatch(CartCommand::remove(product_id, store_key));
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        store_key: impl Into<StoreKey>,
        quantity: i64,
    ) {
        self.dispatch(CartCommand::update_quantity(product_id, store_key, quantity));
    }

    /// Remove every line for one storefront.
    pub fn clear_cart(&mut self, store_key: impl Into<StoreKey>) {
        self.dispatch(CartCommand::clear(store_key));
    }

    /// The full cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines for one storefront, in insertion order.
    pub fn items_for_store(&self, store_key: &str) -> Vec<&LineItem> {
        self.state.items_for_store(store_key)
    }

    /// Sum of `unit_price * quantity` for one storefront.
    pub fn total_for_store(&self, store_key: &str) -> Money {
        self.state.total_for_store(store_key)
    }

    /// Sum of quantities for one storefront.
    pub fn item_count_for_store(&self, store_key: &str) -> i64 {
        self.state.item_count_for_store(store_key)
    }

    /// Check if a storefront's cart is empty.
    pub fn is_empty_for_store(&self, store_key: &str) -> bool {
        self.items_for_store(store_key).is_empty()
    }

    /// Storefronts with at least one line.
    pub fn stores(&self) -> Vec<&StoreKey> {
        self.state.stores()
    }

    /// Order request for one storefront's lines.
    pub fn checkout_draft(&self, store_key: &str) -> OrderDraft {
        OrderDraft::from_items(store_key, self.items_for_store(store_key))
    }

    /// Active configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Borrow the storage backend.
    pub fn storage(&self) -> &S {
        self.cache.store()
    }

    /// Tear down the store, returning the backend and notifier.
    pub fn into_parts(self) -> (S, N) {
        (self.cache.into_inner(), self.notifier)
    }

    fn persist(&mut self) {
        if let Err(e) = self
            .cache
            .save_versioned(&self.config.storage_key, &self.state)
        {
            tracing::warn!(
                storage_key = %self.config.storage_key,
                error = %e,
                "failed to persist cart"
            );
        }
    }
}

/// Load the persisted cart, falling back to an empty one.
pub fn hydrate<S: KeyValueStore>(cache: &Cache<S>, config: &CartConfig) -> CartState {
    let limits = config.limits();
    let empty = || CartState::empty(config.currency);

    match cache.load_versioned::<CartState>(&config.storage_key) {
        Ok(None) => empty(),
        Ok(Some(Stored::Current(persisted))) => persisted.state.normalized(&limits),
        Ok(Some(Stored::Legacy(value))) => match migrate_legacy(value, &limits) {
            Ok(state) => {
                tracing::info!(
                    storage_key = %config.storage_key,
                    items = state.items().len(),
                    "migrated legacy cart"
                );
                state
            }
            Err(e) => {
                tracing::warn!(
                    storage_key = %config.storage_key,
                    error = %e,
                    "discarding unrecognized persisted cart"
                );
                empty()
            }
        },
        Err(e) => {
            tracing::warn!(
                storage_key = %config.storage_key,
                error = %e,
                "discarding unreadable persisted cart"
            );
            empty()
        }
    }
}

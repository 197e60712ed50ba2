//! Type-safe Key-Value persistence layer for Storeforge.
//!
//! Provides a small [`KeyValueStore`] seam (the per-profile local storage a
//! storefront writes to), two backends, and a [`Cache`] wrapper that handles
//! JSON serialization and versioned envelopes.
//!
//! # Example
//!
//! ```rust,ignore
//! use storeforge_cache::{Cache, MemoryStore};
//!
//! let mut cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.save_versioned("cart", &cart)?;
//!
//! // Retrieve it
//! let stored = cache.load_versioned::<CartState>("cart")?;
//!
//! // Delete it
//! cache.delete("cart")?;
//! ```

mod envelope;
mod error;
mod file;
mod kv;

pub use envelope::{Persisted, Stored, CURRENT_VERSION};
pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore, Persisted, Stored};
}

//! Checkout module.
//!
//! Turns a store's cart into the order request the storefront submits.
//! Submission itself happens upstream.

mod address;
mod draft;

pub use address::Address;
pub use draft::{OrderDraft, OrderItemRequest};

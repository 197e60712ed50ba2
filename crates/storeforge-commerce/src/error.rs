//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
///
/// The store never surfaces these from cart commands; refused commands are
/// logged instead.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with nothing in the store's cart.
    #[error("Cart is empty for store {0}")]
    EmptyCart(String),

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Price in a currency other than the cart's.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Negative price supplied for a line item.
    #[error("Negative price for product {0}")]
    NegativePrice(i64),

    /// Cart total or item count would not fit in an `i64`.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

//! Order request built from a store's cart.

use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::checkout::Address;
use crate::error::CommerceError;
use crate::ids::{ProductId, StoreKey};
use crate::money::Money;

/// One line of the order request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    /// Variants are not modelled yet; always blank.
    pub variant_id: String,
    pub quantity: i64,
}

/// The body posted to the order endpoint for one storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    #[serde(skip)]
    store_key: StoreKey,
    #[serde(skip)]
    total: Option<Money>,
    pub customer_email: String,
    pub shipping_address: Address,
    pub billing_address: Address,
    pub notes: String,
    pub items: Vec<OrderItemRequest>,
}

impl OrderDraft {
    /// Build a draft from a store's cart lines.
    pub fn from_items<'a>(
        store_key: impl Into<StoreKey>,
        items: impl IntoIterator<Item = &'a LineItem>,
    ) -> Self {
        let items: Vec<&LineItem> = items.into_iter().collect();
        let total = items.first().and_then(|first| {
            let subtotals: Vec<Money> = items
                .iter()
                .map(|item| item.checked_subtotal())
                .collect::<Option<_>>()?;
            Money::try_sum(subtotals.iter(), first.unit_price.currency)
        });

        Self {
            store_key: store_key.into(),
            total,
            customer_email: String::new(),
            shipping_address: Address::default(),
            billing_address: Address::default(),
            notes: String::new(),
            items: items
                .into_iter()
                .map(|item| OrderItemRequest {
                    product_id: item.product_id,
                    variant_id: String::new(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }

    /// Set the customer email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = email.into();
        self
    }

    /// Set the shipping address.
    pub fn with_shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = address;
        self
    }

    /// Set order notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Copy the shipping address into the billing address.
    pub fn billing_same_as_shipping(mut self) -> Self {
        self.billing_address = self.shipping_address.clone();
        self
    }

    /// Storefront this draft belongs to.
    pub fn store_key(&self) -> &StoreKey {
        &self.store_key
    }

    /// Cart total at the time the draft was built (None when empty).
    pub fn total(&self) -> Option<Money> {
        self.total
    }

    /// Check the draft is worth submitting.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.items.is_empty() {
            return Err(CommerceError::EmptyCart(self.store_key.to_string()));
        }
        let email = self.customer_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CommerceError::CheckoutIncomplete("customer_email".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NewLineItem;
    use crate::money::Currency;

    fn lines() -> Vec<LineItem> {
        vec![
            NewLineItem::new(1, "s1", "Shirt", Money::new(2000, Currency::USD)).with_quantity(2),
            NewLineItem::new(7, "s1", "Hat", Money::new(500, Currency::USD)).with_quantity(1),
        ]
    }

    #[test]
    fn test_draft_items_and_total() {
        let items = lines();
        let draft = OrderDraft::from_items("s1", &items);
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.items[0].product_id, ProductId::new(1));
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.items[0].variant_id, "");
        assert_eq!(draft.total(), Some(Money::new(4500, Currency::USD)));
    }

    #[test]
    fn test_request_body_layout() {
        let items = lines();
        let draft = OrderDraft::from_items("s1", &items).with_email("a@b.co");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["customer_email"], "a@b.co");
        assert_eq!(json["items"][1]["product_id"], 7);
        assert!(json["shipping_address"]["postal_code"].is_string());
        assert!(json.get("store_key").is_none());
    }

    #[test]
    fn test_validate() {
        let empty: Vec<LineItem> = Vec::new();
        let draft = OrderDraft::from_items("s1", &empty).with_email("a@b.co");
        assert!(matches!(draft.validate(), Err(CommerceError::EmptyCart(store)) if store == "s1"));

        let items = lines();
        let no_email = OrderDraft::from_items("s1", &items);
        assert!(matches!(
            no_email.validate(),
            Err(CommerceError::CheckoutIncomplete(_))
        ));

        assert!(no_email.with_email("a@b.co").validate().is_ok());
    }

    #[test]
    fn test_billing_copies_shipping() {
        let items = lines();
        let address = Address::new("Ada", "L", "1 Loop", "London", "UK", "N1");
        let draft = OrderDraft::from_items("s1", &items)
            .with_shipping_address(address.clone())
            .billing_same_as_shipping();
        assert_eq!(draft.billing_address, address);
    }
}

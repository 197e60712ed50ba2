//! The cart transition function.
//!
//! `reduce` is pure: no persistence, no notifications, no clock. The store
//! layer sequences those effects around it.

use crate::cart::{CartCommand, CartState, LineItem, NewLineItem};
use crate::config::CartLimits;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Apply one command to `state`, producing the next state.
///
/// Derived fields are recomputed as part of the same step. Commands that
/// target a missing line leave the items untouched, and commands
/// [`try_reduce`] refuses leave the whole state untouched.
pub fn reduce(state: &CartState, command: &CartCommand, limits: &CartLimits) -> CartState {
    try_reduce(state, command, limits).unwrap_or_else(|_| state.clone())
}

/// Apply one command to `state`, or say why it cannot be applied.
///
/// Adds priced in another currency or below zero are refused, as is any
/// command whose result would overflow the cart total or item count.
pub fn try_reduce(
    state: &CartState,
    command: &CartCommand,
    limits: &CartLimits,
) -> Result<CartState, CommerceError> {
    let currency = state.currency();
    let max = limits.max_quantity_per_item.max(1);
    let mut items: Vec<LineItem> = state.items().to_vec();

    match command {
        CartCommand::AddItem(new_item) => {
            check_prices(new_item, currency)?;

            match items
                .iter_mut()
                .find(|i| i.matches(new_item.product_id, &new_item.store_key))
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(1).min(max);
                }
                None => items.push(new_item.clone().with_quantity(1)),
            }
        }

        CartCommand::RemoveItem {
            product_id,
            store_key,
        } => {
            items.retain(|i| !i.matches(*product_id, store_key));
        }

        CartCommand::UpdateQuantity {
            product_id,
            store_key,
            quantity,
        } => {
            if *quantity <= 0 {
                items.retain(|i| !i.matches(*product_id, store_key));
            } else if let Some(existing) = items
                .iter_mut()
                .find(|i| i.matches(*product_id, store_key))
            {
                existing.quantity = (*quantity).min(max);
            }
        }

        CartCommand::ClearCart { store_key } => {
            items.retain(|i| &i.store_key != store_key);
        }
    }

    CartState::try_from_normalized(items, currency)
}

fn check_prices(item: &NewLineItem, currency: Currency) -> Result<(), CommerceError> {
    let prices = std::iter::once(&item.unit_price).chain(item.compare_at_price.as_ref());
    for price in prices {
        check_price(price, currency, item)?;
    }
    Ok(())
}

fn check_price(price: &Money, currency: Currency, item: &NewLineItem) -> Result<(), CommerceError> {
    if price.currency != currency {
        return Err(CommerceError::CurrencyMismatch {
            expected: currency.code().to_string(),
            got: price.currency.code().to_string(),
        });
    }
    if price.is_negative() {
        return Err(CommerceError::NegativePrice(item.product_id.get()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProductId, StoreKey};

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn shirt() -> NewLineItem {
        NewLineItem::new(1, "s1", "Shirt", usd(2000)).with_slug("shirt")
    }

    fn apply(state: &CartState, command: CartCommand) -> CartState {
        reduce(state, &command, &CartLimits::default())
    }

    #[test]
    fn test_add_new_item_inserts_quantity_one() {
        let state = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 1);
        assert_eq!(state.total(), usd(2000));
        assert_eq!(state.item_count(), 1);
    }

    #[test]
    fn test_add_existing_item_increments() {
        let state = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        let state = apply(&state, CartCommand::AddItem(shirt()));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.total(), usd(4000));
    }

    #[test]
    fn test_add_same_product_other_store_is_separate_line() {
        let state = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        let mut other = shirt();
        other.store_key = StoreKey::new("s2");
        let state = apply(&state, CartCommand::AddItem(other));
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn test_add_saturates_at_cap() {
        let limits = CartLimits {
            currency: Currency::USD,
            max_quantity_per_item: 2,
        };
        let mut state = CartState::default();
        for _ in 0..5 {
            state = reduce(&state, &CartCommand::AddItem(shirt()), &limits);
        }
        assert_eq!(state.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_rejects_foreign_currency_and_negative_price() {
        let mut euro = shirt();
        euro.unit_price = Money::new(2000, Currency::EUR);
        let state = apply(&CartState::default(), CartCommand::AddItem(euro));
        assert!(state.is_empty());

        let mut negative = shirt();
        negative.unit_price = usd(-1);
        let state = apply(&CartState::default(), CartCommand::AddItem(negative));
        assert!(state.is_empty());
    }

    #[test]
    fn test_try_reduce_reports_refusals() {
        let mut euro = shirt();
        euro.unit_price = Money::new(2000, Currency::EUR);
        let limits = CartLimits::default();
        let result = try_reduce(&CartState::default(), &CartCommand::AddItem(euro), &limits);
        assert!(matches!(
            result,
            Err(CommerceError::CurrencyMismatch { ref expected, ref got })
                if expected == "USD" && got == "EUR"
        ));

        let mut negative = shirt();
        negative.unit_price = usd(-1);
        let result = try_reduce(&CartState::default(), &CartCommand::AddItem(negative), &limits);
        assert!(matches!(result, Err(CommerceError::NegativePrice(1))));
    }

    #[test]
    fn test_add_rejects_foreign_compare_at_price() {
        let item = shirt().with_compare_at_price(Money::new(2500, Currency::EUR));
        let result = try_reduce(
            &CartState::default(),
            &CartCommand::AddItem(item.clone()),
            &CartLimits::default(),
        );
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
        assert!(apply(&CartState::default(), CartCommand::AddItem(item)).is_empty());
    }

    #[test]
    fn test_add_that_overflows_total_is_refused() {
        let big = NewLineItem::new(7, "s1", "Yacht", usd(i64::MAX / 2 + 1));
        let once = apply(&CartState::default(), CartCommand::AddItem(big.clone()));
        assert_eq!(once.items()[0].quantity, 1);

        let limits = CartLimits::default();
        let result = try_reduce(&once, &CartCommand::AddItem(big.clone()), &limits);
        assert!(matches!(result, Err(CommerceError::Overflow)));

        let twice = apply(&once, CartCommand::AddItem(big));
        assert_eq!(twice, once);
        assert_eq!(twice.total(), usd(i64::MAX / 2 + 1));
    }

    #[test]
    fn test_update_that_overflows_total_is_refused() {
        let big = NewLineItem::new(7, "s1", "Yacht", usd(i64::MAX / 4));
        let state = apply(&CartState::default(), CartCommand::AddItem(big));
        let after = apply(&state, CartCommand::update_quantity(ProductId::new(7), "s1", 5));
        assert_eq!(after, state);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let state = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        let after = apply(&state, CartCommand::remove(ProductId::new(99), "s1"));
        assert_eq!(after, state);
    }

    #[test]
    fn test_update_sets_quantity() {
        let state = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        let state = apply(&state, CartCommand::update_quantity(ProductId::new(1), "s1", 5));
        assert_eq!(state.items()[0].quantity, 5);
        assert_eq!(state.total(), usd(10000));
        assert_eq!(state.item_count(), 5);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let base = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        for quantity in [0, -3] {
            let state = apply(&base, CartCommand::update_quantity(ProductId::new(1), "s1", quantity));
            assert!(state.is_empty());
            assert_eq!(state.total(), usd(0));
            assert_eq!(state.item_count(), 0);
        }
    }

    #[test]
    fn test_update_missing_does_not_insert() {
        let state = apply(
            &CartState::default(),
            CartCommand::update_quantity(ProductId::new(1), "s1", 4),
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_clear_only_touches_one_store() {
        let mut other = shirt();
        other.store_key = StoreKey::new("s2");
        let state = apply(&CartState::default(), CartCommand::AddItem(shirt()));
        let state = apply(&state, CartCommand::AddItem(other));

        let state = apply(&state, CartCommand::clear("s1"));
        assert!(state.items_for_store("s1").is_empty());
        assert_eq!(state.items_for_store("s2").len(), 1);
        assert_eq!(state.total(), usd(2000));
    }
}

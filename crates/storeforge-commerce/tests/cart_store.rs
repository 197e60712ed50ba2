//! End-to-end behaviour of the cart store over an in-memory profile.

use proptest::prelude::*;
use storeforge_cache::{Cache, MemoryStore};
use storeforge_commerce::prelude::*;
use storeforge_commerce::hydrate;

fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

fn open() -> (CartStore<MemoryStore, RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let store = CartStore::open(MemoryStore::new(), notifier.clone(), CartConfig::default());
    (store, notifier)
}

fn assert_derived_fields(state: &CartState) {
    let total: i64 = state
        .items()
        .iter()
        .map(|i| i.unit_price.amount_cents * i.quantity)
        .sum();
    let count: i64 = state.items().iter().map(|i| i.quantity).sum();
    assert_eq!(state.total().amount_cents, total);
    assert_eq!(state.item_count(), count);
}

#[test]
fn add_twice_then_zero_quantity() {
    let (mut cart, _) = open();
    let shirt = NewLineItem::new(1, "s1", "Shirt", usd(2000));

    cart.add_item(shirt.clone());
    assert_eq!(cart.items_for_store("s1").len(), 1);
    assert_eq!(cart.items_for_store("s1")[0].quantity, 1);
    assert_eq!(cart.total_for_store("s1"), usd(2000));

    cart.add_item(shirt);
    assert_eq!(cart.items_for_store("s1")[0].quantity, 2);
    assert_eq!(cart.total_for_store("s1"), usd(4000));

    cart.update_quantity(ProductId::new(1), "s1", 0);
    assert!(cart.items_for_store("s1").is_empty());
    assert_eq!(cart.state().total(), usd(0));
    assert_eq!(cart.state().item_count(), 0);
}

#[test]
fn same_product_in_two_stores() {
    let (mut cart, _) = open();
    cart.add_item(NewLineItem::new(5, "s1", "Mug", usd(1000)));
    cart.add_item(NewLineItem::new(5, "s2", "Mug", usd(1500)));

    let s1 = cart.items_for_store("s1");
    assert_eq!(s1.len(), 1);
    assert_eq!(s1[0].product_id, ProductId::new(5));
    assert_eq!(s1[0].store_key.as_str(), "s1");
    assert_eq!(cart.total_for_store("s2"), usd(1500));

    let s2_before: Vec<LineItem> = cart.items_for_store("s2").into_iter().cloned().collect();
    cart.clear_cart("s1");
    let s2_after: Vec<LineItem> = cart.items_for_store("s2").into_iter().cloned().collect();
    assert_eq!(s2_after, s2_before);
    assert_eq!(s2_after.len(), 1);
}

#[test]
fn removing_absent_item_is_idempotent() {
    let (mut cart, _) = open();
    cart.add_item(NewLineItem::new(1, "s1", "Shirt", usd(2000)));

    cart.remove_item(ProductId::new(42), "s1");
    let once = cart.state().clone();
    for _ in 0..5 {
        cart.remove_item(ProductId::new(42), "s1");
    }
    assert_eq!(cart.state(), &once);
}

#[test]
fn update_on_missing_item_does_not_insert() {
    let (mut cart, notifier) = open();
    cart.update_quantity(ProductId::new(9), "s1", 4);
    assert!(cart.state().is_empty());
    assert!(notifier.notifications().is_empty());
}

#[test]
fn repeated_adds_are_monotonic() {
    let (mut cart, _) = open();
    cart.add_item(NewLineItem::new(2, "s1", "Hat", usd(300)));
    let count_before = cart.state().item_count();
    let total_before = cart.state().total().amount_cents;

    let n = 7;
    for _ in 0..n {
        cart.add_item(NewLineItem::new(1, "s1", "Shirt", usd(1250)));
    }

    let line = cart
        .state()
        .find(ProductId::new(1), &StoreKey::new("s1"))
        .cloned()
        .unwrap();
    assert_eq!(line.quantity, n);
    assert_eq!(cart.state().item_count(), count_before + n);
    assert_eq!(cart.state().total().amount_cents, total_before + n * 1250);
}

#[test]
fn store_survives_reopen() {
    let (mut cart, _) = open();
    cart.add_item(NewLineItem::new(1, "s1", "Shirt", usd(2000)).with_slug("shirt"));
    cart.add_item(NewLineItem::new(2, "s2", "Hat", usd(500)).with_compare_at_price(usd(800)));
    cart.update_quantity(ProductId::new(2), "s2", 3);
    let before = cart.state().clone();

    let (storage, notifier) = cart.into_parts();
    let reopened = CartStore::open(storage, notifier, CartConfig::default());
    assert_eq!(reopened.state(), &before);
}

#[test]
fn toast_sequence_matches_commands() {
    let (mut cart, notifier) = open();
    cart.add_item(NewLineItem::new(1, "s1", "Shirt", usd(2000)));
    cart.remove_item(ProductId::new(77), "s1");
    cart.update_quantity(ProductId::new(1), "s1", -2);
    cart.clear_cart("s1");

    assert_eq!(
        notifier.messages(),
        vec![
            "Shirt added to cart!",
            "Item removed from cart",
            "Item removed from cart",
            "Cart cleared",
        ]
    );
    assert!(notifier
        .notifications()
        .iter()
        .all(|n| n.level == NotificationLevel::Success));
}

#[test]
fn checkout_then_clear() {
    let (mut cart, _) = open();
    cart.add_item(NewLineItem::new(1, "s1", "Shirt", usd(2000)));
    cart.add_item(NewLineItem::new(1, "s1", "Shirt", usd(2000)));
    cart.add_item(NewLineItem::new(3, "s2", "Mug", usd(900)));

    let draft = cart.checkout_draft("s1").with_email("shopper@example.com");
    draft.validate().unwrap();
    assert_eq!(draft.items.len(), 1);
    assert_eq!(draft.items[0].quantity, 2);

    cart.clear_cart("s1");
    assert!(cart.is_empty_for_store("s1"));
    assert!(!cart.is_empty_for_store("s2"));
}

#[test]
fn total_stays_exact_near_i64_limit() {
    let (mut cart, notifier) = open();
    let yacht = NewLineItem::new(1, "s1", "Yacht", usd(i64::MAX / 2 + 1));
    cart.add_item(yacht.clone());
    cart.add_item(yacht);

    assert_derived_fields(cart.state());
    assert_eq!(cart.state().items()[0].quantity, 1);
    assert_eq!(notifier.messages(), vec!["Yacht added to cart!"]);

    cart.add_item(NewLineItem::new(2, "s2", "Pen", usd(150)));
    assert_derived_fields(cart.state());
    assert_eq!(cart.total_for_store("s2"), usd(150));
}

#[test]
fn hydrate_of_missing_key_is_empty() {
    let cache = Cache::new(MemoryStore::new());
    let state = hydrate(&cache, &CartConfig::default());
    assert_eq!(state, CartState::empty(Currency::USD));
}

#[derive(Debug, Clone)]
enum Op {
    Add(i64, u8, i64),
    Remove(i64, u8),
    Update(i64, u8, i64),
    Clear(u8),
}

fn store_key(n: u8) -> String {
    format!("s{}", n % 3)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i64..6, any::<u8>(), 0i64..10_000).prop_map(|(id, s, cents)| Op::Add(id, s, cents)),
        (0i64..6, any::<u8>()).prop_map(|(id, s)| Op::Remove(id, s)),
        (0i64..6, any::<u8>(), -5i64..50).prop_map(|(id, s, q)| Op::Update(id, s, q)),
        any::<u8>().prop_map(Op::Clear),
    ]
}

fn to_command(op: &Op) -> CartCommand {
    match op {
        Op::Add(id, s, cents) => {
            CartCommand::AddItem(NewLineItem::new(*id, store_key(*s), format!("P{id}"), usd(*cents)))
        }
        Op::Remove(id, s) => CartCommand::remove(ProductId::new(*id), store_key(*s)),
        Op::Update(id, s, q) => CartCommand::update_quantity(ProductId::new(*id), store_key(*s), *q),
        Op::Clear(s) => CartCommand::clear(store_key(*s)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn derived_fields_hold_after_every_command(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (mut cart, _) = open();
        for op in &ops {
            cart.dispatch(to_command(op));
            assert_derived_fields(cart.state());

            let mut keys: Vec<(ProductId, StoreKey)> = cart
                .state()
                .items()
                .iter()
                .map(|i| (i.product_id, i.store_key.clone()))
                .collect();
            let len = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), len);
            prop_assert!(cart.state().items().iter().all(|i| i.quantity > 0));
        }
    }

    #[test]
    fn persisted_state_round_trips(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let (mut cart, _) = open();
        for op in &ops {
            cart.dispatch(to_command(op));
        }
        let expected = cart.state().clone();
        let (storage, _) = cart.into_parts();
        let cache = Cache::new(storage);
        prop_assert_eq!(hydrate(&cache, &CartConfig::default()), expected);
    }

    #[test]
    fn clear_never_touches_other_stores(ops in prop::collection::vec(op_strategy(), 0..30), target in any::<u8>()) {
        let (mut cart, _) = open();
        for op in &ops {
            cart.dispatch(to_command(op));
        }
        let target = store_key(target);
        let others: Vec<LineItem> = cart
            .state()
            .items()
            .iter()
            .filter(|i| i.store_key.as_str() != target)
            .cloned()
            .collect();

        cart.clear_cart(target.as_str());
        prop_assert!(cart.items_for_store(&target).is_empty());
        prop_assert_eq!(cart.state().items().to_vec(), others);
    }
}

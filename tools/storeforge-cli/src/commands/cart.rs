//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use storeforge_cache::FileStore;
use storeforge_commerce::notify::RecordingNotifier;
use storeforge_commerce::{CartStore, Currency, Money, NewLineItem, ProductId, StoreKey};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::line_columns;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let (mut cart, notifier) = ctx.open_cart()?;
    let currency = cart.config().currency;

    match args.command {
        CartCommand::Add {
            store,
            id,
            name,
            price,
            compare_at,
            image,
            slug,
        } => {
            let mut item = NewLineItem::new(id, store.as_str(), name, parse_price(price, currency)?);
            if let Some(was) = compare_at {
                item = item.with_compare_at_price(parse_price(was, currency)?);
            }
            if let Some(url) = image {
                item = item.with_image_url(url);
            }
            if let Some(slug) = slug {
                item = item.with_slug(slug);
            }
            cart.add_item(item);
            report(&cart, &notifier, &store, ctx);
        }
        CartCommand::Remove { store, id } => {
            cart.remove_item(ProductId::new(id), store.as_str());
            report(&cart, &notifier, &store, ctx);
        }
        CartCommand::Set {
            store,
            id,
            quantity,
        } => {
            let key = StoreKey::new(store.as_str());
            if cart.state().find(ProductId::new(id), &key).is_none() {
                ctx.output
                    .warn(&format!("Product {} is not in the {} cart", id, store));
            }
            cart.update_quantity(ProductId::new(id), store.as_str(), quantity);
            report(&cart, &notifier, &store, ctx);
        }
        CartCommand::Clear { store, yes } => {
            if cart.is_empty_for_store(&store) {
                ctx.output.info(&format!("Cart for {} is already empty", store));
            } else if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Remove {} item(s) from the {} cart?",
                        cart.item_count_for_store(&store),
                        store
                    ))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Clear cancelled");
                    return Ok(());
                }
            }
            cart.clear_cart(store.as_str());
            report(&cart, &notifier, &store, ctx);
        }
        CartCommand::Show { store } => show(&cart, &store, ctx),
        CartCommand::Stores => list_stores(&cart, ctx),
        CartCommand::Checkout {
            store,
            email,
            notes,
        } => {
            let mut draft = cart.checkout_draft(&store).with_email(email);
            if let Some(notes) = notes {
                draft = draft.with_notes(notes);
            }
            draft.validate()?;

            if !ctx.output.is_json() {
                ctx.output.header(&format!("Order for {}", store));
                if let Some(total) = draft.total() {
                    ctx.output.kv("total", &total.display());
                }
            }
            ctx.output.json(&draft);
        }
    }

    Ok(())
}

/// Convert a decimal price from the command line into cart money.
fn parse_price(amount: f64, currency: Currency) -> Result<Money> {
    if !amount.is_finite() {
        bail!("Price must be a number, got {}", amount);
    }
    if amount < 0.0 {
        bail!("Price cannot be negative: {}", amount);
    }
    Ok(Money::from_decimal(amount, currency))
}

/// Echo the toasts a command raised, then the store's new totals.
fn report(
    cart: &CartStore<FileStore, RecordingNotifier>,
    notifier: &RecordingNotifier,
    store: &str,
    ctx: &Context,
) {
    for notification in notifier.drain() {
        ctx.output.notification(&notification);
    }

    if ctx.output.is_json() {
        ctx.output.json(&store_summary(cart, store));
    } else {
        ctx.output.kv(
            store,
            &format!(
                "{} item(s), {}",
                cart.item_count_for_store(store),
                cart.total_for_store(store).display()
            ),
        );
    }
}

fn store_summary(cart: &CartStore<FileStore, RecordingNotifier>, store: &str) -> serde_json::Value {
    json!({
        "storeKey": store,
        "items": cart.items_for_store(store),
        "itemCount": cart.item_count_for_store(store),
        "total": cart.total_for_store(store),
    })
}

fn show(cart: &CartStore<FileStore, RecordingNotifier>, store: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&store_summary(cart, store));
        return;
    }

    ctx.output.header(&format!("Cart: {}", store));
    let items = cart.items_for_store(store);
    if items.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [8, 24, 6, 18, 10];
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for item in items {
        let cols = line_columns(item);
        let cols: Vec<&str> = cols.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }

    println!();
    ctx.output
        .kv("items", &cart.item_count_for_store(store).to_string());
    ctx.output.kv("total", &cart.total_for_store(store).display());
}

fn list_stores(cart: &CartStore<FileStore, RecordingNotifier>, ctx: &Context) {
    let stores = cart.stores();

    if ctx.output.is_json() {
        let summaries: Vec<_> = stores
            .iter()
            .map(|store| store_summary(cart, store.as_str()))
            .collect();
        ctx.output.json(&summaries);
        return;
    }

    ctx.output.header("Storefronts");
    if stores.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }
    for store in stores {
        ctx.output.list_item(&format!(
            "{}: {} item(s), {}",
            store,
            cart.item_count_for_store(store.as_str()),
            cart.total_for_store(store.as_str()).display()
        ));
    }
}

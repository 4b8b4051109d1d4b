//! Cart commands.
//!
//! Each command opens the cart store, performs one operation and prints the
//! notices the store produced. Store failures are reported, not fatal.

use anyhow::Result;
use macronica_cache::KeyValueStore;
use macronica_commerce::cart::CartPricing;
use macronica_commerce::notice::{Notice, Notifier};
use macronica_commerce::{CartStore, Money};
use serde::Serialize;

use super::{tier, AddArgs, LineArgs, UpdateArgs};
use crate::context::{CliCartStore, Context};
use crate::output::savings_badge;

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.resolve(&args.product)?;
    let mut store = ctx.open_store();
    store.add_to_cart(product, args.quantity, tier(args.wholesale));
    finish(store, ctx)
}

/// Run the remove command.
pub fn remove(args: LineArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.resolve(&args.product)?;
    let mut store = ctx.open_store();
    if !store.remove_from_cart(&product.id, tier(args.wholesale)) {
        ctx.output.info(&format!(
            "{} ({}) is not in the cart",
            product.name,
            tier(args.wholesale).display_name()
        ));
    }
    finish(store, ctx)
}

/// Run the update command.
pub fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let product = ctx.catalog.resolve(&args.product)?;
    let tier = tier(args.wholesale);
    let mut store = ctx.open_store();
    let in_cart = store.line(&product.id, tier).is_some();
    let changed = store.update_quantity(&product.id, args.quantity, tier);
    if !changed && !in_cart && args.quantity >= 0 {
        ctx.output.info(&format!(
            "{} ({}) is not in the cart",
            product.name,
            tier.display_name()
        ));
    }
    finish(store, ctx)
}

/// Run the clear command.
pub fn clear(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store();
    store.clear_cart();
    finish(store, ctx)
}

/// Run the show command.
pub fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    finish(store, ctx)
}

fn finish(mut store: CliCartStore, ctx: &Context) -> Result<()> {
    let notices = store.notifier_mut().drain();

    if ctx.output.is_json() {
        ctx.output.json(&CartView::of(&store, notices));
        return Ok(());
    }

    for notice in &notices {
        ctx.output.notice(notice);
    }
    print_cart(&store, ctx);
    Ok(())
}

/// JSON form of the cart, with the notices the command produced.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView {
    item_count: u64,
    total: Money,
    savings: Money,
    pricing: CartPricing,
    notices: Vec<Notice>,
}

impl CartView {
    fn of<S: KeyValueStore, N: Notifier>(store: &CartStore<S, N>, notices: Vec<Notice>) -> Self {
        Self {
            item_count: store.cart_item_count(),
            total: store.cart_total(),
            savings: store.cart_savings(),
            pricing: store.pricing(),
            notices,
        }
    }
}

fn print_cart(store: &CliCartStore, ctx: &Context) {
    if store.items().is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    ctx.output.header("Cart");

    let widths = [18, 9, 4, 10, 12, 16];
    ctx.output.table_row(&["PACK", "TIER", "QTY", "UNIT", "TOTAL", "PRICING"], &widths);
    for (line, pricing) in store.items().iter().zip(store.pricing().lines) {
        let quantity = line.quantity().to_string();
        let unit = pricing.effective_unit_price.display();
        let total = pricing.total.display();
        ctx.output.table_row(
            &[
                &line.product().name,
                line.tier().display_name(),
                &quantity,
                &unit,
                &total,
                pricing.rule.display_name(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Items", &store.cart_item_count().to_string());
    ctx.output.kv("Savings", &savings_badge(store.cart_savings()));
    ctx.output.kv("Total", &store.cart_total().display());
}

//! Catalog listing.

use anyhow::Result;
use macronica_commerce::cart::preview_savings;
use macronica_commerce::catalog::{CatalogQuery, PriceTier, Product};
use serde::Serialize;

use super::{tier, CatalogArgs};
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry<'a> {
    #[serde(flatten)]
    product: &'a Product,
    unit_price: macronica_commerce::Money,
    bulk_savings: macronica_commerce::Money,
}

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let tier = tier(args.wholesale);
    let mut query = CatalogQuery::new().with_sort(args.sort).with_tier(tier);
    if let Some(text) = args.search {
        query = query.with_text(text);
    }

    let products = ctx.catalog.search(&query);
    ctx.output.debug(&format!(
        "{} of {} packs match, sorted {}",
        products.len(),
        ctx.catalog.len(),
        query.sort.display_name()
    ));

    if ctx.output.is_json() {
        let entries: Vec<CatalogEntry<'_>> = products
            .iter()
            .map(|p| CatalogEntry {
                product: p,
                unit_price: p.unit_price(tier),
                bulk_savings: preview_savings(p, tier, sample_quantity(tier)),
            })
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    if products.is_empty() {
        ctx.output.info("No packs match your search.");
        return Ok(());
    }

    ctx.output.header(&format!("Macronica packs ({})", tier.display_name()));

    let widths = [4, 10, 6, 10, 10, 8];
    ctx.output.table_row(&["ID", "SKU", "SIZE", "PRICE", "MRP", "SERVINGS"], &widths);
    for product in &products {
        let price = product.unit_price(tier).display();
        let retail = product.retail_price.display();
        let servings = product.servings.to_string();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.sku.as_str(),
                &product.size,
                &price,
                &retail,
                &servings,
            ],
            &widths,
        );
    }

    if tier == PriceTier::Retail {
        ctx.output.info("Buy 5 or more of a pack at retail for 5% off.");
    }

    Ok(())
}

/// Quantity the savings column is quoted for.
fn sample_quantity(tier: PriceTier) -> u32 {
    match tier {
        PriceTier::Wholesale => 1,
        PriceTier::Retail => macronica_commerce::cart::BULK_DISCOUNT_MIN_QUANTITY,
    }
}

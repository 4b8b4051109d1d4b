//! Cart pricing calculations.
//!
//! Discounts are decided per line, never across the cart:
//!
//! | Line | Unit price | Savings |
//! |---|---|---|
//! | wholesale | wholesale price | (retail − wholesale) × qty |
//! | retail, qty ≥ 5 | retail − 5% | (retail − discounted) × qty |
//! | retail, qty < 5 | retail | 0 |

use crate::catalog::{PriceTier, Product};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Retail quantity at which the bulk discount starts.
pub const BULK_DISCOUNT_MIN_QUANTITY: u32 = 5;

/// Retail bulk discount, in percent.
pub const BULK_DISCOUNT_PERCENT: i64 = 5;

/// Which pricing rule produced a line's effective unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingRule {
    /// Retail list price, no discount.
    ListPrice,
    /// Retail price less the bulk discount.
    RetailBulk,
    /// Wholesale price.
    Wholesale,
}

impl PricingRule {
    /// Rule for a line of `quantity` units in `tier`.
    pub fn for_line(tier: PriceTier, quantity: u32) -> Self {
        match tier {
            PriceTier::Wholesale => PricingRule::Wholesale,
            PriceTier::Retail if quantity >= BULK_DISCOUNT_MIN_QUANTITY => PricingRule::RetailBulk,
            PriceTier::Retail => PricingRule::ListPrice,
        }
    }

    /// Check if the rule discounts the retail price.
    pub fn is_discounted(&self) -> bool {
        !matches!(self, PricingRule::ListPrice)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PricingRule::ListPrice => "MRP",
            PricingRule::RetailBulk => "5% bulk discount",
            PricingRule::Wholesale => "Wholesale price",
        }
    }
}

/// Price actually charged per unit for a line.
pub fn effective_unit_price(product: &Product, tier: PriceTier, quantity: u32) -> Money {
    match PricingRule::for_line(tier, quantity) {
        PricingRule::Wholesale => product.wholesale_price,
        PricingRule::RetailBulk => product.retail_price.percent_off(BULK_DISCOUNT_PERCENT),
        PricingRule::ListPrice => product.retail_price,
    }
}

/// Savings of a prospective purchase against retail, never negative.
///
/// This is what the product grid shows before anything is in the cart.
pub fn preview_savings(product: &Product, tier: PriceTier, quantity: u32) -> Money {
    LinePricing::compute(product, tier, quantity).savings.max_zero()
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePricing {
    pub product_id: ProductId,
    pub tier: PriceTier,
    pub quantity: u32,
    /// Catalog retail price per unit.
    pub retail_unit_price: Money,
    /// Price charged per unit after the applicable rule.
    pub effective_unit_price: Money,
    /// `effective_unit_price × quantity`.
    pub total: Money,
    /// Savings against retail; zero when no discount applies.
    pub savings: Money,
    pub rule: PricingRule,
}

impl LinePricing {
    /// Price `quantity` units of `product` in `tier`.
    pub fn compute(product: &Product, tier: PriceTier, quantity: u32) -> Self {
        let rule = PricingRule::for_line(tier, quantity);
        let unit = effective_unit_price(product, tier, quantity);
        let savings = if rule.is_discounted() {
            product.retail_price.saturating_sub(unit).times(quantity)
        } else {
            Money::zero()
        };

        Self {
            product_id: product.id.clone(),
            tier,
            quantity,
            retail_unit_price: product.retail_price,
            effective_unit_price: unit,
            total: unit.times(quantity),
            savings,
            rule,
        }
    }
}

/// Pricing breakdown for a whole cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPricing {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of line totals.
    pub total: Money,
    /// Sum of line savings.
    pub savings: Money,
}

impl CartPricing {
    /// Aggregate line breakdowns.
    pub fn from_lines(lines: Vec<LinePricing>) -> Self {
        let item_count = lines.iter().map(|l| u64::from(l.quantity)).sum();
        let total = lines.iter().map(|l| l.total).sum();
        let savings = lines.iter().map(|l| l.savings).sum();
        Self {
            lines,
            item_count,
            total,
            savings,
        }
    }

    /// Check if any line is discounted.
    pub fn has_savings(&self) -> bool {
        self.savings.is_positive()
    }

    /// What the cart would cost at retail list prices.
    pub fn retail_total(&self) -> Money {
        self.total.saturating_add(self.savings)
    }
}

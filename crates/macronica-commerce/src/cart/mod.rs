//! Shopping cart module.
//!
//! Contains the cart, its lines, and the per-line pricing rules.

mod cart;
mod pricing;

pub use cart::{AddOutcome, Cart, CartLine, QuantityChange};
pub use pricing::{
    effective_unit_price, preview_savings, CartPricing, LinePricing, PricingRule,
    BULK_DISCOUNT_MIN_QUANTITY, BULK_DISCOUNT_PERCENT,
};

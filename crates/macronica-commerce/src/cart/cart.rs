//! Cart and cart line types.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::{PriceTier, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A shopping cart: ordered lines, at most one per (product, tier).
///
/// Serializes as `{ "items": [ ... ] }`. Deserialization rejects data that
/// breaks cart invariants instead of repairing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartRecord")]
pub struct Cart {
    items: Vec<CartLine>,
}

/// Unvalidated wire form of a [`Cart`].
#[derive(Deserialize)]
struct CartRecord {
    items: Vec<CartLine>,
}

impl TryFrom<CartRecord> for Cart {
    type Error = CommerceError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for line in &record.items {
            if line.quantity == 0 {
                return Err(CommerceError::InvalidCart(format!(
                    "zero quantity for product {}",
                    line.product.id
                )));
            }
            if !seen.insert((line.product.id.clone(), line.tier)) {
                return Err(CommerceError::InvalidCart(format!(
                    "duplicate {} line for product {}",
                    line.tier.as_str(),
                    line.product.id
                )));
            }
        }
        Ok(Self {
            items: record.items,
        })
    }
}

/// Result of adding to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line grew to `quantity`.
    Merged { quantity: u32 },
}

/// Result of setting a line's quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds `quantity` units.
    Updated { quantity: u32 },
    /// Quantity zero removed the line.
    Removed(CartLine),
    /// No line matched.
    NotInCart,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product` in `tier`.
    ///
    /// Merges into an existing line with the same product and tier,
    /// otherwise appends. Returns an error, leaving the cart untouched, if:
    /// - quantity is not positive
    /// - the resulting line quantity does not fit a `u32`
    pub fn add(
        &mut self,
        product: &Product,
        quantity: i64,
        tier: PriceTier,
    ) -> Result<AddOutcome, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CommerceError::Overflow(product.id.to_string()))?;

        if let Some(existing) = self.line_mut(&product.id, tier) {
            let merged = existing
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CommerceError::Overflow(product.id.to_string()))?;
            existing.quantity = merged;
            return Ok(AddOutcome::Merged { quantity: merged });
        }

        self.items.push(CartLine {
            product: product.clone(),
            quantity,
            tier,
        });
        Ok(AddOutcome::Added)
    }

    /// Remove the line for `product_id` in `tier`, if any.
    pub fn remove(&mut self, product_id: &ProductId, tier: PriceTier) -> Option<CartLine> {
        let index = self
            .items
            .iter()
            .position(|l| l.matches(product_id, tier))?;
        Some(self.items.remove(index))
    }

    /// Set a line's quantity exactly.
    ///
    /// Zero removes the line; negative quantities are rejected.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        tier: PriceTier,
    ) -> Result<QuantityChange, CommerceError> {
        if quantity < 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return Ok(self
                .remove(product_id, tier)
                .map_or(QuantityChange::NotInCart, QuantityChange::Removed));
        }
        let Some(line) = self.line_mut(product_id, tier) else {
            return Ok(QuantityChange::NotInCart);
        };
        let quantity =
            u32::try_from(quantity).map_err(|_| CommerceError::Overflow(product_id.to_string()))?;
        line.quantity = quantity;
        Ok(QuantityChange::Updated { quantity })
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Get the line for a product in a tier.
    pub fn line(&self, product_id: &ProductId, tier: PriceTier) -> Option<&CartLine> {
        self.items.iter().find(|l| l.matches(product_id, tier))
    }

    fn line_mut(&mut self, product_id: &ProductId, tier: PriceTier) -> Option<&mut CartLine> {
        self.items.iter_mut().find(|l| l.matches(product_id, tier))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of effective unit price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(|l| l.pricing().total).sum()
    }

    /// Sum of savings against retail over discounted lines.
    pub fn savings(&self) -> Money {
        self.items.iter().map(|l| l.pricing().savings).sum()
    }

    /// Full pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        CartPricing::from_lines(self.items.iter().map(CartLine::pricing).collect())
    }
}

/// One (product, tier) entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
    #[serde(rename = "isWholesale", with = "wholesale_flag")]
    tier: PriceTier,
}

impl CartLine {
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn tier(&self) -> PriceTier {
        self.tier
    }

    pub fn is_wholesale(&self) -> bool {
        self.tier.is_wholesale()
    }

    /// Pricing of this line under the discount rules.
    pub fn pricing(&self) -> LinePricing {
        LinePricing::compute(&self.product, self.tier, self.quantity)
    }

    fn matches(&self, product_id: &ProductId, tier: PriceTier) -> bool {
        &self.product.id == product_id && self.tier == tier
    }
}

/// `PriceTier` stored as the storefront's `isWholesale` boolean.
mod wholesale_flag {
    use crate::catalog::PriceTier;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tier: &PriceTier, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(tier.is_wholesale())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PriceTier, D::Error> {
        bool::deserialize(deserializer).map(PriceTier::from_wholesale)
    }
}

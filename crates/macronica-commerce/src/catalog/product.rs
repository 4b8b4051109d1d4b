//! Product and pricing tier types.

use crate::ids::{ProductId, Sku};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which price list a purchase is made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    /// Single-unit consumer pricing.
    #[default]
    Retail,
    /// Partner pricing at a fixed discounted unit price.
    Wholesale,
}

impl PriceTier {
    /// Tier from the storefront's wholesale toggle.
    pub fn from_wholesale(is_wholesale: bool) -> Self {
        if is_wholesale {
            PriceTier::Wholesale
        } else {
            PriceTier::Retail
        }
    }

    pub fn is_wholesale(&self) -> bool {
        matches!(self, PriceTier::Wholesale)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Retail => "retail",
            PriceTier::Wholesale => "wholesale",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PriceTier::Retail => "Retail",
            PriceTier::Wholesale => "Wholesale",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A product in the catalog.
///
/// Field names follow the storefront's JSON (`retailPrice`, `wholesalePrice`)
/// since products are embedded verbatim in persisted carts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Stock keeping unit.
    pub sku: Sku,
    /// Display name.
    pub name: String,
    /// Pack size label, e.g. "500g".
    pub size: String,
    /// Net weight in grams.
    pub weight: u32,
    /// Retail (MRP) unit price.
    pub retail_price: Money,
    /// Wholesale unit price.
    pub wholesale_price: Money,
    /// Image reference.
    pub image: String,
    /// Approximate servings per pack.
    pub servings: u32,
}

impl Product {
    /// List price per unit for a tier, before any volume discount.
    pub fn unit_price(&self, tier: PriceTier) -> Money {
        match tier {
            PriceTier::Retail => self.retail_price,
            PriceTier::Wholesale => self.wholesale_price,
        }
    }

    /// Per-unit difference between retail and wholesale price.
    pub fn wholesale_saving(&self) -> Money {
        self.retail_price - self.wholesale_price
    }

    /// Weight formatted for display ("500 g", "20 kg").
    pub fn weight_label(&self) -> String {
        if self.weight >= 1000 && self.weight % 1000 == 0 {
            format!("{} kg", self.weight / 1000)
        } else {
            format!("{} g", self.weight)
        }
    }
}

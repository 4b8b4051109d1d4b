//! Catalog search query.

use crate::catalog::PriceTier;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort options for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Recommended,
    /// Unit price of the active tier, low to high.
    PriceLow,
    /// Unit price of the active tier, high to low.
    PriceHigh,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Recommended => "recommended",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Recommended => "Recommended",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recommended" => Ok(SortOption::Recommended),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            other => Err(format!(
                "unknown sort '{other}' (expected recommended, price-low or price-high)"
            )),
        }
    }
}

/// A product grid query: text filter, sort, and the tier whose prices drive the sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Matched case-insensitively against size label and SKU.
    pub text: Option<String>,
    pub sort: SortOption,
    pub tier: PriceTier,
}

impl CatalogQuery {
    /// Query matching everything in catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_tier(mut self, tier: PriceTier) -> Self {
        self.tier = tier;
        self
    }

    /// Lower-cased search needle, `None` when the query matches everything.
    pub(crate) fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

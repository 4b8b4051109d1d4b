//! Product catalog.
//!
//! The catalog is static and owned by the storefront; carts only ever hold
//! copies of its products.

mod product;
mod query;

pub use product::{PriceTier, Product};
pub use query::{CatalogQuery, SortOption};

use crate::error::CommerceError;
use crate::ids::{ProductId, Sku};
use crate::money::Money;

/// Built-in pack sizes: (id, sku, size, grams, retail ₹, wholesale ₹, servings).
const MACRONICA_PACKS: [(&str, &str, &str, u32, i64, i64, u32); 8] = [
    ("1", "MAC-100G", "100g", 100, 45, 38, 2),
    ("2", "MAC-500G", "500g", 500, 180, 155, 10),
    ("3", "MAC-1KG", "1kg", 1_000, 320, 275, 20),
    ("4", "MAC-20KG", "20kg", 20_000, 5_800, 4_200, 400),
    ("5", "MAC-25KG", "25kg", 25_000, 7_200, 5_200, 500),
    ("6", "MAC-30KG", "30kg", 30_000, 8_600, 6_200, 600),
    ("7", "MAC-50KG", "50kg", 50_000, 14_200, 10_200, 1_000),
    ("8", "MAC-75KG", "75kg", 75_000, 21_000, 15_000, 1_500),
];

/// An ordered, read-only list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, keeping their order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The Macronica macaroni range, 100g retail packs to 75kg sacks.
    pub fn macronica() -> Self {
        let products = MACRONICA_PACKS
            .iter()
            .map(|&(id, sku, size, weight, retail, wholesale, servings)| Product {
                id: ProductId::new(id),
                sku: Sku::new(sku),
                name: format!("Macronica {size}"),
                size: size.to_string(),
                weight,
                retail_price: Money::from_rupees(retail),
                wholesale_price: Money::from_rupees(wholesale),
                image: format!("/images/{}.jpg", sku.to_lowercase()),
                servings,
            })
            .collect();
        Self { products }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Find a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Find a product by SKU, ignoring case.
    pub fn find_by_sku(&self, sku: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.sku.as_str().eq_ignore_ascii_case(sku))
    }

    /// Look a product up by id or SKU.
    pub fn resolve(&self, reference: &str) -> Result<&Product, CommerceError> {
        self.find(&ProductId::new(reference))
            .or_else(|| self.find_by_sku(reference))
            .ok_or_else(|| CommerceError::ProductNotFound(reference.to_string()))
    }

    /// Filter and sort products for the product grid.
    ///
    /// Sorting is stable, so equal prices keep catalog order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        let needle = query.needle();
        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| match &needle {
                Some(n) => {
                    p.size.to_lowercase().contains(n) || p.sku.as_str().to_lowercase().contains(n)
                }
                None => true,
            })
            .collect();

        match query.sort {
            SortOption::Recommended => {}
            SortOption::PriceLow => results.sort_by_key(|p| p.unit_price(query.tier)),
            SortOption::PriceHigh => {
                results.sort_by_key(|p| std::cmp::Reverse(p.unit_price(query.tier)))
            }
        }

        results
    }
}

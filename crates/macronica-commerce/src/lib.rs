//! Catalog, cart pricing and cart store for the Macronica storefront.
//!
//! - **Catalog**: the Macronica pack sizes, search and tier-aware sorting
//! - **Cart**: lines keyed by (product, retail/wholesale), with per-line
//!   discount rules
//! - **Store**: the cart's owner, persisting every change to a key-value store
//!   and reporting outcomes as notices
//!
//! # Example
//!
//! ```
//! use macronica_cache::MemoryStore;
//! use macronica_commerce::prelude::*;
//!
//! let catalog = Catalog::macronica();
//! let mut store = CartStore::open(MemoryStore::new(), NoticeLog::new());
//!
//! let sack = catalog.resolve("MAC-20KG").unwrap();
//! store.add_to_cart(sack, 3, PriceTier::Wholesale);
//!
//! // 3 x 4,200 wholesale, saving 3 x 1,600 against retail
//! assert_eq!(store.cart_total().display(), "\u{20b9}12,600");
//! assert_eq!(store.cart_savings().display(), "\u{20b9}4,800");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notice;

pub mod cart;
pub mod catalog;
pub mod store;

pub use error::CommerceError;
pub use ids::{ProductId, Sku};
pub use money::Money;
pub use store::{CartStore, CART_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{ProductId, Sku};
    pub use crate::money::Money;
    pub use crate::notice::{Notice, NoticeLevel, NoticeLog, Notifier};

    // Catalog
    pub use crate::catalog::{Catalog, CatalogQuery, PriceTier, Product, SortOption};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, LinePricing, PricingRule};

    // Store
    pub use crate::store::{CartStore, CART_STORAGE_KEY};
}

//! The cart store: one cart, its persistence, and its notices.
//!
//! [`CartStore`] is the only sanctioned way for presentation code to read or
//! change the cart. The application root owns it and lends it out; there is
//! no global instance.
//!
//! Every mutation writes the whole cart to a single storage key. Storage
//! problems never fail an operation: they are logged, reported as a
//! [`Notice`], and the in-memory cart stays authoritative.

use macronica_cache::{Cache, KeyValueStore};
use tracing::{debug, error};

use crate::cart::{AddOutcome, Cart, CartLine, CartPricing, QuantityChange};
use crate::catalog::{PriceTier, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::notice::{Notice, Notifier};

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "macronica_cart";

const LOAD_FAILED: &str = "Failed to load cart data";
const SAVE_FAILED: &str = "Failed to save cart data";

/// Owner of the shopper's cart.
///
/// Generic over where the cart is stored (`S`) and where notices go (`N`).
///
/// # Example
///
/// ```
/// use macronica_cache::MemoryStore;
/// use macronica_commerce::prelude::*;
///
/// let catalog = Catalog::macronica();
/// let mut store = CartStore::open(MemoryStore::new(), NoticeLog::new());
///
/// let pack = catalog.resolve("MAC-500G").unwrap();
/// store.add_to_cart(pack, 5, PriceTier::Retail);
///
/// assert_eq!(store.cart_item_count(), 5);
/// assert_eq!(store.cart_total(), Money::from_rupees(855));
/// assert_eq!(store.cart_savings(), Money::from_rupees(45));
/// ```
pub struct CartStore<S, N> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
    notifier: N,
}

impl<S: KeyValueStore, N: Notifier> CartStore<S, N> {
    /// Open the store under [`CART_STORAGE_KEY`], restoring any saved cart.
    pub fn open(store: S, notifier: N) -> Self {
        Self::open_with_key(store, CART_STORAGE_KEY, notifier)
    }

    /// Open the store under a custom key, restoring any saved cart.
    ///
    /// Missing, unreadable or malformed data yields an empty cart.
    pub fn open_with_key(store: S, key: impl Into<String>, mut notifier: N) -> Self {
        let key = key.into();
        let cache = Cache::new(store);
        let cart = load_cart(&cache, &key, &mut notifier);
        Self {
            cart,
            cache,
            key,
            notifier,
        }
    }

    /// Add `quantity` units of `product` in `tier`, merging with an existing line.
    ///
    /// Returns whether the cart changed. A non-positive quantity only
    /// produces a warning notice.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64, tier: PriceTier) -> bool {
        match self.cart.add(product, quantity, tier) {
            Ok(AddOutcome::Added) => {
                debug!(product = %product.id, tier = tier.as_str(), quantity, "added line");
                self.notify(Notice::success(format!("Added {} to cart", product.name)));
            }
            Ok(AddOutcome::Merged { quantity: total }) => {
                debug!(
                    product = %product.id,
                    tier = tier.as_str(),
                    quantity = total,
                    "merged line"
                );
                self.notify(Notice::success(format!(
                    "Updated {} quantity in cart",
                    product.name
                )));
            }
            Err(e) => {
                self.reject(e);
                return false;
            }
        }
        self.persist();
        true
    }

    /// Remove the line for `product_id` in `tier`. Absent lines are a silent no-op.
    ///
    /// Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, product_id: &ProductId, tier: PriceTier) -> bool {
        match self.cart.remove(product_id, tier) {
            Some(line) => {
                self.removed(&line);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Set a line's quantity exactly; zero removes the line.
    ///
    /// Returns whether the cart changed. A negative quantity only produces a
    /// warning notice; an absent line is a silent no-op.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        tier: PriceTier,
    ) -> bool {
        match self.cart.set_quantity(product_id, quantity, tier) {
            Ok(QuantityChange::Updated { quantity }) => {
                let name = self
                    .cart
                    .line(product_id, tier)
                    .map(|l| l.product().name.clone())
                    .unwrap_or_else(|| product_id.to_string());
                debug!(product = %product_id, tier = tier.as_str(), quantity, "set line quantity");
                self.notify(Notice::success(format!("Updated {name} quantity")));
                self.persist();
                true
            }
            Ok(QuantityChange::Removed(line)) => {
                self.removed(&line);
                self.persist();
                true
            }
            Ok(QuantityChange::NotInCart) => false,
            Err(e) => {
                self.reject(e);
                false
            }
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("cleared cart");
        self.notify(Notice::success("Cart cleared"));
        self.persist();
    }

    /// Total units in the cart.
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Amount payable after per-line discounts.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    /// Savings against retail prices.
    pub fn cart_savings(&self) -> Money {
        self.cart.savings()
    }

    /// Lines in display order.
    pub fn items(&self) -> &[CartLine] {
        self.cart.items()
    }

    pub fn line(&self, product_id: &ProductId, tier: PriceTier) -> Option<&CartLine> {
        self.cart.line(product_id, tier)
    }

    /// Per-line pricing breakdown.
    pub fn pricing(&self) -> CartPricing {
        self.cart.pricing()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Tear the store down into its cart, storage and notifier.
    pub fn into_parts(self) -> (Cart, S, N) {
        (self.cart, self.cache.into_inner(), self.notifier)
    }

    /// Write the cart now, reporting failure to the caller instead of as a notice.
    pub fn save(&mut self) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &self.cart)?;
        Ok(())
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => debug!(key = %self.key, lines = self.cart.len(), "persisted cart"),
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to save cart");
                self.notify(Notice::error(SAVE_FAILED));
            }
        }
    }

    fn removed(&mut self, line: &CartLine) {
        debug!(product = %line.product().id, tier = line.tier().as_str(), "removed line");
        self.notify(Notice::success(format!(
            "Removed {} from cart",
            line.product().name
        )));
    }

    fn reject(&mut self, e: CommerceError) {
        debug!(error = %e, "rejected cart change");
        let message = match e {
            CommerceError::InvalidQuantity(q) if q < 0 => "Quantity cannot be negative",
            CommerceError::InvalidQuantity(_) => "Quantity must be greater than 0",
            CommerceError::Overflow(_) => "Quantity is too large",
            _ => "Failed to update cart",
        };
        self.notify(Notice::warning(message));
    }

    fn notify(&mut self, notice: Notice) {
        self.notifier.notify(notice);
    }
}

/// Read the saved cart, falling back to an empty one.
///
/// - missing key: empty, silently
/// - unreadable store or invalid JSON: empty, error notice
/// - JSON without an `items` array: empty, silently
/// - `items` present but lines invalid: empty, error notice
fn load_cart<S: KeyValueStore, N: Notifier>(
    cache: &Cache<S>,
    key: &str,
    notifier: &mut N,
) -> Cart {
    let value = match cache.get_value(key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "no saved cart");
            return Cart::new();
        }
        Err(e) => {
            error!(key, error = %e, "failed to load cart");
            notifier.notify(Notice::error(LOAD_FAILED));
            return Cart::new();
        }
    };

    if !value.get("items").is_some_and(serde_json::Value::is_array) {
        debug!(key, "saved cart has no items list, starting empty");
        return Cart::new();
    }

    match serde_json::from_value::<Cart>(value).map_err(CommerceError::from) {
        Ok(cart) => {
            debug!(key, lines = cart.len(), "restored cart");
            cart
        }
        Err(e) => {
            error!(key, error = %e, "discarding invalid saved cart");
            notifier.notify(Notice::error(LOAD_FAILED));
            Cart::new()
        }
    }
}

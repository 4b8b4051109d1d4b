//! Cart store behaviour across operations and reloads.

use macronica_cache::{FileStore, KeyValueStore, MemoryStore};
use macronica_commerce::prelude::*;

fn product(id: &str, retail: i64, wholesale: i64) -> Product {
    Product {
        id: ProductId::new(id),
        sku: Sku::new(format!("TEST-{id}")),
        name: format!("Test pack {id}"),
        size: "1kg".to_string(),
        weight: 1000,
        retail_price: Money::from_rupees(retail),
        wholesale_price: Money::from_rupees(wholesale),
        image: String::new(),
        servings: 20,
    }
}

fn new_store() -> CartStore<MemoryStore, NoticeLog> {
    CartStore::open(MemoryStore::new(), NoticeLog::new())
}

#[test]
fn repeated_adds_merge_into_one_line() {
    let p = product("a", 100, 80);
    let mut store = new_store();

    for quantity in [1, 4, 2, 10] {
        store.add_to_cart(&p, quantity, PriceTier::Wholesale);
    }

    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].quantity(), 17);
}

#[test]
fn non_positive_add_never_changes_item_count() {
    let p = product("a", 100, 80);
    let mut store = new_store();
    store.add_to_cart(&p, 3, PriceTier::Retail);

    for quantity in [0, -1, -100, i64::MIN] {
        assert!(!store.add_to_cart(&p, quantity, PriceTier::Retail));
        assert_eq!(store.cart_item_count(), 3);
    }
}

#[test]
fn update_to_zero_matches_remove() {
    let a = product("a", 100, 80);
    let b = product("b", 50, 40);

    let build = || {
        let mut store = new_store();
        store.add_to_cart(&a, 2, PriceTier::Retail);
        store.add_to_cart(&b, 6, PriceTier::Wholesale);
        store.add_to_cart(&a, 1, PriceTier::Wholesale);
        store
    };

    for (id, tier) in [
        ("a", PriceTier::Retail),
        ("a", PriceTier::Wholesale),
        ("b", PriceTier::Wholesale),
        ("b", PriceTier::Retail),
    ] {
        let mut updated = build();
        let mut removed = build();
        updated.update_quantity(&ProductId::new(id), 0, tier);
        removed.remove_from_cart(&ProductId::new(id), tier);

        assert_eq!(updated.cart(), removed.cart());
        assert_eq!(updated.notifier().notices(), removed.notifier().notices());
    }
}

#[test]
fn clear_zeroes_totals() {
    let mut store = new_store();
    store.add_to_cart(&product("a", 100, 80), 5, PriceTier::Retail);
    store.add_to_cart(&product("b", 100, 80), 3, PriceTier::Wholesale);

    store.clear_cart();

    assert_eq!(store.cart_total(), Money::zero());
    assert_eq!(store.cart_item_count(), 0);
    assert_eq!(store.notifier().last(), Some(&Notice::success("Cart cleared")));
}

#[test]
fn retail_bulk_discount_at_five_units() {
    let mut store = new_store();
    store.add_to_cart(&product("a", 100, 80), 5, PriceTier::Retail);

    assert_eq!(store.cart_total(), Money::from_rupees(475));
    assert_eq!(store.cart_savings(), Money::from_rupees(25));
}

#[test]
fn retail_below_five_units_is_full_price() {
    let mut store = new_store();
    store.add_to_cart(&product("a", 100, 80), 4, PriceTier::Retail);

    assert_eq!(store.cart_total(), Money::from_rupees(400));
    assert_eq!(store.cart_savings(), Money::zero());
}

#[test]
fn wholesale_line_pricing() {
    let mut store = new_store();
    store.add_to_cart(&product("a", 100, 80), 3, PriceTier::Wholesale);

    assert_eq!(store.cart_total(), Money::from_rupees(240));
    assert_eq!(store.cart_savings(), Money::from_rupees(60));
}

#[test]
fn discount_follows_quantity_updates() {
    let p = product("a", 100, 80);
    let mut store = new_store();
    store.add_to_cart(&p, 4, PriceTier::Retail);
    assert_eq!(store.cart_savings(), Money::zero());

    store.update_quantity(&p.id, 5, PriceTier::Retail);
    assert_eq!(store.cart_total(), Money::from_rupees(475));

    store.update_quantity(&p.id, 2, PriceTier::Retail);
    assert_eq!(store.cart_total(), Money::from_rupees(200));
}

#[test]
fn cart_survives_reload_from_memory_store() {
    let catalog = Catalog::macronica();
    let mut store = new_store();
    store.add_to_cart(catalog.resolve("MAC-1KG").unwrap(), 2, PriceTier::Retail);
    store.add_to_cart(catalog.resolve("MAC-50KG").unwrap(), 1, PriceTier::Wholesale);
    store.add_to_cart(catalog.resolve("MAC-1KG").unwrap(), 6, PriceTier::Wholesale);
    let expected = store.cart().clone();

    let (_, backend, _) = store.into_parts();
    let reloaded = CartStore::open(backend, NoticeLog::new());

    assert_eq!(reloaded.cart(), &expected);
    assert!(reloaded.notifier().is_empty());
}

#[test]
fn cart_survives_reload_from_file_store() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = Catalog::macronica();

    {
        let mut store = CartStore::open(FileStore::open(tmp.path()), NoticeLog::new());
        store.add_to_cart(catalog.resolve("MAC-100G").unwrap(), 9, PriceTier::Retail);
        store.add_to_cart(catalog.resolve("MAC-75KG").unwrap(), 2, PriceTier::Wholesale);
    }

    let reloaded = CartStore::open(FileStore::open(tmp.path()), NoticeLog::new());
    assert_eq!(reloaded.cart_item_count(), 11);
    // 9 x 42.75 + 2 x 15,000
    assert_eq!(reloaded.cart_total(), Money::from_paise(9 * 4275 + 2 * 1_500_000));
    assert_eq!(reloaded.items()[0].product().sku.as_str(), "MAC-100G");
}

#[test]
fn every_mutation_is_persisted() {
    let p = product("a", 100, 80);
    let mut store = new_store();

    let saved_count = |store: CartStore<MemoryStore, NoticeLog>| {
        let (_, backend, _) = store.into_parts();
        let reloaded = CartStore::open(backend, NoticeLog::new());
        (reloaded.cart_item_count(), reloaded)
    };

    store.add_to_cart(&p, 2, PriceTier::Retail);
    let (count, mut store) = saved_count(store);
    assert_eq!(count, 2);

    store.update_quantity(&p.id, 7, PriceTier::Retail);
    let (count, mut store) = saved_count(store);
    assert_eq!(count, 7);

    store.add_to_cart(&p, 1, PriceTier::Wholesale);
    store.remove_from_cart(&p.id, PriceTier::Retail);
    let (count, mut store) = saved_count(store);
    assert_eq!(count, 1);

    store.clear_cart();
    let (count, _) = saved_count(store);
    assert_eq!(count, 0);
}

#[test]
fn loads_cart_written_by_the_storefront() {
    let raw = r#"{
        "items": [
            {
                "product": {
                    "id": "2", "sku": "MAC-500G", "name": "Macronica 500g", "size": "500g",
                    "weight": 500, "retailPrice": 180, "wholesalePrice": 155,
                    "image": "https://example.com/500g.jpg", "servings": 10
                },
                "quantity": 5,
                "isWholesale": false
            },
            {
                "product": {
                    "id": "2", "sku": "MAC-500G", "name": "Macronica 500g", "size": "500g",
                    "weight": 500, "retailPrice": 180, "wholesalePrice": 155,
                    "image": "https://example.com/500g.jpg", "servings": 10
                },
                "quantity": 2,
                "isWholesale": true
            }
        ]
    }"#;
    let mut backend = MemoryStore::new();
    backend.set(CART_STORAGE_KEY, raw).unwrap();

    let store = CartStore::open(backend, NoticeLog::new());

    assert_eq!(store.items().len(), 2);
    assert!(store.items()[1].is_wholesale());
    // 5 x 171 + 2 x 155
    assert_eq!(store.cart_total(), Money::from_rupees(855 + 310));
    assert_eq!(store.cart_savings(), Money::from_rupees(45 + 50));
}

#[test]
fn unknown_fields_are_ignored_on_load() {
    let raw = r#"{
        "version": 2,
        "updatedAt": "2024-05-01T10:00:00Z",
        "items": [
            {
                "product": {
                    "id": "3", "sku": "MAC-1KG", "name": "Macronica 1kg", "size": "1kg",
                    "weight": 1000, "retailPrice": 320, "wholesalePrice": 275,
                    "image": "/images/mac-1kg.jpg", "servings": 20,
                    "category": "pasta", "inStock": true, "tags": ["protein"]
                },
                "quantity": 2,
                "isWholesale": true,
                "addedAt": 1714557600000,
                "note": null
            }
        ]
    }"#;
    let mut backend = MemoryStore::new();
    backend.set(CART_STORAGE_KEY, raw).unwrap();

    let store = CartStore::open(backend, NoticeLog::new());

    assert!(store.notifier().is_empty());
    let line = store.line(&ProductId::new("3"), PriceTier::Wholesale).unwrap();
    assert_eq!(line.quantity(), 2);
    assert_eq!(line.product().wholesale_price, Money::from_rupees(275));
    assert_eq!(store.cart_total(), Money::from_rupees(550));
}

#[test]
fn missing_items_field_is_an_empty_cart() {
    let mut backend = MemoryStore::new();
    backend.set(CART_STORAGE_KEY, r#"{"cart": []}"#).unwrap();

    let store = CartStore::open(backend, NoticeLog::new());
    assert_eq!(store.cart_item_count(), 0);
    assert!(store.notifier().is_empty());
}

#[test]
fn closure_notifier_receives_toasts() {
    let mut toasts = Vec::new();
    {
        let mut store = CartStore::open(MemoryStore::new(), |n: Notice| toasts.push(n));
        store.add_to_cart(&product("a", 100, 80), 1, PriceTier::Retail);
        store.remove_from_cart(&ProductId::new("a"), PriceTier::Retail);
    }

    let messages: Vec<&str> = toasts.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Added Test pack a to cart", "Removed Test pack a from cart"]
    );
}

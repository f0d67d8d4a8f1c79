//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the invariants of the optimistic transforms and
//! the snapshot/restore rollback path.

use std::collections::HashSet;
use std::time::Duration;

use proptest::prelude::*;
use serde_json::json;

use crate::cache::QueryCache;
use crate::models::{CartItem, FavoriteItem};
use crate::services::{apply_add, apply_decrease, apply_increase, apply_remove};

// == Strategies ==
/// Generates product ids from a small pool so operations collide.
fn product_id_strategy() -> impl Strategy<Value = String> {
    (0u8..5).prop_map(|n| format!("p{}", n))
}

#[derive(Debug, Clone)]
enum FavoriteOp {
    Add(String),
    Remove(String),
}

fn favorite_op_strategy() -> impl Strategy<Value = FavoriteOp> {
    prop_oneof![
        product_id_strategy().prop_map(FavoriteOp::Add),
        product_id_strategy().prop_map(FavoriteOp::Remove),
    ]
}

#[derive(Debug, Clone)]
enum CartOp {
    Increase(String),
    Decrease(String),
}

fn cart_op_strategy() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        product_id_strategy().prop_map(CartOp::Increase),
        product_id_strategy().prop_map(CartOp::Decrease),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of add/remove operations, a product id appears at most
    // once in the favorites collection.
    #[test]
    fn prop_favorites_dedupe(ops in prop::collection::vec(favorite_op_strategy(), 1..50)) {
        let mut items: Vec<FavoriteItem> = Vec::new();

        for op in ops {
            match op {
                FavoriteOp::Add(id) => apply_add(&mut items, &id),
                FavoriteOp::Remove(id) => apply_remove(&mut items, &id),
            }

            let mut seen = HashSet::new();
            for item in &items {
                prop_assert!(seen.insert(item.product_id.clone()), "Duplicate product id");
            }
        }
    }

    // The favorites collection tracks exactly the set of added-not-removed
    // product ids.
    #[test]
    fn prop_favorites_match_model(ops in prop::collection::vec(favorite_op_strategy(), 1..50)) {
        let mut items: Vec<FavoriteItem> = Vec::new();
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                FavoriteOp::Add(id) => {
                    apply_add(&mut items, &id);
                    model.insert(id);
                }
                FavoriteOp::Remove(id) => {
                    apply_remove(&mut items, &id);
                    model.remove(&id);
                }
            }
        }

        let actual: HashSet<String> = items.iter().map(|i| i.product_id.clone()).collect();
        prop_assert_eq!(actual, model);
    }

    // Adding then removing a product not already present returns the
    // collection to its prior state.
    #[test]
    fn prop_add_remove_pair_restores(
        ops in prop::collection::vec(favorite_op_strategy(), 0..20),
        id in product_id_strategy(),
    ) {
        let mut items: Vec<FavoriteItem> = Vec::new();
        for op in ops {
            match op {
                FavoriteOp::Add(id) => apply_add(&mut items, &id),
                FavoriteOp::Remove(id) => apply_remove(&mut items, &id),
            }
        }
        // Start from a state without `id`
        apply_remove(&mut items, &id);
        let before = items.clone();

        apply_add(&mut items, &id);
        apply_remove(&mut items, &id);

        prop_assert_eq!(items, before);
    }

    // Cart quantities stay strictly positive through any operation sequence.
    #[test]
    fn prop_cart_quantities_positive(ops in prop::collection::vec(cart_op_strategy(), 1..50)) {
        let mut lines: Vec<CartItem> = Vec::new();

        for op in ops {
            match op {
                CartOp::Increase(id) => apply_increase(&mut lines, &id),
                CartOp::Decrease(id) => apply_decrease(&mut lines, &id),
            }

            for line in &lines {
                prop_assert!(line.quantity > 0, "Cart line at zero quantity");
            }
        }
    }

    // For any sequence of overwrites after a snapshot, restoring the snapshot
    // yields the exact pre-snapshot data.
    #[test]
    fn prop_snapshot_restore_roundtrip(
        initial in "[a-z0-9]{1,16}",
        overwrites in prop::collection::vec("[a-z0-9]{1,16}", 1..10),
    ) {
        let mut cache = QueryCache::new(Duration::from_secs(300));
        cache.put("key", &json!({ "value": initial.clone() })).unwrap();

        let snapshot = cache.snapshot("key");
        for value in overwrites {
            cache.put("key", &json!({ "value": value })).unwrap();
        }
        cache.restore("key", snapshot);

        let data: serde_json::Value = cache.lookup_as("key").unwrap();
        prop_assert_eq!(data, json!({ "value": initial }));
    }

    // Hits and misses accurately count lookups against existing/fresh entries.
    #[test]
    fn prop_lookup_statistics_accuracy(
        keys in prop::collection::vec("[a-c]", 1..40),
    ) {
        let mut cache = QueryCache::new(Duration::from_secs(300));
        cache.put("a", &json!(1)).unwrap();

        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for key in keys {
            match cache.lookup_as::<serde_json::Value>(&key) {
                Some(_) => expected_hits += 1,
                None => expected_misses += 1,
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
    }
}

//! Property-based invariant tests for item collections and geometry.
//!
//! 1. A collection with unique keys indexes every item at its position.
//! 2. Any duplicate key is rejected, naming both positions.
//! 3. `nearest` minimizes key distance and breaks ties toward the smaller key.
//! 4. `Rect::lerp` hits both endpoints exactly.

use pagemenu_core::{IndexItem, InvalidItemError, ItemCollection, ItemKey, PagingItem, Rect};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn unique_indices(max_len: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::sample::subsequence((0..max_len * 3).collect::<Vec<_>>(), 0..=max_len)
        .prop_shuffle()
}

fn items(indices: &[usize]) -> Vec<IndexItem> {
    indices
        .iter()
        .map(|&i| IndexItem::new(i, format!("Item {i}")))
        .collect()
}

fn rect() -> impl Strategy<Value = Rect> {
    (-500.0f64..500.0, -50.0f64..50.0, 0.0f64..300.0, 0.0f64..60.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Ingestion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unique_keys_are_indexed(indices in unique_indices(40)) {
        let collection = ItemCollection::new(items(&indices)).expect("unique keys");
        prop_assert_eq!(collection.len(), indices.len());
        for (pos, &index) in indices.iter().enumerate() {
            let key = ItemKey::from(index);
            prop_assert_eq!(collection.position(key), Some(pos));
            prop_assert_eq!(collection.get(pos).map(PagingItem::key), Some(key));
        }
    }

    #[test]
    fn duplicates_are_rejected(
        indices in unique_indices(30).prop_filter("need an item", |v| !v.is_empty()),
        pick in any::<prop::sample::Index>(),
        insert_at in any::<prop::sample::Index>(),
    ) {
        let original = pick.index(indices.len());
        let mut list = items(&indices);
        let at = insert_at.index(list.len() + 1);
        list.insert(at, IndexItem::new(indices[original], "again"));

        let err = ItemCollection::new(list).expect_err("duplicate key");
        let InvalidItemError::DuplicateKey { key, first, second } = err;
        prop_assert_eq!(key, ItemKey::from(indices[original]));
        prop_assert!(first < second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Nearest surviving item
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nearest_minimizes_distance(
        indices in unique_indices(30).prop_filter("need an item", |v| !v.is_empty()),
        target in 0i64..100,
    ) {
        let collection = ItemCollection::new(items(&indices)).expect("unique keys");
        let target = ItemKey::new(target);
        let nearest = collection.nearest(target).expect("non-empty").key();
        for item in collection.iter() {
            let d = item.key().distance(target);
            prop_assert!(d >= nearest.distance(target));
            if d == nearest.distance(target) {
                prop_assert!(nearest <= item.key());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Interpolation endpoints
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rect_lerp_endpoints_exact(a in rect(), b in rect()) {
        prop_assert_eq!(a.lerp(&b, 0.0), a);
        prop_assert_eq!(a.lerp(&b, 1.0), b);
    }
}

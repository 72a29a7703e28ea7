#![forbid(unsafe_code)]

//! Validated, ordered item collections.
//!
//! [`ItemCollection`] is the only way items enter the system. Key uniqueness
//! is checked once here; every later pass (layout, diff, selection) relies
//! on it and is total over a collection that made it through.
//!
//! The sequence order is the display order. Items are not sorted by key on
//! the way in: a caller that wants key order must pass the items sorted.
//! A sequence whose order differs from the previous one shows up as moves
//! when the two are diffed. For index items built from page positions the
//! two orders coincide.

use rustc_hash::FxHashMap;

use crate::error::InvalidItemError;
use crate::item::{ItemKey, PagingItem};

/// Ordered items with an O(1) key → position index.
#[derive(Debug, Clone)]
pub struct ItemCollection<I> {
    items: Vec<I>,
    positions: FxHashMap<ItemKey, usize>,
}

impl<I> Default for ItemCollection<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            positions: FxHashMap::default(),
        }
    }
}

impl<I: PagingItem> ItemCollection<I> {
    /// Validate and index `items`, keeping their sequence order.
    ///
    /// Fails on the first duplicate key, naming both positions. Key order is
    /// not checked; position `i` in the input is position `i` in the menu.
    pub fn new(items: impl IntoIterator<Item = I>) -> Result<Self, InvalidItemError> {
        let items: Vec<I> = items.into_iter().collect();
        let mut positions =
            FxHashMap::with_capacity_and_hasher(items.len(), Default::default());
        for (idx, item) in items.iter().enumerate() {
            let key = item.key();
            if let Some(&first) = positions.get(&key) {
                return Err(InvalidItemError::DuplicateKey {
                    key,
                    first,
                    second: idx,
                });
            }
            positions.insert(key, idx);
        }
        Ok(Self { items, positions })
    }

    /// An empty collection.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order.
    #[inline]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Iterate items in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.items.iter()
    }

    /// Item at a display position.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&I> {
        self.items.get(position)
    }

    /// Display position of a key.
    #[inline]
    pub fn position(&self, key: ItemKey) -> Option<usize> {
        self.positions.get(&key).copied()
    }

    /// Item carrying `key`.
    pub fn get_by_key(&self, key: ItemKey) -> Option<&I> {
        self.position(key).and_then(|idx| self.items.get(idx))
    }

    /// Whether `key` is present.
    #[inline]
    pub fn contains(&self, key: ItemKey) -> bool {
        self.positions.contains_key(&key)
    }

    /// First item in display order.
    pub fn first(&self) -> Option<&I> {
        self.items.first()
    }

    /// Whether `key` sits at the first display position.
    pub fn is_first(&self, key: ItemKey) -> bool {
        self.position(key) == Some(0)
    }

    /// Whether `key` sits at the last display position.
    pub fn is_last(&self, key: ItemKey) -> bool {
        self.position(key)
            .is_some_and(|idx| idx + 1 == self.items.len())
    }

    /// Item whose key is closest to `key`.
    ///
    /// Ties go to the smaller key. Returns `None` only for an empty
    /// collection.
    pub fn nearest(&self, key: ItemKey) -> Option<&I> {
        self.items
            .iter()
            .min_by_key(|item| (item.key().distance(key), item.key()))
    }

    /// Consume into the underlying vector.
    pub fn into_items(self) -> Vec<I> {
        self.items
    }
}

impl<'a, I> IntoIterator for &'a ItemCollection<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::IndexItem;

    fn items(indices: &[usize]) -> Vec<IndexItem> {
        indices
            .iter()
            .map(|&i| IndexItem::new(i, format!("Page {i}")))
            .collect()
    }

    #[test]
    fn indexes_positions() {
        let collection = ItemCollection::new(items(&[0, 1, 2])).expect("unique keys");
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.position(ItemKey::new(2)), Some(2));
        assert_eq!(collection.position(ItemKey::new(9)), None);
        assert!(collection.is_first(ItemKey::new(0)));
        assert!(collection.is_last(ItemKey::new(2)));
        assert!(!collection.is_last(ItemKey::new(1)));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let mut list = items(&[0, 1, 2]);
        list.push(IndexItem::new(1, "Other label"));
        let err = ItemCollection::new(list).expect_err("duplicate key");
        assert_eq!(
            err,
            InvalidItemError::DuplicateKey {
                key: ItemKey::new(1),
                first: 1,
                second: 3,
            }
        );
    }

    #[test]
    fn keeps_caller_order() {
        let collection = ItemCollection::new(items(&[2, 0, 1])).expect("unique keys");
        let keys: Vec<i64> = collection.iter().map(|item| item.key().get()).collect();
        assert_eq!(keys, vec![2, 0, 1]);
        assert_eq!(collection.position(ItemKey::new(2)), Some(0));
        assert!(collection.is_first(ItemKey::new(2)));
        assert!(collection.is_last(ItemKey::new(1)));
    }

    #[test]
    fn saturated_indices_collide() {
        let err = ItemCollection::new(vec![
            IndexItem::new(usize::MAX, "a"),
            IndexItem::new(usize::MAX - 1, "b"),
        ])
        .expect_err("same key");
        assert_eq!(
            err,
            InvalidItemError::DuplicateKey {
                key: ItemKey::new(i64::MAX),
                first: 0,
                second: 1,
            }
        );
    }

    #[test]
    fn nearest_prefers_smaller_key_on_tie() {
        let collection = ItemCollection::new(items(&[0, 2])).expect("unique keys");
        let nearest = collection.nearest(ItemKey::new(1)).expect("non-empty");
        assert_eq!(nearest.index(), 0);

        let nearest = collection.nearest(ItemKey::new(5)).expect("non-empty");
        assert_eq!(nearest.index(), 2);
    }

    #[test]
    fn nearest_on_empty_is_none() {
        let collection = ItemCollection::<IndexItem>::empty();
        assert!(collection.nearest(ItemKey::new(0)).is_none());
        assert!(collection.first().is_none());
    }

    #[test]
    fn get_by_key_returns_current_label() {
        let collection =
            ItemCollection::new(vec![IndexItem::new(3, "Renamed")]).expect("unique keys");
        let item = collection.get_by_key(ItemKey::new(3)).expect("present");
        assert_eq!(item.title(), "Renamed");
    }
}

#![forbid(unsafe_code)]

//! Visible item window.
//!
//! The window is the ordered subset of items currently realized as menu
//! cells: whatever intersects the menu viewport, widened by `overscan`
//! items on each side, plus any pinned keys (the selection and both ends of
//! an in-flight transition) so those never pop out mid-animation.

use std::ops::Range;

use pagemenu_core::{ItemCollection, ItemKey, PagingItem};
use pagemenu_layout::MenuLayout;
use rustc_hash::FxHashSet;

/// Ordered subset of a collection realized as on-screen cells.
#[derive(Debug, Clone)]
pub struct VisibleWindow<I> {
    items: Vec<I>,
    keys: FxHashSet<ItemKey>,
}

impl<I> Default for VisibleWindow<I> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            keys: FxHashSet::default(),
        }
    }
}

impl<I: PagingItem> VisibleWindow<I> {
    /// Window over the given collection positions.
    ///
    /// Positions are sorted and deduplicated; out-of-range positions are
    /// dropped.
    pub fn from_positions(
        collection: &ItemCollection<I>,
        positions: impl IntoIterator<Item = usize>,
    ) -> Self {
        let mut positions: Vec<usize> = positions
            .into_iter()
            .filter(|&pos| pos < collection.len())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        let items: Vec<I> = positions
            .into_iter()
            .filter_map(|pos| collection.get(pos).cloned())
            .collect();
        let keys = items.iter().map(PagingItem::key).collect();
        Self { items, keys }
    }

    /// Realize the window for a menu viewport.
    ///
    /// `layout` must have been computed from `collection`.
    pub fn realize(
        collection: &ItemCollection<I>,
        layout: &MenuLayout,
        offset: f64,
        width: f64,
        overscan: usize,
        pinned: &[ItemKey],
    ) -> Self {
        let range = widen(layout.visible_range(offset, width), overscan, collection.len());
        let pinned = pinned.iter().filter_map(|&key| collection.position(key));
        Self::from_positions(collection, range.chain(pinned))
    }

    /// Union of two windows over the same collection.
    pub fn union(&self, other: &Self, collection: &ItemCollection<I>) -> Self {
        let positions = self
            .keys()
            .chain(other.keys())
            .filter_map(|key| collection.position(key));
        Self::from_positions(collection, positions)
    }

    /// Realized items in collection order.
    #[inline]
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Keys of realized items in collection order.
    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.items.iter().map(PagingItem::key)
    }

    /// Whether `key` is realized.
    #[inline]
    pub fn contains(&self, key: ItemKey) -> bool {
        self.keys.contains(&key)
    }

    /// Number of realized items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is realized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn widen(range: Range<usize>, overscan: usize, len: usize) -> Range<usize> {
    if range.is_empty() {
        return range;
    }
    let start = range.start.saturating_sub(overscan);
    let end = range.end.saturating_add(overscan).min(len);
    start..end
}

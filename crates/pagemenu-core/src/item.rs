#![forbid(unsafe_code)]

//! Item model.
//!
//! An item is one page's identity plus its menu label. Identity is the
//! [`ItemKey`] alone: two items with the same key are the same page even if
//! their labels differ, which is how a label is updated in place.
//!
//! # Invariants
//!
//! 1. Equality, ordering, and hashing of [`IndexItem`] use [`PagingItem::key`] only.
//! 2. Keys are unique within one collection; see
//!    [`ItemCollection`](crate::ItemCollection) for where that is enforced.
//! 3. Items are immutable values. Replacing an item means building a new one.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Totally ordered identity of a page.
///
/// The key doubles as the coordinate used to find the "nearest" surviving
/// item when a collection loses the one that was selected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemKey(i64);

impl ItemKey {
    /// Create a key from a raw value.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw key value.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Absolute distance between two keys.
    #[inline]
    pub const fn distance(self, other: ItemKey) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl From<i64> for ItemKey {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<usize> for ItemKey {
    fn from(index: usize) -> Self {
        Self(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A page that can be shown in the menu.
///
/// Implementors are cheap-to-clone value types. The default
/// [`diffing_key`](Self::diffing_key) is the label, so a relabelled item is
/// reported as updated when collections are reconciled.
pub trait PagingItem: Clone + fmt::Debug {
    /// Identity and ordering key.
    fn key(&self) -> ItemKey;

    /// Text shown in the menu cell.
    fn label(&self) -> &str;

    /// Content fingerprint compared during reconciliation.
    fn diffing_key(&self) -> &str {
        self.label()
    }

    /// Whether `other` is the same page (same key).
    fn same_item(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// Index-based item: the position of a page plus its title.
///
/// `name` keeps the original text when `title` is a decorated or shortened
/// rendition of it, and serves as the diffing key.
///
/// Indices above `i64::MAX` all map to the key `i64::MAX`, and equality
/// follows the key, so such items are the same page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexItem {
    index: usize,
    title: String,
    name: String,
}

impl IndexItem {
    /// Create an item whose name is its title.
    #[must_use]
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            index,
            name: title.clone(),
            title,
        }
    }

    /// Create an item with a separate original name.
    #[must_use]
    pub fn with_name(index: usize, title: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            name: name.into(),
        }
    }

    /// Page index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Title used in the menu cell.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Original name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PagingItem for IndexItem {
    fn key(&self) -> ItemKey {
        ItemKey::from(self.index)
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn diffing_key(&self) -> &str {
        &self.name
    }
}

impl PartialEq for IndexItem {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for IndexItem {}

impl Hash for IndexItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for IndexItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#![forbid(unsafe_code)]

//! Collection reconciliation.
//!
//! [`diff`] compares two validated collections and produces an
//! [`EditScript`] the rendering layer can apply to its cells without a full
//! reload. [`reconcile`] additionally carries a [`VisibleWindow`] across
//! the change.
//!
//! # Edit semantics
//!
//! Edits are a batch in the style of collection-view batch updates:
//!
//! - `Remove { from }` and `Move { from }` name positions in the **old**
//!   collection.
//! - `Insert { at }`, `Move { to }`, and `Update { at }` name positions in
//!   the **new** collection.
//!
//! The script is ordered: removals (descending `from`), then moves
//! (ascending `to`), then inserts (ascending `at`), then updates (ascending
//! `at`). [`EditScript::apply`] reconstructs the new order exactly.
//!
//! # Algorithm
//!
//! Items are matched by key through the new collection's key → position
//! index, so matching is linear. Among matched items, the longest run whose
//! new positions already increase stays put; every other matched item is a
//! move. That makes the number of moves minimal. Unmatched items are
//! removed or inserted, and adjacent inserts keep their new relative order.
//!
//! Both functions are pure and never touch machine state.

use pagemenu_core::{ItemCollection, ItemKey, PagingItem};
use serde::{Deserialize, Serialize};

use crate::window::VisibleWindow;

/// One step of an edit script.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit<I> {
    /// Drop the item at old position `from`.
    Remove { item: I, from: usize },
    /// Relocate an item from old position `from` to new position `to`.
    Move { item: I, from: usize, to: usize },
    /// Add a new item at new position `at`.
    Insert { item: I, at: usize },
    /// The item at new position `at` kept its place but its content changed.
    Update { item: I, at: usize },
}

impl<I: PagingItem> Edit<I> {
    /// Item the edit concerns (new version for moves, inserts, and updates).
    pub fn item(&self) -> &I {
        match self {
            Self::Remove { item, .. }
            | Self::Move { item, .. }
            | Self::Insert { item, .. }
            | Self::Update { item, .. } => item,
        }
    }

    /// Key of the item the edit concerns.
    pub fn key(&self) -> ItemKey {
        self.item().key()
    }
}

/// Per-kind edit tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditCounts {
    pub removed: usize,
    pub moved: usize,
    pub inserted: usize,
    pub updated: usize,
}

impl EditCounts {
    /// Total number of edits.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.removed + self.moved + self.inserted + self.updated
    }
}

/// Ordered batch of edits reconciling two collections.
#[derive(Debug, Clone, PartialEq)]
pub struct EditScript<I> {
    edits: Vec<Edit<I>>,
}

impl<I> Default for EditScript<I> {
    fn default() -> Self {
        Self { edits: Vec::new() }
    }
}

impl<I: PagingItem> EditScript<I> {
    /// Edits in application order.
    #[inline]
    pub fn edits(&self) -> &[Edit<I>] {
        &self.edits
    }

    /// Iterate edits in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edit<I>> {
        self.edits.iter()
    }

    /// Number of edits.
    #[inline]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Whether the collections were identical.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Tally edits by kind.
    pub fn counts(&self) -> EditCounts {
        let mut counts = EditCounts::default();
        for edit in &self.edits {
            match edit {
                Edit::Remove { .. } => counts.removed += 1,
                Edit::Move { .. } => counts.moved += 1,
                Edit::Insert { .. } => counts.inserted += 1,
                Edit::Update { .. } => counts.updated += 1,
            }
        }
        counts
    }

    /// Apply the batch to `old`, producing the new sequence.
    ///
    /// Moved and inserted items land on their new positions; items the
    /// script leaves alone fill the remaining slots in their old order.
    pub fn apply(&self, old: &[I]) -> Vec<I> {
        let mut detached = vec![false; old.len()];
        let mut placed: Vec<(usize, I)> = Vec::new();
        let mut updates: Vec<(usize, I)> = Vec::new();
        for edit in &self.edits {
            match edit {
                Edit::Remove { from, .. } => {
                    if let Some(flag) = detached.get_mut(*from) {
                        *flag = true;
                    }
                }
                Edit::Move { item, from, to } => {
                    if let Some(flag) = detached.get_mut(*from) {
                        *flag = true;
                    }
                    placed.push((*to, item.clone()));
                }
                Edit::Insert { item, at } => placed.push((*at, item.clone())),
                Edit::Update { item, at } => updates.push((*at, item.clone())),
            }
        }

        let mut kept = old
            .iter()
            .zip(&detached)
            .filter(|(_, gone)| !**gone)
            .map(|(item, _)| item.clone());
        let len = placed.len() + detached.iter().filter(|gone| !**gone).count();
        let mut slots: Vec<Option<I>> = vec![None; len];
        for (position, item) in placed {
            if let Some(slot) = slots.get_mut(position) {
                *slot = Some(item);
            }
        }
        for slot in &mut slots {
            if slot.is_none() {
                *slot = kept.next();
            }
        }
        for (position, item) in updates {
            if let Some(slot) = slots.get_mut(position) {
                *slot = Some(item);
            }
        }
        slots.into_iter().flatten().collect()
    }
}

impl<'a, I> IntoIterator for &'a EditScript<I> {
    type Item = &'a Edit<I>;
    type IntoIter = std::slice::Iter<'a, Edit<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

/// Result of carrying a visible window across a collection change.
#[derive(Debug, Clone)]
pub struct Reconciliation<I> {
    pub script: EditScript<I>,
    pub window: VisibleWindow<I>,
}

/// Compute the edit script turning `old` into `new`.
pub fn diff<I: PagingItem>(old: &ItemCollection<I>, new: &ItemCollection<I>) -> EditScript<I> {
    let mut edits = Vec::new();

    // Survivors in old order, as (old position, new position).
    let mut survivors: Vec<(usize, usize)> = Vec::with_capacity(old.len().min(new.len()));
    for (from, item) in old.iter().enumerate() {
        if let Some(to) = new.position(item.key()) {
            survivors.push((from, to));
        }
    }

    for (from, item) in old.iter().enumerate().rev() {
        if !new.contains(item.key()) {
            edits.push(Edit::Remove {
                item: item.clone(),
                from,
            });
        }
    }

    let targets: Vec<usize> = survivors.iter().map(|&(_, to)| to).collect();
    let stable = longest_increasing_run(&targets);

    let mut moves: Vec<(usize, usize)> = survivors
        .iter()
        .zip(&stable)
        .filter(|(_, keep)| !**keep)
        .map(|(&pair, _)| pair)
        .collect();
    moves.sort_unstable_by_key(|&(_, to)| to);
    for (from, to) in moves {
        if let Some(item) = new.get(to) {
            edits.push(Edit::Move {
                item: item.clone(),
                from,
                to,
            });
        }
    }

    for (at, item) in new.iter().enumerate() {
        if !old.contains(item.key()) {
            edits.push(Edit::Insert {
                item: item.clone(),
                at,
            });
        }
    }

    let mut updates: Vec<usize> = survivors
        .iter()
        .zip(&stable)
        .filter(|(_, keep)| **keep)
        .filter_map(|(&(from, to), _)| {
            let before = old.get(from)?;
            let after = new.get(to)?;
            (before.diffing_key() != after.diffing_key()).then_some(to)
        })
        .collect();
    updates.sort_unstable();
    for at in updates {
        if let Some(item) = new.get(at) {
            edits.push(Edit::Update {
                item: item.clone(),
                at,
            });
        }
    }

    EditScript { edits }
}

/// Diff two collections and carry `old_window` across.
///
/// The new window holds every surviving window item plus any inserted item
/// that lands between the first and last survivor, all in new order. If no
/// window item survives the window is empty and the caller re-realizes it.
pub fn reconcile<I: PagingItem>(
    old: &ItemCollection<I>,
    new: &ItemCollection<I>,
    old_window: &VisibleWindow<I>,
) -> Reconciliation<I> {
    let script = diff(old, new);

    let mut positions: Vec<usize> = old_window
        .keys()
        .filter_map(|key| new.position(key))
        .collect();
    if let (Some(&lo), Some(&hi)) = (positions.iter().min(), positions.iter().max()) {
        positions.extend(
            (lo..=hi).filter(|&at| new.get(at).is_some_and(|item| !old.contains(item.key()))),
        );
    }
    let window = VisibleWindow::from_positions(new, positions);

    Reconciliation { script, window }
}

/// Mark the members of one longest strictly increasing subsequence.
///
/// Patience sorting with predecessor links, O(n log n).
fn longest_increasing_run(values: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; values.len()];

    for (idx, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        if slot > 0 {
            predecessor[idx] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(idx);
        } else {
            tails[slot] = idx;
        }
    }

    let mut keep = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(idx) = cursor {
        keep[idx] = true;
        cursor = predecessor[idx];
    }
    keep
}

#![forbid(unsafe_code)]

//! Menu/content synchronization state machine.
//!
//! [`PagingMachine`] owns the selected item, the in-flight transition, and
//! the visible window. Every input goes through one of its operations and
//! comes back as a [`PagingTransition`] describing what changed, plus the
//! layout and edit script the rendering layer has to apply. The machine
//! never touches rendering objects.
//!
//! # States
//!
//! ```text
//!            first items            select (animated) / page drag
//!   Empty ───────────────▶ Idle ──────────────────────────────▶ Scrolling
//!     ▲                     ▲  ◀── settle / non-animated select ──┘  │
//!     └── empty collection ─┘  ◀── collection loses an endpoint ─────┘
//! ```
//!
//! # Invariants
//!
//! 1. While scrolling, `transition.from` and `transition.to` differ by key.
//! 2. Progress is always within `[0, 1]`; NaN is read as 0.
//! 3. The selected item and both transition endpoints are always in the
//!    visible window.
//! 4. Rejected operations (`Err`) leave every field untouched.
//! 5. Ignored inputs produce a `Noop` effect and no layout update.
//!
//! # Failure Modes
//!
//! | Input | Result |
//! |-------|--------|
//! | select a key not in the collection | `Err(OutOfRangeSelection)` |
//! | collection with duplicate keys | `Err(InvalidItem)` |
//! | options with negative/non-finite sizes | `Err(InvalidOptions)` |
//! | progress/settle while idle | `Noop { NotScrolling }` |
//! | non-finite viewport width or menu offset | `Noop { NonFiniteInput }` |

use pagemenu_core::geometry::lerp;
use pagemenu_core::{ItemCollection, ItemKey, ItemMeasure, MeasuredItem, PagingItem};
use pagemenu_layout::{
    IndicatorAnchor, IndicatorFrame, IndicatorOptions, IndicatorTarget, ItemGeometry, MenuLayout,
    PagingOptions, clamp_progress, indicator_frame,
};
use serde::{Deserialize, Serialize};

use crate::diff::{EditCounts, EditScript, reconcile};
use crate::error::PagingError;
use crate::window::VisibleWindow;

/// Direction of a user page drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Previous,
    Next,
}

/// An in-flight change of selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<I> {
    pub from: I,
    pub to: I,
    /// Position between `from` (0) and `to` (1).
    pub progress: f64,
    /// Menu offset when the transition started.
    pub initial_offset: f64,
    /// Menu offset the transition ends at when it lands on `to`.
    pub target_offset: f64,
}

impl<I: PagingItem> Transition<I> {
    fn new(from: I, to: I, offset: f64, target_offset: f64) -> Self {
        Self {
            from,
            to,
            progress: 0.0,
            initial_offset: offset,
            target_offset,
        }
    }

    /// Endpoint the transition would land on if it settled now.
    pub fn anchor(&self) -> &I {
        if self.progress >= 0.5 {
            &self.to
        } else {
            &self.from
        }
    }

    /// Menu offset interpolated by progress.
    pub fn content_offset(&self) -> f64 {
        lerp(self.initial_offset, self.target_offset, self.progress)
    }
}

/// Machine state.
#[derive(Debug, Clone, PartialEq)]
pub enum PagingState<I> {
    /// No items yet.
    Empty,
    Idle {
        selected: I,
    },
    Scrolling {
        selected: I,
        transition: Transition<I>,
    },
}

impl<I: PagingItem> PagingState<I> {
    /// State discriminant.
    pub const fn kind(&self) -> PagingStateKind {
        match self {
            Self::Empty => PagingStateKind::Empty,
            Self::Idle { .. } => PagingStateKind::Idle,
            Self::Scrolling { .. } => PagingStateKind::Scrolling,
        }
    }

    /// Selected item, if any.
    pub fn selected(&self) -> Option<&I> {
        match self {
            Self::Empty => None,
            Self::Idle { selected } | Self::Scrolling { selected, .. } => Some(selected),
        }
    }

    /// In-flight transition, if any.
    pub fn transition(&self) -> Option<&Transition<I>> {
        match self {
            Self::Scrolling { transition, .. } => Some(transition),
            _ => None,
        }
    }

    /// Whether a transition is in flight.
    pub const fn is_scrolling(&self) -> bool {
        matches!(self, Self::Scrolling { .. })
    }

    fn scrolling(transition: Transition<I>) -> Self {
        Self::Scrolling {
            selected: transition.from.clone(),
            transition,
        }
    }

    fn pinned_keys(&self) -> Vec<ItemKey> {
        match self {
            Self::Empty => Vec::new(),
            Self::Idle { selected } => vec![selected.key()],
            Self::Scrolling {
                selected,
                transition,
            } => vec![selected.key(), transition.from.key(), transition.to.key()],
        }
    }
}

/// State discriminant, for logging and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingStateKind {
    Empty,
    Idle,
    Scrolling,
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    /// Selected the item that is already selected.
    AlreadySelected,
    /// Selected the item the in-flight transition already targets.
    AlreadyTargeted,
    /// Progress or settle arrived with no transition in flight.
    NotScrolling,
    /// Page drag with no item in that direction.
    NoNeighbor,
    /// Page drag while another transition is in flight.
    TransitionInFlight,
    /// Page drag with no items.
    EmptyCollection,
    /// Viewport width or menu offset did not change.
    Unchanged,
    /// Viewport width or menu offset was NaN or infinite.
    NonFiniteInput,
}

/// What one operation did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum PagingEffect {
    /// Selection changed without an animation.
    Selected {
        key: ItemKey,
        previous: Option<ItemKey>,
    },
    TransitionStarted {
        from: ItemKey,
        to: ItemKey,
    },
    /// An in-flight transition was pointed at a new target.
    Retargeted {
        from: ItemKey,
        to: ItemKey,
    },
    ProgressUpdated {
        progress: f64,
    },
    /// The transition finished; `reverted` when it landed back on `from`.
    Settled {
        key: ItemKey,
        reverted: bool,
    },
    CollectionReplaced {
        counts: EditCounts,
        selected: Option<ItemKey>,
        /// An in-flight transition lost an endpoint and was dropped.
        cancelled: bool,
    },
    ViewportChanged {
        width: f64,
    },
    MenuScrolled {
        offset: f64,
    },
    OptionsReplaced,
    Noop {
        reason: NoopReason,
    },
}

/// Frames and offsets for the rendering layer to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutUpdate {
    /// Frames of the visible window, in collection order.
    pub geometries: Vec<ItemGeometry>,
    pub indicator: Option<IndicatorFrame>,
    /// Suggested horizontal menu offset.
    pub content_offset: f64,
    pub content_width: f64,
    pub selected: Option<ItemKey>,
    /// Transition progress, while scrolling.
    pub progress: Option<f64>,
}

impl LayoutUpdate {
    /// Frame for `key`, if it is in the window.
    pub fn geometry(&self, key: ItemKey) -> Option<&ItemGeometry> {
        self.geometries.iter().find(|geometry| geometry.key == key)
    }
}

/// One machine step.
#[derive(Debug, Clone)]
pub struct PagingTransition<I> {
    pub transition_id: u64,
    pub from: PagingState<I>,
    pub to: PagingState<I>,
    pub effect: PagingEffect,
    /// Present whenever the step changed anything visible.
    pub update: Option<LayoutUpdate>,
    /// Present for collection replacements.
    pub edits: Option<EditScript<I>>,
}

impl<I> PagingTransition<I> {
    /// Whether the input was ignored.
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, PagingEffect::Noop { .. })
    }
}

/// Synchronizes the menu strip with the paged content.
#[derive(Debug, Clone)]
pub struct PagingMachine<I> {
    options: PagingOptions,
    collection: ItemCollection<I>,
    measured: Vec<MeasuredItem>,
    layout: MenuLayout,
    viewport_width: f64,
    content_offset: f64,
    window: VisibleWindow<I>,
    indicator: Option<IndicatorFrame>,
    state: PagingState<I>,
    transition_counter: u64,
}

impl<I: PagingItem> PagingMachine<I> {
    /// Create an empty machine.
    pub fn new(options: PagingOptions) -> Result<Self, PagingError> {
        options.validate()?;
        Ok(Self {
            options,
            collection: ItemCollection::empty(),
            measured: Vec::new(),
            layout: MenuLayout::default(),
            viewport_width: 0.0,
            content_offset: 0.0,
            window: VisibleWindow::default(),
            indicator: None,
            state: PagingState::Empty,
            transition_counter: 0,
        })
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &PagingState<I> {
        &self.state
    }

    /// Selected item, if any.
    #[inline]
    pub fn selected(&self) -> Option<&I> {
        self.state.selected()
    }

    /// Current collection.
    #[inline]
    pub fn collection(&self) -> &ItemCollection<I> {
        &self.collection
    }

    /// Current options.
    #[inline]
    pub fn options(&self) -> &PagingOptions {
        &self.options
    }

    /// Layout of the whole collection.
    #[inline]
    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Realized cells.
    #[inline]
    pub fn window(&self) -> &VisibleWindow<I> {
        &self.window
    }

    /// Last indicator frame handed out.
    #[inline]
    pub fn indicator(&self) -> Option<IndicatorFrame> {
        self.indicator
    }

    /// Current menu offset.
    #[inline]
    pub fn content_offset(&self) -> f64 {
        self.content_offset
    }

    /// Menu viewport width.
    #[inline]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Number of steps taken so far.
    #[inline]
    pub fn transition_count(&self) -> u64 {
        self.transition_counter
    }

    /// Select `key`, animated or not.
    ///
    /// While scrolling this retargets the transition: it restarts from the
    /// endpoint nearest the current progress toward `key`. Selecting the
    /// endpoint itself collapses to idle on it.
    pub fn select_item(
        &mut self,
        key: ItemKey,
        animated: bool,
    ) -> Result<PagingTransition<I>, PagingError> {
        let Some(target) = self.collection.get_by_key(key).cloned() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "paging.select.rejected", key = key.get());
            return Err(PagingError::OutOfRangeSelection { key });
        };

        let from = self.state.clone();
        let (origin, retarget) = match &self.state {
            PagingState::Empty => (None, false),
            PagingState::Idle { selected } if selected.key() == key => {
                return Ok(self.noop(NoopReason::AlreadySelected));
            }
            PagingState::Idle { selected } => (Some(selected.clone()), false),
            PagingState::Scrolling { transition, .. } if transition.to.key() == key => {
                return Ok(self.noop(NoopReason::AlreadyTargeted));
            }
            PagingState::Scrolling { transition, .. } => {
                let anchor = transition.anchor().clone();
                if anchor.key() == key {
                    (None, true)
                } else {
                    (Some(anchor), true)
                }
            }
        };

        let previous = self.state.selected().map(PagingItem::key);
        let effect = match origin {
            Some(origin) if animated => {
                let effect = if retarget {
                    PagingEffect::Retargeted {
                        from: origin.key(),
                        to: key,
                    }
                } else {
                    PagingEffect::TransitionStarted {
                        from: origin.key(),
                        to: key,
                    }
                };
                let target_offset = self.selection_offset(key);
                self.state = PagingState::scrolling(Transition::new(
                    origin,
                    target,
                    self.content_offset,
                    target_offset,
                ));
                effect
            }
            _ => {
                self.content_offset = self.selection_offset(key);
                self.state = PagingState::Idle { selected: target };
                PagingEffect::Selected { key, previous }
            }
        };

        Ok(self.commit(from, effect, None, None))
    }

    /// Feed the content area's scroll progress.
    pub fn scroll_progress_updated(&mut self, progress: f64) -> PagingTransition<I> {
        let from = self.state.clone();
        let PagingState::Scrolling { transition, .. } = &mut self.state else {
            return self.noop(NoopReason::NotScrolling);
        };
        let progress = clamp_progress(progress);
        transition.progress = progress;
        self.content_offset = transition.content_offset();
        self.commit(from, PagingEffect::ProgressUpdated { progress }, None, None)
    }

    /// The content area came to rest. Lands on `to` at progress ≥ 0.5,
    /// otherwise back on `from`.
    pub fn scroll_settled(&mut self) -> PagingTransition<I> {
        let from = self.state.clone();
        let PagingState::Scrolling { transition, .. } = &self.state else {
            return self.noop(NoopReason::NotScrolling);
        };
        let reverted = transition.progress < 0.5;
        let landing = transition.anchor().clone();
        let key = landing.key();
        self.content_offset = self.selection_offset(key);
        self.state = PagingState::Idle { selected: landing };
        self.commit(from, PagingEffect::Settled { key, reverted }, None, None)
    }

    /// The user started dragging the content toward a neighboring page.
    pub fn begin_page_drag(&mut self, direction: PageDirection) -> PagingTransition<I> {
        let from = self.state.clone();
        let current = match &self.state {
            PagingState::Empty => return self.noop(NoopReason::EmptyCollection),
            PagingState::Scrolling { .. } => return self.noop(NoopReason::TransitionInFlight),
            PagingState::Idle { selected } => selected.clone(),
        };
        let neighbor = self.collection.position(current.key()).and_then(|pos| {
            let next = match direction {
                PageDirection::Previous => pos.checked_sub(1)?,
                PageDirection::Next => pos.checked_add(1)?,
            };
            self.collection.get(next).cloned()
        });
        let Some(neighbor) = neighbor else {
            return self.noop(NoopReason::NoNeighbor);
        };

        let effect = PagingEffect::TransitionStarted {
            from: current.key(),
            to: neighbor.key(),
        };
        let target_offset = self.selection_offset(neighbor.key());
        self.state = PagingState::scrolling(Transition::new(
            current,
            neighbor,
            self.content_offset,
            target_offset,
        ));
        self.commit(from, effect, None, None)
    }

    /// Replace the whole collection.
    ///
    /// Items are validated first; on error nothing changes. While scrolling,
    /// both endpoints are re-resolved by key. If either is gone the
    /// transition is dropped and the machine rests on the endpoint nearest
    /// the current progress, or the item nearest to it by key.
    pub fn collection_replaced(
        &mut self,
        items: impl IntoIterator<Item = I>,
        measure: &impl ItemMeasure<I>,
    ) -> Result<PagingTransition<I>, PagingError> {
        let collection = ItemCollection::new(items).map_err(|err| {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "paging.collection.rejected", error = %err);
            PagingError::from(err)
        })?;
        let measured = MeasuredItem::measure_all(collection.iter(), measure);
        let reconciliation = reconcile(&self.collection, &collection, &self.window);

        let from = self.state.clone();
        let mut cancelled = false;
        let state = match &self.state {
            PagingState::Empty => match collection.first() {
                Some(first) => PagingState::Idle {
                    selected: first.clone(),
                },
                None => PagingState::Empty,
            },
            PagingState::Idle { selected } => rest_near(&collection, selected.key()),
            PagingState::Scrolling { transition, .. } => {
                match (
                    collection.get_by_key(transition.from.key()),
                    collection.get_by_key(transition.to.key()),
                ) {
                    (Some(start), Some(end)) => PagingState::scrolling(Transition {
                        from: start.clone(),
                        to: end.clone(),
                        ..transition.clone()
                    }),
                    _ => {
                        cancelled = true;
                        rest_near(&collection, transition.anchor().key())
                    }
                }
            }
        };

        let counts = reconciliation.script.counts();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "paging.collection",
            removed = counts.removed,
            moved = counts.moved,
            inserted = counts.inserted,
            updated = counts.updated,
            cancelled
        );

        self.collection = collection;
        self.measured = measured;
        self.state = state;
        self.relayout();

        let effect = PagingEffect::CollectionReplaced {
            counts,
            selected: self.state.selected().map(PagingItem::key),
            cancelled,
        };
        Ok(self.commit(
            from,
            effect,
            Some(reconciliation.window),
            Some(reconciliation.script),
        ))
    }

    /// The menu viewport was resized.
    pub fn viewport_changed(&mut self, width: f64) -> PagingTransition<I> {
        if !width.is_finite() {
            return self.noop(NoopReason::NonFiniteInput);
        }
        let width = width.max(0.0);
        if width == self.viewport_width {
            return self.noop(NoopReason::Unchanged);
        }
        let from = self.state.clone();
        self.viewport_width = width;
        self.relayout();
        self.commit(from, PagingEffect::ViewportChanged { width }, None, None)
    }

    /// The host scrolled the menu strip itself.
    pub fn menu_scrolled(&mut self, offset: f64) -> PagingTransition<I> {
        if !offset.is_finite() {
            return self.noop(NoopReason::NonFiniteInput);
        }
        if offset == self.content_offset {
            return self.noop(NoopReason::Unchanged);
        }
        let from = self.state.clone();
        self.content_offset = offset;
        self.commit(from, PagingEffect::MenuScrolled { offset }, None, None)
    }

    /// Replace all options. Selection and transition state are kept.
    pub fn set_options(
        &mut self,
        options: PagingOptions,
    ) -> Result<PagingTransition<I>, PagingError> {
        options.validate()?;
        let from = self.state.clone();
        self.options = options;
        self.relayout();
        Ok(self.commit(from, PagingEffect::OptionsReplaced, None, None))
    }

    /// Replace only the indicator options.
    pub fn set_indicator(
        &mut self,
        indicator: IndicatorOptions,
    ) -> Result<PagingTransition<I>, PagingError> {
        let options = PagingOptions {
            indicator,
            ..self.options.clone()
        };
        self.set_options(options)
    }

    /// Current layout without changing anything.
    pub fn snapshot(&self) -> LayoutUpdate {
        LayoutUpdate {
            geometries: self
                .window
                .keys()
                .filter_map(|key| self.layout.get(key).copied())
                .collect(),
            indicator: self.indicator,
            content_offset: self.content_offset,
            content_width: self.layout.content_width(),
            selected: self.state.selected().map(PagingItem::key),
            progress: self.state.transition().map(|t| t.progress),
        }
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn selection_offset(&self, key: ItemKey) -> f64 {
        if !self.options.keep_selection_visible {
            return self.content_offset;
        }
        self.layout
            .selection_offset(key, self.options.selected_scroll_position)
            .unwrap_or(self.content_offset)
    }

    /// Recompute geometry and re-derive the menu offset from it.
    fn relayout(&mut self) {
        self.layout = MenuLayout::compute(&self.measured, self.viewport_width, &self.options);
        let keep = self.options.keep_selection_visible;
        let position = self.options.selected_scroll_position;
        match &mut self.state {
            PagingState::Empty => self.content_offset = 0.0,
            PagingState::Idle { selected } => {
                self.content_offset = match self.layout.selection_offset(selected.key(), position)
                {
                    Some(offset) if keep => offset,
                    _ => self.layout.clamp_offset(self.content_offset),
                };
            }
            PagingState::Scrolling { transition, .. } => {
                if keep {
                    if let Some(offset) = self.layout.selection_offset(transition.to.key(), position)
                    {
                        transition.target_offset = offset;
                    }
                    self.content_offset = transition.content_offset();
                } else {
                    self.content_offset = self.layout.clamp_offset(self.content_offset);
                }
            }
        }
    }

    fn anchor(&self, key: ItemKey) -> Option<IndicatorAnchor> {
        if !self.window.contains(key) {
            return None;
        }
        let frame = self.layout.frame(key)?;
        Some(IndicatorAnchor::new(
            frame,
            self.collection.is_first(key),
            self.collection.is_last(key),
        ))
    }

    fn indicator_target(&self) -> Option<IndicatorTarget> {
        match &self.state {
            PagingState::Empty => None,
            PagingState::Idle { selected } => self.anchor(selected.key()).map(IndicatorTarget::Settled),
            PagingState::Scrolling { transition, .. } => Some(IndicatorTarget::Transition {
                from: self.anchor(transition.from.key())?,
                to: self.anchor(transition.to.key()),
                progress: transition.progress,
            }),
        }
    }

    /// Re-realize the window and the indicator, then build the update.
    fn refresh(&mut self, carried: Option<VisibleWindow<I>>) -> LayoutUpdate {
        let realized = VisibleWindow::realize(
            &self.collection,
            &self.layout,
            self.content_offset,
            self.viewport_width,
            self.options.overscan,
            &self.state.pinned_keys(),
        );
        self.window = match carried {
            Some(carried) => carried.union(&realized, &self.collection),
            None => realized,
        };
        self.indicator = self
            .indicator_target()
            .and_then(|target| indicator_frame(&self.options.indicator, target, self.indicator));
        self.snapshot()
    }

    fn commit(
        &mut self,
        from: PagingState<I>,
        effect: PagingEffect,
        carried: Option<VisibleWindow<I>>,
        edits: Option<EditScript<I>>,
    ) -> PagingTransition<I> {
        let update = self.refresh(carried);
        self.transition_counter = self.transition_counter.saturating_add(1);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "paging.transition",
            transition_id = self.transition_counter,
            from = ?from.kind(),
            to = ?self.state.kind(),
            effect = ?effect
        );
        PagingTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.clone(),
            effect,
            update: Some(update),
            edits,
        }
    }

    fn noop(&mut self, reason: NoopReason) -> PagingTransition<I> {
        self.transition_counter = self.transition_counter.saturating_add(1);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "paging.noop",
            transition_id = self.transition_counter,
            reason = ?reason
        );
        PagingTransition {
            transition_id: self.transition_counter,
            from: self.state.clone(),
            to: self.state.clone(),
            effect: PagingEffect::Noop { reason },
            update: None,
            edits: None,
        }
    }
}

/// Idle on `key` if it survives, else on the nearest surviving key.
fn rest_near<I: PagingItem>(collection: &ItemCollection<I>, key: ItemKey) -> PagingState<I> {
    match collection
        .get_by_key(key)
        .or_else(|| collection.nearest(key))
    {
        Some(item) => PagingState::Idle {
            selected: item.clone(),
        },
        None => PagingState::Empty,
    }
}

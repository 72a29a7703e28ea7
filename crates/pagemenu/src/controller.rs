#![forbid(unsafe_code)]

//! Presentation boundary.
//!
//! [`PresentationBoundary`] is the contract the rendering layer implements:
//! it measures items and applies the two outputs the machine produces.
//! [`PagingController`] owns a [`PagingMachine`] and a boundary, forwards
//! raw host events into the machine, and hands every resulting edit script
//! and layout update back to the boundary.
//!
//! Edit scripts are always delivered before the layout computed from the
//! new collection, so cells exist by the time their frames arrive.

use pagemenu_core::{Insets, ItemKey, ItemMeasure, PagingItem, Rect};
use pagemenu_layout::{IndicatorOptions, PagingOptions, PagingViewFrames, PagingViewLayout};

use crate::diff::EditScript;
use crate::error::PagingError;
use crate::machine::{LayoutUpdate, PageDirection, PagingMachine, PagingState, PagingTransition};

/// What the rendering layer provides and receives.
pub trait PresentationBoundary<I: PagingItem>: ItemMeasure<I> {
    /// Apply new cell frames, indicator placement, and menu offset.
    fn on_layout_computed(&mut self, update: &LayoutUpdate);

    /// Insert, remove, and move cells.
    fn on_edit_script(&mut self, script: &EditScript<I>);
}

/// Drives a [`PagingMachine`] from host events and feeds its output to a
/// [`PresentationBoundary`].
#[derive(Debug)]
pub struct PagingController<I, B> {
    machine: PagingMachine<I>,
    boundary: B,
    view: PagingViewLayout,
    bounds: Rect,
    safe_area: Insets,
    frames: PagingViewFrames,
}

impl<I: PagingItem, B: PresentationBoundary<I>> PagingController<I, B> {
    /// Create a controller with no items and zero bounds.
    pub fn new(options: PagingOptions, boundary: B) -> Result<Self, PagingError> {
        let view = PagingViewLayout::new(&options);
        let machine = PagingMachine::new(options)?;
        Ok(Self {
            machine,
            boundary,
            view,
            bounds: Rect::default(),
            safe_area: Insets::ZERO,
            frames: PagingViewFrames::default(),
        })
    }

    /// Create a controller and load an initial collection.
    pub fn with_items(
        options: PagingOptions,
        items: impl IntoIterator<Item = I>,
        boundary: B,
    ) -> Result<Self, PagingError> {
        let mut controller = Self::new(options, boundary)?;
        controller.mutate_collection(items)?;
        Ok(controller)
    }

    /// The underlying machine.
    #[inline]
    pub fn machine(&self) -> &PagingMachine<I> {
        &self.machine
    }

    /// Current machine state.
    #[inline]
    pub fn state(&self) -> &PagingState<I> {
        self.machine.state()
    }

    /// The rendering layer.
    #[inline]
    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// Mutable access to the rendering layer.
    #[inline]
    pub fn boundary_mut(&mut self) -> &mut B {
        &mut self.boundary
    }

    /// Region frames from the last resize.
    #[inline]
    pub fn frames(&self) -> PagingViewFrames {
        self.frames
    }

    /// Tear down, returning the rendering layer.
    pub fn into_boundary(self) -> B {
        self.boundary
    }

    /// Content area scroll progress.
    pub fn report_scroll_progress(&mut self, progress: f64) -> PagingTransition<I> {
        let transition = self.machine.scroll_progress_updated(progress);
        self.deliver(&transition);
        transition
    }

    /// Content area came to rest.
    pub fn report_scroll_settled(&mut self) -> PagingTransition<I> {
        let transition = self.machine.scroll_settled();
        self.deliver(&transition);
        transition
    }

    /// Content area started a user drag toward a neighboring page.
    pub fn report_page_drag(&mut self, direction: PageDirection) -> PagingTransition<I> {
        let transition = self.machine.begin_page_drag(direction);
        self.deliver(&transition);
        transition
    }

    /// Host scrolled the menu strip.
    pub fn menu_scrolled(&mut self, offset: f64) -> PagingTransition<I> {
        let transition = self.machine.menu_scrolled(offset);
        self.deliver(&transition);
        transition
    }

    /// Replace the page set. On error nothing is delivered.
    pub fn mutate_collection(
        &mut self,
        items: impl IntoIterator<Item = I>,
    ) -> Result<PagingTransition<I>, PagingError> {
        let transition = self.machine.collection_replaced(items, &self.boundary)?;
        self.deliver(&transition);
        Ok(transition)
    }

    /// Select a page from the menu or programmatically.
    pub fn select_item(
        &mut self,
        key: ItemKey,
        animated: bool,
    ) -> Result<PagingTransition<I>, PagingError> {
        let transition = self.machine.select_item(key, animated)?;
        self.deliver(&transition);
        Ok(transition)
    }

    /// Host bounds changed. Returns the new region frames; the menu frame's
    /// width becomes the menu viewport.
    pub fn resize(&mut self, bounds: Rect, safe_area: Insets) -> PagingViewFrames {
        self.bounds = bounds;
        self.safe_area = safe_area;
        self.reframe();
        self.frames
    }

    /// Replace options, keeping selection and scroll state.
    pub fn set_options(
        &mut self,
        options: PagingOptions,
    ) -> Result<PagingTransition<I>, PagingError> {
        let transition = self.machine.set_options(options)?;
        self.deliver(&transition);
        self.view = PagingViewLayout::new(self.machine.options());
        self.reframe();
        Ok(transition)
    }

    /// Replace only the indicator options.
    pub fn set_indicator(
        &mut self,
        indicator: IndicatorOptions,
    ) -> Result<PagingTransition<I>, PagingError> {
        let transition = self.machine.set_indicator(indicator)?;
        self.deliver(&transition);
        Ok(transition)
    }

    fn reframe(&mut self) {
        self.frames = self.view.frames(self.bounds, self.safe_area);
        let transition = self.machine.viewport_changed(self.frames.menu.width);
        self.deliver(&transition);
    }

    fn deliver(&mut self, transition: &PagingTransition<I>) {
        if let Some(script) = &transition.edits {
            self.boundary.on_edit_script(script);
        }
        if let Some(update) = &transition.update {
            self.boundary.on_layout_computed(update);
        }
    }
}

#![forbid(unsafe_code)]

//! Paging menu synchronization.
//!
//! A paging menu is a horizontally scrolling strip of tabs kept in lockstep
//! with a paged content area. This crate is the coordination core behind
//! one: it turns content scroll progress into menu selection and indicator
//! motion, and keeps both consistent while the page set changes underneath.
//!
//! # Pieces
//!
//! - [`PagingMachine`]: selection state, in-flight transitions, and the
//!   visible window. Every operation returns a [`PagingTransition`].
//! - [`diff()`] and [`reconcile`]: pure edit scripts between two collections.
//! - [`VisibleWindow`]: which items are realized as cells.
//! - [`PagingController`] and [`PresentationBoundary`]: the seam to a
//!   rendering front end.
//!
//! Layout and indicator geometry come from `pagemenu-layout`; item and
//! geometry types from `pagemenu-core`. Both are re-exported here.
//!
//! # Example
//!
//! ```
//! use pagemenu::{IndexItem, ItemKey, PagingMachine, PagingOptions, PagingStateKind};
//!
//! let mut machine = PagingMachine::new(PagingOptions::default()).unwrap();
//! machine
//!     .collection_replaced(
//!         vec![IndexItem::new(0, "News"), IndexItem::new(1, "Sports")],
//!         &pagemenu::DisplayWidthMeasure::default(),
//!     )
//!     .unwrap();
//! machine.select_item(ItemKey::new(1), true).unwrap();
//! machine.scroll_progress_updated(0.8);
//! machine.scroll_settled();
//! assert_eq!(machine.state().kind(), PagingStateKind::Idle);
//! assert_eq!(machine.selected().map(IndexItem::title), Some("Sports"));
//! ```

pub mod controller;
pub mod diff;
pub mod error;
pub mod machine;
pub mod window;

pub use controller::{PagingController, PresentationBoundary};
pub use diff::{Edit, EditCounts, EditScript, Reconciliation, diff, reconcile};
pub use error::PagingError;
pub use machine::{
    LayoutUpdate, NoopReason, PageDirection, PagingEffect, PagingMachine, PagingState,
    PagingStateKind, PagingTransition, Transition,
};
pub use window::VisibleWindow;

pub use pagemenu_core::{
    DisplayWidthMeasure, IndexItem, Insets, InvalidItemError, ItemCollection, ItemKey,
    ItemMeasure, MeasuredItem, PagingItem, Rect, Size,
};
pub use pagemenu_layout::{
    IndicatorFrame, IndicatorOptions, IndicatorStyle, ItemGeometry, MIN_ITEM_WIDTH,
    MenuHorizontalAlignment, MenuItemSize, MenuLayout, MenuPosition, OptionsError, PagingOptions,
    PagingViewFrames, PagingViewLayout, SelectedScrollPosition,
};

#[cfg(feature = "tracing-json")]
pub use pagemenu_core::logging::init_json_logging;

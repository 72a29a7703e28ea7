#![forbid(unsafe_code)]

//! Core: item model, geometry primitives, and measurement hooks.
//!
//! # Role in pagemenu
//! `pagemenu-core` holds the value types every other crate speaks in. It has
//! no notion of scrolling or selection; it only knows what an item is, how
//! a collection of items is validated, and what a frame looks like.
//!
//! # Primary responsibilities
//! - **Item model**: [`PagingItem`], [`ItemKey`], and the ready-made
//!   [`IndexItem`].
//! - **Collections**: [`ItemCollection`] validates key uniqueness once at
//!   ingestion so later passes can treat the collection as well-formed.
//! - **Geometry**: [`Rect`], [`Size`], and [`Insets`] in host units.
//! - **Measurement**: [`ItemMeasure`], the callback the rendering layer
//!   provides for intrinsic item sizes.
//!
//! # How it fits in the system
//! `pagemenu-layout` turns measured items into frames, and `pagemenu`
//! drives selection and scrolling on top of both.

pub mod collection;
pub mod error;
pub mod geometry;
pub mod item;
pub mod logging;
pub mod measure;

pub use collection::ItemCollection;
pub use error::InvalidItemError;
pub use geometry::{Insets, Rect, Size};
pub use item::{IndexItem, ItemKey, PagingItem};
pub use measure::{DisplayWidthMeasure, ItemMeasure, MeasuredItem};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

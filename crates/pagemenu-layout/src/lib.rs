#![forbid(unsafe_code)]

//! Layout: menu item frames, the selection indicator, and view regions.
//!
//! Everything here is a pure function of its inputs. Nothing holds
//! selection or scroll state; callers pass explicit snapshots and get
//! frames back.
//!
//! - [`MenuLayout`] lays measured items out in a row and suggests menu
//!   scroll offsets.
//! - [`indicator_frame`] interpolates the indicator between two items.
//! - [`PagingViewLayout`] splits the host bounds into menu, page, and
//!   accessory regions.

pub mod indicator;
pub mod menu;
pub mod options;
pub mod view;

pub use indicator::{
    IndicatorAnchor, IndicatorFrame, IndicatorTarget, clamp_progress, indicator_frame,
};
pub use menu::{ItemGeometry, MIN_ITEM_WIDTH, MenuLayout};
pub use options::{
    IndicatorOptions, IndicatorStyle, MenuHorizontalAlignment, MenuItemSize, MenuPosition,
    OptionsError, PagingOptions, SelectedScrollPosition,
};
pub use pagemenu_core::{Insets, Rect, Size};
pub use view::{PagingViewFrames, PagingViewLayout};

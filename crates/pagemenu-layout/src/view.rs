#![forbid(unsafe_code)]

//! Paging view frames.
//!
//! Splits the host's bounds into the menu strip, the page area, and an
//! optional trailing accessory beside the menu:
//!
//! ```text
//! Top                         Bottom
//! +----------------+----+     +---------------------+
//! | menu           |acc.|     | page                |
//! +----------------+----+     |                     |
//! | page                |     +----------------+----+
//! |                     |     | menu           |acc.|
//! +---------------------+     +----------------+----+
//! ```
//!
//! The menu is anchored to the safe area; the page spans the full width and
//! fills whatever height remains.

use pagemenu_core::{Insets, Rect};
use serde::{Deserialize, Serialize};

use crate::options::{MenuPosition, PagingOptions};

/// Frames for the three regions of a paging view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PagingViewFrames {
    pub menu: Rect,
    pub page: Rect,
    pub accessory: Option<Rect>,
}

/// Computes [`PagingViewFrames`] from options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagingViewLayout {
    position: MenuPosition,
    menu_height: f64,
    accessory_width: Option<f64>,
}

impl PagingViewLayout {
    /// Capture the view-relevant parts of `options`.
    #[must_use]
    pub fn new(options: &PagingOptions) -> Self {
        Self {
            position: options.menu_position,
            menu_height: options.menu_height.max(0.0),
            accessory_width: options.accessory_width,
        }
    }

    /// Split `bounds`, keeping the menu inside `safe_area`.
    pub fn frames(&self, bounds: Rect, safe_area: Insets) -> PagingViewFrames {
        let safe_top = bounds.y + safe_area.top;
        let safe_bottom = (bounds.bottom() - safe_area.bottom).max(safe_top);
        let accessory_width = self
            .accessory_width
            .map(|w| w.clamp(0.0, bounds.width.max(0.0)));
        let menu_width = (bounds.width - accessory_width.unwrap_or(0.0)).max(0.0);

        let (menu, page) = match self.position {
            MenuPosition::Top => {
                let menu = Rect::new(bounds.x, safe_top, menu_width, self.menu_height);
                let page_height = (bounds.bottom() - menu.bottom()).max(0.0);
                let page = Rect::new(bounds.x, menu.bottom(), bounds.width, page_height);
                (menu, page)
            }
            MenuPosition::Bottom => {
                let menu_y = (safe_bottom - self.menu_height).max(safe_top);
                let menu = Rect::new(bounds.x, menu_y, menu_width, self.menu_height);
                let page = Rect::new(bounds.x, safe_top, bounds.width, menu_y - safe_top);
                (menu, page)
            }
        };

        let accessory =
            accessory_width.map(|w| Rect::new(menu.right(), menu.y, w, menu.height));

        PagingViewFrames {
            menu,
            page,
            accessory,
        }
    }
}

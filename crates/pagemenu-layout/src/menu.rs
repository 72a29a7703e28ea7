#![forbid(unsafe_code)]

//! Menu layout engine.
//!
//! [`MenuLayout::compute`] turns measured items into one frame per item,
//! laid out left to right in collection order.
//!
//! # Invariants
//!
//! 1. The first item starts at `menu_insets.left` (plus any centering shift).
//! 2. Each following item starts at the previous item's right edge plus
//!    `menu_item_spacing`, so frames never overlap.
//! 3. Every width is at least [`MIN_ITEM_WIDTH`], so origins strictly
//!    increase even for empty labels or a zero-width container.
//! 4. Geometry is recomputed from scratch on every call and never patched.
//!
//! # Content offset
//!
//! The engine never scrolls. [`MenuLayout::selection_offset`] only suggests
//! a horizontal offset for the rendering layer to apply.

use std::ops::Range;

use pagemenu_core::{ItemKey, MeasuredItem, Rect};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::options::{MenuHorizontalAlignment, MenuItemSize, PagingOptions, SelectedScrollPosition};

/// Smallest width a menu item is given, in host units.
pub const MIN_ITEM_WIDTH: f64 = 1.0;

/// Computed frame of one menu item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    pub key: ItemKey,
    pub frame: Rect,
}

/// Frames for a whole collection plus the metrics needed to scroll it.
#[derive(Debug, Clone, Default)]
pub struct MenuLayout {
    geometries: Vec<ItemGeometry>,
    positions: FxHashMap<ItemKey, usize>,
    content_width: f64,
    container_width: f64,
    leading_inset: f64,
    trailing_inset: f64,
}

impl MenuLayout {
    /// Lay out `items` in a container `container_width` wide.
    pub fn compute(items: &[MeasuredItem], container_width: f64, options: &PagingOptions) -> Self {
        #[cfg(feature = "tracing")]
        let start = web_time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "menu.layout",
            item_count = items.len(),
            container_width,
            layout_duration_us = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        let container_width = container_width.max(0.0);
        let insets = options.menu_insets;
        let spacing = options.menu_item_spacing.max(0.0);
        let height = options.item_height();
        let count = items.len();

        let equal_width = if count == 0 {
            0.0
        } else {
            let gaps = spacing * count.saturating_sub(1) as f64;
            (container_width - insets.horizontal_sum() - gaps) / count as f64
        };

        let mut geometries = Vec::with_capacity(count);
        let mut positions = FxHashMap::with_capacity_and_hasher(count, Default::default());
        let mut x = insets.left;
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                x += spacing;
            }
            let width = match options.menu_item_size {
                MenuItemSize::FitContent { padding, min_width } => {
                    (item.size.width + 2.0 * padding).max(min_width)
                }
                MenuItemSize::EqualWidths => equal_width,
                MenuItemSize::Fixed { width } => width,
            };
            // NaN measurements fall through `max` to the floor.
            let width = width.max(MIN_ITEM_WIDTH);
            geometries.push(ItemGeometry {
                key: item.key,
                frame: Rect::new(x, insets.top, width, height),
            });
            positions.insert(item.key, idx);
            x += width;
        }
        let mut content_width = x + insets.right;

        if options.menu_horizontal_alignment == MenuHorizontalAlignment::Center
            && content_width < container_width
        {
            let shift = (container_width - content_width) / 2.0;
            for geometry in &mut geometries {
                geometry.frame = geometry.frame.offset_x(shift);
            }
            content_width = container_width;
        }

        #[cfg(feature = "tracing")]
        span.record("layout_duration_us", start.elapsed().as_micros() as u64);

        Self {
            geometries,
            positions,
            content_width,
            container_width,
            leading_inset: insets.left,
            trailing_inset: insets.right,
        }
    }

    /// All frames in collection order.
    #[inline]
    pub fn geometries(&self) -> &[ItemGeometry] {
        &self.geometries
    }

    /// Number of laid-out items.
    #[inline]
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Whether nothing was laid out.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Geometry for `key`.
    pub fn get(&self, key: ItemKey) -> Option<&ItemGeometry> {
        self.positions
            .get(&key)
            .and_then(|&idx| self.geometries.get(idx))
    }

    /// Frame for `key`.
    pub fn frame(&self, key: ItemKey) -> Option<Rect> {
        self.get(key).map(|geometry| geometry.frame)
    }

    /// Total scrollable width including insets.
    #[inline]
    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Width of the viewport the layout was computed for.
    #[inline]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Largest offset that keeps the viewport inside the content.
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.container_width).max(0.0)
    }

    /// Clamp an offset into `[0, max_offset]`.
    #[inline]
    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Indices of items intersecting `[offset, offset + width)`.
    pub fn visible_range(&self, offset: f64, width: f64) -> Range<usize> {
        if width <= 0.0 || self.geometries.is_empty() {
            return 0..0;
        }
        let end_x = offset + width;
        let start = self
            .geometries
            .partition_point(|g| g.frame.right() <= offset);
        let end = self.geometries.partition_point(|g| g.frame.x < end_x);
        start..end.max(start)
    }

    /// Menu offset that brings `key` into view per `position`.
    ///
    /// `Left`, `Right`, and `PreferCentered` are clamped to the scrollable
    /// range; `Center` is not, so edge items can sit mid-viewport when the
    /// host pads the content.
    pub fn selection_offset(&self, key: ItemKey, position: SelectedScrollPosition) -> Option<f64> {
        let frame = self.frame(key)?;
        let offset = match position {
            SelectedScrollPosition::Left => self.clamp_offset(frame.x - self.leading_inset),
            SelectedScrollPosition::Right => {
                self.clamp_offset(frame.right() + self.trailing_inset - self.container_width)
            }
            SelectedScrollPosition::Center => frame.mid_x() - self.container_width / 2.0,
            SelectedScrollPosition::PreferCentered => {
                self.clamp_offset(frame.mid_x() - self.container_width / 2.0)
            }
        };
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemenu_core::{Insets, Size};

    fn measured(widths: &[f64]) -> Vec<MeasuredItem> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| MeasuredItem {
                key: ItemKey::from(i),
                size: Size::new(w, 20.0),
            })
            .collect()
    }

    fn xs(layout: &MenuLayout) -> Vec<f64> {
        layout.geometries().iter().map(|g| g.frame.x).collect()
    }

    fn widths(layout: &MenuLayout) -> Vec<f64> {
        layout.geometries().iter().map(|g| g.frame.width).collect()
    }

    #[test]
    fn equal_widths_split_container() {
        let options = PagingOptions::default().menu_item_size(MenuItemSize::EqualWidths);
        let layout = MenuLayout::compute(&measured(&[10.0, 80.0, 30.0]), 300.0, &options);
        assert_eq!(widths(&layout), vec![100.0, 100.0, 100.0]);
        assert_eq!(xs(&layout), vec![0.0, 100.0, 200.0]);
        assert_eq!(layout.content_width(), 300.0);
        assert_eq!(layout.max_offset(), 0.0);
    }

    #[test]
    fn equal_widths_account_for_insets_and_spacing() {
        let options = PagingOptions::default()
            .menu_item_size(MenuItemSize::EqualWidths)
            .menu_insets(Insets::horizontal(10.0))
            .menu_item_spacing(5.0);
        let layout = MenuLayout::compute(&measured(&[1.0, 1.0, 1.0]), 300.0, &options);
        // (300 - 20 - 10) / 3 = 90
        assert_eq!(widths(&layout), vec![90.0, 90.0, 90.0]);
        assert_eq!(xs(&layout), vec![10.0, 105.0, 200.0]);
        assert_eq!(layout.content_width(), 300.0);
    }

    #[test]
    fn equal_widths_follow_item_count() {
        let options = PagingOptions::default().menu_item_size(MenuItemSize::EqualWidths);
        let four = MenuLayout::compute(&measured(&[1.0; 4]), 300.0, &options);
        assert_eq!(widths(&four), vec![75.0; 4]);
    }

    #[test]
    fn fit_content_runs_offsets() {
        let options = PagingOptions::default()
            .menu_item_size(MenuItemSize::FitContent {
                padding: 5.0,
                min_width: 30.0,
            })
            .menu_item_spacing(4.0);
        let layout = MenuLayout::compute(&measured(&[10.0, 50.0, 0.0]), 500.0, &options);
        assert_eq!(widths(&layout), vec![30.0, 60.0, 30.0]);
        assert_eq!(xs(&layout), vec![0.0, 34.0, 98.0]);
        assert_eq!(layout.content_width(), 128.0);
    }

    #[test]
    fn fixed_width_ignores_measurement() {
        let options = PagingOptions::default().menu_item_size(MenuItemSize::Fixed { width: 70.0 });
        let layout = MenuLayout::compute(&measured(&[5.0, 500.0]), 100.0, &options);
        assert_eq!(widths(&layout), vec![70.0, 70.0]);
        assert_eq!(layout.max_offset(), 40.0);
    }

    #[test]
    fn frames_use_item_height_and_top_inset() {
        let options = PagingOptions::default()
            .menu_height(48.0)
            .menu_insets(Insets::new(4.0, 0.0, 4.0, 0.0));
        let layout = MenuLayout::compute(&measured(&[20.0]), 100.0, &options);
        let frame = layout.frame(ItemKey::new(0)).expect("laid out");
        assert_eq!(frame.y, 4.0);
        assert_eq!(frame.height, 40.0);
    }

    #[test]
    fn center_alignment_shifts_narrow_content() {
        let options = PagingOptions::default()
            .menu_horizontal_alignment(MenuHorizontalAlignment::Center);
        let layout = MenuLayout::compute(&measured(&[40.0, 60.0]), 200.0, &options);
        assert_eq!(xs(&layout), vec![50.0, 90.0]);
        assert_eq!(layout.content_width(), 200.0);

        let wide = MenuLayout::compute(&measured(&[150.0, 150.0]), 200.0, &options);
        assert_eq!(xs(&wide), vec![0.0, 150.0]);
    }

    #[test]
    fn zero_widths_are_floored() {
        let options = PagingOptions::default();
        let fit = MenuLayout::compute(&measured(&[0.0, 0.0, 0.0]), 300.0, &options);
        assert_eq!(widths(&fit), vec![MIN_ITEM_WIDTH; 3]);
        assert_eq!(xs(&fit), vec![0.0, 1.0, 2.0]);

        let equal = PagingOptions::default().menu_item_size(MenuItemSize::EqualWidths);
        let no_viewport = MenuLayout::compute(&measured(&[10.0, 20.0]), 0.0, &equal);
        assert_eq!(widths(&no_viewport), vec![MIN_ITEM_WIDTH; 2]);
        assert_eq!(xs(&no_viewport), vec![0.0, 1.0]);

        let fixed = PagingOptions::default().menu_item_size(MenuItemSize::Fixed { width: 0.0 });
        let zero = MenuLayout::compute(&measured(&[5.0, 5.0]), 100.0, &fixed);
        assert_eq!(xs(&zero), vec![0.0, 1.0]);
    }

    #[test]
    fn empty_collection_lays_out_nothing() {
        let layout = MenuLayout::compute(&[], 320.0, &PagingOptions::default());
        assert!(layout.is_empty());
        assert_eq!(layout.visible_range(0.0, 320.0), 0..0);
        assert!(layout.selection_offset(ItemKey::new(0), SelectedScrollPosition::Left).is_none());
    }

    #[test]
    fn visible_range_is_half_open() {
        let options = PagingOptions::default().menu_item_size(MenuItemSize::Fixed { width: 100.0 });
        let layout = MenuLayout::compute(&measured(&[0.0; 10]), 250.0, &options);
        assert_eq!(layout.visible_range(0.0, 250.0), 0..3);
        assert_eq!(layout.visible_range(100.0, 250.0), 1..4);
        assert_eq!(layout.visible_range(150.0, 100.0), 1..3);
        assert_eq!(layout.visible_range(2000.0, 250.0), 10..10);
        assert_eq!(layout.visible_range(0.0, 0.0), 0..0);
    }

    #[test]
    fn selection_offsets_per_position() {
        let options = PagingOptions::default().menu_item_size(MenuItemSize::Fixed { width: 100.0 });
        let layout = MenuLayout::compute(&measured(&[0.0; 10]), 250.0, &options);
        let key = ItemKey::new(4); // frame 400..500
        let offset = |pos| layout.selection_offset(key, pos).expect("present");
        assert_eq!(offset(SelectedScrollPosition::Left), 400.0);
        assert_eq!(offset(SelectedScrollPosition::Right), 250.0);
        assert_eq!(offset(SelectedScrollPosition::Center), 325.0);
        assert_eq!(offset(SelectedScrollPosition::PreferCentered), 325.0);

        let first = ItemKey::new(0);
        assert_eq!(
            layout.selection_offset(first, SelectedScrollPosition::Center),
            Some(-75.0)
        );
        assert_eq!(
            layout.selection_offset(first, SelectedScrollPosition::PreferCentered),
            Some(0.0)
        );
        let last = ItemKey::new(9);
        assert_eq!(
            layout.selection_offset(last, SelectedScrollPosition::Left),
            Some(layout.max_offset())
        );
    }
}

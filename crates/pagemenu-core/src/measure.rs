#![forbid(unsafe_code)]

//! Intrinsic size measurement.
//!
//! The rendering layer owns fonts and cells, so it is the only party that
//! can say how large an item wants to be. It hands that knowledge in through
//! [`ItemMeasure`]. Any `Fn(&I) -> Size` closure works.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::geometry::Size;
use crate::item::{ItemKey, PagingItem};

/// Synchronous measurement callback for menu items.
pub trait ItemMeasure<I> {
    /// Natural size of the item's menu cell content.
    fn intrinsic_size(&self, item: &I) -> Size;
}

impl<I, F> ItemMeasure<I> for F
where
    F: Fn(&I) -> Size,
{
    fn intrinsic_size(&self, item: &I) -> Size {
        self(item)
    }
}

/// Terminal-style measurement: display columns times a cell size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayWidthMeasure {
    /// Width of one display column.
    pub cell_width: f64,
    /// Height of one row.
    pub cell_height: f64,
}

impl Default for DisplayWidthMeasure {
    fn default() -> Self {
        Self {
            cell_width: 1.0,
            cell_height: 1.0,
        }
    }
}

impl DisplayWidthMeasure {
    /// Measure with explicit cell metrics.
    #[must_use]
    pub const fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl<I: PagingItem> ItemMeasure<I> for DisplayWidthMeasure {
    fn intrinsic_size(&self, item: &I) -> Size {
        let columns = item.label().width() as f64;
        Size::new(columns * self.cell_width, self.cell_height)
    }
}

/// A key paired with its measured intrinsic size.
///
/// Layout consumes these instead of items so it never has to call back
/// into the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredItem {
    pub key: ItemKey,
    pub size: Size,
}

impl MeasuredItem {
    /// Measure one item.
    pub fn measure<I: PagingItem>(item: &I, measure: &impl ItemMeasure<I>) -> Self {
        Self {
            key: item.key(),
            size: measure.intrinsic_size(item),
        }
    }

    /// Measure a sequence of items in order.
    pub fn measure_all<'a, I: PagingItem + 'a>(
        items: impl IntoIterator<Item = &'a I>,
        measure: &impl ItemMeasure<I>,
    ) -> Vec<Self> {
        items
            .into_iter()
            .map(|item| Self::measure(item, measure))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::IndexItem;

    #[test]
    fn closures_measure_items() {
        let measure = |item: &IndexItem| Size::new(item.title().len() as f64 * 10.0, 20.0);
        let size = measure.intrinsic_size(&IndexItem::new(0, "abc"));
        assert_eq!(size, Size::new(30.0, 20.0));
    }

    #[test]
    fn display_width_counts_wide_glyphs() {
        let measure = DisplayWidthMeasure::new(2.0, 1.0);
        let ascii = measure.intrinsic_size(&IndexItem::new(0, "Tab"));
        assert_eq!(ascii, Size::new(6.0, 1.0));

        // CJK glyphs occupy two columns each.
        let wide = measure.intrinsic_size(&IndexItem::new(1, "设置"));
        assert_eq!(wide, Size::new(8.0, 1.0));
    }

    #[test]
    fn measure_all_preserves_order() {
        let items = vec![IndexItem::new(5, "a"), IndexItem::new(2, "bb")];
        let measured = MeasuredItem::measure_all(&items, &DisplayWidthMeasure::default());
        assert_eq!(measured.len(), 2);
        assert_eq!(measured[0].key, ItemKey::new(5));
        assert_eq!(measured[1].size.width, 2.0);
    }
}

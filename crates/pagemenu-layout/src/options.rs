#![forbid(unsafe_code)]

//! Menu configuration.
//!
//! [`PagingOptions`] is supplied at construction and may be replaced
//! wholesale at runtime. Replacing it never resets selection or scroll
//! state; it only changes what the next layout pass produces.
//!
//! Every field has a documented default, and all types round-trip through
//! serde with missing fields falling back to those defaults.

use std::fmt;

use pagemenu_core::Insets;
use serde::{Deserialize, Serialize};

/// Default menu height.
pub const DEFAULT_MENU_HEIGHT: f64 = 40.0;
/// Default indicator thickness.
pub const DEFAULT_INDICATOR_HEIGHT: f64 = 4.0;
/// Default indicator stacking order.
pub const DEFAULT_INDICATOR_Z_INDEX: i32 = 1;
/// Default number of off-screen items kept realized on each side.
pub const DEFAULT_OVERSCAN: usize = 1;

/// Where the menu sits relative to the page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuPosition {
    #[default]
    Top,
    Bottom,
}

/// How menu item widths are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MenuItemSize {
    /// Measured width plus `padding` on each side, at least `min_width`.
    FitContent { padding: f64, min_width: f64 },
    /// Available width split evenly across all items.
    EqualWidths,
    /// Every item is exactly `width` wide.
    Fixed { width: f64 },
}

impl Default for MenuItemSize {
    fn default() -> Self {
        Self::FitContent {
            padding: 0.0,
            min_width: 0.0,
        }
    }
}

/// Where the selected item is scrolled to inside the menu viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedScrollPosition {
    /// Align the item's leading edge with the viewport's.
    Left,
    /// Align the item's trailing edge with the viewport's.
    Right,
    /// Center the item, even if that scrolls past the content edges.
    Center,
    /// Center the item, clamped to the scrollable range.
    #[default]
    PreferCentered,
}

/// Placement of menu content narrower than its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuHorizontalAlignment {
    #[default]
    Left,
    Center,
}

/// Visible indicator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorStyle {
    /// Thickness of the indicator bar.
    pub height: f64,
    /// Fixed width, centered on the item. `None` follows the item width.
    pub width: Option<f64>,
    /// Stacking order relative to the menu cells.
    pub z_index: i32,
    /// Outer spacing: left/right shrink the bar, bottom lifts it.
    pub spacing: Insets,
    /// Edge insets: `left` applies at the first item, `right` at the last.
    pub insets: Insets,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            height: DEFAULT_INDICATOR_HEIGHT,
            width: None,
            z_index: DEFAULT_INDICATOR_Z_INDEX,
            spacing: Insets::ZERO,
            insets: Insets::ZERO,
        }
    }
}

impl IndicatorStyle {
    /// A bar of the given thickness.
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Fix the bar width.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the outer spacing.
    #[must_use]
    pub fn spacing(mut self, spacing: Insets) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the edge insets.
    #[must_use]
    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }
}

/// Indicator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorOptions {
    Hidden,
    Visible(IndicatorStyle),
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self::Visible(IndicatorStyle::default())
    }
}

impl IndicatorOptions {
    /// A visible indicator of the given thickness.
    #[must_use]
    pub fn visible(height: f64) -> Self {
        Self::Visible(IndicatorStyle::new(height))
    }

    /// Style when visible.
    #[must_use]
    pub const fn style(&self) -> Option<&IndicatorStyle> {
        match self {
            Self::Hidden => None,
            Self::Visible(style) => Some(style),
        }
    }
}

/// Full menu configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingOptions {
    pub menu_position: MenuPosition,
    pub menu_height: f64,
    pub menu_item_size: MenuItemSize,
    /// Content insets around the row of items.
    pub menu_insets: Insets,
    /// Gap between adjacent items.
    pub menu_item_spacing: f64,
    pub menu_horizontal_alignment: MenuHorizontalAlignment,
    pub selected_scroll_position: SelectedScrollPosition,
    /// Whether selection moves the menu offset per `selected_scroll_position`.
    pub keep_selection_visible: bool,
    pub indicator: IndicatorOptions,
    /// Off-screen items realized on each side of the viewport.
    pub overscan: usize,
    /// Width of a trailing accessory beside the menu, if any.
    pub accessory_width: Option<f64>,
}

impl Default for PagingOptions {
    fn default() -> Self {
        Self {
            menu_position: MenuPosition::Top,
            menu_height: DEFAULT_MENU_HEIGHT,
            menu_item_size: MenuItemSize::default(),
            menu_insets: Insets::ZERO,
            menu_item_spacing: 0.0,
            menu_horizontal_alignment: MenuHorizontalAlignment::Left,
            selected_scroll_position: SelectedScrollPosition::PreferCentered,
            keep_selection_visible: true,
            indicator: IndicatorOptions::default(),
            overscan: DEFAULT_OVERSCAN,
            accessory_width: None,
        }
    }
}

impl PagingOptions {
    /// Set the menu position.
    #[must_use]
    pub fn menu_position(mut self, position: MenuPosition) -> Self {
        self.menu_position = position;
        self
    }

    /// Set the menu height.
    #[must_use]
    pub fn menu_height(mut self, height: f64) -> Self {
        self.menu_height = height;
        self
    }

    /// Set the item sizing mode.
    #[must_use]
    pub fn menu_item_size(mut self, size: MenuItemSize) -> Self {
        self.menu_item_size = size;
        self
    }

    /// Set the content insets.
    #[must_use]
    pub fn menu_insets(mut self, insets: Insets) -> Self {
        self.menu_insets = insets;
        self
    }

    /// Set the inter-item spacing.
    #[must_use]
    pub fn menu_item_spacing(mut self, spacing: f64) -> Self {
        self.menu_item_spacing = spacing;
        self
    }

    /// Set the horizontal alignment of narrow content.
    #[must_use]
    pub fn menu_horizontal_alignment(mut self, alignment: MenuHorizontalAlignment) -> Self {
        self.menu_horizontal_alignment = alignment;
        self
    }

    /// Set the selection scroll position.
    #[must_use]
    pub fn selected_scroll_position(mut self, position: SelectedScrollPosition) -> Self {
        self.selected_scroll_position = position;
        self
    }

    /// Toggle selection-driven menu scrolling.
    #[must_use]
    pub fn keep_selection_visible(mut self, keep: bool) -> Self {
        self.keep_selection_visible = keep;
        self
    }

    /// Set the indicator configuration.
    #[must_use]
    pub fn indicator(mut self, indicator: IndicatorOptions) -> Self {
        self.indicator = indicator;
        self
    }

    /// Set the overscan item count.
    #[must_use]
    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Reserve a trailing accessory of the given width.
    #[must_use]
    pub fn accessory_width(mut self, width: f64) -> Self {
        self.accessory_width = Some(width);
        self
    }

    /// Height available to item cells after vertical insets.
    #[must_use]
    pub fn item_height(&self) -> f64 {
        (self.menu_height - self.menu_insets.vertical_sum()).max(0.0)
    }

    /// Check every size for finiteness and sign.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_length("menu_height", self.menu_height)?;
        check_length("menu_item_spacing", self.menu_item_spacing)?;
        if !self.menu_insets.is_valid() {
            return Err(OptionsError::InvalidInsets {
                field: "menu_insets",
            });
        }
        match self.menu_item_size {
            MenuItemSize::FitContent { padding, min_width } => {
                check_length("menu_item_size.padding", padding)?;
                check_length("menu_item_size.min_width", min_width)?;
            }
            MenuItemSize::Fixed { width } => check_length("menu_item_size.width", width)?,
            MenuItemSize::EqualWidths => {}
        }
        if let Some(width) = self.accessory_width {
            check_length("accessory_width", width)?;
        }
        if let IndicatorOptions::Visible(style) = &self.indicator {
            check_length("indicator.height", style.height)?;
            if let Some(width) = style.width {
                check_length("indicator.width", width)?;
            }
            if !style.spacing.is_valid() {
                return Err(OptionsError::InvalidInsets {
                    field: "indicator.spacing",
                });
            }
            if !style.insets.is_valid() {
                return Err(OptionsError::InvalidInsets {
                    field: "indicator.insets",
                });
            }
        }
        Ok(())
    }
}

fn check_length(field: &'static str, value: f64) -> Result<(), OptionsError> {
    if !value.is_finite() {
        return Err(OptionsError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(OptionsError::Negative { field, value });
    }
    Ok(())
}

/// Configuration rejected by [`PagingOptions::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionsError {
    NonFinite { field: &'static str },
    Negative { field: &'static str, value: f64 },
    InvalidInsets { field: &'static str },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::Negative { field, value } => {
                write!(f, "{field} must be >= 0 (got {value})")
            }
            Self::InvalidInsets { field } => {
                write!(f, "{field} must have finite, non-negative edges")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let options = PagingOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.item_height(), DEFAULT_MENU_HEIGHT);
        assert!(options.keep_selection_visible);
    }

    #[test]
    fn item_height_subtracts_vertical_insets() {
        let options = PagingOptions::default()
            .menu_height(50.0)
            .menu_insets(Insets::new(5.0, 0.0, 10.0, 0.0));
        assert_eq!(options.item_height(), 35.0);

        let squashed = PagingOptions::default()
            .menu_height(10.0)
            .menu_insets(Insets::vertical(20.0));
        assert_eq!(squashed.item_height(), 0.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let err = PagingOptions::default()
            .menu_height(-1.0)
            .validate()
            .expect_err("negative height");
        assert_eq!(
            err,
            OptionsError::Negative {
                field: "menu_height",
                value: -1.0
            }
        );

        let err = PagingOptions::default()
            .menu_item_size(MenuItemSize::Fixed { width: f64::NAN })
            .validate()
            .expect_err("nan width");
        assert_eq!(
            err,
            OptionsError::NonFinite {
                field: "menu_item_size.width"
            }
        );

        let err = PagingOptions::default()
            .indicator(IndicatorOptions::Visible(
                IndicatorStyle::new(2.0).spacing(Insets::horizontal(-4.0)),
            ))
            .validate()
            .expect_err("negative spacing");
        assert_eq!(
            err,
            OptionsError::InvalidInsets {
                field: "indicator.spacing"
            }
        );
    }

    #[test]
    fn indicator_style_builder() {
        let style = IndicatorStyle::new(2.0)
            .width(26.0)
            .z_index(i32::MAX)
            .insets(Insets::horizontal(8.0));
        assert_eq!(style.height, 2.0);
        assert_eq!(style.width, Some(26.0));
        assert_eq!(style.z_index, i32::MAX);
        assert_eq!(IndicatorOptions::Visible(style).style(), Some(&style));
        assert_eq!(IndicatorOptions::Hidden.style(), None);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let json = r#"{
            "menu_position": "bottom",
            "menu_item_size": { "mode": "equal_widths" },
            "indicator": { "kind": "hidden" }
        }"#;
        let options: PagingOptions = serde_json::from_str(json).expect("valid options");
        assert_eq!(options.menu_position, MenuPosition::Bottom);
        assert_eq!(options.menu_item_size, MenuItemSize::EqualWidths);
        assert_eq!(options.indicator, IndicatorOptions::Hidden);
        assert_eq!(options.menu_height, DEFAULT_MENU_HEIGHT);
        assert_eq!(options.overscan, DEFAULT_OVERSCAN);
    }

    #[test]
    fn options_round_trip_through_json() {
        let options = PagingOptions::default()
            .menu_item_size(MenuItemSize::FitContent {
                padding: 12.0,
                min_width: 60.0,
            })
            .indicator(IndicatorOptions::Visible(IndicatorStyle::new(3.0).width(20.0)))
            .accessory_width(72.0);
        let json = serde_json::to_string(&options).expect("serialize");
        let back: PagingOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, options);
    }
}

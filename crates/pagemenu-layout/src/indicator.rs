#![forbid(unsafe_code)]

//! Indicator geometry policy.
//!
//! The indicator is a bar at the bottom of the menu that tracks the current
//! page. While a transition is in flight it slides and resizes between the
//! two item frames in proportion to the scroll progress.
//!
//! # Invariants
//!
//! - The frame is a continuous function of progress.
//! - At progress 0 it is derived from the `from` frame alone; at progress 1
//!   from the `to` frame alone (interpolation is exact at both ends).
//! - `Hidden` never produces a frame.
//! - A missing `to` frame holds the previous indicator instead of sliding
//!   toward an undefined target.

use pagemenu_core::Rect;
use pagemenu_core::geometry::lerp;
use serde::{Deserialize, Serialize};

use crate::options::{IndicatorOptions, IndicatorStyle};

/// Indicator placement handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub frame: Rect,
    pub z_index: i32,
}

/// One end of the indicator's travel: an item frame plus where that item
/// sits in the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorAnchor {
    pub frame: Rect,
    pub is_first: bool,
    pub is_last: bool,
}

impl IndicatorAnchor {
    /// Anchor for an item frame.
    #[must_use]
    pub const fn new(frame: Rect, is_first: bool, is_last: bool) -> Self {
        Self {
            frame,
            is_first,
            is_last,
        }
    }

    fn leading_inset(&self, style: &IndicatorStyle) -> f64 {
        if self.is_first { style.insets.left } else { 0.0 }
    }

    fn trailing_inset(&self, style: &IndicatorStyle) -> f64 {
        if self.is_last { style.insets.right } else { 0.0 }
    }
}

/// What the indicator should point at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorTarget {
    /// Resting on one item.
    Settled(IndicatorAnchor),
    /// Between two items. `to` is `None` while its frame is unavailable.
    Transition {
        from: IndicatorAnchor,
        to: Option<IndicatorAnchor>,
        progress: f64,
    },
}

/// Compute the indicator frame.
///
/// `previous` is the last frame handed out; it is returned unchanged when
/// the transition target has no geometry yet.
pub fn indicator_frame(
    options: &IndicatorOptions,
    target: IndicatorTarget,
    previous: Option<IndicatorFrame>,
) -> Option<IndicatorFrame> {
    let style = options.style()?;
    match target {
        IndicatorTarget::Settled(anchor) => Some(place(style, anchor, anchor, 0.0)),
        IndicatorTarget::Transition {
            from,
            to: Some(to),
            progress,
        } => Some(place(style, from, to, clamp_progress(progress))),
        IndicatorTarget::Transition { from, to: None, .. } => {
            previous.or_else(|| Some(place(style, from, from, 0.0)))
        }
    }
}

/// Clamp a raw progress value into `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

fn place(
    style: &IndicatorStyle,
    from: IndicatorAnchor,
    to: IndicatorAnchor,
    progress: f64,
) -> IndicatorFrame {
    let item = from.frame.lerp(&to.frame, progress);
    let leading = lerp(from.leading_inset(style), to.leading_inset(style), progress);
    let trailing = lerp(from.trailing_inset(style), to.trailing_inset(style), progress);

    let mut x = item.x + style.spacing.left + leading;
    let mut width =
        (item.width - style.spacing.left - style.spacing.right - leading - trailing).max(0.0);
    if let Some(fixed) = style.width {
        x += (width - fixed) / 2.0;
        width = fixed;
    }
    let y = item.bottom() - style.height - style.spacing.bottom;

    IndicatorFrame {
        frame: Rect::new(x, y, width, style.height),
        z_index: style.z_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemenu_core::Insets;

    fn anchor(x: f64, width: f64) -> IndicatorAnchor {
        IndicatorAnchor::new(Rect::new(x, 0.0, width, 40.0), false, false)
    }

    #[test]
    fn hidden_has_no_frame() {
        let target = IndicatorTarget::Settled(anchor(0.0, 100.0));
        assert_eq!(indicator_frame(&IndicatorOptions::Hidden, target, None), None);
    }

    #[test]
    fn settled_sits_at_item_bottom() {
        let options = IndicatorOptions::visible(4.0);
        let frame = indicator_frame(&options, IndicatorTarget::Settled(anchor(10.0, 80.0)), None)
            .expect("visible");
        assert_eq!(frame.frame, Rect::new(10.0, 36.0, 80.0, 4.0));
        assert_eq!(frame.z_index, 1);
    }

    #[test]
    fn transition_interpolates_origin_and_width() {
        let options = IndicatorOptions::visible(2.0);
        let target = IndicatorTarget::Transition {
            from: anchor(0.0, 100.0),
            to: Some(anchor(100.0, 60.0)),
            progress: 0.3,
        };
        let frame = indicator_frame(&options, target, None).expect("visible").frame;
        assert!((frame.x - 30.0).abs() < 1e-9);
        assert!((frame.width - 88.0).abs() < 1e-9);
        assert_eq!(frame.height, 2.0);
    }

    #[test]
    fn endpoints_match_item_frames_exactly() {
        let options = IndicatorOptions::visible(2.0);
        let from = anchor(13.7, 91.3);
        let to = anchor(105.0, 47.9);
        for (progress, expected) in [(0.0, from), (1.0, to)] {
            let frame = indicator_frame(
                &options,
                IndicatorTarget::Transition {
                    from,
                    to: Some(to),
                    progress,
                },
                None,
            )
            .expect("visible")
            .frame;
            assert_eq!(frame.x, expected.frame.x);
            assert_eq!(frame.width, expected.frame.width);
        }
    }

    #[test]
    fn fixed_width_centers_on_item() {
        let options = IndicatorOptions::Visible(IndicatorStyle::new(2.0).width(26.0));
        let frame = indicator_frame(&options, IndicatorTarget::Settled(anchor(100.0, 100.0)), None)
            .expect("visible")
            .frame;
        assert_eq!(frame.x, 137.0);
        assert_eq!(frame.width, 26.0);
    }

    #[test]
    fn spacing_shrinks_and_lifts() {
        let options = IndicatorOptions::Visible(
            IndicatorStyle::new(2.0).spacing(Insets::new(0.0, 5.0, 3.0, 10.0)),
        );
        let frame = indicator_frame(&options, IndicatorTarget::Settled(anchor(0.0, 100.0)), None)
            .expect("visible")
            .frame;
        assert_eq!(frame, Rect::new(10.0, 35.0, 85.0, 2.0));
    }

    #[test]
    fn edge_insets_apply_at_first_and_last_items() {
        let options = IndicatorOptions::Visible(
            IndicatorStyle::new(2.0).insets(Insets::new(0.0, 6.0, 0.0, 8.0)),
        );
        let first = IndicatorAnchor::new(Rect::new(0.0, 0.0, 100.0, 40.0), true, false);
        let middle = IndicatorAnchor::new(Rect::new(100.0, 0.0, 100.0, 40.0), false, false);
        let last = IndicatorAnchor::new(Rect::new(200.0, 0.0, 100.0, 40.0), false, true);

        let at = |target| indicator_frame(&options, target, None).expect("visible").frame;
        assert_eq!(at(IndicatorTarget::Settled(first)).x, 8.0);
        assert_eq!(at(IndicatorTarget::Settled(first)).width, 92.0);
        assert_eq!(at(IndicatorTarget::Settled(middle)).width, 100.0);
        assert_eq!(at(IndicatorTarget::Settled(last)).width, 94.0);

        // Halfway from the first item, the leading inset is half applied.
        let half = at(IndicatorTarget::Transition {
            from: first,
            to: Some(middle),
            progress: 0.5,
        });
        assert_eq!(half.x, 54.0);
    }

    #[test]
    fn missing_target_holds_previous_frame() {
        let options = IndicatorOptions::visible(2.0);
        let previous = IndicatorFrame {
            frame: Rect::new(42.0, 38.0, 10.0, 2.0),
            z_index: 1,
        };
        let target = IndicatorTarget::Transition {
            from: anchor(0.0, 100.0),
            to: None,
            progress: 0.7,
        };
        assert_eq!(indicator_frame(&options, target, Some(previous)), Some(previous));

        let fallback = indicator_frame(&options, target, None).expect("visible").frame;
        assert_eq!(fallback.x, 0.0);
        assert_eq!(fallback.width, 100.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(clamp_progress(f64::NAN), 0.0);
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(1.5), 1.0);
        assert_eq!(clamp_progress(f64::INFINITY), 1.0);
        assert_eq!(clamp_progress(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_progress(0.25), 0.25);
    }
}

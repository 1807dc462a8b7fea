// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement computation: base position, flip, shift, and rounding.
//!
//! ## Overview
//!
//! [`compute_position`] is a pure function of its [`PositionInput`]. It never
//! touches a document and never fails; degenerate inputs (zero-size anchors, an
//! overlay larger than the padded boundary) clamp deterministically.
//!
//! ## Steps
//!
//! 1. Split the placement into side and alignment.
//! 2. Base position: put the overlay `offset.main_axis` beyond the anchor edge on
//!    that side and align it along the cross axis.
//! 3. Flip: if the overlay overflows the padded boundary on the edge it is heading
//!    toward, retry once on the opposite side.
//! 4. Shift: clamp both coordinates into the padded boundary.
//! 5. Round to whole pixels.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Collision, Offset, Placement, Side};

/// Everything [`compute_position`] needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionInput {
    /// Anchor rectangle in viewport coordinates.
    pub anchor: Rect,
    /// Measured overlay size.
    pub overlay: Size,
    /// Requested placement.
    pub placement: Placement,
    /// Gap and cross-axis shift.
    pub offset: Offset,
    /// Flip/shift rules.
    pub collision: Collision,
    /// Rectangle the overlay must stay within.
    pub boundary: Rect,
}

/// Result of [`compute_position`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Positioned {
    /// Left edge in whole pixels.
    pub left: f64,
    /// Top edge in whole pixels.
    pub top: f64,
    /// Placement actually used; differs from the request when flipped.
    pub placement: Placement,
}

impl Positioned {
    /// Top-left corner as a point.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Which padded boundary edges an overlay crosses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Overflow {
    /// Left edge is left of `boundary.x0 + padding`.
    pub left: bool,
    /// Right edge is right of `boundary.x1 - padding`.
    pub right: bool,
    /// Top edge is above `boundary.y0 + padding`.
    pub top: bool,
    /// Bottom edge is below `boundary.y1 - padding`.
    pub bottom: bool,
}

impl Overflow {
    /// Overflow on the edge the given side heads toward.
    pub const fn toward(&self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// True if any edge overflows.
    pub const fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Compute overflow of an overlay at `origin` against a padded boundary.
pub fn overflow(origin: Point, overlay: Size, boundary: Rect, padding: f64) -> Overflow {
    Overflow {
        left: origin.x < boundary.x0 + padding,
        right: origin.x + overlay.width > boundary.x1 - padding,
        top: origin.y < boundary.y0 + padding,
        bottom: origin.y + overlay.height > boundary.y1 - padding,
    }
}

/// Round half toward positive infinity, matching browser pixel snapping.
///
/// Goes through [`Point::floor`] so it works without `std`.
pub fn round_px(v: f64) -> f64 {
    Point::new(v + 0.5, 0.0).floor().x
}

/// Clamp `v` into `[min, max]`.
///
/// When the range is inverted (`max < min`) the result collapses to `min`.
pub fn clamp_collapsing(v: f64, min: f64, max: f64) -> f64 {
    let upper = if v < max { v } else { max };
    if min > upper { min } else { upper }
}

fn base_position(anchor: Rect, overlay: Size, side: Side, align: Align, offset: Offset) -> Point {
    let mut left = 0.0;
    let mut top = 0.0;

    // Main axis. The top/left cases derive the far edge from the anchor edge.
    match side {
        Side::Bottom => top = anchor.y1 + offset.main_axis,
        Side::Top => top = anchor.y0 - overlay.height - offset.main_axis,
        Side::Right => left = anchor.x1 + offset.main_axis,
        Side::Left => left = anchor.x0 - overlay.width - offset.main_axis,
    }

    // Cross axis.
    if side.is_vertical() {
        left = match align {
            Align::Start => anchor.x0 + offset.cross_axis,
            Align::End => anchor.x1 - overlay.width + offset.cross_axis,
            Align::Center => anchor.x0 + anchor.width() / 2.0 - overlay.width / 2.0 + offset.cross_axis,
        };
    } else {
        top = match align {
            Align::Start => anchor.y0 + offset.cross_axis,
            Align::End => anchor.y1 - overlay.height + offset.cross_axis,
            Align::Center => anchor.y0 + anchor.height() / 2.0 - overlay.height / 2.0 + offset.cross_axis,
        };
    }

    Point::new(left, top)
}

/// Compute the overlay's top-left corner and the placement actually used.
///
/// ```
/// use kurbo::{Rect, Size};
/// use tether_placement::{Collision, Offset, Placement, PositionInput, compute_position};
///
/// let out = compute_position(&PositionInput {
///     anchor: Rect::new(100.0, 100.0, 140.0, 120.0),
///     overlay: Size::new(80.0, 40.0),
///     placement: Placement::Bottom,
///     offset: Offset::from(10.0),
///     collision: Collision::default(),
///     boundary: Rect::new(0.0, 0.0, 400.0, 300.0),
/// });
/// assert_eq!((out.left, out.top, out.placement), (80.0, 130.0, Placement::Bottom));
/// ```
pub fn compute_position(input: &PositionInput) -> Positioned {
    let PositionInput {
        anchor,
        overlay,
        placement,
        offset,
        collision,
        boundary,
    } = *input;
    let align = placement.align();
    let mut side = placement.side();
    let mut pos = base_position(anchor, overlay, side, align, offset);

    if collision.flip && overflow(pos, overlay, boundary, collision.padding).toward(side) {
        side = side.opposite();
        pos = base_position(anchor, overlay, side, align, offset);
    }

    if collision.shift {
        let pad = collision.padding;
        pos.x = clamp_collapsing(pos.x, boundary.x0 + pad, boundary.x1 - pad - overlay.width);
        pos.y = clamp_collapsing(pos.y, boundary.y0 + pad, boundary.y1 - pad - overlay.height);
    }

    Positioned {
        left: round_px(pos.x),
        top: round_px(pos.y),
        placement: Placement::new(side, align),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn input(anchor: Rect, overlay: Size, placement: Placement, boundary: Rect) -> PositionInput {
        PositionInput {
            anchor,
            overlay,
            placement,
            offset: Offset::from(10.0),
            collision: Collision::default(),
            boundary,
        }
    }

    #[test]
    fn bottom_center_default() {
        let out = compute_position(&input(
            Rect::new(100.0, 100.0, 140.0, 120.0),
            Size::new(80.0, 40.0),
            Placement::Bottom,
            Rect::new(0.0, 0.0, 400.0, 300.0),
        ));
        assert_eq!(out.left, 80.0);
        assert_eq!(out.top, 130.0);
        assert_eq!(out.placement, Placement::Bottom);
    }

    #[test]
    fn flips_to_top_when_bottom_overflows() {
        let out = compute_position(&input(
            Rect::new(140.0, 250.0, 180.0, 270.0),
            Size::new(100.0, 60.0),
            Placement::Bottom,
            Rect::new(0.0, 0.0, 320.0, 320.0),
        ));
        assert_eq!(out.placement, Placement::Top);
        assert_eq!(out.top, 180.0);
    }

    #[test]
    fn flip_keeps_alignment_and_happens_once() {
        // Too tall for either side: flips once to top, shift then pins it.
        let out = compute_position(&input(
            Rect::new(100.0, 140.0, 140.0, 160.0),
            Size::new(60.0, 250.0),
            Placement::BottomStart,
            Rect::new(0.0, 0.0, 300.0, 300.0),
        ));
        assert_eq!(out.placement, Placement::TopStart);
        assert_eq!(out.top, 20.0);
    }

    #[test]
    fn no_flip_when_disabled() {
        let mut i = input(
            Rect::new(140.0, 250.0, 180.0, 270.0),
            Size::new(100.0, 60.0),
            Placement::Bottom,
            Rect::new(0.0, 0.0, 320.0, 320.0),
        );
        i.collision.flip = false;
        let out = compute_position(&i);
        assert_eq!(out.placement, Placement::Bottom);
        // Shift still clamps into the padded boundary: 320 - 20 - 60.
        assert_eq!(out.top, 240.0);
    }

    #[test]
    fn right_and_left_sides() {
        let anchor = Rect::new(100.0, 100.0, 140.0, 120.0);
        let boundary = Rect::new(0.0, 0.0, 400.0, 400.0);
        let size = Size::new(50.0, 30.0);

        let right = compute_position(&input(anchor, size, Placement::RightStart, boundary));
        assert_eq!((right.left, right.top), (150.0, 100.0));

        let left = compute_position(&input(anchor, size, Placement::LeftEnd, boundary));
        assert_eq!((left.left, left.top), (40.0, 90.0));

        let left_center = compute_position(&input(anchor, size, Placement::Left, boundary));
        assert_eq!(left_center.top, 95.0);
    }

    #[test]
    fn top_end_uses_anchor_edges() {
        let out = compute_position(&input(
            Rect::new(100.0, 100.0, 140.0, 120.0),
            Size::new(30.0, 20.0),
            Placement::TopEnd,
            Rect::new(0.0, 0.0, 400.0, 400.0),
        ));
        assert_eq!((out.left, out.top), (110.0, 70.0));
    }

    #[test]
    fn cross_axis_offset_applies() {
        let mut i = input(
            Rect::new(100.0, 100.0, 140.0, 120.0),
            Size::new(60.0, 100.0),
            Placement::RightStart,
            Rect::new(0.0, 0.0, 400.0, 400.0),
        );
        i.offset = Offset::new(6.0, -6.0);
        let out = compute_position(&i);
        assert_eq!((out.left, out.top), (146.0, 94.0));
    }

    #[test]
    fn left_flips_to_right() {
        let out = compute_position(&input(
            Rect::new(30.0, 100.0, 60.0, 120.0),
            Size::new(80.0, 20.0),
            Placement::Left,
            Rect::new(0.0, 0.0, 400.0, 400.0),
        ));
        assert_eq!(out.placement, Placement::Right);
        assert_eq!(out.left, 70.0);
    }

    #[test]
    fn inverted_clamp_collapses_to_min() {
        // 500 wide overlay in a 300 wide boundary: max_left < min_left.
        let out = compute_position(&input(
            Rect::new(100.0, 100.0, 140.0, 120.0),
            Size::new(500.0, 40.0),
            Placement::Bottom,
            Rect::new(0.0, 0.0, 300.0, 300.0),
        ));
        assert_eq!(out.left, 20.0);
    }

    #[test]
    fn clamp_collapsing_orders() {
        assert_eq!(clamp_collapsing(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_collapsing(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_collapsing(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_collapsing(15.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp_collapsing(-15.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn rounding_snaps_half_up() {
        assert_eq!(round_px(1.5), 2.0);
        assert_eq!(round_px(1.49), 1.0);
        assert_eq!(round_px(-2.5), -2.0);
        assert_eq!(round_px(-2.6), -3.0);
    }

    #[test]
    fn zero_size_anchor_is_a_point() {
        let out = compute_position(&input(
            Rect::new(200.0, 100.0, 200.0, 100.0),
            Size::new(40.0, 20.0),
            Placement::Bottom,
            Rect::new(0.0, 0.0, 400.0, 400.0),
        ));
        assert_eq!((out.left, out.top), (180.0, 110.0));
    }

    #[test]
    fn overflow_reports_edges() {
        let b = Rect::new(0.0, 0.0, 100.0, 100.0);
        let o = overflow(Point::new(5.0, 85.0), Size::new(10.0, 10.0), b, 10.0);
        assert!(o.left && o.bottom && !o.right && !o.top);
        assert!(o.toward(Side::Bottom));
        assert!(!o.toward(Side::Top));
        assert!(!overflow(Point::new(20.0, 20.0), Size::new(10.0, 10.0), b, 10.0).any());
    }

    fn placement_strategy() -> impl Strategy<Value = Placement> {
        (0..Placement::ALL.len()).prop_map(|i| Placement::ALL[i])
    }

    proptest! {
        #[test]
        fn shift_stays_within_padded_boundary(
            ax in -200.0..600.0_f64,
            ay in -200.0..600.0_f64,
            aw in 0.0..120.0_f64,
            ah in 0.0..60.0_f64,
            w in 1.0..200.0_f64,
            h in 1.0..200.0_f64,
            pad in 0.0..30.0_f64,
            placement in placement_strategy(),
        ) {
            let boundary = Rect::new(0.0, 0.0, 480.0, 360.0);
            let out = compute_position(&PositionInput {
                anchor: Rect::new(ax, ay, ax + aw, ay + ah),
                overlay: Size::new(w, h),
                placement,
                offset: Offset::default(),
                collision: Collision::default().with_padding(pad),
                boundary,
            });
            let (min_l, max_l) = (boundary.x0 + pad, boundary.x1 - pad - w);
            let (min_t, max_t) = (boundary.y0 + pad, boundary.y1 - pad - h);
            // Rounding may move a clamped value by at most half a pixel.
            if min_l <= max_l {
                prop_assert!(out.left >= min_l - 0.5 && out.left <= max_l + 0.5);
            }
            if min_t <= max_t {
                prop_assert!(out.top >= min_t - 0.5 && out.top <= max_t + 0.5);
            }
            prop_assert_eq!(out.placement.align(), placement.align());
        }

        #[test]
        fn result_is_whole_pixels(
            ax in -50.0..450.0_f64,
            ay in -50.0..450.0_f64,
            w in 1.0..100.0_f64,
            placement in placement_strategy(),
        ) {
            let out = compute_position(&PositionInput {
                anchor: Rect::new(ax, ay, ax + 13.3, ay + 7.7),
                overlay: Size::new(w, 33.3),
                placement,
                offset: Offset::new(3.3, 1.1),
                collision: Collision::NONE,
                boundary: Rect::new(0.0, 0.0, 400.0, 400.0),
            });
            prop_assert_eq!(round_px(out.left), out.left);
            prop_assert_eq!(round_px(out.top), out.top);
            prop_assert_eq!(out.placement, placement);
        }
    }
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: sides, alignments, offsets, and collision rules.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::Rect;

/// The side of the anchor an overlay is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Side {
    /// Above the anchor.
    Top,
    /// To the right of the anchor.
    Right,
    /// Below the anchor.
    Bottom,
    /// To the left of the anchor.
    Left,
}

impl Side {
    /// All sides, in clockwise order starting at the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side across the anchor (`Top` ↔ `Bottom`, `Left` ↔ `Right`).
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True for `Top` and `Bottom`, whose main axis is vertical.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Text form used in placement strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Alignment along the cross axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Align {
    /// Align to the anchor's near edge (left or top).
    Start,
    /// Center on the anchor's midpoint.
    #[default]
    Center,
    /// Align to the anchor's far edge (right or bottom).
    End,
}

impl Align {
    /// All alignments.
    pub const ALL: [Self; 3] = [Self::Start, Self::Center, Self::End];
}

/// Requested side and alignment of an overlay relative to its anchor.
///
/// Every value decomposes into exactly one `(Side, Align)` pair via
/// [`Placement::side`] and [`Placement::align`], and [`Placement::new`] rebuilds it.
/// The text form is the side name, optionally suffixed with `-start` or `-end`.
///
/// ```
/// use tether_placement::{Align, Placement, Side};
///
/// let p: Placement = "right-start".parse().unwrap();
/// assert_eq!((p.side(), p.align()), (Side::Right, Align::Start));
/// assert_eq!(Placement::new(Side::Bottom, Align::Center).as_str(), "bottom");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[allow(missing_docs, reason = "Variant names spell out side and alignment.")]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    Right,
    RightStart,
    RightEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
}

impl Placement {
    /// All twelve placements.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
    ];

    /// Build a placement from its parts.
    pub const fn new(side: Side, align: Align) -> Self {
        match (side, align) {
            (Side::Top, Align::Center) => Self::Top,
            (Side::Top, Align::Start) => Self::TopStart,
            (Side::Top, Align::End) => Self::TopEnd,
            (Side::Right, Align::Center) => Self::Right,
            (Side::Right, Align::Start) => Self::RightStart,
            (Side::Right, Align::End) => Self::RightEnd,
            (Side::Bottom, Align::Center) => Self::Bottom,
            (Side::Bottom, Align::Start) => Self::BottomStart,
            (Side::Bottom, Align::End) => Self::BottomEnd,
            (Side::Left, Align::Center) => Self::Left,
            (Side::Left, Align::Start) => Self::LeftStart,
            (Side::Left, Align::End) => Self::LeftEnd,
        }
    }

    /// The side component.
    pub const fn side(self) -> Side {
        match self {
            Self::Top | Self::TopStart | Self::TopEnd => Side::Top,
            Self::Right | Self::RightStart | Self::RightEnd => Side::Right,
            Self::Bottom | Self::BottomStart | Self::BottomEnd => Side::Bottom,
            Self::Left | Self::LeftStart | Self::LeftEnd => Side::Left,
        }
    }

    /// The alignment component.
    pub const fn align(self) -> Align {
        match self {
            Self::Top | Self::Right | Self::Bottom | Self::Left => Align::Center,
            Self::TopStart | Self::RightStart | Self::BottomStart | Self::LeftStart => Align::Start,
            Self::TopEnd | Self::RightEnd | Self::BottomEnd | Self::LeftEnd => Align::End,
        }
    }

    /// Same side, different alignment.
    pub const fn with_align(self, align: Align) -> Self {
        Self::new(self.side(), align)
    }

    /// Same alignment on the opposite side.
    pub const fn flipped(self) -> Self {
        Self::new(self.side().opposite(), self.align())
    }

    /// Text form, e.g. `"bottom-start"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a placement string names no known side/alignment.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown placement `{0}`")]
pub struct ParsePlacementError(pub String);

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, align) = match s.split_once('-') {
            Some((side, align)) => (side, Some(align)),
            None => (s, None),
        };
        let side = match side {
            "top" => Side::Top,
            "right" => Side::Right,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            _ => return Err(ParsePlacementError(s.to_owned())),
        };
        let align = match align {
            None => Align::Center,
            Some("start") => Align::Start,
            Some("end") => Align::End,
            Some(_) => return Err(ParsePlacementError(s.to_owned())),
        };
        Ok(Self::new(side, align))
    }
}

/// Distance between anchor and overlay.
///
/// `main_axis` pushes the overlay away from the anchor along the placement side;
/// `cross_axis` slides it along the anchor edge. A bare scalar converts into an
/// offset along the main axis only, in code and in configuration (`8` or
/// `{"mainAxis": 8, "crossAxis": -6}`).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", from = "OffsetRepr"))]
pub struct Offset {
    /// Gap between anchor edge and overlay edge.
    pub main_axis: f64,
    /// Shift along the anchor edge.
    pub cross_axis: f64,
}

impl Offset {
    /// Default gap along the main axis.
    pub const DEFAULT_MAIN_AXIS: f64 = 10.0;

    /// Offset with both components.
    pub const fn new(main_axis: f64, cross_axis: f64) -> Self {
        Self {
            main_axis,
            cross_axis,
        }
    }

    /// Offset along the main axis only.
    pub const fn main(main_axis: f64) -> Self {
        Self::new(main_axis, 0.0)
    }

    /// Replace the main-axis component.
    pub const fn with_main(self, main_axis: f64) -> Self {
        Self::new(main_axis, self.cross_axis)
    }

    /// Replace the cross-axis component.
    pub const fn with_cross(self, cross_axis: f64) -> Self {
        Self::new(self.main_axis, cross_axis)
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::main(Self::DEFAULT_MAIN_AXIS)
    }
}

impl From<f64> for Offset {
    fn from(main_axis: f64) -> Self {
        Self::main(main_axis)
    }
}

/// Either configuration form of an [`Offset`]. Missing axes take the defaults.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OffsetRepr {
    Scalar(f64),
    Axes {
        #[serde(default, rename = "mainAxis")]
        main_axis: Option<f64>,
        #[serde(default, rename = "crossAxis")]
        cross_axis: Option<f64>,
    },
}

#[cfg(feature = "serde")]
impl From<OffsetRepr> for Offset {
    fn from(repr: OffsetRepr) -> Self {
        match repr {
            OffsetRepr::Scalar(main_axis) => Self::main(main_axis),
            OffsetRepr::Axes {
                main_axis,
                cross_axis,
            } => Self::new(
                main_axis.unwrap_or(Self::DEFAULT_MAIN_AXIS),
                cross_axis.unwrap_or(0.0),
            ),
        }
    }
}

/// Collision handling applied after the base position is computed.
///
/// `flip` and `shift` are independent: flip may change the side, then shift clamps
/// the result into the padded boundary.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Collision {
    /// Try the opposite side once when the requested side overflows.
    pub flip: bool,
    /// Clamp into the padded boundary.
    pub shift: bool,
    /// Inset applied to every boundary edge.
    pub padding: f64,
}

impl Collision {
    /// Default boundary inset.
    pub const DEFAULT_PADDING: f64 = 20.0;

    /// No flip, no shift.
    pub const NONE: Self = Self {
        flip: false,
        shift: false,
        padding: Self::DEFAULT_PADDING,
    };

    /// Replace the padding.
    pub const fn with_padding(self, padding: f64) -> Self {
        Self { padding, ..self }
    }
}

impl Default for Collision {
    fn default() -> Self {
        Self {
            flip: true,
            shift: true,
            padding: Self::DEFAULT_PADDING,
        }
    }
}

/// A partially specified rectangle, as written in configuration.
///
/// Missing fields are zero. Width and height may be negative; the resulting rect is
/// not normalized.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RectInit {
    /// Left edge.
    pub x: Option<f64>,
    /// Top edge.
    pub y: Option<f64>,
    /// Width.
    pub width: Option<f64>,
    /// Height.
    pub height: Option<f64>,
}

impl RectInit {
    /// The described rectangle.
    pub fn to_rect(self) -> Rect {
        let x = self.x.unwrap_or(0.0);
        let y = self.y.unwrap_or(0.0);
        Rect::new(
            x,
            y,
            x + self.width.unwrap_or(0.0),
            y + self.height.unwrap_or(0.0),
        )
    }
}

impl From<RectInit> for Rect {
    fn from(init: RectInit) -> Self {
        init.to_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn offset_from_scalar_or_axes() {
        let scalar: Offset = serde_json::from_str("8").unwrap();
        assert_eq!(scalar, Offset::new(8.0, 0.0));
        let axes: Offset = serde_json::from_str(r#"{"mainAxis": 12, "crossAxis": -20}"#).unwrap();
        assert_eq!(axes, Offset::new(12.0, -20.0));
        let partial: Offset = serde_json::from_str(r#"{"crossAxis": -6}"#).unwrap();
        assert_eq!(partial, Offset::new(10.0, -6.0));
        assert!(serde_json::from_str::<Offset>(r#""wide""#).is_err());

        let back = serde_json::to_string(&axes).unwrap();
        assert_eq!(back, r#"{"mainAxis":12.0,"crossAxis":-20.0}"#);
    }

    #[test]
    fn rect_init_fills_missing_fields() {
        let r = RectInit {
            x: Some(10.0),
            width: Some(30.0),
            ..RectInit::default()
        };
        assert_eq!(r.to_rect(), Rect::new(10.0, 0.0, 40.0, 0.0));
        assert_eq!(Rect::from(RectInit::default()), Rect::ZERO);
    }

    #[test]
    fn every_placement_decomposes_and_rebuilds() {
        for p in Placement::ALL {
            assert_eq!(Placement::new(p.side(), p.align()), p, "rebuild {p}");
        }
    }

    #[test]
    fn every_side_align_pair_is_distinct() {
        let mut seen = alloc::vec::Vec::new();
        for side in Side::ALL {
            for align in Align::ALL {
                let p = Placement::new(side, align);
                assert!(!seen.contains(&p), "duplicate placement {p}");
                seen.push(p);
            }
        }
        assert_eq!(seen.len(), Placement::ALL.len(), "12 placements");
    }

    #[test]
    fn text_form_round_trips() {
        for p in Placement::ALL {
            assert_eq!(p.as_str().parse::<Placement>(), Ok(p), "parse {p}");
        }
    }

    #[test]
    fn unsuffixed_text_is_centered() {
        let p: Placement = "left".parse().unwrap();
        assert_eq!(p.align(), Align::Center);
        assert_eq!(p.side(), Side::Left);
    }

    #[test]
    fn rejects_unknown_text() {
        let err = "middle".parse::<Placement>().unwrap_err();
        assert_eq!(err.0, "middle");
        assert!("top-middle".parse::<Placement>().is_err());
        assert!("".parse::<Placement>().is_err());
    }

    #[test]
    fn flipping_keeps_alignment() {
        assert_eq!(Placement::BottomStart.flipped(), Placement::TopStart);
        assert_eq!(Placement::RightEnd.flipped(), Placement::LeftEnd);
        assert_eq!(Placement::Top.flipped(), Placement::Bottom);
    }

    #[test]
    fn offset_defaults() {
        assert_eq!(Offset::default(), Offset::new(10.0, 0.0));
        assert_eq!(Offset::from(4.0), Offset::new(4.0, 0.0));
        assert_eq!(Offset::main(8.0).with_cross(-6.0), Offset::new(8.0, -6.0));
    }

    #[test]
    fn collision_defaults() {
        let c = Collision::default();
        assert!(c.flip && c.shift);
        assert_eq!(c.padding, 20.0);
        assert_eq!(c.with_padding(8.0).padding, 8.0);
    }
}

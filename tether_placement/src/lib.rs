// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Placement: pure placement math for anchored overlays.
//!
//! Tether Placement is the geometric core shared by menus, popovers, toolbars, and pickers
//! that float next to an anchor.
//!
//! - Describes a request as a [`Placement`] (side plus alignment), an [`Offset`], and
//!   [`Collision`] rules.
//! - Computes the overlay's top-left corner with [`compute_position`], flipping to the
//!   opposite side at most once and shifting into a padded boundary.
//! - Picks the boundary with [`resolve_boundary`] (container content box or viewport).
//!
//! It does not know about documents, nodes, or selections. Higher layers resolve a live
//! anchor rectangle and measure the overlay, then feed both here.
//!
//! ## Coordinates
//!
//! All rectangles are [`kurbo::Rect`] in viewport space: `x0` is left, `y0` is top,
//! `x1` is right, `y1` is bottom. Results are snapped to whole pixels.
//!
//! ## Degenerate input
//!
//! When the overlay does not fit inside the padded boundary, shifting collapses to the
//! left/top bound instead of failing. See [`clamp_collapsing`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use tether_placement::{Collision, Offset, Placement, PositionInput, compute_position};
//!
//! // A 100×60 popover below an anchor near the bottom of a 320×320 viewport.
//! let out = compute_position(&PositionInput {
//!     anchor: Rect::new(140.0, 250.0, 180.0, 270.0),
//!     overlay: Size::new(100.0, 60.0),
//!     placement: Placement::Bottom,
//!     offset: Offset::from(10.0),
//!     collision: Collision::default(),
//!     boundary: Rect::new(0.0, 0.0, 320.0, 320.0),
//! });
//!
//! // Not enough room below, so it flips above the anchor.
//! assert_eq!(out.placement, Placement::Top);
//! assert_eq!(out.top, 180.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

// Property tests run on the host and need the std macros.
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod boundary;
pub mod compute;
pub mod types;

pub use boundary::{is_degenerate, resolve_boundary};
pub use compute::{
    Overflow, PositionInput, Positioned, clamp_collapsing, compute_position, overflow, round_px,
};
pub use types::{Align, Collision, Offset, ParsePlacementError, Placement, RectInit, Side};

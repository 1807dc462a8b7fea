// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration surface of an anchored overlay.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use kurbo::Rect;
use tether_placement::{Align, Collision, Offset, Placement, PositionInput, Positioned};

use crate::host::LayoutHost;
use crate::resolve::{AnchorCapture, RectResolver, SelectionEdge};
use crate::selection::SelectionController;

/// How the host positions the overlay box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Document coordinates: the host scroll offset is added to the result.
    #[default]
    Absolute,
    /// Viewport coordinates, used as computed.
    Fixed,
}

/// What a pass does when the anchor can no longer be resolved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DetachedAnchorBehavior {
    /// Close the overlay.
    #[default]
    Remove,
    /// Keep the last applied position.
    Pin,
    /// Write nothing and retry on later passes until the anchor comes back.
    Track,
}

/// The rectangle an overlay is kept inside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Boundary<N> {
    /// The host viewport.
    #[default]
    Viewport,
    /// The content box of a container element, or the viewport if it is detached or
    /// has no area.
    Element(N),
}

bitflags::bitflags! {
    /// Viewport changes that trigger a reposition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UpdateOn: u8 {
        /// Any scroll, including nested scroll containers.
        const SCROLL = 0b0000_0001;
        /// Viewport resize.
        const RESIZE = 0b0000_0010;
    }
}

impl Default for UpdateOn {
    fn default() -> Self {
        Self::SCROLL | Self::RESIZE
    }
}

/// Converts a resolved anchor into an overlay position.
///
/// The default is [`tether_placement::compute_position`]. Implemented for closures
/// `Fn(&PositionInput) -> Positioned`.
pub trait PositionHook {
    /// Place the overlay.
    fn place(&self, input: &PositionInput) -> Positioned;
}

impl<F> PositionHook for F
where
    F: Fn(&PositionInput) -> Positioned,
{
    fn place(&self, input: &PositionInput) -> Positioned {
        self(input)
    }
}

/// Callback fired after every applied position write.
pub type PositionCallback = Box<dyn FnMut(&crate::controller::AppliedPosition)>;

/// Everything an [`AnchoredOverlay`](crate::AnchoredOverlay) is configured with.
///
/// Anchor sources are tried in order: `anchor_rect`, then `anchor`, then the selection.
pub struct AnchoredConfig<H: LayoutHost + ?Sized> {
    /// A fixed anchor rectangle.
    pub anchor_rect: Option<Rect>,
    /// A live anchor node.
    pub anchor: Option<H::Node>,
    /// Custom rectangle for node anchors.
    pub anchor_rect_resolver: Option<Box<dyn RectResolver<H>>>,
    /// Suppresses positioning entirely when it returns false for the viewport.
    pub should_position: Option<fn(Rect) -> bool>,
    /// Requested placement.
    pub placement: Placement,
    /// Coordinate space of the result.
    pub strategy: Strategy,
    /// Gap along the main axis and nudge along the cross axis.
    pub offset: Offset,
    /// Overrides the alignment in `placement`.
    pub align: Option<Align>,
    /// Also report a minimum width equal to the anchor's width.
    pub match_anchor_width: bool,
    /// Keep the overlay at least as wide as it measured on open.
    pub lock_width_on_open: bool,
    /// Which rectangle of a multi-line selection to anchor to.
    pub selection_edge: SelectionEdge,
    /// Flip and shift rules.
    pub collision: Collision,
    /// Boundary for collision handling.
    pub boundary: Boundary<H::Node>,
    /// Which viewport changes trigger a reposition.
    pub update_on: UpdateOn,
    /// Policy when the anchor disappears.
    pub detached_anchor_behavior: DetachedAnchorBehavior,
    /// Called after every applied write.
    pub on_position_change: Option<PositionCallback>,
    /// Selection to lock while mounted.
    pub selection: Option<Rc<dyn SelectionController>>,
    /// Replaces [`capture_anchor`](crate::capture_anchor).
    pub capture: Option<Box<dyn AnchorCapture<H>>>,
    /// Replaces [`compute_position`](tether_placement::compute_position).
    pub position: Option<Box<dyn PositionHook>>,
}

impl<H: LayoutHost + ?Sized> Default for AnchoredConfig<H> {
    fn default() -> Self {
        Self {
            anchor_rect: None,
            anchor: None,
            anchor_rect_resolver: None,
            should_position: None,
            placement: Placement::Bottom,
            strategy: Strategy::Absolute,
            offset: Offset::default(),
            align: None,
            match_anchor_width: false,
            lock_width_on_open: false,
            selection_edge: SelectionEdge::Start,
            collision: Collision::default(),
            boundary: Boundary::Viewport,
            update_on: UpdateOn::default(),
            detached_anchor_behavior: DetachedAnchorBehavior::Remove,
            on_position_change: None,
            selection: None,
            capture: None,
            position: None,
        }
    }
}

impl<H: LayoutHost + ?Sized> fmt::Debug for AnchoredConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchoredConfig")
            .field("anchor_rect", &self.anchor_rect)
            .field("anchor", &self.anchor)
            .field("placement", &self.placement)
            .field("strategy", &self.strategy)
            .field("offset", &self.offset)
            .field("align", &self.align)
            .field("match_anchor_width", &self.match_anchor_width)
            .field("lock_width_on_open", &self.lock_width_on_open)
            .field("selection_edge", &self.selection_edge)
            .field("collision", &self.collision)
            .field("boundary", &self.boundary)
            .field("update_on", &self.update_on)
            .field("detached_anchor_behavior", &self.detached_anchor_behavior)
            .finish_non_exhaustive()
    }
}

impl<H: LayoutHost + ?Sized> AnchoredConfig<H> {
    /// Anchor to a fixed rectangle.
    ///
    /// Accepts a partial [`RectInit`](tether_placement::RectInit) from configuration.
    pub fn at_rect(rect: impl Into<Rect>) -> Self {
        Self {
            anchor_rect: Some(rect.into()),
            ..Self::default()
        }
    }

    /// Anchor to a node.
    pub fn at_node(node: H::Node) -> Self {
        Self {
            anchor: Some(node),
            ..Self::default()
        }
    }

    /// Anchor to the current selection.
    pub fn at_selection() -> Self {
        Self::default()
    }

    /// Set the requested placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the offset.
    #[must_use]
    pub fn with_offset(mut self, offset: impl Into<Offset>) -> Self {
        self.offset = offset.into();
        self
    }

    /// Override the alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Set the collision rules.
    #[must_use]
    pub fn with_collision(mut self, collision: Collision) -> Self {
        self.collision = collision;
        self
    }

    /// Set the collision padding, keeping flip and shift as they are.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.collision = self.collision.with_padding(padding);
        self
    }

    /// Constrain to a container element.
    #[must_use]
    pub fn with_boundary(mut self, boundary: Boundary<H::Node>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the coordinate space.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the detached-anchor policy.
    #[must_use]
    pub fn with_detached(mut self, behavior: DetachedAnchorBehavior) -> Self {
        self.detached_anchor_behavior = behavior;
        self
    }

    /// Choose which viewport changes reposition.
    #[must_use]
    pub fn with_update_on(mut self, update_on: UpdateOn) -> Self {
        self.update_on = update_on;
        self
    }

    /// Report the anchor width as a minimum width.
    #[must_use]
    pub fn matching_anchor_width(mut self) -> Self {
        self.match_anchor_width = true;
        self
    }

    /// Use the width measured at attach time as a minimum width for the rest of the
    /// overlay's life.
    #[must_use]
    pub fn locking_width_on_open(mut self) -> Self {
        self.lock_width_on_open = true;
        self
    }

    /// Choose which rectangle of a multi-line selection to anchor to.
    #[must_use]
    pub fn with_selection_edge(mut self, edge: SelectionEdge) -> Self {
        self.selection_edge = edge;
        self
    }

    /// Suppress positioning for viewports rejected by `predicate`.
    #[must_use]
    pub fn with_should_position(mut self, predicate: fn(Rect) -> bool) -> Self {
        self.should_position = Some(predicate);
        self
    }

    /// Use a custom rectangle for node anchors.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl RectResolver<H> + 'static) -> Self {
        self.anchor_rect_resolver = Some(Box::new(resolver));
        self
    }

    /// Replace anchor capture.
    #[must_use]
    pub fn with_capture(mut self, capture: impl AnchorCapture<H> + 'static) -> Self {
        self.capture = Some(Box::new(capture));
        self
    }

    /// Replace the placement computation.
    #[must_use]
    pub fn with_position_hook(mut self, hook: impl PositionHook + 'static) -> Self {
        self.position = Some(Box::new(hook));
        self
    }

    /// Lock `selection` while mounted.
    #[must_use]
    pub fn with_selection(mut self, selection: Rc<dyn SelectionController>) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Observe every applied write.
    #[must_use]
    pub fn on_position_change(
        mut self,
        callback: impl FnMut(&crate::controller::AppliedPosition) + 'static,
    ) -> Self {
        self.on_position_change = Some(Box::new(callback));
        self
    }

    /// The placement actually requested, with the `align` override applied.
    pub fn effective_placement(&self) -> Placement {
        match self.align {
            Some(align) => self.placement.with_align(align),
            None => self.placement,
        }
    }
}

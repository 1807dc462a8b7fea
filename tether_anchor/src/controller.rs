// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The anchored overlay controller.
//!
//! ## Lifecycle
//!
//! An [`AnchoredOverlay`] is created from an [`AnchoredConfig`] and driven by the host:
//!
//! 1. [`AnchoredOverlay::attach`] captures the anchor, takes the selection lock, and runs
//!    the first pass. It returns a [`FrameRequest`] for a second pass after layout
//!    settles.
//! 2. [`AnchoredOverlay::viewport_changed`] is called for every scroll/resize. It never
//!    positions directly; it hands back a frame to schedule and, if one was already
//!    pending, the frame to cancel.
//! 3. [`AnchoredOverlay::run_frame`] is called when a scheduled frame fires. Only the most
//!    recently scheduled token runs a pass; older tokens are ignored, so any burst of
//!    viewport changes produces one recomputation.
//! 4. [`AnchoredOverlay::detach`] cancels the pending frame and releases the lock.
//!
//! ## Anchor loss
//!
//! When a pass cannot resolve the anchor, [`DetachedAnchorBehavior`] decides:
//! `Remove` reports [`PassOutcome::Close`] and the host removes the overlay, cancelling
//! the frame it carries; `Pin` and `Track` keep it mounted without writing a position.

use kurbo::{Rect, Size, Vec2};
use tether_placement::{Placement, PositionInput, compute_position, resolve_boundary, round_px};

use crate::config::{AnchoredConfig, Boundary, DetachedAnchorBehavior, Strategy, UpdateOn};
use crate::host::LayoutHost;
use crate::resolve::{CapturedAnchor, capture_anchor, resolve_anchor_rect};

/// Controller state.
///
/// `Repositioning` is transient; it is held only while a pass runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverlayState {
    /// Created, or attached without a resolved anchor yet.
    Initializing,
    /// A position has been applied.
    Positioned,
    /// A pass is running.
    Repositioning,
    /// Closing; no further passes run.
    Closing,
    /// Detached.
    Removed,
}

/// Handle for one scheduled animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Raw token value, for hosts that key their frame callbacks by integer.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Frame scheduling the host must perform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    /// Previously scheduled frame to cancel, if any.
    pub cancel: Option<FrameToken>,
    /// Frame to schedule; pass it back to [`AnchoredOverlay::run_frame`].
    pub schedule: FrameToken,
}

/// Viewport change reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewportChange {
    /// Document or nested container scrolled.
    Scroll,
    /// Viewport resized.
    Resize,
}

impl ViewportChange {
    /// The [`UpdateOn`] flag that enables this change.
    pub const fn flag(self) -> UpdateOn {
        match self {
            Self::Scroll => UpdateOn::SCROLL,
            Self::Resize => UpdateOn::RESIZE,
        }
    }
}

/// A position written by a pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AppliedPosition {
    /// Left edge, in the coordinate space named by `strategy`.
    pub left: f64,
    /// Top edge, in the coordinate space named by `strategy`.
    pub top: f64,
    /// Placement after collision handling.
    pub placement: Placement,
    /// Minimum width: the rounded anchor width when matching it, or the width locked
    /// on open, whichever is larger.
    pub min_width: Option<f64>,
    /// Coordinate space.
    pub strategy: Strategy,
}

/// Result of a pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PassOutcome {
    /// A new position was applied.
    Applied(AppliedPosition),
    /// Positioning is suppressed for this viewport.
    Skipped,
    /// Anchor lost; last position kept.
    Pinned,
    /// Anchor lost; waiting for it to come back.
    Tracking,
    /// Anchor lost; the host should remove the overlay.
    Close {
        /// Frame that was pending when the overlay closed; the host should cancel it.
        cancel: Option<FrameToken>,
    },
    /// The frame token was superseded or cancelled.
    Stale,
    /// Not attached, or already closing.
    Inactive,
}

/// Result of [`AnchoredOverlay::attach`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attached {
    /// Outcome of the first pass.
    pub outcome: PassOutcome,
    /// Layout-settle pass to schedule, unless the first pass closed the overlay.
    pub frame: Option<FrameRequest>,
}

/// Keeps one overlay positioned against its anchor.
pub struct AnchoredOverlay<H: LayoutHost + ?Sized> {
    config: AnchoredConfig<H>,
    state: OverlayState,
    attached: bool,
    captured: Option<CapturedAnchor<H::Node>>,
    anchor_rect: Option<Rect>,
    applied: Option<AppliedPosition>,
    overlay_size: Size,
    pending: Option<FrameToken>,
    next_frame: u64,
    locked: bool,
    writes: u64,
    locked_width: Option<f64>,
}

impl<H: LayoutHost + ?Sized> core::fmt::Debug for AnchoredOverlay<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnchoredOverlay")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("captured", &self.captured)
            .field("applied", &self.applied)
            .field("pending", &self.pending)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

impl<H: LayoutHost + ?Sized> AnchoredOverlay<H> {
    /// Create a detached controller.
    pub fn new(config: AnchoredConfig<H>) -> Self {
        Self {
            config,
            state: OverlayState::Initializing,
            attached: false,
            captured: None,
            anchor_rect: None,
            applied: None,
            overlay_size: Size::ZERO,
            pending: None,
            next_frame: 0,
            locked: false,
            writes: 0,
            locked_width: None,
        }
    }

    /// Configuration.
    pub fn config(&self) -> &AnchoredConfig<H> {
        &self.config
    }

    /// Mutable configuration. Changes take effect on the next pass.
    pub fn config_mut(&mut self) -> &mut AnchoredConfig<H> {
        &mut self.config
    }

    /// Current state.
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// True between [`attach`](Self::attach) and [`detach`](Self::detach).
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Anchor captured at attach time.
    pub fn captured(&self) -> Option<&CapturedAnchor<H::Node>> {
        self.captured.as_ref()
    }

    /// Last successfully resolved anchor rectangle.
    pub fn anchor_rect(&self) -> Option<Rect> {
        self.anchor_rect
    }

    /// Last applied position.
    pub fn applied(&self) -> Option<&AppliedPosition> {
        self.applied.as_ref()
    }

    /// Number of position writes so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Frame currently waiting to run.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    /// True while this overlay holds its selection lock.
    pub fn holds_selection_lock(&self) -> bool {
        self.locked
    }

    /// Measured overlay size used by passes.
    pub fn overlay_size(&self) -> Size {
        self.overlay_size
    }

    /// Update the measured overlay size used by later passes.
    pub fn set_overlay_size(&mut self, size: Size) {
        self.overlay_size = size;
    }

    /// Mount: capture the anchor, lock the selection, and run the first pass.
    ///
    /// Attaching an already attached overlay does nothing.
    pub fn attach(&mut self, host: &H, overlay_size: Size) -> Attached {
        if self.attached {
            return Attached {
                outcome: PassOutcome::Inactive,
                frame: None,
            };
        }
        self.attached = true;
        self.state = OverlayState::Initializing;
        self.applied = None;
        self.anchor_rect = None;
        self.overlay_size = overlay_size;
        self.locked_width = self
            .config
            .lock_width_on_open
            .then(|| round_px(overlay_size.width));

        let captured = match &self.config.capture {
            Some(hook) => hook.capture(host),
            None => capture_anchor(host, self.config.anchor_rect, self.config.anchor.as_ref()),
        };
        tracing::trace!(anchor = ?captured, "anchor captured");
        self.captured = Some(captured);

        if let Some(selection) = &self.config.selection {
            selection.lock();
            self.locked = true;
        }

        let outcome = self.pass(host);
        let frame = (!matches!(outcome, PassOutcome::Close { .. })).then(|| self.schedule());
        Attached { outcome, frame }
    }

    /// Report a viewport change. Returns the frame to schedule, if the change is
    /// relevant.
    pub fn viewport_changed(&mut self, change: ViewportChange) -> Option<FrameRequest> {
        if !self.is_live() || !self.config.update_on.contains(change.flag()) {
            return None;
        }
        Some(self.schedule())
    }

    /// Run the pass for a fired frame. Superseded tokens are ignored.
    pub fn run_frame(&mut self, host: &H, token: FrameToken) -> PassOutcome {
        if self.pending != Some(token) {
            tracing::trace!(token = token.get(), "stale frame ignored");
            return PassOutcome::Stale;
        }
        self.pending = None;
        self.pass(host)
    }

    /// Run a pass immediately, for example after the overlay's content changed size.
    pub fn reposition(&mut self, host: &H) -> PassOutcome {
        self.pass(host)
    }

    /// Start closing: no further passes, selection lock released.
    ///
    /// Returns the pending frame the host should cancel.
    pub fn begin_close(&mut self) -> Option<FrameToken> {
        if !self.is_live() {
            return None;
        }
        self.close()
    }

    /// Unmount. Returns the pending frame the host should cancel.
    pub fn detach(&mut self) -> Option<FrameToken> {
        let cancel = self.pending.take();
        self.release_lock();
        self.attached = false;
        self.state = OverlayState::Removed;
        cancel
    }

    /// False while the configured selection lock is held, so a selection change
    /// caused by interacting with this overlay does not dismiss it.
    pub fn accepts_selection_dismissal(&self) -> bool {
        self.config
            .selection
            .as_ref()
            .is_none_or(|selection| !selection.is_locked())
    }

    fn is_live(&self) -> bool {
        self.attached && !matches!(self.state, OverlayState::Closing | OverlayState::Removed)
    }

    fn schedule(&mut self) -> FrameRequest {
        let cancel = self.pending.take();
        self.next_frame += 1;
        let token = FrameToken(self.next_frame);
        self.pending = Some(token);
        FrameRequest {
            cancel,
            schedule: token,
        }
    }

    fn close(&mut self) -> Option<FrameToken> {
        self.state = OverlayState::Closing;
        self.release_lock();
        self.pending.take()
    }

    fn release_lock(&mut self) {
        if !self.locked {
            return;
        }
        self.locked = false;
        if let Some(selection) = &self.config.selection {
            selection.unlock();
        }
    }

    fn pass(&mut self, host: &H) -> PassOutcome {
        if !self.is_live() {
            return PassOutcome::Inactive;
        }
        let viewport = host.viewport();
        if self.config.should_position.is_some_and(|allow| !allow(viewport)) {
            tracing::trace!("positioning suppressed for viewport");
            return PassOutcome::Skipped;
        }
        let Some(captured) = self.captured.as_ref() else {
            return PassOutcome::Inactive;
        };

        let previous = self.state;
        self.state = OverlayState::Repositioning;
        let placement = self.config.effective_placement();
        let resolved = resolve_anchor_rect(
            host,
            captured,
            self.config.anchor_rect_resolver.as_deref(),
            placement,
            self.config.selection_edge,
        );

        let Some(anchor) = resolved else {
            return match self.config.detached_anchor_behavior {
                DetachedAnchorBehavior::Remove => {
                    let cancel = self.close();
                    tracing::debug!(cancel = ?cancel, "anchor lost; closing overlay");
                    PassOutcome::Close { cancel }
                }
                DetachedAnchorBehavior::Pin => {
                    self.state = previous;
                    PassOutcome::Pinned
                }
                DetachedAnchorBehavior::Track => {
                    self.state = previous;
                    PassOutcome::Tracking
                }
            };
        };
        self.anchor_rect = Some(anchor);

        let container = match &self.config.boundary {
            Boundary::Viewport => None,
            Boundary::Element(node) if host.is_connected(node) => host.content_box(node),
            Boundary::Element(_) => None,
        };
        let input = PositionInput {
            anchor,
            overlay: self.overlay_size,
            placement,
            offset: self.config.offset,
            collision: self.config.collision,
            boundary: resolve_boundary(container, viewport),
        };
        let placed = match &self.config.position {
            Some(hook) => hook.place(&input),
            None => compute_position(&input),
        };

        let strategy = self.config.strategy;
        let scroll = match strategy {
            Strategy::Absolute => host.scroll_offset(),
            Strategy::Fixed => Vec2::ZERO,
        };
        let applied = AppliedPosition {
            left: placed.left + scroll.x,
            top: placed.top + scroll.y,
            placement: placed.placement,
            min_width: self.min_width(anchor),
            strategy,
        };
        self.applied = Some(applied);
        self.writes += 1;
        self.state = OverlayState::Positioned;
        tracing::trace!(
            left = applied.left,
            top = applied.top,
            placement = applied.placement.as_str(),
            "overlay positioned"
        );
        if let Some(callback) = self.config.on_position_change.as_mut() {
            callback(&applied);
        }
        PassOutcome::Applied(applied)
    }

    fn min_width(&self, anchor: Rect) -> Option<f64> {
        let matched = self
            .config
            .match_anchor_width
            .then(|| round_px(anchor.width()));
        match (matched, self.locked_width) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter tying a Tether Anchor controller to the overlay stack.
//!
//! ## Feature
//!
//! Enable with `anchored_adapter`.
//!
//! ## Notes
//!
//! An [`AnchoredSession`] owns one [`AnchoredOverlay`] and the [`OverlayId`] it was
//! admitted under. Passes are forwarded to the controller and their outcomes are
//! applied to the stack: a position updates the overlay's hit-test bounds, and a lost
//! anchor under the `Remove` policy takes the overlay out with
//! [`DismissReason::AnchorLost`].

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Rect, Size, Vec2};
use tether_anchor::{
    AnchoredOverlay, AppliedPosition, FrameRequest, FrameToken, LayoutHost, PassOutcome,
    Strategy, ViewportChange,
};

use crate::base::OverlayBase;
use crate::stack::{Admitted, OverlayStack};
use crate::types::{DismissReason, Dismissed, OverlayId};

/// An anchored overlay registered in a stack.
#[derive(Debug)]
pub struct AnchoredSession<H: LayoutHost + ?Sized> {
    id: OverlayId,
    controller: AnchoredOverlay<H>,
}

/// Result of [`AnchoredSession::open`].
#[derive(Debug)]
pub struct Opened<H: LayoutHost + ?Sized> {
    /// The new session.
    pub session: AnchoredSession<H>,
    /// Overlays displaced by admitting this one.
    pub displaced: Vec<Dismissed>,
    /// Layout-settle frame to schedule.
    pub frame: Option<FrameRequest>,
    /// Set when the anchor was already gone at open time.
    pub closed: Option<Dismissed>,
}

impl<H: LayoutHost + ?Sized> AnchoredSession<H> {
    /// Admit `base` into `stack`, then attach `controller` and run its first pass.
    pub fn open(
        stack: &mut OverlayStack,
        base: OverlayBase,
        controller: AnchoredOverlay<H>,
        host: &H,
        overlay_size: Size,
        now: Duration,
    ) -> Opened<H> {
        let Admitted { id, displaced } = stack.admit(base, now);
        let mut session = Self { id, controller };
        let attached = session.controller.attach(host, overlay_size);
        let (closed, _) = session.apply(stack, host, attached.outcome);
        Opened {
            session,
            displaced,
            frame: attached.frame,
            closed,
        }
    }

    /// Stack id of this overlay.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// The controller.
    pub fn controller(&self) -> &AnchoredOverlay<H> {
        &self.controller
    }

    /// Mutable controller, e.g. to report a new overlay size.
    pub fn controller_mut(&mut self) -> &mut AnchoredOverlay<H> {
        &mut self.controller
    }

    /// Forward a viewport change.
    pub fn viewport_changed(&mut self, change: ViewportChange) -> Option<FrameRequest> {
        self.controller.viewport_changed(change)
    }

    /// Run a fired frame and apply its outcome to `stack`.
    pub fn run_frame(
        &mut self,
        stack: &mut OverlayStack,
        host: &H,
        token: FrameToken,
    ) -> Option<Dismissed> {
        let outcome = self.controller.run_frame(host, token);
        self.apply(stack, host, outcome).0
    }

    /// Run a pass now and apply its outcome to `stack`.
    ///
    /// If the pass closed the overlay, also returns the pending frame to cancel.
    pub fn reposition(
        &mut self,
        stack: &mut OverlayStack,
        host: &H,
    ) -> (Option<Dismissed>, Option<FrameToken>) {
        let outcome = self.controller.reposition(host);
        self.apply(stack, host, outcome)
    }

    /// Close this overlay. Returns its dismissal (if it was still open) and the frame
    /// the host should cancel.
    pub fn close(
        &mut self,
        stack: &mut OverlayStack,
        reason: DismissReason,
    ) -> (Option<Dismissed>, Option<FrameToken>) {
        let cancel = self.controller.begin_close();
        (stack.remove(self.id, reason), cancel)
    }

    /// Tell the session the stack dismissed an overlay (Escape, outside click, ...).
    ///
    /// If it was this one, the controller starts closing; returns the frame to cancel.
    pub fn on_dismissed(&mut self, dismissed: &Dismissed) -> Option<FrameToken> {
        if dismissed.id != self.id {
            return None;
        }
        self.controller.begin_close()
    }

    /// Unmount the controller once the exit transition completed.
    pub fn detach(&mut self) -> Option<FrameToken> {
        self.controller.detach()
    }

    fn apply(
        &mut self,
        stack: &mut OverlayStack,
        host: &H,
        outcome: PassOutcome,
    ) -> (Option<Dismissed>, Option<FrameToken>) {
        match outcome {
            PassOutcome::Applied(position) => {
                let bounds = viewport_bounds(&position, self.controller.overlay_size(), host);
                if let Err(err) = stack.set_bounds(self.id, bounds) {
                    tracing::trace!(%err, "positioned overlay already left the stack");
                }
                (None, None)
            }
            PassOutcome::Close { cancel } => {
                (stack.remove(self.id, DismissReason::AnchorLost), cancel)
            }
            _ => (None, None),
        }
    }
}

/// Hit-test bounds in viewport coordinates for an applied position.
pub fn viewport_bounds<H: LayoutHost + ?Sized>(
    position: &AppliedPosition,
    size: Size,
    host: &H,
) -> Rect {
    let scroll = match position.strategy {
        Strategy::Absolute => host.scroll_offset(),
        Strategy::Fixed => Vec2::ZERO,
    };
    let width = position.min_width.map_or(size.width, |w| w.max(size.width));
    Rect::from_origin_size(
        (position.left - scroll.x, position.top - scroll.y),
        (width, size.height),
    )
}

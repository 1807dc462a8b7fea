// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers, reasons, and errors shared by the stack and the overlay base.

use core::fmt;

use crate::transition::ExitTransition;

/// Identifier for an overlay in an [`OverlayStack`](crate::OverlayStack).
///
/// This is a small, copyable handle that stays stable across pushes and removals.
/// It consists of a slot index and a generation counter.
///
/// ### Semantics
///
/// - On removal, the slot is freed; any existing `OverlayId` that pointed to that slot
///   is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct
///   `OverlayId`.
///
/// Stale ids never alias a newer overlay because the generation must match, so a
/// late removal request for an overlay that already closed is a no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct OverlayId(pub(crate) u32, pub(crate) u32);

impl OverlayId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Kind of overlay, used for stacking permissions.
///
/// Two overlays share a class when they are the same kind of UI (e.g. both are the
/// editor settings menu).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverlayClass(pub &'static str);

impl OverlayClass {
    /// Class name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for OverlayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Keys the stack reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Dismisses the topmost overlay.
    Escape,
    /// Anything else; ignored.
    Other,
}

/// Why an overlay left the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DismissReason {
    /// Escape pressed.
    Escape,
    /// Pointer pressed outside the overlay.
    OutsideClick,
    /// Closed by the overlay itself or by [`OverlayStack::pop`](crate::OverlayStack::pop).
    Explicit,
    /// Its anchor disappeared.
    AnchorLost,
    /// A newly admitted overlay may not be placed above it.
    Displaced,
    /// The whole stack was closed.
    Group,
}

/// An overlay removed from the stack.
///
/// The host plays [`exit`](Self::exit) and unmounts the overlay when it completes.
#[derive(Debug, PartialEq, Eq)]
pub struct Dismissed {
    /// Removed overlay.
    pub id: OverlayId,
    /// Its class.
    pub class: OverlayClass,
    /// Why it was removed.
    pub reason: DismissReason,
    /// Exit transition to drive.
    pub exit: ExitTransition,
}

/// Overlay lifecycle.
///
/// Transitions are monotonic: `Open → Closing → Removed`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lifecycle {
    /// In the stack.
    Open,
    /// Out of the stack, exit transition running.
    Closing,
    /// Gone.
    Removed,
}

/// Misuse of the overlay API.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// Mount-only state was read before the overlay was mounted.
    #[error("overlay is not mounted")]
    NotMounted,
    /// The id does not name an overlay in the stack.
    #[error("overlay {0:?} is not in the stack")]
    UnknownOverlay(OverlayId),
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay stack.
//!
//! ## Ordering
//!
//! Overlays are kept in push order; the last pushed is topmost. Only the topmost reacts
//! to Escape and outside clicks, so nested overlays close one level at a time.
//!
//! ## Removal
//!
//! Every operation that takes an overlay out of the stack returns a [`Dismissed`]
//! record carrying the reason and a started [`ExitTransition`]. Removing an overlay that
//! is no longer in the stack returns `None`.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect};

use crate::base::OverlayBase;
use crate::transition::{ExitTransition, TimerToken};
use crate::types::{DismissReason, Dismissed, Key, Lifecycle, OverlayError, OverlayId};

#[derive(Clone, Debug)]
struct Entry {
    id: OverlayId,
    base: OverlayBase,
}

/// Result of [`OverlayStack::admit`].
#[derive(Debug)]
pub struct Admitted {
    /// The new overlay.
    pub id: OverlayId,
    /// Overlays removed to make room, topmost first.
    pub displaced: Vec<Dismissed>,
}

/// Ordered set of open overlays.
///
/// The host owns one stack per document and routes key presses and capture-phase pointer
/// presses into it.
#[derive(Clone, Default)]
pub struct OverlayStack {
    entries: Vec<Entry>,   // bottom → top
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    next_timer: u64,
}

impl core::fmt::Debug for OverlayStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ids: Vec<_> = self.entries.iter().map(|e| (e.id, e.base.class())).collect();
        f.debug_struct("OverlayStack")
            .field("open", &ids)
            .field("slots", &self.generations.len())
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl OverlayStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open overlays.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no overlay is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topmost overlay.
    pub fn peek(&self) -> Option<OverlayId> {
        self.entries.last().map(|e| e.id)
    }

    /// True if `id` is open.
    pub fn contains(&self, id: OverlayId) -> bool {
        self.position(id).is_some()
    }

    /// `Open` while `id` is in the stack.
    ///
    /// Once dismissed, an overlay's lifecycle is tracked by its [`ExitTransition`].
    pub fn lifecycle(&self, id: OverlayId) -> Option<Lifecycle> {
        self.contains(id).then_some(Lifecycle::Open)
    }

    /// Open overlays, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Settings and mount state of an open overlay.
    pub fn get(&self, id: OverlayId) -> Option<&OverlayBase> {
        self.position(id).map(|i| &self.entries[i].base)
    }

    /// Mutable settings and mount state of an open overlay.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut OverlayBase> {
        let i = self.position(id)?;
        Some(&mut self.entries[i].base)
    }

    /// Push an overlay on top, mounting it at `now`.
    pub fn push(&mut self, mut base: OverlayBase, now: Duration) -> OverlayId {
        base.mount(now);
        let id = self.allocate();
        tracing::trace!(
            ?id,
            class = base.class().name(),
            depth = self.entries.len() + 1,
            "overlay pushed"
        );
        self.entries.push(Entry { id, base });
        id
    }

    /// Push an overlay after dismissing, from the top down, every overlay it may not
    /// be placed above.
    ///
    /// Dismissal stops at the first overlay the newcomer is allowed to cover, so
    /// unrelated overlays never interleave.
    pub fn admit(&mut self, base: OverlayBase, now: Duration) -> Admitted {
        let mut displaced = Vec::new();
        while let Some(top) = self.entries.last() {
            if base.can_overlay(Some(top.base.class())) {
                break;
            }
            let idx = self.entries.len() - 1;
            displaced.push(self.dismiss_at(idx, DismissReason::Displaced));
        }
        let id = self.push(base, now);
        Admitted { id, displaced }
    }

    /// Remove the topmost overlay.
    pub fn pop(&mut self) -> Option<Dismissed> {
        let idx = self.entries.len().checked_sub(1)?;
        Some(self.dismiss_at(idx, DismissReason::Explicit))
    }

    /// Remove `id` wherever it is in the stack. Returns `None` if it is not open.
    pub fn remove(&mut self, id: OverlayId, reason: DismissReason) -> Option<Dismissed> {
        let idx = self.position(id)?;
        Some(self.dismiss_at(idx, reason))
    }

    /// Route a key press. Escape dismisses the topmost overlay.
    pub fn handle_key(&mut self, key: Key) -> Option<Dismissed> {
        if key != Key::Escape {
            return None;
        }
        let idx = self.entries.len().checked_sub(1)?;
        Some(self.dismiss_at(idx, DismissReason::Escape))
    }

    /// Route a capture-phase pointer press at `point`.
    ///
    /// Dismisses the topmost overlay if the press is outside its bounds and the overlay
    /// accepts outside clicks at `now`.
    pub fn handle_click(&mut self, point: Point, now: Duration) -> Option<Dismissed> {
        let top = self.entries.last()?;
        if !top.base.accepts_outside_click(now) || top.base.contains(point) {
            return None;
        }
        let idx = self.entries.len() - 1;
        Some(self.dismiss_at(idx, DismissReason::OutsideClick))
    }

    /// Dismiss every overlay, topmost first.
    pub fn close_all(&mut self) -> Vec<Dismissed> {
        let mut out = Vec::with_capacity(self.entries.len());
        while let Some(idx) = self.entries.len().checked_sub(1) {
            out.push(self.dismiss_at(idx, DismissReason::Group));
        }
        out
    }

    /// Update the hit-test bounds of an open overlay.
    pub fn set_bounds(&mut self, id: OverlayId, bounds: Rect) -> Result<(), OverlayError> {
        let base = self.get_mut(id).ok_or(OverlayError::UnknownOverlay(id))?;
        base.set_bounds(bounds);
        Ok(())
    }

    /// Record that an open overlay finished its entry animation.
    pub fn mark_shown(&mut self, id: OverlayId) -> Result<(), OverlayError> {
        self.get_mut(id)
            .ok_or(OverlayError::UnknownOverlay(id))?
            .mark_shown();
        Ok(())
    }

    /// Drop everything without producing exit transitions.
    ///
    /// Slot generations survive, so ids handed out before the reset stay stale.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.free_list.clear();
        self.free_list.extend((0..self.generations.len()).rev());
    }

    fn position(&self, id: OverlayId) -> Option<usize> {
        self.entries.iter().rposition(|e| e.id == id)
    }

    fn allocate(&mut self) -> OverlayId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "OverlayId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "OverlayId uses 32-bit indices by design."
            )]
            ((self.generations.len() - 1) as u32, generation)
        };
        OverlayId::new(idx, generation)
    }

    fn dismiss_at(&mut self, idx: usize, reason: DismissReason) -> Dismissed {
        let Entry { id, base } = self.entries.remove(idx);
        self.free_list.push(id.idx());
        self.next_timer += 1;
        let exit = ExitTransition::start(base.was_shown(), TimerToken(self.next_timer));
        tracing::debug!(?id, class = base.class().name(), ?reason, "overlay dismissed");
        Dismissed {
            id,
            class: base.class(),
            reason,
            exit,
        }
    }
}

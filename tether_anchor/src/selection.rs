// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection locking while selection-anchored overlays are open.
//!
//! Interacting with a toolbar or picker steals focus, and the host would normally
//! collapse or move the selection the overlay is anchored to. Overlays lock the
//! selection while mounted and unlock it when they leave. Locks nest: the selection is
//! released only when every holder has unlocked.

use core::cell::Cell;

/// Host-side selection lock.
///
/// Implementations preserve the exact selection on lock and restore it (best effort)
/// on the final unlock.
pub trait SelectionController {
    /// Take one lock.
    fn lock(&self);
    /// Release one lock. Releasing with no locks held is a no-op.
    fn unlock(&self);
    /// True while at least one lock is held.
    fn is_locked(&self) -> bool;
}

/// Counting [`SelectionController`] with an optional owner tag.
///
/// Wrap it in an `Rc` and hand clones to every overlay that should hold the lock.
/// The owner tag is informational only; concurrent lockers are not arbitrated.
#[derive(Debug, Default)]
pub struct SelectionLock {
    depth: Cell<u32>,
    owner: Cell<Option<&'static str>>,
}

impl SelectionLock {
    /// An unlocked selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding locks.
    pub fn depth(&self) -> u32 {
        self.depth.get()
    }

    /// Tag of the first named locker, while locked.
    pub fn owner(&self) -> Option<&'static str> {
        self.owner.get()
    }

    /// Take one lock, recording `owner` if no named locker holds it yet.
    pub fn lock_as(&self, owner: &'static str) {
        if self.owner.get().is_none() {
            self.owner.set(Some(owner));
        }
        self.lock();
    }
}

impl SelectionController for SelectionLock {
    fn lock(&self) {
        let depth = self.depth.get().saturating_add(1);
        self.depth.set(depth);
        tracing::trace!(depth, owner = ?self.owner.get(), "selection locked");
    }

    fn unlock(&self) {
        let Some(depth) = self.depth.get().checked_sub(1) else {
            tracing::trace!("unlock without lock ignored");
            return;
        };
        self.depth.set(depth);
        if depth == 0 {
            self.owner.set(None);
        }
        tracing::trace!(depth, "selection unlocked");
    }

    fn is_locked(&self) -> bool {
        self.depth.get() > 0
    }
}

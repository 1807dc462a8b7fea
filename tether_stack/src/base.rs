// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay state shared by every kind of overlay.

use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect};

use crate::types::{OverlayClass, OverlayError};

/// Default stacking order for overlays.
pub const DEFAULT_Z_INDEX: i32 = 1000;

/// Outside clicks within this long after mount are ignored, so the click that opened
/// an overlay does not immediately close it.
pub const OUTSIDE_CLICK_GRACE: Duration = Duration::from_millis(300);

/// Common overlay settings and mount state.
#[derive(Clone, Debug)]
pub struct OverlayBase {
    class: OverlayClass,
    z_index: i32,
    close_on_click_outside: bool,
    can_overlay: Vec<OverlayClass>,
    bounds: Rect,
    mounted_at: Option<Duration>,
    shown: bool,
}

impl OverlayBase {
    /// An unmounted overlay of `class` with default settings.
    pub fn new(class: OverlayClass) -> Self {
        Self {
            class,
            z_index: DEFAULT_Z_INDEX,
            close_on_click_outside: true,
            can_overlay: Vec::new(),
            bounds: Rect::ZERO,
            mounted_at: None,
            shown: false,
        }
    }

    /// Set the stacking order.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Choose whether outside clicks close this overlay.
    #[must_use]
    pub fn with_close_on_click_outside(mut self, close: bool) -> Self {
        self.close_on_click_outside = close;
        self
    }

    /// Allow this overlay to be placed above overlays of `class`.
    #[must_use]
    pub fn allowing_above(mut self, class: OverlayClass) -> Self {
        if !self.can_overlay.contains(&class) {
            self.can_overlay.push(class);
        }
        self
    }

    /// Class tag.
    pub fn class(&self) -> OverlayClass {
        self.class
    }

    /// Stacking order.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Whether outside clicks close this overlay (after the grace window).
    pub fn close_on_click_outside(&self) -> bool {
        self.close_on_click_outside
    }

    /// Hit-test bounds in viewport coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Update the hit-test bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// True if a pointer at `point` is inside this overlay.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Whether this overlay may be placed above `other`.
    ///
    /// `None` stands for something that is not an overlay and can always be covered.
    /// Otherwise `other` must be in the allow-set; an empty allow-set permits nothing.
    pub fn can_overlay(&self, other: Option<OverlayClass>) -> bool {
        match other {
            None => true,
            Some(class) => self.can_overlay.contains(&class),
        }
    }

    /// Record the mount time.
    pub fn mount(&mut self, now: Duration) {
        self.mounted_at = Some(now);
    }

    /// True once mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Mount time.
    pub fn mounted_at(&self) -> Result<Duration, OverlayError> {
        self.mounted_at.ok_or(OverlayError::NotMounted)
    }

    /// Time since mount.
    pub fn age(&self, now: Duration) -> Result<Duration, OverlayError> {
        Ok(now.saturating_sub(self.mounted_at()?))
    }

    /// Record that the entry animation ran.
    pub fn mark_shown(&mut self) {
        self.shown = true;
    }

    /// True if the entry animation ran, so closing needs an exit transition.
    pub fn was_shown(&self) -> bool {
        self.shown
    }

    /// True if an outside click at `now` should close this overlay.
    pub fn accepts_outside_click(&self, now: Duration) -> bool {
        self.close_on_click_outside
            && self
                .age(now)
                .is_ok_and(|age| age >= OUTSIDE_CLICK_GRACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: OverlayClass = OverlayClass("editor-settings-menu");
    const THEME: OverlayClass = OverlayClass("theme-select-menu");
    const BLOCK: OverlayClass = OverlayClass("block-options-menu");

    #[test]
    fn stacking_permission() {
        let theme = OverlayBase::new(THEME).allowing_above(SETTINGS);
        assert!(theme.can_overlay(None));
        assert!(theme.can_overlay(Some(SETTINGS)));
        assert!(!theme.can_overlay(Some(BLOCK)));

        let plain = OverlayBase::new(BLOCK);
        assert!(plain.can_overlay(None));
        assert!(!plain.can_overlay(Some(SETTINGS)));
        assert!(!plain.can_overlay(Some(BLOCK)));
    }

    #[test]
    fn mount_state_before_mount_is_an_error() {
        let base = OverlayBase::new(BLOCK);
        assert_eq!(base.mounted_at(), Err(OverlayError::NotMounted));
        assert!(!base.accepts_outside_click(Duration::from_secs(10)));
    }

    #[test]
    fn outside_click_grace_window() {
        let mut base = OverlayBase::new(BLOCK);
        base.mount(Duration::from_millis(1_000));
        assert!(!base.accepts_outside_click(Duration::from_millis(1_299)));
        assert!(base.accepts_outside_click(Duration::from_millis(1_300)));

        let mut sticky = OverlayBase::new(BLOCK).with_close_on_click_outside(false);
        sticky.mount(Duration::ZERO);
        assert!(!sticky.accepts_outside_click(Duration::from_secs(5)));
    }

    #[test]
    fn defaults() {
        let base = OverlayBase::new(BLOCK);
        assert_eq!(base.z_index(), 1000);
        assert!(base.close_on_click_outside());
        assert!(!base.was_shown());
        assert_eq!(base.with_z_index(5).z_index(), 5);
    }
}

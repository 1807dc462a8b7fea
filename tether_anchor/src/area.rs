// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared container overlays are mounted into.

use alloc::string::String;

use crate::host::LayoutHost;

/// Default identifier of the overlay root element.
pub const DEFAULT_OVERLAY_ROOT_ID: &str = "tether-overlay-root";

/// Cached handle to the overlay root.
///
/// Hosts can replace the document body (e.g. on client-side navigation), which
/// disconnects the root. [`OverlayArea::root`] checks the cached node and looks the root
/// up again by its stable id when it went stale.
#[derive(Clone, Debug)]
pub struct OverlayArea<N> {
    id: String,
    cached: Option<N>,
}

impl<N: Clone> OverlayArea<N> {
    /// Area rooted at the element with `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cached: None,
        }
    }

    /// Stable identifier of the root element.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current root, re-acquired if the cached one is no longer connected.
    pub fn root<H>(&mut self, host: &H) -> Option<N>
    where
        H: LayoutHost<Node = N> + ?Sized,
    {
        if let Some(node) = self.cached.as_ref().filter(|n| host.is_connected(n)) {
            return Some(node.clone());
        }
        self.cached = host.element_by_id(&self.id);
        if self.cached.is_none() {
            tracing::debug!(id = %self.id, "overlay root not found");
        }
        self.cached.clone()
    }

    /// Drop the cached handle.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl<N: Clone> Default for OverlayArea<N> {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_ROOT_ID)
    }
}

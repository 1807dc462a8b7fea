// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document seam: what the resolver needs to know about nodes and the selection.
//!
//! Implement [`LayoutHost`] over your toolkit's document (a browser DOM through
//! `web-sys`, a retained widget tree, a test fixture). The resolver and controller only
//! read through it and never hold onto live handles beyond a [`TextRange`] snapshot.

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Rect, Vec2};

/// Coarse node classification used by the text-sensitive probe.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A text node with `len` characters.
    Text {
        /// Character count.
        len: usize,
    },
    /// An element with a box.
    Element,
}

/// What part of a node to measure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The node's full box.
    Box,
    /// A character sub-range of a text node.
    Chars {
        /// First character offset.
        start: usize,
        /// One past the last character offset.
        end: usize,
    },
}

/// One boundary point of a range: a node and an offset within it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextPosition<N> {
    /// Container node.
    pub node: N,
    /// Offset within the container.
    pub offset: usize,
}

/// A detached copy of a selection range.
///
/// Hosts return a fresh clone from [`LayoutHost::current_range`], so mutations of the
/// live selection after capture do not leak into this value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRange<N> {
    /// Range start.
    pub start: TextPosition<N>,
    /// Range end.
    pub end: TextPosition<N>,
    /// True if the user selected from `end` back to `start`.
    pub backward: bool,
}

impl<N> TextRange<N> {
    /// A forward range from `start` to `end`.
    pub fn new(start: TextPosition<N>, end: TextPosition<N>) -> Self {
        Self {
            start,
            end,
            backward: false,
        }
    }

    /// Mark the range as selected from end to start.
    #[must_use]
    pub fn with_backward(mut self, backward: bool) -> Self {
        self.backward = backward;
        self
    }

    /// A collapsed range (caret) at `node:offset`.
    pub fn caret(node: N, offset: usize) -> Self
    where
        N: Clone,
    {
        Self {
            start: TextPosition {
                node: node.clone(),
                offset,
            },
            end: TextPosition { node, offset },
            backward: false,
        }
    }
}

/// Failure reading the host selection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The range was invalidated while being cloned (e.g. its nodes moved).
    #[error("selection range was invalidated during clone")]
    Invalidated,
    /// The selection API is not available in this host.
    #[error("selection is unavailable")]
    Unavailable,
}

/// Read-only access to document geometry and the current selection.
///
/// Every method must be cheap and must not panic on stale handles; report them as
/// disconnected or empty instead.
pub trait LayoutHost {
    /// Node handle. Cloning must not copy the node itself.
    type Node: Clone + PartialEq + Debug;

    /// True if `node` is currently attached to the document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Classify `node`.
    fn node_kind(&self, node: &Self::Node) -> NodeKind;

    /// Client rectangles of `node` (or a character sub-range of it), in viewport space.
    ///
    /// Wrapped text yields one rect per line box.
    fn client_rects(&self, node: &Self::Node, probe: Probe) -> Vec<Rect>;

    /// Nearest ancestor element (or `None` for a root).
    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// A clone of the first range of the current selection, with its direction.
    fn current_range(&self) -> Result<Option<TextRange<Self::Node>>, SelectionError>;

    /// Client rectangles of a range, one per line box, in document order.
    fn range_rects(&self, range: &TextRange<Self::Node>) -> Vec<Rect>;

    /// Visible viewport rectangle.
    fn viewport(&self) -> Rect;

    /// Content box of an element, used for container boundaries.
    fn content_box(&self, node: &Self::Node) -> Option<Rect>;

    /// Document scroll offset, added for absolutely positioned overlays.
    fn scroll_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Enclosing menu of a node, used to anchor submenus to the parent menu edge.
    fn menu_container(&self, _node: &Self::Node) -> Option<Self::Node> {
        None
    }

    /// Look up an element by a stable identifier.
    fn element_by_id(&self, _id: &str) -> Option<Self::Node> {
        None
    }
}

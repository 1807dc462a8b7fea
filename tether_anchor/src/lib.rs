// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Anchor: keep an overlay positioned against a live anchor.
//!
//! Tether Anchor sits between a document (through [`LayoutHost`]) and the pure placement
//! math in [`tether_placement`].
//!
//! - Captures what an overlay is anchored to: a fixed rect, a node, or the text selection
//!   ([`capture_anchor`]).
//! - Re-resolves the anchor's live rectangle on every pass ([`resolve_anchor_rect`]),
//!   treating a vanished anchor as `None` rather than an error.
//! - Drives repositioning with [`AnchoredOverlay`]: viewport changes are coalesced into one
//!   pass per frame, and a lost anchor is handled by [`DetachedAnchorBehavior`].
//! - Locks the selection while selection-anchored overlays are open ([`SelectionLock`]).
//!
//! ## Sans I/O
//!
//! Nothing here schedules frames, listens to events, or touches styles. The host forwards
//! viewport changes, schedules the [`FrameRequest`]s it is handed, and applies the
//! [`AppliedPosition`] it gets back.
//!
//! ## Profiles
//!
//! [`AnchoredConfig`] has constructors for common overlays such as
//! [`AnchoredConfig::menu`], [`AnchoredConfig::submenu`], and
//! [`AnchoredConfig::formatting_toolbar`].
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use tether_anchor::{
//!     AnchoredConfig, AnchoredOverlay, LayoutHost, NodeKind, PassOutcome, Probe,
//!     SelectionError, TextRange, ViewportChange,
//! };
//!
//! // A host with one button (node 0) that moves when the page scrolls.
//! struct Page {
//!     button: Rect,
//! }
//!
//! impl LayoutHost for Page {
//!     type Node = u32;
//!     fn is_connected(&self, _: &u32) -> bool { true }
//!     fn node_kind(&self, _: &u32) -> NodeKind { NodeKind::Element }
//!     fn client_rects(&self, _: &u32, _: Probe) -> Vec<Rect> { vec![self.button] }
//!     fn parent_element(&self, _: &u32) -> Option<u32> { None }
//!     fn current_range(&self) -> Result<Option<TextRange<u32>>, SelectionError> { Ok(None) }
//!     fn range_rects(&self, _: &TextRange<u32>) -> Vec<Rect> { Vec::new() }
//!     fn viewport(&self) -> Rect { Rect::new(0.0, 0.0, 1024.0, 768.0) }
//!     fn content_box(&self, _: &u32) -> Option<Rect> { None }
//! }
//!
//! let mut page = Page { button: Rect::new(40.0, 40.0, 120.0, 72.0) };
//! let mut menu = AnchoredOverlay::new(AnchoredConfig::menu(0));
//! let attached = menu.attach(&page, Size::new(200.0, 160.0));
//! let PassOutcome::Applied(pos) = attached.outcome else { unreachable!() };
//! assert_eq!((pos.left, pos.top), (40.0, 80.0));
//!
//! // Scroll moves the button; the next frame follows it.
//! page.button = page.button + kurbo::Vec2::new(0.0, -20.0);
//! let frame = menu.viewport_changed(ViewportChange::Scroll).unwrap();
//! let PassOutcome::Applied(pos) = menu.run_frame(&page, frame.schedule) else { unreachable!() };
//! assert_eq!(pos.top, 60.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod area;
pub mod config;
pub mod controller;
pub mod host;
pub mod profiles;
pub mod resolve;
pub mod selection;

pub use area::{DEFAULT_OVERLAY_ROOT_ID, OverlayArea};
pub use config::{
    AnchoredConfig, Boundary, DetachedAnchorBehavior, PositionCallback, PositionHook, Strategy,
    UpdateOn,
};
pub use controller::{
    AnchoredOverlay, AppliedPosition, Attached, FrameRequest, FrameToken, OverlayState,
    PassOutcome, ViewportChange,
};
pub use host::{LayoutHost, NodeKind, Probe, SelectionError, TextPosition, TextRange};
pub use profiles::{MOBILE_SHEET_MAX_WIDTH, is_mobile_sheet_viewport};
pub use resolve::{
    AnchorCapture, CapturedAnchor, RectResolver, SelectionEdge, SubmenuEdgeResolver,
    capture_anchor, focus_rect, node_rect, range_rect, resolve_anchor_rect,
};
pub use selection::{SelectionController, SelectionLock};

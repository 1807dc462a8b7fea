// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored menu session.
//!
//! Drives a menu anchored to a button through a tiny in-memory page: the first pass on
//! open, a burst of scroll events coalesced into one frame, and anchor loss closing the
//! menu and removing it from the stack.
//!
//! Run:
//! - `cargo run -p tether_demos --example anchored_menu`
//! - `RUST_LOG=trace cargo run -p tether_demos --example anchored_menu` to see the passes.

use core::cell::Cell;
use core::time::Duration;

use kurbo::{Rect, Size, Vec2};
use tether_anchor::{
    AnchoredConfig, AnchoredOverlay, LayoutHost, NodeKind, Probe, SelectionError, TextRange,
    ViewportChange,
};
use tether_stack::adapters::anchored::AnchoredSession;
use tether_stack::{DismissReason, OverlayBase, OverlayClass, OverlayStack};

const MENU: OverlayClass = OverlayClass("block-options-menu");

/// A page with one button (node 0) under a scrollable document.
struct Page {
    button: Rect,
    scroll_y: Cell<f64>,
    button_present: Cell<bool>,
}

impl LayoutHost for Page {
    type Node = u32;

    fn is_connected(&self, _: &u32) -> bool {
        self.button_present.get()
    }

    fn node_kind(&self, _: &u32) -> NodeKind {
        NodeKind::Element
    }

    fn client_rects(&self, _: &u32, _: Probe) -> Vec<Rect> {
        vec![self.button - Vec2::new(0.0, self.scroll_y.get())]
    }

    fn parent_element(&self, _: &u32) -> Option<u32> {
        None
    }

    fn current_range(&self) -> Result<Option<TextRange<u32>>, SelectionError> {
        Err(SelectionError::Unavailable)
    }

    fn range_rects(&self, _: &TextRange<u32>) -> Vec<Rect> {
        Vec::new()
    }

    fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, 1280.0, 800.0)
    }

    fn content_box(&self, _: &u32) -> Option<Rect> {
        None
    }

    fn scroll_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.scroll_y.get())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let page = Page {
        button: Rect::new(200.0, 300.0, 260.0, 330.0),
        scroll_y: Cell::new(0.0),
        button_present: Cell::new(true),
    };
    let mut stack = OverlayStack::new();

    let opened = AnchoredSession::open(
        &mut stack,
        OverlayBase::new(MENU),
        AnchoredOverlay::new(AnchoredConfig::menu(0)),
        &page,
        Size::new(220.0, 180.0),
        Duration::ZERO,
    );
    let mut session = opened.session;
    let pos = *session.controller().applied().expect("menu positioned");
    println!("== Open == left={} top={} placement={}", pos.left, pos.top, pos.placement);
    assert_eq!((pos.left, pos.top), (200.0, 338.0));

    println!("== Scroll burst ==");
    // Each event supersedes the previous frame, including the settle frame from open.
    assert!(opened.frame.is_some());
    let last = (1..=10)
        .map(|step| {
            page.scroll_y.set(f64::from(step) * 10.0);
            session.viewport_changed(ViewportChange::Scroll)
        })
        .last()
        .flatten();
    let before = session.controller().writes();
    let token = last.expect("scroll is tracked").schedule;
    assert!(session.run_frame(&mut stack, &page, token).is_none());
    let writes = session.controller().writes() - before;
    println!("  10 scroll events -> {writes} pass");
    assert_eq!(writes, 1);

    let bounds = stack.get(session.id()).expect("still open").bounds();
    println!("  hit-test bounds now {bounds:?}");
    assert_eq!(bounds.y0, 238.0);

    println!("== Anchor removed ==");
    page.button_present.set(false);
    let token = session
        .viewport_changed(ViewportChange::Resize)
        .expect("resize is tracked")
        .schedule;
    let dismissed = session
        .run_frame(&mut stack, &page, token)
        .expect("menu closes with its anchor");
    println!("  dismissed {} ({:?})", dismissed.class, dismissed.reason);
    assert_eq!(dismissed.reason, DismissReason::AnchorLost);
    assert!(stack.is_empty());
    assert_eq!(session.detach(), None);
}

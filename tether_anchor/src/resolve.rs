// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor capture and live rectangle resolution.

use alloc::vec::Vec;

use kurbo::Rect;
use tether_placement::{Placement, Side};

use crate::host::{LayoutHost, NodeKind, Probe, TextRange};

/// What an overlay is anchored to, decided once at attach time.
#[derive(Clone, Debug, PartialEq)]
pub enum CapturedAnchor<N> {
    /// A fixed rectangle. Never goes stale.
    Rect(Rect),
    /// A live node, re-measured on every pass.
    Node(N),
    /// A snapshot of the selection range at attach time.
    Range(TextRange<N>),
    /// Nothing was selected at capture; read the live selection on each pass.
    LiveSelection,
}

impl<N> CapturedAnchor<N> {
    /// True if this anchor is measured from the selection.
    pub fn is_selection(&self) -> bool {
        matches!(self, Self::Range(_) | Self::LiveSelection)
    }
}

/// Which rectangle of a multi-line selection an overlay anchors to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SelectionEdge {
    /// The first line of the range.
    #[default]
    Start,
    /// The line where the user stopped selecting: the last line of a forward range,
    /// the first line of a backward one.
    Focus,
}

/// Custom live-rectangle resolution for node anchors.
///
/// Implemented for closures `Fn(&H, &H::Node, Placement) -> Option<Rect>`.
pub trait RectResolver<H: LayoutHost + ?Sized> {
    /// Resolve the rectangle for `anchor` given the requested placement.
    fn resolve(&self, host: &H, anchor: &H::Node, placement: Placement) -> Option<Rect>;
}

impl<H, F> RectResolver<H> for F
where
    H: LayoutHost + ?Sized,
    F: Fn(&H, &H::Node, Placement) -> Option<Rect>,
{
    fn resolve(&self, host: &H, anchor: &H::Node, placement: Placement) -> Option<Rect> {
        self(host, anchor, placement)
    }
}

/// Custom capture, used in place of [`capture_anchor`] when configured.
///
/// Implemented for closures `Fn(&H) -> CapturedAnchor<H::Node>`.
pub trait AnchorCapture<H: LayoutHost + ?Sized> {
    /// Decide what to anchor to.
    fn capture(&self, host: &H) -> CapturedAnchor<H::Node>;
}

impl<H, F> AnchorCapture<H> for F
where
    H: LayoutHost + ?Sized,
    F: Fn(&H) -> CapturedAnchor<H::Node>,
{
    fn capture(&self, host: &H) -> CapturedAnchor<H::Node> {
        self(host)
    }
}

/// Decide what to anchor to: a rect wins over a node, a node over the selection.
///
/// If the selection cannot be read, or is empty, the result is
/// [`CapturedAnchor::LiveSelection`] and each pass re-reads it.
pub fn capture_anchor<H: LayoutHost + ?Sized>(
    host: &H,
    rect: Option<Rect>,
    node: Option<&H::Node>,
) -> CapturedAnchor<H::Node> {
    if let Some(rect) = rect {
        return CapturedAnchor::Rect(rect);
    }
    if let Some(node) = node {
        return CapturedAnchor::Node(node.clone());
    }
    match host.current_range() {
        Ok(Some(range)) => CapturedAnchor::Range(range),
        Ok(None) => CapturedAnchor::LiveSelection,
        Err(err) => {
            tracing::debug!(%err, "selection unreadable at capture");
            CapturedAnchor::LiveSelection
        }
    }
}

/// Resolve the current anchor rectangle, or `None` if the anchor is gone.
///
/// `resolver` applies to node anchors, `edge` to selection anchors.
pub fn resolve_anchor_rect<H: LayoutHost + ?Sized>(
    host: &H,
    anchor: &CapturedAnchor<H::Node>,
    resolver: Option<&dyn RectResolver<H>>,
    placement: Placement,
    edge: SelectionEdge,
) -> Option<Rect> {
    let selected = |range: &TextRange<H::Node>| match edge {
        SelectionEdge::Start => range_rect(host, range),
        SelectionEdge::Focus => focus_rect(host, range),
    };
    match anchor {
        CapturedAnchor::Rect(rect) => Some(*rect),
        CapturedAnchor::Node(node) => {
            if !host.is_connected(node) {
                return None;
            }
            resolver
                .and_then(|r| r.resolve(host, node, placement))
                .or_else(|| node_rect(host, node))
        }
        CapturedAnchor::Range(range) => selected(range),
        CapturedAnchor::LiveSelection => match host.current_range() {
            Ok(Some(range)) => selected(&range),
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(%err, "selection unreadable during pass");
                None
            }
        },
    }
}

/// Rectangle of a node.
///
/// Text nodes are measured on their first character only, so an anchor inside a
/// paragraph that wraps across lines stays on the first line instead of the paragraph's
/// union box. Elements use their first client rect.
pub fn node_rect<H: LayoutHost + ?Sized>(host: &H, node: &H::Node) -> Option<Rect> {
    let probe = match host.node_kind(node) {
        NodeKind::Text { len } => Probe::Chars {
            start: 0,
            end: len.min(1),
        },
        NodeKind::Element => Probe::Box,
    };
    first(host.client_rects(node, probe))
}

/// Rectangle of a range, falling back to the start container's element when the range
/// has no extent (e.g. a caret in an empty line).
pub fn range_rect<H: LayoutHost + ?Sized>(host: &H, range: &TextRange<H::Node>) -> Option<Rect> {
    if !host.is_connected(&range.start.node) || !host.is_connected(&range.end.node) {
        return None;
    }
    if let Some(rect) = first(host.range_rects(range)).filter(|r| has_extent(*r)) {
        return Some(rect);
    }
    let container = &range.start.node;
    let element = match host.node_kind(container) {
        NodeKind::Element => Some(container.clone()),
        NodeKind::Text { .. } => host.parent_element(container),
    }?;
    if !host.is_connected(&element) {
        return None;
    }
    first(host.client_rects(&element, Probe::Box)).filter(|r| has_extent(*r))
}

/// Rectangle of the line where a selection ends, as seen by the user.
///
/// Forward ranges use their last client rect, backward ranges their first. Without
/// client rects this falls back to [`range_rect`].
pub fn focus_rect<H: LayoutHost + ?Sized>(host: &H, range: &TextRange<H::Node>) -> Option<Rect> {
    if !host.is_connected(&range.start.node) || !host.is_connected(&range.end.node) {
        return None;
    }
    let rects = host.range_rects(range);
    let picked = if range.backward {
        rects.first()
    } else {
        rects.last()
    };
    picked.copied().or_else(|| range_rect(host, range))
}

/// True if either dimension is non-zero. A caret (zero width, line height) counts.
fn has_extent(rect: Rect) -> bool {
    rect.width() != 0.0 || rect.height() != 0.0
}

fn first(rects: Vec<Rect>) -> Option<Rect> {
    rects.into_iter().next()
}

/// Anchors a submenu to the edge of its parent menu instead of the trigger item.
///
/// For left/right placements the result is a zero-width rectangle on the parent
/// menu's near edge, spanning the trigger's vertical extent, so the submenu lines up
/// with the menu border rather than overlapping it. Top/bottom placements and triggers
/// outside a menu use the trigger's own rectangle.
#[derive(Copy, Clone, Debug, Default)]
pub struct SubmenuEdgeResolver;

impl<H: LayoutHost + ?Sized> RectResolver<H> for SubmenuEdgeResolver {
    fn resolve(&self, host: &H, anchor: &H::Node, placement: Placement) -> Option<Rect> {
        if host.node_kind(anchor) != NodeKind::Element {
            return None;
        }
        let trigger = first(host.client_rects(anchor, Probe::Box))?;
        let side = placement.side();
        if side.is_vertical() {
            return Some(trigger);
        }
        let Some(menu) = host.menu_container(anchor) else {
            return Some(trigger);
        };
        let Some(parent) = first(host.client_rects(&menu, Probe::Box)) else {
            return Some(trigger);
        };
        let x = if side == Side::Right {
            parent.x1
        } else {
            parent.x0
        };
        Some(Rect::new(x, trigger.y0, x, trigger.y1))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::host::{SelectionError, TextPosition};
    use crate::host::fixture::{FakeDoc, FakeNode};

    #[test]
    fn rect_beats_node_beats_selection() {
        let doc = FakeDoc::new();
        let n = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 10.0, 10.0)));
        *doc.selection.borrow_mut() = Ok(Some(TextRange::caret(n, 0)));
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);

        assert_eq!(capture_anchor(&doc, Some(r), Some(&n)), CapturedAnchor::Rect(r));
        assert_eq!(capture_anchor(&doc, None, Some(&n)), CapturedAnchor::Node(n));
        assert_eq!(
            capture_anchor(&doc, None, None),
            CapturedAnchor::Range(TextRange::caret(n, 0))
        );
    }

    #[test]
    fn empty_or_broken_selection_captures_live() {
        let doc = FakeDoc::new();
        assert_eq!(capture_anchor(&doc, None, None), CapturedAnchor::LiveSelection);
        *doc.selection.borrow_mut() = Err(SelectionError::Invalidated);
        assert_eq!(capture_anchor(&doc, None, None), CapturedAnchor::LiveSelection);
        // A broken selection during a pass reads as no selection.
        let got = resolve_anchor_rect(
            &doc,
            &CapturedAnchor::LiveSelection,
            None,
            Placement::Top,
            SelectionEdge::Start,
        );
        assert_eq!(got, None);
    }

    #[test]
    fn wrapped_text_uses_first_character() {
        let doc = FakeDoc::new();
        let p = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 400.0, 60.0)));
        let first_char = Rect::new(380.0, 0.0, 388.0, 20.0);
        let t = doc.add(FakeNode::text(
            40,
            vec![
                Rect::new(380.0, 0.0, 400.0, 20.0),
                Rect::new(0.0, 20.0, 200.0, 40.0),
            ],
            first_char,
            p,
        ));

        let anchor = CapturedAnchor::Node(t);
        let got = resolve_anchor_rect(&doc, &anchor, None, Placement::Top, SelectionEdge::Start);
        assert_eq!(got, Some(first_char));
        assert_eq!(
            doc.probes.borrow().last(),
            Some(&(t, Probe::Chars { start: 0, end: 1 }))
        );
    }

    #[test]
    fn empty_text_probes_empty_range() {
        let doc = FakeDoc::new();
        let p = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 400.0, 60.0)));
        let t = doc.add(FakeNode::text(0, vec![], Rect::new(5.0, 0.0, 5.0, 18.0), p));
        let _ = node_rect(&doc, &t);
        assert_eq!(
            doc.probes.borrow().last(),
            Some(&(t, Probe::Chars { start: 0, end: 0 }))
        );
    }

    #[test]
    fn element_uses_first_client_rect() {
        let doc = FakeDoc::new();
        let a = Rect::new(10.0, 10.0, 50.0, 30.0);
        let n = doc.add(FakeNode::element(a));
        doc.with_node(n, |node| node.rects.push(Rect::new(0.0, 30.0, 80.0, 50.0)));
        assert_eq!(node_rect(&doc, &n), Some(a));
    }

    #[test]
    fn disconnected_node_resolves_to_none() {
        let doc = FakeDoc::new();
        let n = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 10.0, 10.0)));
        doc.set_connected(n, false);
        let always = |_: &FakeDoc, _: &u32, _: Placement| Some(Rect::ZERO);
        let got = resolve_anchor_rect(
            &doc,
            &CapturedAnchor::Node(n),
            Some(&always as &dyn RectResolver<FakeDoc>),
            Placement::Top,
            SelectionEdge::Start,
        );
        assert_eq!(got, None);
    }

    #[test]
    fn custom_resolver_runs_first_then_falls_back() {
        let doc = FakeDoc::new();
        let own = Rect::new(0.0, 0.0, 10.0, 10.0);
        let n = doc.add(FakeNode::element(own));
        let custom = Rect::new(100.0, 100.0, 120.0, 110.0);

        let some = move |_: &FakeDoc, _: &u32, _: Placement| Some(custom);
        let none = |_: &FakeDoc, _: &u32, _: Placement| -> Option<Rect> { None };
        let some: &dyn RectResolver<FakeDoc> = &some;
        let none: &dyn RectResolver<FakeDoc> = &none;
        let anchor = CapturedAnchor::Node(n);
        assert_eq!(
            resolve_anchor_rect(&doc, &anchor, Some(some), Placement::Top, SelectionEdge::Start),
            Some(custom)
        );
        assert_eq!(
            resolve_anchor_rect(&doc, &anchor, Some(none), Placement::Top, SelectionEdge::Start),
            Some(own)
        );
    }

    #[test]
    fn collapsed_range_falls_back_to_container_element() {
        let doc = FakeDoc::new();
        let line = Rect::new(40.0, 100.0, 600.0, 124.0);
        let p = doc.add(FakeNode::element(line));
        let t = doc.add(FakeNode::text(0, vec![], Rect::ZERO, p));

        // Zero-area range rect.
        doc.range_rect.set(Some(Rect::new(40.0, 100.0, 40.0, 100.0)));
        assert_eq!(range_rect(&doc, &TextRange::caret(t, 0)), Some(line));

        // No range rect at all; container is an element itself.
        doc.range_rect.set(None);
        assert_eq!(range_rect(&doc, &TextRange::caret(p, 0)), Some(line));
    }

    #[test]
    fn range_with_removed_endpoint_is_gone() {
        let doc = FakeDoc::new();
        let p = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 600.0, 24.0)));
        doc.range_rect.set(Some(Rect::new(10.0, 0.0, 50.0, 20.0)));
        let range = TextRange::caret(p, 0);
        assert!(range_rect(&doc, &range).is_some());
        doc.set_connected(p, false);
        assert_eq!(range_rect(&doc, &range), None);
    }

    #[test]
    fn caret_with_height_is_kept() {
        let doc = FakeDoc::new();
        let p = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 600.0, 24.0)));
        let caret = Rect::new(40.0, 100.0, 40.0, 118.0);
        doc.range_rect.set(Some(caret));
        assert_eq!(range_rect(&doc, &TextRange::caret(p, 3)), Some(caret));
    }

    #[test]
    fn live_selection_is_reread_each_time() {
        let doc = FakeDoc::new();
        let p = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 600.0, 24.0)));
        let anchor = CapturedAnchor::LiveSelection;
        assert_eq!(
            resolve_anchor_rect(&doc, &anchor, None, Placement::Top, SelectionEdge::Start),
            None
        );

        let sel = Rect::new(10.0, 10.0, 90.0, 30.0);
        *doc.selection.borrow_mut() = Ok(Some(TextRange::caret(p, 0)));
        doc.range_rect.set(Some(sel));
        assert_eq!(
            resolve_anchor_rect(&doc, &anchor, None, Placement::Top, SelectionEdge::Start),
            Some(sel)
        );
    }

    #[test]
    fn focus_edge_follows_selection_direction() {
        let doc = FakeDoc::new();
        let p = doc.add(FakeNode::element(Rect::new(0.0, 0.0, 600.0, 48.0)));
        let t = doc.add(FakeNode::text(60, vec![], Rect::ZERO, p));
        let first_line = Rect::new(300.0, 0.0, 600.0, 24.0);
        let second_line = Rect::new(0.0, 24.0, 180.0, 48.0);
        doc.range_rect.set(Some(first_line));
        doc.more_range_rects.borrow_mut().push(second_line);

        let start = TextPosition { node: t, offset: 30 };
        let end = TextPosition { node: t, offset: 52 };
        let forward = CapturedAnchor::Range(TextRange::new(start.clone(), end.clone()));
        let backward = CapturedAnchor::Range(TextRange::new(start, end).with_backward(true));

        let focus = |anchor: &CapturedAnchor<u32>| {
            resolve_anchor_rect(&doc, anchor, None, Placement::Top, SelectionEdge::Focus)
        };
        assert_eq!(focus(&forward), Some(second_line));
        assert_eq!(focus(&backward), Some(first_line));
        // The default edge ignores direction.
        assert_eq!(
            resolve_anchor_rect(&doc, &forward, None, Placement::Top, SelectionEdge::Start),
            Some(first_line)
        );
    }

    #[test]
    fn focus_edge_without_rects_uses_container() {
        let doc = FakeDoc::new();
        let line = Rect::new(40.0, 100.0, 600.0, 124.0);
        let p = doc.add(FakeNode::element(line));
        assert_eq!(focus_rect(&doc, &TextRange::caret(p, 0)), Some(line));
        doc.set_connected(p, false);
        assert_eq!(focus_rect(&doc, &TextRange::caret(p, 0)), None);
    }

    #[test]
    fn submenu_anchors_to_parent_menu_edge() {
        let doc = FakeDoc::new();
        let menu = doc.add(FakeNode::element(Rect::new(100.0, 50.0, 300.0, 400.0)));
        let mut item = FakeNode::element(Rect::new(108.0, 120.0, 292.0, 150.0));
        item.menu = Some(menu);
        let item = doc.add(item);

        let r = SubmenuEdgeResolver;
        assert_eq!(
            RectResolver::<FakeDoc>::resolve(&r, &doc, &item, Placement::RightStart),
            Some(Rect::new(300.0, 120.0, 300.0, 150.0))
        );
        assert_eq!(
            RectResolver::<FakeDoc>::resolve(&r, &doc, &item, Placement::LeftStart),
            Some(Rect::new(100.0, 120.0, 100.0, 150.0))
        );
        assert_eq!(
            RectResolver::<FakeDoc>::resolve(&r, &doc, &item, Placement::BottomStart),
            Some(Rect::new(108.0, 120.0, 292.0, 150.0))
        );
    }

    #[test]
    fn submenu_outside_menu_uses_trigger() {
        let doc = FakeDoc::new();
        let trigger = Rect::new(10.0, 10.0, 60.0, 30.0);
        let item = doc.add(FakeNode::element(trigger));
        assert_eq!(
            RectResolver::<FakeDoc>::resolve(&SubmenuEdgeResolver, &doc, &item, Placement::Right),
            Some(trigger)
        );
    }
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named configurations for the overlays an editor commonly shows.
//!
//! Each profile is a starting point; adjust fields afterwards as needed.

use kurbo::Rect;
use tether_placement::{Collision, Offset, Placement};

use crate::config::{AnchoredConfig, DetachedAnchorBehavior};
use crate::host::LayoutHost;
use crate::resolve::{CapturedAnchor, SelectionEdge, SubmenuEdgeResolver, range_rect};

/// Viewports narrower than this present overlays as full-width bottom sheets.
pub const MOBILE_SHEET_MAX_WIDTH: f64 = 768.0;

/// True if overlays in `viewport` are presented as bottom sheets and must not be
/// positioned against an anchor.
pub fn is_mobile_sheet_viewport(viewport: Rect) -> bool {
    viewport.width() < MOBILE_SHEET_MAX_WIDTH
}

fn positions_outside_sheet(viewport: Rect) -> bool {
    !is_mobile_sheet_viewport(viewport)
}

impl<H: LayoutHost + ?Sized> AnchoredConfig<H> {
    /// Dropdown menu opened from a trigger.
    pub fn menu(trigger: H::Node) -> Self {
        Self::at_node(trigger)
            .with_placement(Placement::BottomStart)
            .with_offset(8.0)
            .with_padding(8.0)
            .with_detached(DetachedAnchorBehavior::Remove)
    }

    /// Submenu opened from an item inside another menu.
    ///
    /// Anchors to the parent menu's edge through [`SubmenuEdgeResolver`], nudged up so
    /// the first item lines up with the trigger.
    pub fn submenu(item: H::Node) -> Self {
        Self::at_node(item)
            .with_placement(Placement::RightStart)
            .with_offset(Offset::new(6.0, -6.0))
            .with_padding(8.0)
            .with_detached(DetachedAnchorBehavior::Remove)
            .with_resolver(SubmenuEdgeResolver)
    }

    /// Editor settings menu; follows its trigger through re-renders.
    pub fn settings_menu(trigger: H::Node) -> Self {
        Self::menu(trigger).with_detached(DetachedAnchorBehavior::Track)
    }

    /// Theme picker opened from the settings menu. Keeps its opening width.
    pub fn theme_select_menu(item: H::Node) -> Self {
        Self::submenu(item)
            .with_offset(Offset::new(8.0, -6.0))
            .locking_width_on_open()
    }

    /// Language picker opened from the settings menu. Keeps its opening width.
    pub fn lang_select_menu(item: H::Node) -> Self {
        Self::menu(item)
            .with_placement(Placement::RightStart)
            .with_offset(Offset::new(20.0, -6.0))
            .locking_width_on_open()
    }

    /// Inline formatting toolbar above the selection.
    ///
    /// Sits over the line where the user stopped selecting.
    pub fn formatting_toolbar() -> Self {
        Self::at_selection()
            .with_placement(Placement::Top)
            .with_offset(10.0)
            .with_collision(Collision::default())
            .with_selection_edge(SelectionEdge::Focus)
            .with_detached(DetachedAnchorBehavior::Track)
            .with_should_position(positions_outside_sheet)
    }

    /// Slash command menu below the caret.
    pub fn slash_menu() -> Self {
        Self::at_selection()
            .with_placement(Placement::BottomStart)
            .with_offset(8.0)
            .with_padding(12.0)
            .with_detached(DetachedAnchorBehavior::Track)
            .with_should_position(positions_outside_sheet)
    }

    /// Toolbar under a selected image. Never flips over the image.
    pub fn image_toolbar(image: H::Node) -> Self {
        Self::at_node(image)
            .with_placement(Placement::Bottom)
            .with_offset(10.0)
            .with_collision(Collision {
                flip: false,
                shift: true,
                padding: 12.0,
            })
            .with_detached(DetachedAnchorBehavior::Track)
    }

    /// Emoji picker at the caret.
    ///
    /// Anchors to `placeholder` (e.g. the `:query` text being typed) while it is
    /// connected at open time, otherwise to where the selection was when it opened.
    pub fn emoji_picker(placeholder: Option<H::Node>) -> Self
    where
        H::Node: 'static,
    {
        Self::at_selection()
            .with_placement(Placement::BottomStart)
            .with_offset(8.0)
            .with_capture(move |host: &H| -> CapturedAnchor<H::Node> {
                match &placeholder {
                    Some(node) if host.is_connected(node) => CapturedAnchor::Node(node.clone()),
                    _ => selection_snapshot(host),
                }
            })
    }

    /// Text color menu opened from a toolbar button. Keeps its opening width.
    pub fn text_color_menu(trigger: H::Node) -> Self {
        Self::menu(trigger)
            .with_offset(Offset::new(12.0, -20.0))
            .with_detached(DetachedAnchorBehavior::Track)
            .locking_width_on_open()
    }
}

/// The selection's rectangle, frozen at capture.
fn selection_snapshot<H: LayoutHost + ?Sized>(host: &H) -> CapturedAnchor<H::Node> {
    let rect = match host.current_range() {
        Ok(Some(range)) => range_rect(host, &range),
        Ok(None) => None,
        Err(err) => {
            tracing::debug!(%err, "selection unreadable at capture");
            None
        }
    };
    rect.map_or(CapturedAnchor::LiveSelection, CapturedAnchor::Rect)
}

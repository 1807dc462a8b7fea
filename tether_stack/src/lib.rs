// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Stack: LIFO coordination of open overlays.
//!
//! Tether Stack decides which overlay a key press or an outside click belongs to, and
//! how overlays leave the screen.
//!
//! - [`OverlayStack`]: open overlays in push order. Escape and outside clicks reach only
//!   the topmost one; [`OverlayStack::remove`] works anywhere and is idempotent.
//! - [`OverlayBase`]: per-overlay settings (z-index, outside-click behavior with a
//!   grace window after mount, stacking permissions by [`OverlayClass`]).
//! - [`ExitTransition`]: the race between a transition-end signal and a fallback timer
//!   that ends every dismissal.
//!
//! The stack is a plain value owned by the host. Create one per document, route key
//! presses and capture-phase pointer presses into it, and play the exit transition of
//! every [`Dismissed`] it hands back.
//!
//! ## Stacking permissions
//!
//! An overlay may be placed above another only if the other's class is in its
//! allow-set ([`OverlayBase::allowing_above`]). [`OverlayStack::admit`] enforces this by
//! dismissing incompatible overlays before pushing.
//!
//! ## Features
//!
//! - `anchored_adapter`: `adapters::anchored::AnchoredSession` drives a
//!   `tether_anchor` controller and keeps the stack in sync with it.
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Rect};
//! use tether_stack::{DismissReason, Key, OverlayBase, OverlayClass, OverlayStack};
//!
//! const SETTINGS: OverlayClass = OverlayClass("editor-settings-menu");
//! const THEME: OverlayClass = OverlayClass("theme-select-menu");
//!
//! let mut stack = OverlayStack::new();
//! let settings = stack.push(OverlayBase::new(SETTINGS), Duration::ZERO);
//! let theme = stack
//!     .admit(OverlayBase::new(THEME).allowing_above(SETTINGS), Duration::ZERO)
//!     .id;
//! stack.set_bounds(theme, Rect::new(200.0, 40.0, 360.0, 200.0)).unwrap();
//!
//! // Escape closes the theme menu only.
//! let closed = stack.handle_key(Key::Escape).unwrap();
//! assert_eq!((closed.id, closed.reason), (theme, DismissReason::Escape));
//! assert_eq!(stack.peek(), Some(settings));
//!
//! // An outside click right after opening is ignored; later it closes the menu.
//! assert!(stack.handle_click(Point::new(5.0, 5.0), Duration::from_millis(100)).is_none());
//! assert!(stack.handle_click(Point::new(5.0, 5.0), Duration::from_millis(400)).is_some());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod base;
pub mod stack;
pub mod transition;
pub mod types;

pub use base::{DEFAULT_Z_INDEX, OUTSIDE_CLICK_GRACE, OverlayBase};
pub use stack::{Admitted, OverlayStack};
pub use transition::{EXIT_FALLBACK, ExitProgress, ExitTransition, TimerToken};
pub use types::{DismissReason, Dismissed, Key, Lifecycle, OverlayClass, OverlayError, OverlayId};

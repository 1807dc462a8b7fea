// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay stack basics.
//!
//! Opens a settings menu with a theme submenu on top, then shows that Escape closes one
//! level at a time, that outside clicks respect the grace window, and that admitting an
//! unrelated overlay displaces the ones it may not cover.
//!
//! Run:
//! - `cargo run -p tether_demos --example stack_escape`

use core::time::Duration;

use kurbo::{Point, Rect};
use tether_stack::{
    DismissReason, ExitProgress, Key, OverlayBase, OverlayClass, OverlayStack,
};

const SETTINGS: OverlayClass = OverlayClass("editor-settings-menu");
const THEME: OverlayClass = OverlayClass("theme-select-menu");
const SLASH: OverlayClass = OverlayClass("slash-menu");

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut stack = OverlayStack::new();
    let settings = stack.push(OverlayBase::new(SETTINGS), ms(0));
    stack
        .set_bounds(settings, Rect::new(20.0, 40.0, 220.0, 240.0))
        .expect("settings menu is open");
    let theme = stack
        .admit(OverlayBase::new(THEME).allowing_above(SETTINGS), ms(50))
        .id;
    stack
        .set_bounds(theme, Rect::new(220.0, 80.0, 380.0, 200.0))
        .expect("theme menu is open");
    stack.mark_shown(theme).expect("theme menu is open");
    println!("== Open == {:?}", stack.iter().collect::<Vec<_>>());

    println!("== Escape ==");
    let mut closed = stack.handle_key(Key::Escape).expect("something is open");
    println!("  closed {} ({:?})", closed.class, closed.reason);
    assert_eq!(closed.id, theme);
    assert_eq!(stack.peek(), Some(settings));

    // The theme menu was shown, so it fades out; the fallback timer wins here.
    let timer = closed.exit.timer().expect("exit is running");
    println!("  exit waiting on transition end or timer {}", timer.get());
    assert_eq!(
        closed.exit.on_timer(timer),
        ExitProgress::Completed { cancel_timer: None }
    );
    assert_eq!(closed.exit.on_transition_end(), ExitProgress::Ignored);

    println!("== Outside click ==");
    let outside = Point::new(600.0, 400.0);
    assert!(stack.handle_click(outside, ms(200)).is_none());
    println!("  ignored inside the grace window");
    assert!(stack.handle_click(Point::new(100.0, 100.0), ms(2_000)).is_none());
    println!("  ignored inside the menu");

    println!("== Admit ==");
    let slash = stack.admit(OverlayBase::new(SLASH), ms(2_100));
    for d in &slash.displaced {
        println!("  displaced {} ({:?})", d.class, d.reason);
    }
    assert_eq!(slash.displaced.len(), 1);
    assert_eq!(slash.displaced[0].reason, DismissReason::Displaced);

    let last = stack.handle_click(outside, ms(3_000)).expect("slash menu closes");
    println!("  outside click closed {}", last.class);
    assert!(stack.is_empty());
    assert!(stack.pop().is_none());
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement basics.
//!
//! Computes a few overlay positions against a small viewport: a centered popover, one
//! that flips because it would overflow, and one that is shifted back on screen.
//!
//! Run:
//! - `cargo run -p tether_demos --example placement_basics`

use kurbo::{Rect, Size};
use tether_placement::{Collision, Offset, Placement, PositionInput, compute_position};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let viewport = Rect::new(0.0, 0.0, 400.0, 300.0);
    let overlay = Size::new(80.0, 40.0);

    let cases = [
        ("centered below", Rect::new(100.0, 100.0, 140.0, 120.0), Placement::Bottom),
        ("flips above", Rect::new(100.0, 260.0, 140.0, 280.0), Placement::Bottom),
        ("shifted in", Rect::new(370.0, 100.0, 390.0, 120.0), Placement::BottomStart),
    ];

    println!("== Placement ==");
    let mut results = Vec::new();
    for (label, anchor, placement) in cases {
        let out = compute_position(&PositionInput {
            anchor,
            overlay,
            placement,
            offset: Offset::from(10.0),
            collision: Collision::default(),
            boundary: viewport,
        });
        println!(
            "  {label:<15} requested={placement} got={} left={} top={}",
            out.placement, out.left, out.top
        );
        results.push(out);
    }

    assert_eq!((results[0].left, results[0].top), (80.0, 130.0));
    assert_eq!(results[1].placement, Placement::Top);
    assert_eq!(results[1].top, 210.0);
    // 400 - 20 padding - 80 width.
    assert_eq!(results[2].left, 300.0);

    // Text form, as used in configuration files.
    let parsed: Placement = "right-end".parse().unwrap_or_default();
    println!("  parsed `right-end` as {parsed:?}");
    assert_eq!(parsed, Placement::RightEnd);
}

// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary derivation.

use kurbo::Rect;

/// True if `rect` has no positive area (zero or inverted extent, or NaN).
pub fn is_degenerate(rect: Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
}

/// Pick the rectangle an overlay must stay within.
///
/// Uses the container's content box when one is given and it has positive area,
/// otherwise the viewport.
pub fn resolve_boundary(container: Option<Rect>, viewport: Rect) -> Rect {
    match container {
        Some(r) if !is_degenerate(r) => r,
        _ => viewport,
    }
}

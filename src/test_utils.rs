// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::domain::geometry::Rect;

/// Default epsilon for geometry comparisons in viewport points.
pub const POINT_EPSILON: f64 = 1e-6;

/// Asserts that two rectangles match on every edge within [`POINT_EPSILON`].
#[track_caller]
pub fn assert_rect_eq(actual: Rect, expected: Rect) {
    let pairs = [
        (actual.origin.x, expected.origin.x),
        (actual.origin.y, expected.origin.y),
        (actual.size.width, expected.size.width),
        (actual.size.height, expected.size.height),
    ];
    assert!(
        pairs.iter().all(|(a, e)| (a - e).abs() < POINT_EPSILON),
        "rect mismatch: actual {actual:?}, expected {expected:?}"
    );
}

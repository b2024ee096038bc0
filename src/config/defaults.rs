// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the tunable values
//! used by the crop engine. Constants are organized by category.
//!
//! # Categories
//!
//! - **Crop box**: Minimum size and aspect tolerance
//! - **Handles**: Hit-test zone geometry
//! - **Zoom**: Zoom range relative to the fit scale
//! - **Layout**: Toolbar and margin reserved around the crop area
//! - **Settle**: Delays of the post-drag settle sequence

// ==========================================================================
// Crop Box Defaults
// ==========================================================================

/// Smallest allowed crop width or height, in viewport points.
pub const MIN_CROP_LENGTH: f64 = 69.0;

/// Smallest configurable minimum crop length.
pub const MIN_CROP_LENGTH_LOWER_BOUND: f64 = 1.0;

/// Largest configurable minimum crop length.
pub const MIN_CROP_LENGTH_UPPER_BOUND: f64 = 500.0;

/// Tolerance when checking that a rectangle honors a locked aspect ratio.
pub const ASPECT_RATIO_EPSILON: f64 = 1e-3;

// ==========================================================================
// Handle Defaults
// ==========================================================================

/// How far handle zones reach outward and inward from the crop edges.
pub const HANDLE_PADDING: f64 = 32.0;

/// Side of the square hit zone around each corner.
pub const HANDLE_CORNER_SIZE: f64 = 64.0;

/// Inset defining the ring around the crop edges where touches are claimed.
pub const TOUCH_CLAIM_INSET: f64 = 22.0;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Maximum zoom as a multiple of the minimum (crop-fits-image) zoom.
pub const MAX_ZOOM_MULTIPLIER: f64 = 15.0;

/// Screen pixel density used when the caller does not provide one.
pub const DEFAULT_SCREEN_SCALE: f64 = 1.0;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Thickness of the toolbar strip reserved along the bottom or left edge.
pub const TOOLBAR_THICKNESS: f64 = 56.0;

/// Fixed margin kept between the crop area and the viewport edges.
pub const CONTENT_MARGIN: f64 = 16.0;

// ==========================================================================
// Settle Defaults
// ==========================================================================

/// Delay after a drag ends before the dimming effect is revealed (ms).
pub const SETTLE_REVEAL_DELAY_MS: u64 = 500;

/// Additional delay before zoom/offset snapping is finalized (ms).
pub const SETTLE_FINALIZE_DELAY_MS: u64 = 800;

/// Upper bound accepted for either settle delay (ms).
pub const MAX_SETTLE_DELAY_MS: u64 = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_CROP_LENGTH >= MIN_CROP_LENGTH_LOWER_BOUND);
    assert!(MIN_CROP_LENGTH <= MIN_CROP_LENGTH_UPPER_BOUND);
    assert!(ASPECT_RATIO_EPSILON > 0.0);

    // Corner zones must reach at least as far as the padding on both sides.
    assert!(HANDLE_CORNER_SIZE >= HANDLE_PADDING);
    assert!(TOUCH_CLAIM_INSET > 0.0);

    assert!(MAX_ZOOM_MULTIPLIER > 1.0);
    assert!(DEFAULT_SCREEN_SCALE > 0.0);

    assert!(TOOLBAR_THICKNESS >= 0.0);
    assert!(CONTENT_MARGIN >= 0.0);

    assert!(SETTLE_REVEAL_DELAY_MS <= MAX_SETTLE_DELAY_MS);
    assert!(SETTLE_FINALIZE_DELAY_MS <= MAX_SETTLE_DELAY_MS);
};

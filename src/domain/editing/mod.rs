// SPDX-License-Identifier: MPL-2.0
//! Editing domain types.
//!
//! This module provides pure domain types for crop editing:
//! - [`AspectRatio`]: Crop ratio constraint presets
//! - [`ImageOrientation`]: Stored orientation and its upright correction
//! - [`ImageFilterTransform`]: User rotate/flip accumulation

pub mod aspect_ratio;
pub mod orientation;
pub mod transform;

pub use aspect_ratio::{AspectRatio, Fraction};
pub use orientation::ImageOrientation;
pub use transform::ImageFilterTransform;

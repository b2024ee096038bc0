// SPDX-License-Identifier: MPL-2.0
//! Geometry value types shared by every layer of the crop engine.
//!
//! - [`Point`], [`Size`], [`Rect`], [`EdgeInsets`]: immutable 2D values
//! - [`AffineTransform`]: composable rotate/flip/scale/translate matrix

pub mod affine;
pub mod types;

pub use affine::AffineTransform;
pub use types::{EdgeInsets, Point, Rect, Size, GEOMETRY_EPSILON};

// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core crop geometry types with ZERO external dependencies.
//!
//! This module contains pure value types and business rules. It depends on
//! nothing but `std` so the geometry can be tested without any image or UI
//! scaffolding.
//!
//! # Modules
//!
//! - [`geometry`]: 2D value types ([`Point`](geometry::Point), [`Size`](geometry::Size),
//!   [`Rect`](geometry::Rect), [`EdgeInsets`](geometry::EdgeInsets),
//!   [`AffineTransform`](geometry::AffineTransform))
//! - [`editing`]: Crop editing types ([`AspectRatio`](editing::AspectRatio),
//!   [`ImageOrientation`](editing::ImageOrientation),
//!   [`ImageFilterTransform`](editing::ImageFilterTransform))

pub mod editing;
pub mod geometry;

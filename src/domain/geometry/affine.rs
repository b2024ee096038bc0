// SPDX-License-Identifier: MPL-2.0
//! 2D affine transforms.
//!
//! A point `(x, y)` maps to:
//!
//! ```text
//!   x' = a * x + c * y + tx
//!   y' = b * x + d * y + ty
//! ```
//!
//! Composition follows the "apply self, then other" convention of
//! [`AffineTransform::concatenating`]. In the y-down coordinate space used
//! throughout the crate, a positive rotation angle turns clockwise on screen.

use super::types::{Point, Rect, Size};

/// Tolerance used when comparing transform coefficients.
const TRANSFORM_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[must_use]
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by an arbitrary angle in radians (clockwise on a y-down screen).
    #[must_use]
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Exact rotation by `quarter_turns * 90°` clockwise.
    ///
    /// Built from integer coefficients so that repeated composition never
    /// accumulates trigonometric rounding error.
    #[must_use]
    pub const fn quarter_turns(quarter_turns: i32) -> Self {
        match quarter_turns.rem_euclid(4) {
            0 => Self::IDENTITY,
            1 => Self::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
            2 => Self::new(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0),
            _ => Self::new(0.0, -1.0, 1.0, 0.0, 0.0, 0.0),
        }
    }

    /// Mirror across the vertical axis (`x -> -x`).
    #[must_use]
    pub const fn horizontal_flip() -> Self {
        Self::scale(-1.0, 1.0)
    }

    /// Returns the transform that applies `self` first and then `other`.
    #[must_use]
    pub fn concatenating(&self, other: &AffineTransform) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.tx * other.a + self.ty * other.c + other.tx,
            ty: self.tx * other.b + self.ty * other.d + other.ty,
        }
    }

    /// Inverse transform, or `None` when the linear part is singular.
    #[must_use]
    pub fn inverted(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < TRANSFORM_EPSILON {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Self {
            a,
            b,
            c,
            d,
            tx: -(self.tx * a + self.ty * c),
            ty: -(self.tx * b + self.ty * d),
        })
    }

    #[must_use]
    pub fn apply_to_point(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }

    /// Applies only the linear part. The result may carry negative components,
    /// callers wanting an extent should take [`Size::abs`].
    #[must_use]
    pub fn apply_to_size(&self, size: Size) -> Size {
        Size::new(
            self.a * size.width + self.c * size.height,
            self.b * size.width + self.d * size.height,
        )
    }

    /// Bounding box of the four transformed corners.
    #[must_use]
    pub fn apply_to_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            Point::new(rect.min_x(), rect.min_y()),
            Point::new(rect.max_x(), rect.min_y()),
            Point::new(rect.min_x(), rect.max_y()),
            Point::new(rect.max_x(), rect.max_y()),
        ]
        .map(|p| self.apply_to_point(p));

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in corners {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Re-anchors the linear part so it pivots about the center of an extent of
    /// `size`, landing the result back at the origin:
    /// translate center to origin, apply, translate to the new center.
    #[must_use]
    pub fn centered_on(&self, size: Size) -> Self {
        let linear = self.linear_part();
        let transformed = linear.apply_to_size(size).abs();
        AffineTransform::translation(-size.width / 2.0, -size.height / 2.0)
            .concatenating(&linear)
            .concatenating(&AffineTransform::translation(
                transformed.width / 2.0,
                transformed.height / 2.0,
            ))
    }

    /// Same matrix with the translation removed.
    #[must_use]
    pub fn linear_part(&self) -> Self {
        Self::new(self.a, self.b, self.c, self.d, 0.0, 0.0)
    }

    /// Coefficient-wise comparison within a small tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &AffineTransform) -> bool {
        [
            (self.a, other.a),
            (self.b, other.b),
            (self.c, other.c),
            (self.d, other.d),
            (self.tx, other.tx),
            (self.ty, other.ty),
        ]
        .iter()
        .all(|(lhs, rhs)| (lhs - rhs).abs() < TRANSFORM_EPSILON)
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::IDENTITY)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

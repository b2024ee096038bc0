// SPDX-License-Identifier: MPL-2.0
//! Plain 2D value types: points, sizes, rectangles and edge insets.
//!
//! All coordinates use a y-down convention (origin at the top-left corner),
//! matching both the on-screen viewport and the pixel layout of decoded images.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Tolerance used by containment checks so that rectangles sitting exactly on
/// a boundary are not rejected because of floating-point noise.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

// =============================================================================
// Point
// =============================================================================

/// A real-valued 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rounds both components to the nearest integer.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// =============================================================================
// Size
// =============================================================================

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero, negative or NaN.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Width divided by height, or `None` for an empty size.
    #[must_use]
    pub fn aspect_ratio(self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.width / self.height)
        }
    }

    /// Swaps width and height.
    #[must_use]
    pub fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.width.abs(), self.height.abs())
    }

    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.width.round(), self.height.round())
    }
}

impl Mul<f64> for Size {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

impl Div<f64> for Size {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.width / rhs, self.height / rhs)
    }
}

// =============================================================================
// EdgeInsets
// =============================================================================

/// Distances inward from each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on all four edges.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

impl Add for EdgeInsets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.top + rhs.top,
            self.left + rhs.left,
            self.bottom + rhs.bottom,
            self.right + rhs.right,
        )
    }
}

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle described by its top-left origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Rectangle of the given size placed at the origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// Rectangle of the given size centered on `center`.
    #[must_use]
    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    #[must_use]
    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Half-open containment test (`min <= p < max`).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Whether `other` lies entirely inside `self`, tolerating
    /// [`GEOMETRY_EPSILON`] of floating-point drift on every edge.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x() - GEOMETRY_EPSILON
            && other.min_y() >= self.min_y() - GEOMETRY_EPSILON
            && other.max_x() <= self.max_x() + GEOMETRY_EPSILON
            && other.max_y() <= self.max_y() + GEOMETRY_EPSILON
    }

    /// Whether this rectangle is a usable sub-rectangle of `container`: non-empty,
    /// no larger than the container in either dimension and fully inside it.
    #[must_use]
    pub fn is_valid_in(&self, container: &Rect) -> bool {
        !self.is_empty()
            && self.size.width <= container.size.width + GEOMETRY_EPSILON
            && self.size.height <= container.size.height + GEOMETRY_EPSILON
            && container.contains_rect(self)
    }

    /// Overlapping region of two rectangles, or `None` when they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min_x = self.min_x().max(other.min_x());
        let min_y = self.min_y().max(other.min_y());
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Shrinks the rectangle by the given insets.
    #[must_use]
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.origin.x + insets.left,
            self.origin.y + insets.top,
            self.size.width - insets.horizontal(),
            self.size.height - insets.vertical(),
        )
    }

    /// Grows (positive) or shrinks (negative) the rectangle symmetrically.
    #[must_use]
    pub fn expanded_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.origin.x - dx,
            self.origin.y - dy,
            self.size.width + 2.0 * dx,
            self.size.height + 2.0 * dy,
        )
    }

    #[must_use]
    pub fn offset_by(&self, delta: Point) -> Rect {
        Rect::from_origin_size(self.origin + delta, self.size)
    }

    /// Multiplies origin and size by the same factor.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Rect {
        Rect::from_origin_size(self.origin * factor, self.size * factor)
    }

    /// Rounds origin and size to whole units.
    #[must_use]
    pub fn round(&self) -> Rect {
        Rect::from_origin_size(self.origin.round(), self.size.round())
    }
}

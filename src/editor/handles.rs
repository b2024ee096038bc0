// SPDX-License-Identifier: MPL-2.0
//! Drag handle hit-testing for the crop rectangle.
//!
//! Each corner owns a square zone centered on the corner point, reaching
//! [`HANDLE_PADDING`] outward and inward. Each edge owns the strip between the
//! two corner zones with the same reach. Corners win over edges.

use crate::config::{HANDLE_CORNER_SIZE, HANDLE_PADDING, TOUCH_CLAIM_INSET};
use crate::domain::geometry::{Point, Rect, Size};

/// One of the eight drag zones around the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandlePosition {
    pub const ALL: [HandlePosition; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomRight | Self::BottomLeft
        )
    }

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// Hit zone of this handle for the given crop rectangle.
    #[must_use]
    pub fn zone(self, rect: &Rect) -> Rect {
        let corner = Size::new(HANDLE_CORNER_SIZE, HANDLE_CORNER_SIZE);
        let strip = 2.0 * HANDLE_PADDING;
        let inner_width = (rect.width() - strip).max(0.0);
        let inner_height = (rect.height() - strip).max(0.0);

        match self {
            Self::TopLeft => Rect::centered_at(Point::new(rect.min_x(), rect.min_y()), corner),
            Self::TopRight => Rect::centered_at(Point::new(rect.max_x(), rect.min_y()), corner),
            Self::BottomRight => {
                Rect::centered_at(Point::new(rect.max_x(), rect.max_y()), corner)
            }
            Self::BottomLeft => Rect::centered_at(Point::new(rect.min_x(), rect.max_y()), corner),
            Self::Top => Rect::new(
                rect.min_x() + HANDLE_PADDING,
                rect.min_y() - HANDLE_PADDING,
                inner_width,
                strip,
            ),
            Self::Bottom => Rect::new(
                rect.min_x() + HANDLE_PADDING,
                rect.max_y() - HANDLE_PADDING,
                inner_width,
                strip,
            ),
            Self::Left => Rect::new(
                rect.min_x() - HANDLE_PADDING,
                rect.min_y() + HANDLE_PADDING,
                strip,
                inner_height,
            ),
            Self::Right => Rect::new(
                rect.max_x() - HANDLE_PADDING,
                rect.min_y() + HANDLE_PADDING,
                strip,
                inner_height,
            ),
        }
    }
}

/// Returns the handle whose zone contains `point`, corners first.
#[must_use]
pub fn classify_handle(point: Point, rect: &Rect) -> Option<HandlePosition> {
    const HIT_ORDER: [HandlePosition; 8] = [
        HandlePosition::TopLeft,
        HandlePosition::TopRight,
        HandlePosition::BottomRight,
        HandlePosition::BottomLeft,
        HandlePosition::Top,
        HandlePosition::Right,
        HandlePosition::Bottom,
        HandlePosition::Left,
    ];
    HIT_ORDER
        .into_iter()
        .find(|handle| handle.zone(rect).contains(point))
}

/// Whether a touch at `point` belongs to the crop box rather than to the
/// scroll view underneath: it must land in the ring reaching
/// [`TOUCH_CLAIM_INSET`] outside and inside the rectangle edges.
#[must_use]
pub fn should_claim_touch(point: Point, rect: &Rect) -> bool {
    let outer = rect.expanded_by(TOUCH_CLAIM_INSET, TOUCH_CLAIM_INSET);
    let inner = rect.expanded_by(-TOUCH_CLAIM_INSET, -TOUCH_CLAIM_INSET);
    outer.contains(point) && !inner.contains(point)
}

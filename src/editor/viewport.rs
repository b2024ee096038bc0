// SPDX-License-Identifier: MPL-2.0
//! Viewport geometry: fitting the crop rectangle, zoom bounds and the mapping
//! between the scrolled/zoomed content and the viewport.
//!
//! Coordinates are viewport points with a top-left origin. A viewport point
//! `p` shows content point `p + content_offset`; the image occupies content
//! `[0, image_size * zoom_scale]`.

use super::crop::DragBounds;
use crate::config::{CONTENT_MARGIN, MAX_ZOOM_MULTIPLIER, TOOLBAR_THICKNESS};
use crate::domain::geometry::{EdgeInsets, Point, Rect, Size, GEOMETRY_EPSILON};

pub use crate::config::ToolbarPosition;

/// Target of an aspect-ratio change, for the caller to animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatioChange {
    /// Rectangle with the new ratio before any zoom step, in viewport points.
    pub proposed: Rect,
    /// Final crop rectangle.
    pub rect: Rect,
    /// Factor to multiply the zoom scale by. `1.0` when the rectangle was
    /// shrunk in place instead of refitted.
    pub zoom_multiplier: f64,
}

impl AspectRatioChange {
    #[must_use]
    pub fn refits(&self) -> bool {
        (self.zoom_multiplier - 1.0).abs() > GEOMETRY_EPSILON || self.proposed != self.rect
    }
}

/// Scroll/zoom state of the editing viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: Size,
    pub safe_area: EdgeInsets,
    pub extra_insets: EdgeInsets,
    pub toolbar: ToolbarPosition,
    pub toolbar_thickness: f64,
    pub margin: f64,
    pub content_offset: Point,
    pub zoom_scale: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(bounds: Size) -> Self {
        Self {
            bounds,
            safe_area: EdgeInsets::ZERO,
            extra_insets: EdgeInsets::ZERO,
            toolbar: ToolbarPosition::default(),
            toolbar_thickness: TOOLBAR_THICKNESS,
            margin: CONTENT_MARGIN,
            content_offset: Point::ZERO,
            zoom_scale: 1.0,
        }
    }

    #[must_use]
    pub fn with_toolbar(mut self, toolbar: ToolbarPosition, thickness: f64) -> Self {
        self.toolbar = toolbar;
        self.toolbar_thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_safe_area(mut self, safe_area: EdgeInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    #[must_use]
    pub fn with_extra_insets(mut self, extra_insets: EdgeInsets) -> Self {
        self.extra_insets = extra_insets;
        self
    }

    /// Safe area, caller insets and the fixed margin combined.
    #[must_use]
    pub fn content_padding(&self) -> EdgeInsets {
        self.safe_area + self.extra_insets + EdgeInsets::uniform(self.margin)
    }

    fn toolbar_insets(&self) -> EdgeInsets {
        match self.toolbar {
            ToolbarPosition::Bottom => EdgeInsets::new(0.0, 0.0, self.toolbar_thickness, 0.0),
            ToolbarPosition::Left => EdgeInsets::new(0.0, self.toolbar_thickness, 0.0, 0.0),
            ToolbarPosition::None => EdgeInsets::ZERO,
        }
    }

    /// Region the crop rectangle may occupy: the viewport minus padding and toolbar.
    #[must_use]
    pub fn crop_bounds(&self) -> Rect {
        Rect::from_size(self.bounds).inset_by(self.content_padding() + self.toolbar_insets())
    }

    /// Where an image of `image_size` (unzoomed points) sits in the viewport.
    #[must_use]
    pub fn content_rect(&self, image_size: Size) -> Rect {
        Rect::from_origin_size(-self.content_offset, image_size * self.zoom_scale)
    }

    #[must_use]
    pub fn drag_bounds(&self, image_size: Size) -> DragBounds {
        DragBounds {
            content_offset: self.content_offset,
            scaled_image_size: image_size * self.zoom_scale,
            padding_rect: self.crop_bounds(),
        }
    }

    /// Scale that makes `crop_size` fill the available area, and the resulting
    /// rectangle centered in it with a floor-rounded origin.
    #[must_use]
    pub fn fit_scale_and_rect(&self, crop_size: Size) -> (f64, Rect) {
        let available = self.crop_bounds();
        if crop_size.is_empty() || available.is_empty() {
            return (1.0, Rect::from_origin_size(available.origin, crop_size));
        }

        let scale =
            (available.width() / crop_size.width).min(available.height() / crop_size.height);
        let size = crop_size * scale;
        let origin = Point::new(
            centering_offset(available.width() - size.width),
            centering_offset(available.height() - size.height),
        ) + available.origin;
        (scale, Rect::from_origin_size(origin, size))
    }

    /// Zoom range for a crop box of `crop_size` over an image of `image_size`
    /// (unzoomed points): the smallest zoom at which the box still fits inside
    /// the image, and [`MAX_ZOOM_MULTIPLIER`] times that.
    #[must_use]
    pub fn min_max_zoom(crop_size: Size, image_size: Size) -> (f64, f64) {
        if image_size.is_empty() || crop_size.is_empty() {
            return (1.0, MAX_ZOOM_MULTIPLIER);
        }
        let min = (crop_size.width / image_size.width).max(crop_size.height / image_size.height);
        (min, min * MAX_ZOOM_MULTIPLIER)
    }

    /// Distances from each crop edge to the matching viewport edge.
    ///
    /// Used as scroll insets so panning can only expose image under the crop box.
    #[must_use]
    pub fn content_inset(&self, crop_rect: &Rect) -> EdgeInsets {
        EdgeInsets::new(
            crop_rect.min_y(),
            crop_rect.min_x(),
            self.bounds.height - crop_rect.max_y(),
            self.bounds.width - crop_rect.max_x(),
        )
    }

    /// Offset range keeping `crop_rect` over the image: `(min, max)` per axis.
    #[must_use]
    pub fn offset_range(&self, crop_rect: &Rect, image_size: Size) -> (Point, Point) {
        let scaled = image_size * self.zoom_scale;
        let min = Point::new(-crop_rect.min_x(), -crop_rect.min_y());
        let max = Point::new(
            (scaled.width - crop_rect.max_x()).max(min.x),
            (scaled.height - crop_rect.max_y()).max(min.y),
        );
        (min, max)
    }

    /// Moves the content offset back into [`Viewport::offset_range`].
    pub fn clamp_offset(&mut self, crop_rect: &Rect, image_size: Size) {
        let (min, max) = self.offset_range(crop_rect, image_size);
        self.content_offset = Point::new(
            self.content_offset.x.max(min.x).min(max.x),
            self.content_offset.y.max(min.y).min(max.y),
        );
    }

    /// Recomputes the crop rectangle after a ratio (`width / height`) is chosen.
    ///
    /// The current width is kept and the height derived from it, centered on
    /// the current vertical midpoint. If that rectangle crosses the top or
    /// bottom padding boundary, or leaves the image, the rectangle is instead
    /// shrunk in place to the largest one with the ratio that fits the
    /// available area, with no zoom step. Otherwise it is refitted normally.
    #[must_use]
    pub fn recompute_for_aspect_ratio_change(
        &self,
        ratio: f64,
        crop_rect: &Rect,
        image_size: Size,
    ) -> AspectRatioChange {
        let height = crop_rect.width() / ratio;
        let proposed = Rect::new(
            crop_rect.min_x(),
            crop_rect.mid_y() - height / 2.0,
            crop_rect.width(),
            height,
        );

        let bounds = self.crop_bounds();
        let content = self.content_rect(image_size);
        let crosses_padding = proposed.min_y() < bounds.min_y() - GEOMETRY_EPSILON
            || proposed.max_y() > bounds.max_y() + GEOMETRY_EPSILON;

        if crosses_padding || !content.contains_rect(&proposed) {
            let available = bounds.intersection(&content).unwrap_or(bounds);
            let capped = height.min(available.height());
            let mut size = Size::new(capped * ratio, capped);
            if size.width > available.width() {
                size = Size::new(available.width(), available.width() / ratio);
            }
            let rect = shift_inside(Rect::centered_at(crop_rect.center(), size), &available);
            tracing::debug!(ratio, ?rect, "aspect ratio change shrinks crop in place");
            return AspectRatioChange {
                proposed: rect,
                rect,
                zoom_multiplier: 1.0,
            };
        }

        let (zoom_multiplier, rect) = self.fit_scale_and_rect(proposed.size);
        AspectRatioChange {
            proposed,
            rect,
            zoom_multiplier,
        }
    }
}

/// Half the slack, floored. Rounding noise in the scaled size must not push a
/// whole-number half slack down a unit.
fn centering_offset(slack: f64) -> f64 {
    (slack / 2.0 + GEOMETRY_EPSILON).floor().max(0.0)
}

/// Translates `rect` the minimum distance needed to sit inside `container`.
fn shift_inside(rect: Rect, container: &Rect) -> Rect {
    let mut origin = rect.origin;
    if rect.max_x() > container.max_x() {
        origin.x -= rect.max_x() - container.max_x();
    }
    if origin.x < container.min_x() {
        origin.x = container.min_x();
    }
    if rect.max_y() > container.max_y() {
        origin.y -= rect.max_y() - container.max_y();
    }
    if origin.y < container.min_y() {
        origin.y = container.min_y();
    }
    Rect::from_origin_size(origin, rect.size)
}

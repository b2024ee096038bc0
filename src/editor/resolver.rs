// SPDX-License-Identifier: MPL-2.0
//! Conversion from the on-screen crop rectangle to source pixels.

use crate::domain::editing::{ImageFilterTransform, ImageOrientation};
use crate::domain::geometry::{AffineTransform, Point, Rect, Size};

/// Maps viewport crop rectangles to integer pixel rectangles in the upright,
/// user-transformed image.
///
/// The oriented pixel size depends on the orientation and the user transform;
/// it is recomputed whenever either changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCropResolver {
    pixel_size: Size,
    orientation: ImageOrientation,
    transform: ImageFilterTransform,
    oriented_pixel_size: Size,
}

impl PixelCropResolver {
    #[must_use]
    pub fn new(
        pixel_size: Size,
        orientation: ImageOrientation,
        transform: ImageFilterTransform,
    ) -> Self {
        let mut resolver = Self {
            pixel_size,
            orientation,
            transform,
            oriented_pixel_size: Size::ZERO,
        };
        resolver.refresh();
        resolver
    }

    fn refresh(&mut self) {
        self.oriented_pixel_size = self
            .composed_transform()
            .apply_to_size(self.pixel_size)
            .abs()
            .round();
    }

    pub fn set_transform(&mut self, transform: ImageFilterTransform) {
        self.transform = transform;
        self.refresh();
    }

    pub fn set_orientation(&mut self, orientation: ImageOrientation) {
        self.orientation = orientation;
        self.refresh();
    }

    #[must_use]
    pub fn transform(&self) -> ImageFilterTransform {
        self.transform
    }

    #[must_use]
    pub fn orientation(&self) -> ImageOrientation {
        self.orientation
    }

    /// Raw stored pixel size.
    #[must_use]
    pub fn pixel_size(&self) -> Size {
        self.pixel_size
    }

    /// Orientation correction followed by the user transform.
    #[must_use]
    pub fn composed_transform(&self) -> AffineTransform {
        self.orientation
            .transform()
            .concatenating(&self.transform.affine())
    }

    /// Pixel size of the image as displayed (upright, user-transformed).
    #[must_use]
    pub fn oriented_pixel_size(&self) -> Size {
        self.oriented_pixel_size
    }

    /// Displayed image size in points for the given screen density.
    #[must_use]
    pub fn image_size(&self, screen_scale: f64) -> Size {
        self.oriented_pixel_size / screen_scale
    }

    /// `min(width, height, screen_scale)`: keeps a one-point crop from asking
    /// for more pixels than a tiny image has.
    #[must_use]
    pub fn adjusted_screen_scale(&self, screen_scale: f64) -> f64 {
        self.oriented_pixel_size
            .width
            .min(self.oriented_pixel_size.height)
            .min(screen_scale)
    }

    /// Resolves a crop given in content space (`origin` already includes the
    /// scroll offset) into whole pixels.
    ///
    /// The result always satisfies `0 <= origin` and
    /// `origin + size <= oriented_pixel_size`, with each side at least one
    /// adjusted screen scale long.
    #[must_use]
    pub fn resolve(
        &self,
        content_origin: Point,
        crop_size: Size,
        zoom_scale: f64,
        screen_scale: f64,
    ) -> Rect {
        let zoom = if zoom_scale > 0.0 { zoom_scale } else { 1.0 };
        let scale = self.adjusted_screen_scale(screen_scale);
        let image = self.oriented_pixel_size;

        let to_pixels = |value: f64| (value / zoom * scale).round();

        let x = to_pixels(content_origin.x).min(image.width - scale).max(0.0);
        let y = to_pixels(content_origin.y).min(image.height - scale).max(0.0);
        let width = to_pixels(crop_size.width).max(scale).min(image.width - x);
        let height = to_pixels(crop_size.height).max(scale).min(image.height - y);

        Rect::new(x, y, width, height)
    }

    /// Maps a rectangle in oriented pixels back to raw stored pixels.
    #[must_use]
    pub fn source_rect(&self, rect: &Rect) -> Rect {
        let centered = self.composed_transform().centered_on(self.pixel_size);
        match centered.inverted() {
            Some(inverse) => inverse.apply_to_rect(rect).round(),
            None => *rect,
        }
    }
}

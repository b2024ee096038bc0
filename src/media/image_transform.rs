// SPDX-License-Identifier: MPL-2.0
//! Bitmap production for a committed crop: rotate/flip, then crop.

use crate::domain::editing::transform::decompose;
use crate::domain::geometry::{AffineTransform, Rect};
use crate::error::{Error, Result};
use image_rs::{DynamicImage, GenericImageView};

/// Rotate the image 90° counter-clockwise.
pub fn rotate_left(image: &DynamicImage) -> DynamicImage {
    image.rotate270()
}

/// Rotate the image 90° clockwise.
pub fn rotate_right(image: &DynamicImage) -> DynamicImage {
    image.rotate90()
}

/// Mirror the image horizontally.
pub fn flip_horizontal(image: &DynamicImage) -> DynamicImage {
    image.fliph()
}

/// Applies a rotate/flip transform about the image center.
///
/// The transform must be one of the eight quarter-turn/flip matrices; its
/// translation is ignored since the result is always re-anchored at the
/// top-left corner.
pub fn apply_transform(image: &DynamicImage, transform: &AffineTransform) -> DynamicImage {
    let (turns, flipped) = decompose(transform);
    let rotated = match turns {
        1 => rotate_right(image),
        2 => image.rotate180(),
        3 => rotate_left(image),
        _ => image.clone(),
    };
    if flipped {
        flip_horizontal(&rotated)
    } else {
        rotated
    }
}

/// Crop the image to a whole-pixel rectangle.
///
/// Fails when the rectangle is empty or does not lie inside the image.
pub fn crop(image: &DynamicImage, rect: &Rect) -> Result<DynamicImage> {
    let (width, height) = image.dimensions();
    let bounds = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
    if rect.is_empty() || !rect.is_valid_in(&bounds) {
        return Err(Error::InvalidArgument(format!(
            "crop rectangle {:?} outside {}x{} image",
            rect, width, height
        )));
    }

    let rect = rect.round();
    let x = rect.origin.x as u32;
    let y = rect.origin.y as u32;
    let w = (rect.width() as u32).min(width - x).max(1);
    let h = (rect.height() as u32).min(height - y).max(1);
    Ok(image.crop_imm(x, y, w, h))
}

/// Turns stored pixels upright with `transform`, then crops to `rect`
/// (oriented pixels).
pub fn render_crop(
    image: &DynamicImage,
    transform: &AffineTransform,
    rect: &Rect,
) -> Result<DynamicImage> {
    let oriented = apply_transform(image, transform);
    crop(&oriented, rect)
}

// SPDX-License-Identifier: MPL-2.0
//! Image loading and saving around the crop engine.
//!
//! The geometry core never touches pixels. This module decodes the source
//! bitmap together with its stored orientation and writes the cropped result.

pub mod image_transform;
pub mod orientation;

use crate::domain::editing::ImageOrientation;
use crate::editor::SourceImage;
use crate::error::{Error, Result};
use image_rs::{DynamicImage, GenericImageView};
use std::fs;
use std::path::Path;

pub use orientation::read_orientation;

/// Supported file extensions.
pub mod extensions {
    /// Extensions that can be decoded.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp",
    ];

    /// Extensions that can be written.
    pub const IMAGE_SAVE_EXTENSIONS: &[&str] =
        &["jpg", "jpeg", "png", "webp", "tiff", "tif", "bmp"];
}

/// A decoded bitmap in stored pixel order, with its orientation tag.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: DynamicImage,
    pub orientation: ImageOrientation,
}

impl LoadedImage {
    /// Size and orientation for starting a crop session.
    #[must_use]
    pub fn source(&self) -> SourceImage {
        let (width, height) = self.image.dimensions();
        SourceImage::new(width, height, self.orientation)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
}

/// Whether `path` has an extension this crate can decode.
#[must_use]
pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    extension_of(path.as_ref())
        .is_some_and(|ext| extensions::IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Decodes the image at `path` and reads its EXIF orientation.
///
/// An unreadable EXIF block is logged and treated as upright; a bitmap that
/// fails to decode is an error.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<LoadedImage> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let image = image_rs::load_from_memory(&bytes)?;

    let orientation = orientation::read_orientation_from(&mut std::io::Cursor::new(&bytes))
        .unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), %err, "could not read EXIF orientation");
            ImageOrientation::Up
        });

    Ok(LoadedImage { image, orientation })
}

/// Encodes `image` to `path`, choosing the format from the extension.
pub fn save_image<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let supported = extension_of(path)
        .is_some_and(|ext| extensions::IMAGE_SAVE_EXTENSIONS.contains(&ext.as_str()));
    if !supported {
        return Err(Error::InvalidArgument(format!(
            "unsupported output format: {}",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    // JPEG has no alpha channel.
    let image = if matches!(extension_of(path).as_deref(), Some("jpg" | "jpeg")) {
        DynamicImage::ImageRgb8(image.to_rgb8())
    } else {
        image.clone()
    };
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageBuffer, Rgba};
    use tempfile::tempdir;

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_pixel(6, 4, Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_image("photo.JPG"));
        assert!(is_supported_image("scan.tif"));
        assert!(!is_supported_image("clip.mp4"));
        assert!(!is_supported_image("no_extension"));
    }

    #[test]
    fn save_then_load_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("out").join("sample.png");

        save_image(&sample(), &path).expect("save png");
        let loaded = load_image(&path).expect("load png");

        assert_eq!(loaded.image.dimensions(), (6, 4));
        assert_eq!(loaded.orientation, ImageOrientation::Up);
        assert_eq!(loaded.source().pixel_size.width, 6.0);
    }

    #[test]
    fn save_jpeg_drops_alpha() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("sample.jpg");
        save_image(&sample(), &path).expect("save jpeg");
        assert!(path.exists());
    }

    #[test]
    fn save_rejects_unknown_extension() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = save_image(&sample(), temp_dir.path().join("sample.xyz"));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn load_rejects_non_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("fake.png");
        fs::write(&path, b"not a png").expect("write");
        assert!(matches!(load_image(&path), Err(Error::Image(_))));
    }
}

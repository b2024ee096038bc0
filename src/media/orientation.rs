// SPDX-License-Identifier: MPL-2.0
//! EXIF orientation lookup.

use crate::domain::editing::ImageOrientation;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

/// Reads the EXIF `Orientation` tag of the image at `path`.
///
/// Files without EXIF data, or without the tag, are upright.
pub fn read_orientation<P: AsRef<Path>>(path: P) -> Result<ImageOrientation> {
    let file = File::open(path.as_ref()).map_err(|e| Error::Io(e.to_string()))?;
    let mut reader = BufReader::new(file);
    read_orientation_from(&mut reader)
}

/// Same as [`read_orientation`] for an already open container.
pub fn read_orientation_from<R: BufRead + Seek>(reader: &mut R) -> Result<ImageOrientation> {
    let exif = match exif::Reader::new().read_from_container(reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) | Err(exif::Error::InvalidFormat(_)) => {
            return Ok(ImageOrientation::Up);
        }
        Err(err) => return Err(err.into()),
    };

    let orientation = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(|value| u16::try_from(value).ok())
        .map_or(ImageOrientation::Up, ImageOrientation::from_exif);
    Ok(orientation)
}

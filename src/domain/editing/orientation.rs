// SPDX-License-Identifier: MPL-2.0
//! Stored image orientation and its upright-correcting transform.

use crate::domain::geometry::AffineTransform;

/// How the stored pixels must be turned to appear upright.
///
/// Each variant is one element of the 8-element rotate/flip group and maps
/// one-to-one to an EXIF orientation value:
///
/// ```text
/// | Variant       | EXIF | Correction               | Swaps axes |
/// |---------------|------|--------------------------|------------|
/// | Up            | 1    | none                     | no         |
/// | UpMirrored    | 2    | flip horizontal          | no         |
/// | Down          | 3    | 180°                     | no         |
/// | DownMirrored  | 4    | 180° + flip horizontal   | no         |
/// | LeftMirrored  | 5    | 90° CW + flip horizontal | yes        |
/// | Right         | 6    | 90° CW                   | yes        |
/// | RightMirrored | 7    | 90° CCW + flip horizontal| yes        |
/// | Left          | 8    | 90° CCW                  | yes        |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageOrientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl ImageOrientation {
    /// All orientations in EXIF order (1 through 8).
    pub const ALL: [ImageOrientation; 8] = [
        Self::Up,
        Self::UpMirrored,
        Self::Down,
        Self::DownMirrored,
        Self::LeftMirrored,
        Self::Right,
        Self::RightMirrored,
        Self::Left,
    ];

    /// Maps an EXIF orientation value. Out-of-range values are treated as upright.
    #[must_use]
    pub fn from_exif(value: u16) -> Self {
        match value {
            2 => Self::UpMirrored,
            3 => Self::Down,
            4 => Self::DownMirrored,
            5 => Self::LeftMirrored,
            6 => Self::Right,
            7 => Self::RightMirrored,
            8 => Self::Left,
            _ => Self::Up,
        }
    }

    #[must_use]
    pub fn exif_value(self) -> u16 {
        match self {
            Self::Up => 1,
            Self::UpMirrored => 2,
            Self::Down => 3,
            Self::DownMirrored => 4,
            Self::LeftMirrored => 5,
            Self::Right => 6,
            Self::RightMirrored => 7,
            Self::Left => 8,
        }
    }

    /// `(clockwise quarter turns, flip after rotation)`.
    fn decompose(self) -> (i32, bool) {
        match self {
            Self::Up => (0, false),
            Self::UpMirrored => (0, true),
            Self::Down => (2, false),
            Self::DownMirrored => (2, true),
            Self::LeftMirrored => (1, true),
            Self::Right => (1, false),
            Self::RightMirrored => (3, true),
            Self::Left => (3, false),
        }
    }

    /// Linear transform taking stored pixels to upright pixels.
    ///
    /// It carries no translation: callers pivot it about the image center.
    #[must_use]
    pub fn transform(self) -> AffineTransform {
        let (turns, flip) = self.decompose();
        let rotation = AffineTransform::quarter_turns(turns);
        if flip {
            rotation.concatenating(&AffineTransform::horizontal_flip())
        } else {
            rotation
        }
    }

    /// Whether the upright image has width and height exchanged.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.decompose().0 % 2 == 1
    }
}

// SPDX-License-Identifier: MPL-2.0
//! User-applied rotate/flip state.

use crate::domain::geometry::AffineTransform;

/// Accumulated rotate/flip operations applied by the user since the last reset.
///
/// The wrapped matrix is always a composition of quarter turns and horizontal
/// flips, so it is one of eight exact matrices with coefficients in
/// `{-1, 0, 1}` and no translation.
///
/// # Example
///
/// ```
/// use lens_crop::domain::editing::ImageFilterTransform;
///
/// let mut transform = ImageFilterTransform::default();
/// transform.rotate();
/// assert!(!transform.is_identity());
///
/// transform.rotate();
/// transform.rotate();
/// transform.rotate();
/// assert!(transform.is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageFilterTransform {
    transform: AffineTransform,
}

impl ImageFilterTransform {
    pub const IDENTITY: Self = Self {
        transform: AffineTransform::IDENTITY,
    };

    /// Builds a transform from a clockwise quarter-turn count and a trailing flip.
    #[must_use]
    pub fn from_parts(clockwise_quarter_turns: i32, flipped: bool) -> Self {
        let rotation = AffineTransform::quarter_turns(clockwise_quarter_turns);
        let transform = if flipped {
            rotation.concatenating(&AffineTransform::horizontal_flip())
        } else {
            rotation
        };
        Self { transform }
    }

    /// Rotates the image a quarter turn counter-clockwise.
    pub fn rotate(&mut self) {
        self.transform = self
            .transform
            .concatenating(&AffineTransform::quarter_turns(-1));
    }

    /// Mirrors the image left-to-right.
    pub fn flip(&mut self) {
        self.transform = self
            .transform
            .concatenating(&AffineTransform::horizontal_flip());
    }

    pub fn reset(&mut self) {
        self.transform = AffineTransform::IDENTITY;
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.transform.is_identity()
    }

    #[must_use]
    pub fn affine(&self) -> AffineTransform {
        self.transform
    }

    /// Clockwise quarter turns (0..=3) of the rotation part, assuming the
    /// matrix is decomposed as "rotate, then optionally flip".
    #[must_use]
    pub fn rotation_quarter_turns(&self) -> i32 {
        let (turns, _) = decompose(&self.transform);
        turns
    }

    /// Whether the composition contains an odd number of flips.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        let (_, flipped) = decompose(&self.transform);
        flipped
    }

    #[must_use]
    pub fn swaps_dimensions(&self) -> bool {
        self.rotation_quarter_turns() % 2 == 1
    }
}

/// Splits an exact rotate/flip matrix into `(clockwise quarter turns, flip)`.
///
/// Any matrix from the rotate/flip group equals `R(n)` or `R(n) * F`. A flip
/// shows up as a negative determinant.
pub(crate) fn decompose(transform: &AffineTransform) -> (i32, bool) {
    let det = transform.a * transform.d - transform.b * transform.c;
    let flipped = det < 0.0;
    // Undo the trailing flip (F is its own inverse) to recover the rotation.
    let rotation = if flipped {
        transform.concatenating(&AffineTransform::horizontal_flip())
    } else {
        *transform
    };
    let turns = match (rotation.a.round() as i32, rotation.b.round() as i32) {
        (0, 1) => 1,
        (-1, 0) => 2,
        (0, -1) => 3,
        _ => 0,
    };
    (turns, flipped)
}

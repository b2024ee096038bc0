// SPDX-License-Identifier: MPL-2.0
//! Crop aspect-ratio presets.

use crate::domain::geometry::Size;
use std::fmt;
use std::str::FromStr;

/// The six preset fractions, named by their terms with the short side first.
///
/// A fraction carries no orientation: `Portrait(R2x3)` is 2:3 and
/// `Landscape(R2x3)` is 3:2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fraction {
    R2x3,
    R3x5,
    R3x4,
    R5x7,
    R4x5,
    R9x16,
}

impl Fraction {
    pub const ALL: [Fraction; 6] = [
        Self::R2x3,
        Self::R3x5,
        Self::R3x4,
        Self::R5x7,
        Self::R4x5,
        Self::R9x16,
    ];

    /// `(short side, long side)`.
    #[must_use]
    pub fn terms(self) -> (u32, u32) {
        match self {
            Self::R2x3 => (2, 3),
            Self::R3x5 => (3, 5),
            Self::R3x4 => (3, 4),
            Self::R5x7 => (5, 7),
            Self::R4x5 => (4, 5),
            Self::R9x16 => (9, 16),
        }
    }

    fn from_terms(short: u32, long: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.terms() == (short, long))
    }
}

/// Aspect-ratio constraint selected for the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectRatio {
    /// Ratio of the (oriented, transformed) source image.
    Original,
    /// No constraint.
    #[default]
    Freeform,
    Square,
    /// Taller than wide, e.g. 2:3.
    Portrait(Fraction),
    /// Wider than tall, e.g. 3:2.
    Landscape(Fraction),
}

impl AspectRatio {
    /// Every preset, in menu order.
    pub const ALL: [AspectRatio; 15] = [
        Self::Original,
        Self::Freeform,
        Self::Square,
        Self::Portrait(Fraction::R2x3),
        Self::Portrait(Fraction::R3x5),
        Self::Portrait(Fraction::R3x4),
        Self::Portrait(Fraction::R5x7),
        Self::Portrait(Fraction::R4x5),
        Self::Portrait(Fraction::R9x16),
        Self::Landscape(Fraction::R2x3),
        Self::Landscape(Fraction::R3x5),
        Self::Landscape(Fraction::R3x4),
        Self::Landscape(Fraction::R5x7),
        Self::Landscape(Fraction::R4x5),
        Self::Landscape(Fraction::R9x16),
    ];

    /// Width / height for this constraint, or `None` for freeform.
    ///
    /// `source` is only consulted for [`AspectRatio::Original`]; an empty source
    /// size yields `None`.
    #[must_use]
    pub fn value(self, source: Size) -> Option<f64> {
        match self {
            Self::Original => source.aspect_ratio(),
            Self::Freeform => None,
            Self::Square => Some(1.0),
            Self::Portrait(fraction) => {
                let (short, long) = fraction.terms();
                Some(f64::from(short) / f64::from(long))
            }
            Self::Landscape(fraction) => {
                let (short, long) = fraction.terms();
                Some(f64::from(long) / f64::from(short))
            }
        }
    }

    #[must_use]
    pub fn is_freeform(self) -> bool {
        matches!(self, Self::Freeform)
    }

    /// The constraint after the image has been turned a quarter: portrait and
    /// landscape presets swap, the rest are unaffected.
    #[must_use]
    pub fn rotated(self) -> Self {
        match self {
            Self::Portrait(fraction) => Self::Landscape(fraction),
            Self::Landscape(fraction) => Self::Portrait(fraction),
            other => other,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Freeform => write!(f, "freeform"),
            Self::Square => write!(f, "square"),
            Self::Portrait(fraction) => {
                let (short, long) = fraction.terms();
                write!(f, "{short}:{long}")
            }
            Self::Landscape(fraction) => {
                let (short, long) = fraction.terms();
                write!(f, "{long}:{short}")
            }
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_lowercase();
        match raw.as_str() {
            "original" => return Ok(Self::Original),
            "freeform" | "free" => return Ok(Self::Freeform),
            "square" | "1:1" => return Ok(Self::Square),
            _ => {}
        }

        let (w, h) = raw
            .split_once(':')
            .ok_or_else(|| format!("invalid aspect ratio: {s}"))?;
        let w: u32 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid aspect ratio: {s}"))?;
        let h: u32 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid aspect ratio: {s}"))?;

        if w < h {
            Fraction::from_terms(w, h).map(Self::Portrait)
        } else {
            Fraction::from_terms(h, w).map(Self::Landscape)
        }
        .ok_or_else(|| format!("unsupported aspect ratio: {s}"))
    }
}

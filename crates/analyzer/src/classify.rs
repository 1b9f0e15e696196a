//! Aspect-ratio classification.
//!
//! Two independent classifiers. The binary one compares against 2/3 at full
//! double precision. The detailed one uses the literal cutoff 0.67, so ratios
//! in `[2/3, 0.67)` are `not_tall` yet "vertically elongated". Both cutoffs
//! are kept as they are.

use crate::cascade::Dimensions;
use serde::{Serialize, Serializer};
use std::fmt;

/// Binary classification threshold: 2:3.
pub const TALL_THRESHOLD: f64 = 2.0 / 3.0;

/// Upper bound of the "vertically elongated" detail bucket.
pub const DETAIL_VERTICAL_CUTOFF: f64 = 0.67;

/// Upper bound of the "2:3 to 3:4" detail bucket.
pub const DETAIL_PORTRAIT_CUTOFF: f64 = 0.8;

/// Upper bound of the "near square" detail bucket.
pub const DETAIL_SQUARE_CUTOFF: f64 = 1.2;

/// Tall vs. not tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Ratio strictly below 2/3
    Tall,
    /// Ratio at or above 2/3
    NotTall,
}

impl Classification {
    /// Classify a `width / height` ratio.
    pub fn from_ratio(aspect_ratio: f64) -> Self {
        if aspect_ratio < TALL_THRESHOLD {
            Classification::Tall
        } else {
            Classification::NotTall
        }
    }

    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Tall => "tall",
            Classification::NotTall => "not_tall",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-way classification with a usage recommendation.
///
/// Serializes as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailClass {
    /// ratio < 0.67
    VerticallyElongated,
    /// 0.67 <= ratio < 0.8
    PortraitRange,
    /// 0.8 <= ratio < 1.2
    NearSquare,
    /// ratio >= 1.2
    HorizontallyElongated,
}

impl DetailClass {
    /// Classify a `width / height` ratio.
    pub fn from_ratio(aspect_ratio: f64) -> Self {
        if aspect_ratio < DETAIL_VERTICAL_CUTOFF {
            DetailClass::VerticallyElongated
        } else if aspect_ratio < DETAIL_PORTRAIT_CUTOFF {
            DetailClass::PortraitRange
        } else if aspect_ratio < DETAIL_SQUARE_CUTOFF {
            DetailClass::NearSquare
        } else {
            DetailClass::HorizontallyElongated
        }
    }

    /// Human-readable bucket name.
    pub fn label(&self) -> &'static str {
        match self {
            DetailClass::VerticallyElongated => "vertically elongated (more vertical than 2:3)",
            DetailClass::PortraitRange => "2:3 to 3:4 range",
            DetailClass::NearSquare => "near square",
            DetailClass::HorizontallyElongated => "horizontally elongated",
        }
    }

    /// Suggested use for images in this bucket.
    pub fn recommendation(&self) -> &'static str {
        match self {
            DetailClass::VerticallyElongated => {
                "portrait photography / mobile imagery / vertical banners"
            }
            DetailClass::PortraitRange => "portrait photography or vertical content",
            DetailClass::NearSquare => "profile images, icons, square content",
            DetailClass::HorizontallyElongated => {
                "banner images, header images, horizontal content"
            }
        }
    }
}

impl fmt::Display for DetailClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DetailClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Both classifications of one set of dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    /// `width / height`
    pub aspect_ratio: f64,
    /// Binary classification
    pub classification: Classification,
    /// Detailed classification
    pub detail: DetailClass,
}

impl Assessment {
    /// Assess validated dimensions.
    pub fn of(dimensions: Dimensions) -> Self {
        Self::from_ratio(dimensions.aspect_ratio())
    }

    /// Assess a raw ratio.
    pub fn from_ratio(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            classification: Classification::from_ratio(aspect_ratio),
            detail: DetailClass::from_ratio(aspect_ratio),
        }
    }

    /// Whether the image is taller than 2:3.
    pub fn is_tall(&self) -> bool {
        self.classification == Classification::Tall
    }
}

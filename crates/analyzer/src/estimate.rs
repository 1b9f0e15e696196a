//! Dimension estimation from file size.
//!
//! Last resort for bytes that were fetched but could not be decoded. Larger
//! files are assumed to be higher-resolution landscape images; small files
//! are assumed square.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File size tiers used for estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    /// Over 2,000,000 bytes
    High,
    /// Over 1,000,000 bytes
    Medium,
    /// Over 500,000 bytes
    Standard,
    /// Everything else
    Small,
}

impl SizeTier {
    /// Determine size tier from file size in bytes.
    ///
    /// Thresholds are decimal and exclusive: exactly 2,000,000 bytes is `Medium`.
    pub fn from_bytes(size: usize) -> Self {
        match size {
            s if s > 2_000_000 => SizeTier::High,
            s if s > 1_000_000 => SizeTier::Medium,
            s if s > 500_000 => SizeTier::Standard,
            _ => SizeTier::Small,
        }
    }

    /// Assumed `(width, height)` for this tier.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SizeTier::High => (1920, 1080),
            SizeTier::Medium => (1024, 768),
            SizeTier::Standard => (800, 600),
            SizeTier::Small => (500, 500),
        }
    }

    /// Tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTier::High => "high",
            SizeTier::Medium => "medium",
            SizeTier::Standard => "standard",
            SizeTier::Small => "small",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimate `(width, height)` from a byte count.
///
/// # Example
/// ```
/// use aspect_analyzer::estimate_from_size;
///
/// assert_eq!(estimate_from_size(1_500_000), (1024, 768));
/// assert_eq!(estimate_from_size(10_000), (500, 500));
/// ```
pub fn estimate_from_size(size_bytes: usize) -> (u32, u32) {
    SizeTier::from_bytes(size_bytes).dimensions()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_tier_detection() {
        assert_eq!(SizeTier::from_bytes(3_000_000), SizeTier::High);
        assert_eq!(SizeTier::from_bytes(1_500_000), SizeTier::Medium);
        assert_eq!(SizeTier::from_bytes(700_000), SizeTier::Standard);
        assert_eq!(SizeTier::from_bytes(100), SizeTier::Small);
        assert_eq!(SizeTier::from_bytes(0), SizeTier::Small);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(SizeTier::from_bytes(2_000_000), SizeTier::Medium);
        assert_eq!(SizeTier::from_bytes(2_000_001), SizeTier::High);
        assert_eq!(SizeTier::from_bytes(1_000_000), SizeTier::Standard);
        assert_eq!(SizeTier::from_bytes(500_000), SizeTier::Small);
        assert_eq!(SizeTier::from_bytes(500_001), SizeTier::Standard);
    }

    #[test]
    fn test_estimates() {
        assert_eq!(estimate_from_size(2_500_000), (1920, 1080));
        assert_eq!(estimate_from_size(1_500_000), (1024, 768));
        assert_eq!(estimate_from_size(600_000), (800, 600));
        assert_eq!(estimate_from_size(42), (500, 500));
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(SizeTier::Standard.to_string(), "standard");
        assert_eq!(serde_json::to_value(SizeTier::High).unwrap(), "high");
    }
}

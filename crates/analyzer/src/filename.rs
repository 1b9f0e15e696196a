//! Dimension inference from an object key.
//!
//! The key is treated as an opaque string, not a filesystem path: directory
//! segments take part in matching just like the file name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DIMENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]+)x([0-9]+)").expect("valid dimension pattern"));

const WIDE_KEYWORDS: &[&str] = &["banner", "header", "landscape", "wide"];
const TALL_KEYWORDS: &[&str] = &["portrait", "mobile", "vertical", "tall"];
const SQUARE_KEYWORDS: &[&str] = &["square", "icon", "profile", "avatar"];

/// Which rule produced an inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyHint {
    /// `<w>x<h>` in the key
    Pattern,
    /// Landscape keyword, 1920x1080
    Wide,
    /// Portrait keyword, 1080x1920
    Tall,
    /// Square keyword, 500x500
    Square,
}

impl KeyHint {
    fn keyword_dimensions(&self) -> Option<(i64, i64)> {
        match self {
            KeyHint::Pattern => None,
            KeyHint::Wide => Some((1920, 1080)),
            KeyHint::Tall => Some((1080, 1920)),
            KeyHint::Square => Some((500, 500)),
        }
    }
}

/// Dimensions read or guessed from a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInference {
    /// Width in pixels
    pub width: i64,
    /// Height in pixels
    pub height: i64,
    /// Rule that matched
    pub hint: KeyHint,
}

/// Infer dimensions from an object key.
///
/// Rules, first match wins:
/// 1. the first `<digits>x<digits>` substring (case-insensitive)
/// 2. `banner`, `header`, `landscape`, `wide` give 1920x1080
/// 3. `portrait`, `mobile`, `vertical`, `tall` give 1080x1920
/// 4. `square`, `icon`, `profile`, `avatar` give 500x500
///
/// A pattern whose numbers do not fit in `i64` is skipped in favour of the
/// keyword rules.
///
/// # Example
/// ```
/// use aspect_analyzer::{infer_from_key, KeyHint};
///
/// let inferred = infer_from_key("image_1920x1080_final.jpg").unwrap();
/// assert_eq!((inferred.width, inferred.height), (1920, 1080));
/// assert_eq!(inferred.hint, KeyHint::Pattern);
///
/// assert_eq!(infer_from_key("Users/Avatar.PNG").unwrap().hint, KeyHint::Square);
/// assert!(infer_from_key("IMG_0042.jpg").is_none());
/// ```
pub fn infer_from_key(key: &str) -> Option<KeyInference> {
    if key.is_empty() {
        return None;
    }

    if let Some(inferred) = match_pattern(key) {
        return Some(inferred);
    }

    let lower = key.to_lowercase();
    let hint = [
        (KeyHint::Wide, WIDE_KEYWORDS),
        (KeyHint::Tall, TALL_KEYWORDS),
        (KeyHint::Square, SQUARE_KEYWORDS),
    ]
    .into_iter()
    .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
    .map(|(hint, _)| hint)?;

    let (width, height) = hint.keyword_dimensions()?;
    Some(KeyInference {
        width,
        height,
        hint,
    })
}

fn match_pattern(key: &str) -> Option<KeyInference> {
    let captures = DIMENSION_PATTERN.captures(key)?;
    let width: Option<i64> = captures[1].parse().ok();
    let height: Option<i64> = captures[2].parse().ok();

    match (width, height) {
        (Some(width), Some(height)) => Some(KeyInference {
            width,
            height,
            hint: KeyHint::Pattern,
        }),
        _ => {
            tracing::debug!(key, "Dimension pattern out of range, ignoring");
            None
        }
    }
}

//! Dimension detection cascade.

use crate::estimate::estimate_from_size;
use crate::filename::infer_from_key;
use aspect_image::DimensionDecoder;
use aspect_store::ObjectStore;
use aspect_telemetry::Timer;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// Dimensions used when nothing else is known.
pub const DEFAULT_DIMENSIONS: (u32, u32) = (800, 600);

/// Which stage produced the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Supplied by the caller
    Explicit,
    /// Read from the image header
    BinaryAnalysis,
    /// Inferred from the object key
    FilenamePattern,
    /// Estimated from the byte count
    FilesizeEstimation,
    /// Hardcoded fallback
    Default,
}

impl DetectionMethod {
    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Explicit => "explicit",
            DetectionMethod::BinaryAnalysis => "binary_analysis",
            DetectionMethod::FilenamePattern => "filename_pattern",
            DetectionMethod::FilesizeEstimation => "filesize_estimation",
            DetectionMethod::Default => "default",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analysis invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Bucket holding the object
    pub bucket: String,
    /// Object key
    pub key: String,
    /// Caller-supplied width
    pub explicit_width: Option<i64>,
    /// Caller-supplied height
    pub explicit_height: Option<i64>,
}

impl AnalysisRequest {
    /// Request with no explicit dimensions.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            explicit_width: None,
            explicit_height: None,
        }
    }

    /// Set explicit dimensions. Both must be present to take effect.
    #[must_use]
    pub fn with_dimensions(mut self, width: Option<i64>, height: Option<i64>) -> Self {
        self.explicit_width = width;
        self.explicit_height = height;
        self
    }
}

/// Raw cascade output, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Detected width, possibly zero or negative
    pub width: i64,
    /// Detected height, possibly zero or negative
    pub height: i64,
    /// Stage that produced the values
    pub method: DetectionMethod,
}

impl Detection {
    fn new(width: i64, height: i64, method: DetectionMethod) -> Self {
        Self {
            width,
            height,
            method,
        }
    }

    fn from_u32((width, height): (u32, u32), method: DetectionMethod) -> Self {
        Self::new(i64::from(width), i64::from(height), method)
    }

    /// Validated dimensions, if both values are strictly positive.
    pub fn dimensions(&self) -> Option<Dimensions> {
        Dimensions::new(self.width, self.height)
    }
}

/// Strictly positive pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Validate raw values. Zero, negative and out-of-range values are rejected.
    pub fn new(width: i64, height: i64) -> Option<Self> {
        let width = u32::try_from(width).ok().filter(|w| *w > 0)?;
        let height = u32::try_from(height).ok().filter(|h| *h > 0)?;
        Some(Self { width, height })
    }

    /// `width / height`
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Run the detection cascade for one request.
///
/// Never fails: every path ends in some [`Detection`], which may still hold
/// unusable values.
pub fn detect<S, D>(request: &AnalysisRequest, store: &S, decoder: &D) -> Detection
where
    S: ObjectStore + ?Sized,
    D: DimensionDecoder + ?Sized,
{
    match (request.explicit_width, request.explicit_height) {
        (Some(width), Some(height)) => {
            debug!(width, height, "Using explicit dimensions");
            return Detection::new(width, height, DetectionMethod::Explicit);
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("Only one explicit dimension supplied, ignoring it");
        }
        (None, None) => {}
    }

    let timer = Timer::start("fetch_object");
    let fetched = store.fetch_object(&request.bucket, &request.key);
    timer.stop();

    match fetched {
        Ok(data) if !data.is_empty() => {
            debug!(bytes = data.len(), "Fetched object");
            from_bytes(&data, decoder)
                .or_else(|| from_key(&request.key))
                .unwrap_or_else(|| {
                    let estimate = estimate_from_size(data.len());
                    info!(bytes = data.len(), "Estimating dimensions from file size");
                    Detection::from_u32(estimate, DetectionMethod::FilesizeEstimation)
                })
        }
        Ok(_) => {
            warn!(
                bucket = %request.bucket,
                key = %request.key,
                "Fetched object is empty, falling back to key inference"
            );
            from_key_or_default(&request.key)
        }
        Err(e) => {
            warn!(
                bucket = %request.bucket,
                key = %request.key,
                code = %e.code(),
                error = %e,
                "Fetch failed, falling back to key inference"
            );
            from_key_or_default(&request.key)
        }
    }
}

fn from_bytes<D: DimensionDecoder + ?Sized>(data: &[u8], decoder: &D) -> Option<Detection> {
    match decoder.decode_dimensions(data) {
        Ok(dims) => {
            debug!(width = dims.0, height = dims.1, "Decoded image header");
            Some(Detection::from_u32(dims, DetectionMethod::BinaryAnalysis))
        }
        Err(e) => {
            debug!(code = %e.code(), error = %e, "Could not decode image");
            None
        }
    }
}

fn from_key_or_default(key: &str) -> Detection {
    from_key(key).unwrap_or_else(|| {
        info!("No dimension hints available, using default");
        Detection::from_u32(DEFAULT_DIMENSIONS, DetectionMethod::Default)
    })
}

fn from_key(key: &str) -> Option<Detection> {
    let inferred = infer_from_key(key)?;
    debug!(hint = ?inferred.hint, width = inferred.width, height = inferred.height, "Inferred dimensions from key");
    Some(Detection::new(
        inferred.width,
        inferred.height,
        DetectionMethod::FilenamePattern,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspect_image::{ImageDecoder, ImageError};
    use aspect_store::{MemoryStore, OfflineStore};

    fn never_decodes(_: &[u8]) -> aspect_image::Result<(u32, u32)> {
        Err(ImageError::UnknownFormat)
    }

    fn always_decodes(_: &[u8]) -> aspect_image::Result<(u32, u32)> {
        Ok((640, 960))
    }

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    #[test]
    fn test_explicit_wins_over_everything() {
        let store = MemoryStore::new().with_object("media", "banner_1920x1080.png", png_header(10, 10));
        let request = AnalysisRequest::new("media", "banner_1920x1080.png")
            .with_dimensions(Some(300), Some(450));

        let detection = detect(&request, &store, &ImageDecoder);
        assert_eq!(detection, Detection::new(300, 450, DetectionMethod::Explicit));
    }

    #[test]
    fn test_explicit_values_are_not_validated() {
        let request = AnalysisRequest::new("media", "a.png").with_dimensions(Some(0), Some(-5));
        let detection = detect(&request, &OfflineStore, &ImageDecoder);
        assert_eq!(detection.method, DetectionMethod::Explicit);
        assert!(detection.dimensions().is_none());
    }

    #[test]
    fn test_single_explicit_value_is_ignored() {
        let request = AnalysisRequest::new("media", "square.png").with_dimensions(Some(300), None);
        let detection = detect(&request, &OfflineStore, &ImageDecoder);
        assert_eq!(detection, Detection::new(500, 500, DetectionMethod::FilenamePattern));
    }

    #[test]
    fn test_binary_analysis() {
        let store = MemoryStore::new().with_object("media", "banner.png", png_header(400, 1200));
        let detection = detect(&AnalysisRequest::new("media", "banner.png"), &store, &ImageDecoder);
        assert_eq!(detection, Detection::new(400, 1200, DetectionMethod::BinaryAnalysis));
    }

    #[test]
    fn test_closure_decoder() {
        let store = MemoryStore::new().with_object("media", "a.bin", vec![0u8; 4]);
        let detection = detect(&AnalysisRequest::new("media", "a.bin"), &store, &always_decodes);
        assert_eq!(detection.method, DetectionMethod::BinaryAnalysis);
        assert_eq!((detection.width, detection.height), (640, 960));
    }

    #[test]
    fn test_undecodable_bytes_use_key_then_size() {
        let store = MemoryStore::new()
            .with_object("media", "portrait.bin", vec![0u8; 10])
            .with_object("media", "blob.bin", vec![0u8; 1_500_000]);

        let detection = detect(&AnalysisRequest::new("media", "portrait.bin"), &store, &never_decodes);
        assert_eq!(detection, Detection::new(1080, 1920, DetectionMethod::FilenamePattern));

        let detection = detect(&AnalysisRequest::new("media", "blob.bin"), &store, &never_decodes);
        assert_eq!(detection, Detection::new(1024, 768, DetectionMethod::FilesizeEstimation));
    }

    #[test]
    fn test_fetch_failure_uses_key_then_default() {
        let detection = detect(&AnalysisRequest::new("media", "banner_top.png"), &OfflineStore, &ImageDecoder);
        assert_eq!(detection, Detection::new(1920, 1080, DetectionMethod::FilenamePattern));

        let detection = detect(&AnalysisRequest::new("media", "IMG_0042.jpg"), &OfflineStore, &ImageDecoder);
        assert_eq!(detection, Detection::new(800, 600, DetectionMethod::Default));
    }

    #[test]
    fn test_missing_object_skips_size_estimation() {
        let store = MemoryStore::new();
        let detection = detect(&AnalysisRequest::new("media", "photo.jpg"), &store, &never_decodes);
        assert_eq!(detection.method, DetectionMethod::Default);
    }

    #[test]
    fn test_empty_object_skips_size_estimation() {
        let store = MemoryStore::new()
            .with_object("media", "photo.jpg", Vec::new())
            .with_object("media", "thumb_square.jpg", Vec::new());

        let detection = detect(&AnalysisRequest::new("media", "photo.jpg"), &store, &ImageDecoder);
        assert_eq!(detection, Detection::new(800, 600, DetectionMethod::Default));

        let detection = detect(&AnalysisRequest::new("media", "thumb_square.jpg"), &store, &ImageDecoder);
        assert_eq!(detection.method, DetectionMethod::FilenamePattern);
    }

    #[test]
    fn test_dimensions_gate() {
        assert_eq!(Dimensions::new(300, 450), Some(Dimensions { width: 300, height: 450 }));
        assert!(Dimensions::new(0, 100).is_none());
        assert!(Dimensions::new(100, -1).is_none());
        assert!(Dimensions::new(i64::from(u32::MAX) + 1, 100).is_none());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(DetectionMethod::FilesizeEstimation.to_string(), "filesize_estimation");
        assert_eq!(
            serde_json::to_value(DetectionMethod::BinaryAnalysis).unwrap(),
            "binary_analysis"
        );
    }
}

//! Aspect-ratio analysis for images in an object store.
//!
//! Dimensions come from the first detection stage that yields any:
//!
//! 1. explicit width and height supplied by the caller
//! 2. the image header, when the object can be fetched and decoded
//! 3. a `<w>x<h>` pattern or a keyword in the object key
//! 4. the fetched byte count (only when bytes were fetched)
//! 5. a fixed 800x600 default (only when the fetch failed)
//!
//! The ratio `width / height` is then classified against 2:3.
//!
//! ```
//! use aspect_analyzer::{AnalysisRequest, Analyzer, Classification, DetectionMethod};
//! use aspect_store::OfflineStore;
//!
//! let analyzer = Analyzer::new(OfflineStore);
//! let result = analyzer.analyze(&AnalysisRequest::new("media", "hero_1080x1920.jpg"));
//!
//! let success = result.as_success().unwrap();
//! assert_eq!((success.width, success.height), (1080, 1920));
//! assert_eq!(success.detection_method, DetectionMethod::FilenamePattern);
//! assert_eq!(success.classification, Classification::Tall);
//! ```

#![warn(missing_docs)]

mod analyzer;
mod cascade;
pub mod classify;
pub mod estimate;
pub mod filename;
mod report;
pub mod size;

pub use analyzer::Analyzer;
pub use cascade::{detect, AnalysisRequest, Detection, DetectionMethod, Dimensions, DEFAULT_DIMENSIONS};
pub use classify::{Assessment, Classification, DetailClass, TALL_THRESHOLD};
pub use estimate::{estimate_from_size, SizeTier};
pub use filename::{infer_from_key, KeyHint, KeyInference};
pub use report::{
    AnalysisFailure, AnalysisResult, AnalysisSuccess, DebugInfo, FailureKind, RatioComparison,
    SourceRef,
};
pub use size::{parse_file_size, parse_size_str};

//! Analysis results as reported to callers.

use crate::cascade::{AnalysisRequest, Detection, DetectionMethod, Dimensions};
use crate::classify::{Assessment, Classification, DetailClass, TALL_THRESHOLD};
use aspect_core::Error;
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Where the analyzed object lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    /// Bucket name
    pub bucket: String,
    /// Object key
    pub key: String,
}

impl From<&AnalysisRequest> for SourceRef {
    fn from(request: &AnalysisRequest) -> Self {
        Self {
            bucket: request.bucket.clone(),
            key: request.key.clone(),
        }
    }
}

/// Comparison against the 2:3 reference ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioComparison {
    /// 2/3 rounded to two decimals
    pub threshold: f64,
    /// Same as `is_tall`
    pub is_taller_than_2_3: bool,
    /// `ratio - 2/3`, rounded to two decimals
    pub difference_from_2_3: f64,
}

impl RatioComparison {
    fn new(assessment: &Assessment) -> Self {
        Self {
            threshold: round2(TALL_THRESHOLD),
            is_taller_than_2_3: assessment.is_tall(),
            difference_from_2_3: round2(assessment.aspect_ratio - TALL_THRESHOLD),
        }
    }
}

/// A classified image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSuccess {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// `width / height`
    pub aspect_ratio: f64,
    /// Ratio rounded to two decimals
    pub decimal_ratio: f64,
    /// Tall or not tall
    pub classification: Classification,
    /// Detailed bucket
    pub detail_classification: DetailClass,
    /// Suggested use for the bucket
    pub recommended_action: &'static str,
    /// `"<width>:<height>"`
    pub ratio_text: String,
    /// Ratio strictly below 2/3
    pub is_tall: bool,
    /// Comparison against 2:3
    #[serde(rename = "ratio_2_3_comparison")]
    pub ratio_comparison: RatioComparison,
    /// Stage that produced the dimensions
    pub detection_method: DetectionMethod,
    /// Analyzed object
    #[serde(rename = "s3_source")]
    pub source: SourceRef,
    /// Local time of analysis
    pub analyzed_at: DateTime<Local>,
}

impl AnalysisSuccess {
    fn new(dimensions: Dimensions, method: DetectionMethod, source: SourceRef) -> Self {
        let assessment = Assessment::of(dimensions);
        Self {
            width: dimensions.width,
            height: dimensions.height,
            aspect_ratio: assessment.aspect_ratio,
            decimal_ratio: round2(assessment.aspect_ratio),
            classification: assessment.classification,
            detail_classification: assessment.detail,
            recommended_action: assessment.detail.recommendation(),
            ratio_text: format!("{}:{}", dimensions.width, dimensions.height),
            is_tall: assessment.is_tall(),
            ratio_comparison: RatioComparison::new(&assessment),
            detection_method: method,
            source,
            analyzed_at: Local::now(),
        }
    }
}

/// Failure classification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Dimensions were detected but unusable
    Unknown,
    /// Analysis itself broke
    Error,
}

/// Values that failed the dimension gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct DebugInfo {
    pub detected_width: i64,
    pub detected_height: i64,
    pub detection_method: DetectionMethod,
}

/// An analysis that produced no classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisFailure {
    /// Human-readable reason
    pub error: String,
    /// `E####` code
    pub error_code: String,
    /// Category of an unexpected fault
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// `unknown` or `error`
    pub classification: FailureKind,
    /// Rejected values, for gate failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
    /// Analyzed object
    #[serde(rename = "s3_source")]
    pub source: SourceRef,
    /// Local time of analysis
    pub analyzed_at: DateTime<Local>,
}

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    /// Dimensions passed the gate and were classified
    Success(AnalysisSuccess),
    /// Anything else
    Failure(AnalysisFailure),
}

impl AnalysisResult {
    /// Apply the dimension gate to a cascade result.
    pub fn from_detection(request: &AnalysisRequest, detection: Detection) -> Self {
        let source = SourceRef::from(request);
        match detection.dimensions() {
            Some(dimensions) => {
                Self::Success(AnalysisSuccess::new(dimensions, detection.method, source))
            }
            None => {
                let err = Error::invalid_dimensions(detection.width, detection.height);
                Self::Failure(AnalysisFailure {
                    error: err.message,
                    error_code: err.code.to_string(),
                    error_type: None,
                    classification: FailureKind::Unknown,
                    debug_info: Some(DebugInfo {
                        detected_width: detection.width,
                        detected_height: detection.height,
                        detection_method: detection.method,
                    }),
                    source,
                    analyzed_at: Local::now(),
                })
            }
        }
    }

    /// Report a fault raised while analyzing.
    pub fn unexpected(request: &AnalysisRequest, error_type: impl Into<String>, err: &Error) -> Self {
        Self::Failure(AnalysisFailure {
            error: format!("Analysis error: {}", err.message),
            error_code: err.code.to_string(),
            error_type: Some(error_type.into()),
            classification: FailureKind::Error,
            debug_info: None,
            source: SourceRef::from(request),
            analyzed_at: Local::now(),
        })
    }

    /// Whether the image was classified.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success payload, if any.
    pub fn as_success(&self) -> Option<&AnalysisSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    pub fn as_failure(&self) -> Option<&AnalysisFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for AnalysisResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(body) => Tagged { success: true, body }.serialize(serializer),
            Self::Failure(body) => Tagged { success: false, body }.serialize(serializer),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Top-level analysis entry point.

use crate::cascade::{detect, AnalysisRequest};
use crate::report::AnalysisResult;
use aspect_core::Error;
use aspect_image::{DimensionDecoder, ImageDecoder};
use aspect_store::ObjectStore;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info};

/// Runs the detection cascade against a store and classifies the result.
///
/// The store and decoder are fixed at construction. Each [`Analyzer::analyze`]
/// call is independent.
#[derive(Debug, Clone)]
pub struct Analyzer<S, D = ImageDecoder> {
    store: S,
    decoder: D,
}

impl<S: ObjectStore> Analyzer<S> {
    /// Analyzer using the default image decoder.
    pub fn new(store: S) -> Self {
        Self {
            store,
            decoder: ImageDecoder,
        }
    }
}

impl<S: ObjectStore, D: DimensionDecoder> Analyzer<S, D> {
    /// Replace the decoder.
    pub fn with_decoder<E: DimensionDecoder>(self, decoder: E) -> Analyzer<S, E> {
        Analyzer {
            store: self.store,
            decoder,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Analyze one object.
    ///
    /// Always returns a result. A panic inside a collaborator is reported as
    /// a failure with classification `error` instead of unwinding further.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        info!(bucket = %request.bucket, key = %request.key, "Analyzing object");

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let detection = detect(request, &self.store, &self.decoder);
            AnalysisResult::from_detection(request, detection)
        }));

        match outcome {
            Ok(result) => {
                if let Some(success) = result.as_success() {
                    info!(
                        width = success.width,
                        height = success.height,
                        aspect_ratio = success.aspect_ratio,
                        classification = %success.classification,
                        method = %success.detection_method,
                        "Analysis successful"
                    );
                }
                result
            }
            Err(payload) => {
                let err = Error::internal(panic_message(payload.as_ref()));
                error!(code = %err.code, error = %err.message, "Analysis aborted");
                AnalysisResult::unexpected(request, "panic", &err)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

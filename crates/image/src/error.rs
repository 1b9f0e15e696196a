//! Error types for the image crate.

use aspect_core::ErrorCode;
use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur while inspecting image data.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Unknown image format
    #[error("Unknown image format")]
    UnknownFormat,

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image processing error
    #[cfg(feature = "processing")]
    #[error("Image processing error: {0}")]
    ProcessingError(#[from] image::ImageError),
}

impl ImageError {
    /// Error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownFormat => ErrorCode::UnknownFormat,
            Self::IoError(_) => ErrorCode::IoError,
            _ => ErrorCode::DecodeError,
        }
    }
}

impl From<ImageError> for aspect_core::Error {
    fn from(err: ImageError) -> Self {
        aspect_core::Error::new(err.code(), err.to_string())
    }
}

//! Error types for object store access

use aspect_core::ErrorCode;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Object store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("Store returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error code or body returned by the store
        message: String,
    },

    /// Object does not exist
    #[error("Object not found: {bucket}/{key}")]
    NotFound {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bucket or key cannot be addressed
    #[error("Invalid object address: {0}")]
    InvalidKey(String),

    /// Local filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store access disabled
    #[error("Object store access is disabled (offline mode)")]
    Offline,
}

impl StoreError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Error code for logs and reports
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Request(_) | Self::Offline => ErrorCode::StoreUnreachable,
            Self::Status { status: 404, .. } | Self::NotFound { .. } => ErrorCode::ObjectNotFound,
            Self::Status {
                status: 401 | 403, ..
            } => ErrorCode::AccessDenied,
            Self::Status { .. } => ErrorCode::StoreError,
            Self::Config(_) => ErrorCode::ConfigValidationError,
            Self::InvalidKey(_) => ErrorCode::InvalidInput,
            Self::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::ObjectNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::AccessDenied,
                _ => ErrorCode::IoError,
            },
        }
    }
}

impl From<StoreError> for aspect_core::Error {
    fn from(err: StoreError) -> Self {
        let code = err.code();
        let message = err.to_string();
        let mut converted = aspect_core::Error::new(code, message);
        if code == ErrorCode::AccessDenied {
            converted = converted
                .with_suggestion("Check the credentials and the bucket policy for this key");
        }
        converted.with_source(err)
    }
}

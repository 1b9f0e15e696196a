//! Image inspection utilities.
//!
//! This crate provides:
//! - Format detection from magic bytes
//! - Dimension decoding from image headers, without decoding pixel data
//! - The [`DimensionDecoder`] seam used by the aspect-ratio analyzer

#![warn(missing_docs)]

mod decode;
mod detect;
mod error;

pub use decode::{read_image_info, DimensionDecoder, ImageDecoder, ImageInfo};
pub use detect::{detect_format, ImageFormat};
pub use error::{ImageError, Result};

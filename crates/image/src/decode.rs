//! Dimension decoding from image headers.
//!
//! JPEG, PNG and GIF are read straight from their headers. Everything else
//! goes through the `image` crate, which also stops after the header.

use crate::{detect_format, ImageError, ImageFormat, Result};
use serde::{Deserialize, Serialize};

/// Header-level facts about an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Detected format, if the signature is one we know
    pub format: Option<ImageFormat>,
    /// File size in bytes
    pub size_bytes: usize,
}

impl ImageInfo {
    /// Check if image is landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Check if image is portrait orientation.
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Check if image is square.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// Something that can turn raw bytes into pixel dimensions.
pub trait DimensionDecoder {
    /// Read `(width, height)` from an encoded image.
    fn decode_dimensions(&self, data: &[u8]) -> Result<(u32, u32)>;
}

impl<F> DimensionDecoder for F
where
    F: Fn(&[u8]) -> Result<(u32, u32)>,
{
    fn decode_dimensions(&self, data: &[u8]) -> Result<(u32, u32)> {
        self(data)
    }
}

/// Default decoder: header fast path, then the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl DimensionDecoder for ImageDecoder {
    fn decode_dimensions(&self, data: &[u8]) -> Result<(u32, u32)> {
        read_image_info(data).map(|info| (info.width, info.height))
    }
}

/// Read dimensions and format from image data.
///
/// # Example
/// ```
/// use aspect_image::read_image_info;
///
/// // GIF89a, 640x480 logical screen
/// let gif = b"GIF89a\x80\x02\xe0\x01\x00\x00\x00";
/// let info = read_image_info(gif).unwrap();
/// assert_eq!((info.width, info.height), (640, 480));
/// ```
pub fn read_image_info(data: &[u8]) -> Result<ImageInfo> {
    let format = detect_format(data).ok();

    let header = match format {
        Some(ImageFormat::Jpeg) => extract_jpeg_dimensions(data),
        Some(ImageFormat::Png) => extract_png_dimensions(data),
        Some(ImageFormat::Gif) => extract_gif_dimensions(data),
        _ => None,
    };

    let (width, height) = match header {
        Some(dimensions) => dimensions,
        None => decode_container(data)?,
    };

    Ok(ImageInfo {
        width,
        height,
        format,
        size_bytes: data.len(),
    })
}

#[cfg(feature = "processing")]
fn decode_container(data: &[u8]) -> Result<(u32, u32)> {
    let reader = image::io::Reader::new(std::io::Cursor::new(data)).with_guessed_format()?;
    if reader.format().is_none() {
        return Err(ImageError::UnknownFormat);
    }
    Ok(reader.into_dimensions()?)
}

#[cfg(not(feature = "processing"))]
fn decode_container(data: &[u8]) -> Result<(u32, u32)> {
    match detect_format(data) {
        Ok(format) => Err(ImageError::InvalidData(format!(
            "{format} header could not be read"
        ))),
        Err(e) => Err(e),
    }
}

/// Extract dimensions from JPEG data.
fn extract_jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    // Skip SOI marker
    let mut i = 2;

    while i + 4 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }

        let marker = data[i + 1];

        // SOF markers carry the frame size
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            if i + 9 < data.len() {
                let height = u32::from(u16::from_be_bytes([data[i + 5], data[i + 6]]));
                let width = u32::from(u16::from_be_bytes([data[i + 7], data[i + 8]]));
                return Some((width, height));
            }
            return None;
        }

        // Standalone markers have no length field
        if marker == 0xD8 || marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
        } else if marker == 0xD9 || marker == 0xDA {
            // EOI or start of scan before any frame header
            return None;
        } else {
            let length = usize::from(u16::from_be_bytes([data[i + 2], data[i + 3]]));
            i += 2 + length;
        }
    }

    None
}

/// Extract dimensions from PNG data.
fn extract_png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    // 8 byte signature, then IHDR: length, "IHDR", width, height
    if data.len() < 24 || &data[12..16] != b"IHDR" {
        return None;
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);

    Some((width, height))
}

/// Extract dimensions from GIF data.
fn extract_gif_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    // 6 byte signature, then logical screen width and height (little endian)
    if data.len() < 10 {
        return None;
    }

    let width = u32::from(u16::from_le_bytes([data[6], data[7]]));
    let height = u32::from(u16::from_le_bytes([data[8], data[9]]));

    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 2, 0, 0, 0]);
        data
    }

    fn jpeg_header(width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        // APP0 with a 16 byte segment
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
        // SOF0
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&[0x03, 0x01, 0x22, 0x00]);
        data
    }

    #[test]
    fn test_png_header() {
        let info = read_image_info(&png_header(1080, 1920)).unwrap();
        assert_eq!((info.width, info.height), (1080, 1920));
        assert_eq!(info.format, Some(ImageFormat::Png));
        assert!(info.is_portrait());
    }

    #[test]
    fn test_jpeg_header_after_app0() {
        let info = read_image_info(&jpeg_header(1920, 1080)).unwrap();
        assert_eq!((info.width, info.height), (1920, 1080));
        assert_eq!(info.format, Some(ImageFormat::Jpeg));
        assert!(info.is_landscape());
    }

    #[test]
    fn test_gif_header() {
        let data = b"GIF87a\xf4\x01\xf4\x01\x00\x00\x00";
        let info = read_image_info(data).unwrap();
        assert_eq!((info.width, info.height), (500, 500));
        assert!(info.is_square());
        assert_eq!(info.size_bytes, data.len());
    }

    #[test]
    fn test_unrecognized_bytes_fail() {
        let data = vec![0x42u8; 4096];
        assert!(ImageDecoder.decode_dimensions(&data).is_err());
    }

    #[test]
    fn test_truncated_jpeg_fails() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert!(ImageDecoder.decode_dimensions(&data).is_err());
    }

    #[test]
    fn test_closure_decoder() {
        let fixed = |_: &[u8]| -> Result<(u32, u32)> { Ok((3, 4)) };
        assert_eq!(fixed.decode_dimensions(b"anything").unwrap(), (3, 4));
    }

    #[cfg(feature = "processing")]
    #[test]
    fn test_bmp_through_image_crate() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(3, 7));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageOutputFormat::Bmp).unwrap();

        let info = read_image_info(buf.get_ref()).unwrap();
        assert_eq!((info.width, info.height), (3, 7));
        assert_eq!(info.format, Some(ImageFormat::Bmp));
    }

    #[test]
    fn test_info_serializes_lowercase_format() {
        let info = read_image_info(&png_header(10, 20)).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["format"], "png");
        assert_eq!(json["width"], 10);
    }
}

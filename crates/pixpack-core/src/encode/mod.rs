//! Pixel encoding for embedded display buffers.
//!
//! This module turns an RGBA [`Bitmap`] into the flat byte layout a display
//! driver reads directly:
//! - BINARY / TRANSPARENT_BINARY: 1 bit per pixel, rows padded to bytes
//! - GRAYSCALE: 1 byte luminance
//! - RGB565: 2 bytes, big-endian
//! - RGB24: 3 bytes
//! - RGBA: 4 bytes
//!
//! Formats without an alpha channel implement transparency with a reserved
//! sentinel value (color key).
//!
//! # Examples
//!
//! ```ignore
//! use pixpack_core::config::{DitherMode, EncodingConfig, ImageType};
//! use pixpack_core::encode::encode;
//! use pixpack_core::source::Bitmap;
//!
//! let bitmap = Bitmap::new(2, 1, vec![255, 0, 0, 255, 0, 0, 1, 0]);
//! let config = EncodingConfig::resolve(false, Some(ImageType::Rgb24), Some(true), DitherMode::None)?;
//! let buffer = encode(&bitmap, &config)?;
//! assert_eq!(buffer.data, vec![255, 0, 0, 0, 0, 1]);
//! ```

mod binary;
mod dither;
mod grayscale;
mod rgb;

use thiserror::Error;

use crate::config::{DeviceImageType, EncodingConfig, ImageType};
use crate::source::{Bitmap, RGBA_CHANNELS};

pub use binary::padded_width;
pub use dither::floyd_steinberg;
pub use grayscale::GRAYSCALE_SENTINEL;
pub use rgb::{pack_rgb565, RGB24_SENTINEL, RGB565_SENTINEL};

/// Pixels with alpha below this are treated as transparent by color-keyed
/// formats.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Errors that can occur during pixel encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// An encoded, device-ready pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub image_type: ImageType,
    pub use_transparency: bool,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Image type value handed to the device.
    pub fn device_type(&self) -> DeviceImageType {
        self.image_type.device_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Buffer length in bytes for an image of the given size and type.
pub fn expected_length(width: u32, height: u32, image_type: ImageType) -> usize {
    let pixels = width as usize * height as usize;
    match image_type {
        ImageType::Binary | ImageType::TransparentBinary => {
            height as usize * padded_width(width) / 8
        }
        ImageType::Grayscale => pixels,
        ImageType::Rgb565 => pixels * 2,
        ImageType::Rgb24 => pixels * 3,
        ImageType::Rgba => pixels * 4,
    }
}

/// Encode a bitmap into the configured pixel format.
///
/// # Arguments
///
/// * `bitmap` - RGBA source pixels (4 bytes per pixel, row-major order)
/// * `config` - Resolved encoding parameters
///
/// # Returns
///
/// A [`PixelBuffer`] whose length is [`expected_length`] for the bitmap's
/// dimensions and the configured type.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero width or height and
/// `EncodeError::InvalidPixelData` if the pixel buffer does not hold exactly
/// width * height RGBA pixels.
pub fn encode(bitmap: &Bitmap, config: &EncodingConfig) -> Result<PixelBuffer, EncodeError> {
    let (width, height) = (bitmap.width, bitmap.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * RGBA_CHANNELS;
    if bitmap.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: bitmap.pixels.len(),
        });
    }

    let data = match config.image_type {
        ImageType::Binary | ImageType::TransparentBinary => binary::encode(bitmap, config),
        ImageType::Grayscale => grayscale::encode(bitmap, config),
        ImageType::Rgb565 => rgb::encode_rgb565(bitmap, config),
        ImageType::Rgb24 => rgb::encode_rgb24(bitmap, config),
        ImageType::Rgba => rgb::encode_rgba(bitmap),
    };
    debug_assert_eq!(data.len(), expected_length(width, height, config.image_type));

    Ok(PixelBuffer {
        width,
        height,
        image_type: config.image_type,
        use_transparency: config.use_transparency,
        data,
    })
}

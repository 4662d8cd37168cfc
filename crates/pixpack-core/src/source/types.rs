//! Core types for image sourcing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Error types for loading, decoding, downloading and rasterizing images.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error during file reading or cache writing.
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    /// The icon could not be downloaded.
    #[error("Could not download icon {id} from {url}: {reason}")]
    Download {
        id: String,
        url: String,
        reason: String,
    },

    /// The SVG document could not be parsed or rendered.
    #[error("Could not rasterize SVG: {0}")]
    Rasterize(String),
}

impl SourceError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        SourceError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation, the thumbnail default.
    #[default]
    Bicubic,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Bicubic => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// A decoded bitmap with RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a new Bitmap with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * RGBA_CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(count))
    }

    /// Create a Bitmap from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate over pixels as `[r, g, b, a]` in row-major order.
    pub fn rgba(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(RGBA_CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// True if any pixel is not fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.rgba().any(|[_, _, _, a]| a < u8::MAX)
    }
}

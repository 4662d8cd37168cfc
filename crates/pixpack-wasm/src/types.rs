//! WASM-compatible wrapper types for bitmaps and encoded buffers.
//!
//! This module provides JavaScript-friendly types that wrap the core pixpack
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pixpack_core::source::FilterType;
use pixpack_core::{Bitmap, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and RGBA pixel data
    /// (4 bytes per pixel, row-major order).
    ///
    /// This is the layout of `ImageData.data` from a canvas.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsBitmap {
    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }

    /// Convert to a core Bitmap. Clones the pixel data.
    pub(crate) fn to_bitmap(&self) -> Bitmap {
        Bitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 filter value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = Bicubic (Catmull-Rom)
/// - 3 = Lanczos3
///
/// Any other value falls back to Bicubic, the CLI's thumbnail filter.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        3 => FilterType::Lanczos3,
        _ => FilterType::Bicubic,
    }
}

/// An encoded pixel buffer ready to be stored on the device.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Requested format name, e.g. "TRANSPARENT_BINARY"
    #[wasm_bindgen(getter)]
    pub fn image_type(&self) -> String {
        self.inner.image_type.as_str().to_string()
    }

    /// Numeric device image type (BINARY=0 ... RGBA=4)
    #[wasm_bindgen(getter)]
    pub fn device_type(&self) -> u8 {
        self.inner.device_type() as u8
    }

    #[wasm_bindgen(getter)]
    pub fn use_transparency(&self) -> bool {
        self.inner.use_transparency
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Returns the encoded bytes as Uint8Array (copied).
    pub fn data(&self) -> Vec<u8> {
        self.inner.data.clone()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

//! Image sourcing WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG/JPEG/BMP/GIF file into an RGBA bitmap
//! - [`thumbnail`] - Shrink a bitmap to fit a box, preserving aspect ratio
//! - [`rasterize_icon`] - Render SVG text into a bitmap of an exact size
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, thumbnail } from '@pixpack/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = thumbnail(decode_image(bytes), 128, 64, 2); // Bicubic
//! ```

use crate::types::{filter_from_u8, JsBitmap};
use pixpack_core::source;
use pixpack_core::TargetSize;
use wasm_bindgen::prelude::*;

/// Decode an image file from bytes.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    source::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Shrink a bitmap to fit within `max_width` x `max_height`.
///
/// Never upscales; a bitmap that already fits is returned unchanged.
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Bicubic, 3 = Lanczos3.
#[wasm_bindgen]
pub fn thumbnail(
    image: &JsBitmap,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsBitmap, JsValue> {
    source::thumbnail(&image.to_bitmap(), max_width, max_height, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render an SVG document at exactly `width` x `height`.
#[wasm_bindgen]
pub fn rasterize_icon(svg: &str, width: u32, height: u32) -> Result<JsBitmap, JsValue> {
    let size = TargetSize::new(width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;
    source::rasterize_svg(svg, Some(size))
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

//! Pixel encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode a bitmap into a device pixel format
//! - [`generate_header`] - Render an encoded buffer as C++ source
//!
//! # Example
//!
//! ```typescript
//! import { encode_image, generate_header } from '@pixpack/wasm';
//!
//! const buffer = encode_image(bitmap, "RGB565", true, "FLOYDSTEINBERG");
//! const source = generate_header("logo", buffer);
//! ```

use crate::types::{JsBitmap, JsPixelBuffer};
use pixpack_core::codegen::validate_identifier;
use pixpack_core::{encode, DitherMode, EncodingConfig, GeneratedImage, ImageType, PixelBuffer};
use wasm_bindgen::prelude::*;

fn encode_bitmap(
    image: &JsBitmap,
    image_type: &str,
    use_transparency: Option<bool>,
    dither: &str,
) -> pixpack_core::Result<PixelBuffer> {
    let image_type: ImageType = image_type.parse()?;
    let dither: DitherMode = dither.parse()?;
    let config = EncodingConfig::resolve(false, Some(image_type), use_transparency, dither)?;
    Ok(encode(&image.to_bitmap(), &config)?)
}

/// Encode an RGBA bitmap into a device pixel format.
///
/// # Arguments
///
/// * `image_type` - BINARY, TRANSPARENT_BINARY, GRAYSCALE, RGB565, RGB24 or RGBA
/// * `use_transparency` - Color-key transparency; `undefined` picks the format default
/// * `dither` - NONE or FLOYDSTEINBERG
///
/// # Errors
///
/// Returns an error for an unknown format or dither mode, a transparent-only
/// format forced opaque, or pixel data that does not match the dimensions.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsBitmap,
    image_type: &str,
    use_transparency: Option<bool>,
    dither: &str,
) -> Result<JsPixelBuffer, JsValue> {
    encode_bitmap(image, image_type, use_transparency, dither)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render one encoded image as a C++ header.
#[wasm_bindgen]
pub fn generate_header(id: &str, buffer: &JsPixelBuffer) -> Result<String, JsValue> {
    validate_identifier(id).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(pixpack_core::generate_header(&[GeneratedImage {
        id,
        buffer: buffer.as_buffer(),
    }]))
}

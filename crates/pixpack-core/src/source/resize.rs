//! Image resizing applied before encoding.
//!
//! All functions return new `Bitmap` instances without modifying the input.

use super::{Bitmap, FilterType, SourceError};

/// Resize a bitmap to exact dimensions.
///
/// # Errors
///
/// Returns `SourceError::InvalidFormat` for a zero target dimension, and
/// `SourceError::CorruptedFile` if the pixel buffer does not match the
/// bitmap's dimensions.
pub fn resize(
    image: &Bitmap,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Bitmap, SourceError> {
    if width == 0 || height == 0 {
        return Err(SourceError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| SourceError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(Bitmap::from_rgba_image(resized))
}

/// Shrink a bitmap to fit within `max_width` x `max_height`.
///
/// The aspect ratio is preserved and the image is never enlarged: a bitmap
/// that already fits is returned unchanged.
///
/// # Errors
///
/// Returns `SourceError::InvalidFormat` for a zero bounding box.
pub fn thumbnail(
    image: &Bitmap,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<Bitmap, SourceError> {
    if max_width == 0 || max_height == 0 {
        return Err(SourceError::InvalidFormat);
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions to fit within a box while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;
    let box_ratio = max_width as f64 / max_height as f64;

    if ratio >= box_ratio {
        // Wider than the box: constrain by width
        let new_height = (max_width as f64 / ratio).round() as u32;
        (max_width, new_height.clamp(1, max_height))
    } else {
        // Taller than the box: constrain by height
        let new_width = (max_height as f64 * ratio).round() as u32;
        (new_width.clamp(1, max_width), max_height)
    }
}

//! Raster image decoding into RGBA bitmaps.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::{Bitmap, SourceError};

/// Decode an image from bytes into an RGBA bitmap.
///
/// The container format is guessed from the content. Any format the `image`
/// crate was built with is accepted; images without an alpha channel come
/// out fully opaque.
///
/// # Errors
///
/// Returns `SourceError::InvalidFormat` if the format cannot be recognized.
/// Returns `SourceError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, SourceError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| SourceError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(SourceError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| SourceError::CorruptedFile(e.to_string()))?;

    Ok(Bitmap::from_rgba_image(img.into_rgba8()))
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `SourceError::Io` if the file cannot be read, otherwise the
/// errors of [`decode_image`].
pub fn load_image(path: &Path) -> Result<Bitmap, SourceError> {
    let bytes = std::fs::read(path).map_err(|e| SourceError::io(path, e))?;
    decode_image(&bytes)
}

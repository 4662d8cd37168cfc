//! Packed 1-bit encoding.
//!
//! Rows are padded to a whole number of bytes and the most significant bit
//! holds the leftmost pixel. A set bit marks a drawn (foreground) pixel; row
//! padding is always left clear.

use super::dither::{black_or_white, floyd_steinberg};
use crate::config::{DitherMode, EncodingConfig};
use crate::luminance::{luma_is_light, luma_u8};
use crate::source::Bitmap;

/// Row width in pixels after padding to a byte boundary.
#[inline]
pub fn padded_width(width: u32) -> usize {
    (width as usize).div_ceil(8) * 8
}

/// Convert to black (0) or white (255) per pixel, ignoring alpha.
fn to_monochrome(bitmap: &Bitmap, dither: DitherMode) -> Vec<u8> {
    match dither {
        DitherMode::None => bitmap
            .rgba()
            .map(|[r, g, b, _]| if luma_is_light(r, g, b) { 255 } else { 0 })
            .collect(),
        DitherMode::FloydSteinberg => {
            let values: Vec<f32> = bitmap
                .rgba()
                .map(|[r, g, b, _]| f32::from(luma_u8(r, g, b)))
                .collect();
            floyd_steinberg(
                &values,
                bitmap.width as usize,
                bitmap.height as usize,
                black_or_white,
            )
        }
    }
}

pub(super) fn encode(bitmap: &Bitmap, config: &EncodingConfig) -> Vec<u8> {
    let width = bitmap.width as usize;
    let height = bitmap.height as usize;
    let stride = padded_width(bitmap.width);
    let mut data = vec![0u8; height * stride / 8];

    // Alpha only takes over when the bitmap actually has transparent pixels;
    // a fully opaque bitmap is thresholded even with transparency enabled.
    let has_alpha = config.use_transparency && {
        let has_alpha = bitmap.has_alpha();
        tracing::debug!("Has alpha: {}", has_alpha);
        has_alpha
    };

    let drawn: Vec<bool> = if has_alpha {
        bitmap.rgba().map(|[_, _, _, a]| a != 0).collect()
    } else {
        to_monochrome(bitmap, config.dither)
            .into_iter()
            .map(|v| v == 0)
            .collect()
    };

    for y in 0..height {
        for x in 0..width {
            if !drawn[y * width + x] {
                continue;
            }
            let pos = x + y * stride;
            data[pos / 8] |= 0x80 >> (pos % 8);
        }
    }

    data
}

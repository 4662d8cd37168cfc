//! 8-bit luminance encoding with a color-key sentinel.

use super::dither::{floyd_steinberg, nearest_level};
use super::ALPHA_THRESHOLD;
use crate::config::{DitherMode, EncodingConfig};
use crate::luminance::{luma_f32, luma_u8};
use crate::source::Bitmap;

/// Luminance reserved to mean "transparent".
pub const GRAYSCALE_SENTINEL: u8 = 1;

pub(super) fn encode(bitmap: &Bitmap, config: &EncodingConfig) -> Vec<u8> {
    let luma: Vec<u8> = match config.dither {
        DitherMode::None => bitmap.rgba().map(|[r, g, b, _]| luma_u8(r, g, b)).collect(),
        DitherMode::FloydSteinberg => {
            let values: Vec<f32> = bitmap.rgba().map(|[r, g, b, _]| luma_f32(r, g, b)).collect();
            floyd_steinberg(
                &values,
                bitmap.width as usize,
                bitmap.height as usize,
                nearest_level,
            )
        }
    };

    if !config.use_transparency {
        return luma;
    }

    luma.into_iter()
        .zip(bitmap.rgba())
        .map(|(g, [_, _, _, a])| {
            if a < ALPHA_THRESHOLD {
                GRAYSCALE_SENTINEL
            } else if g == GRAYSCALE_SENTINEL {
                0
            } else {
                g
            }
        })
        .collect()
}

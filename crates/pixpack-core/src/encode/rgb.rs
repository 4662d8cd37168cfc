//! Full-color encodings: RGBA8888, RGB888 and big-endian RGB565.
//!
//! RGB24 and RGB565 have no alpha channel, so transparency reserves one
//! color as a key. A pixel whose own color equals the key is nudged to the
//! neighbouring value first; only then are transparent pixels forced onto
//! the key, so an opaque pixel can never read back as transparent.

use super::ALPHA_THRESHOLD;
use crate::config::EncodingConfig;
use crate::source::Bitmap;

/// RGB24 color reserved to mean "transparent".
pub const RGB24_SENTINEL: [u8; 3] = [0, 0, 1];

/// Packed RGB565 value reserved to mean "transparent".
pub const RGB565_SENTINEL: u16 = 1;

/// Pack 8-bit channels into RGB565 by truncation.
#[inline]
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

pub(super) fn encode_rgba(bitmap: &Bitmap) -> Vec<u8> {
    bitmap.pixels.clone()
}

pub(super) fn encode_rgb24(bitmap: &Bitmap, config: &EncodingConfig) -> Vec<u8> {
    let mut data = Vec::with_capacity(bitmap.pixel_count() * 3);

    for [r, g, b, a] in bitmap.rgba() {
        let mut rgb = [r, g, b];
        if config.use_transparency {
            if rgb == RGB24_SENTINEL {
                rgb = [0, 0, 0];
            }
            if a < ALPHA_THRESHOLD {
                rgb = RGB24_SENTINEL;
            }
        }
        data.extend_from_slice(&rgb);
    }

    data
}

pub(super) fn encode_rgb565(bitmap: &Bitmap, config: &EncodingConfig) -> Vec<u8> {
    let mut data = Vec::with_capacity(bitmap.pixel_count() * 2);

    for [r, g, b, a] in bitmap.rgba() {
        let mut rgb = pack_rgb565(r, g, b);
        if config.use_transparency {
            if rgb == RGB565_SENTINEL {
                rgb = 0;
            }
            if a < ALPHA_THRESHOLD {
                rgb = RGB565_SENTINEL;
            }
        }
        data.extend_from_slice(&rgb.to_be_bytes());
    }

    data
}
